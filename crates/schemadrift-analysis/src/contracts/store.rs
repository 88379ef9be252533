//! Contract loading: first existing candidate wins, malformed sources are fatal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use schemadrift_core::errors::ContractError;

use super::types::{Contract, ContractDocument, ContractFormat};

/// Candidate contract sources relative to the project root, in search order.
pub const DEFAULT_CONTRACT_PATHS: &[&str] = &[
    "contracts/contracts.yaml",
    "contracts/contracts.json",
    ".contracts.yaml",
    ".contracts.json",
    "contracts.yaml",
    "contracts.json",
];

/// Read-only set of contracts for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ContractStore {
    contracts: BTreeMap<String, Contract>,
    source: Option<PathBuf>,
}

impl ContractStore {
    /// An empty store: no contract source was found.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Search the default candidates under `root`.
    pub fn load(root: &Path) -> Result<Self, ContractError> {
        let candidates: Vec<PathBuf> = DEFAULT_CONTRACT_PATHS.iter().map(|p| root.join(p)).collect();
        Self::load_first(&candidates)
    }

    /// Parse the first candidate that exists. No candidate existing is not an
    /// error; a candidate that exists but cannot be read or parsed is.
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ContractError> {
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            tracing::info!(
                candidates = candidates.len(),
                "no contract source found, continuing with an empty contract set"
            );
            return Ok(Self::empty());
        };

        let format = ContractFormat::from_path(path)
            .ok_or_else(|| ContractError::UnsupportedFormat { path: path.clone() })?;
        let content = std::fs::read_to_string(path).map_err(|source| ContractError::Read {
            path: path.clone(),
            source,
        })?;

        let mut store = Self::parse(&content, format, path)?;
        store.source = Some(path.clone());
        tracing::info!(
            path = %path.display(),
            entities = store.len(),
            "loaded contract source"
        );
        Ok(store)
    }

    /// Parse contract text. `origin` is only used in error messages.
    pub fn parse(content: &str, format: ContractFormat, origin: &Path) -> Result<Self, ContractError> {
        if content.trim().is_empty() {
            return Ok(Self::empty());
        }

        let parse_error = |message: String| ContractError::Parse {
            path: origin.to_path_buf(),
            message,
        };
        let document: ContractDocument = match format {
            ContractFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ContractFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let contracts = document
            .contracts
            .unwrap_or_default()
            .into_iter()
            .map(|(name, entry)| {
                let entry = entry.unwrap_or_default();
                let contract = Contract {
                    name: name.clone(),
                    schema: entry.schema.unwrap_or_default(),
                    examples: entry.examples,
                };
                (name, contract)
            })
            .collect();

        Ok(Self {
            contracts,
            source: None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.contracts.get(name)
    }

    /// Case-insensitive lookup, used when names surface from code.
    pub fn find_ignore_case(&self, name: &str) -> Option<&Contract> {
        self.get(name).or_else(|| {
            self.contracts
                .values()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
    }

    /// All contracts, ordered by entity name.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Contract)> {
        self.contracts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// The file the store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
