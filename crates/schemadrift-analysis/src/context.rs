//! Explicit per-invocation context shared by every analysis component.

use std::path::{Path, PathBuf};

use schemadrift_core::config::SchemaDriftConfig;
use schemadrift_core::errors::ContractError;

use crate::contracts::{ContractStore, DEFAULT_CONTRACT_PATHS};

/// Root, contracts and configuration for one run. Built once, then only
/// borrowed; nothing in it changes while a scan is in flight.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub root: PathBuf,
    pub contracts: ContractStore,
    pub config: SchemaDriftConfig,
}

impl AnalysisContext {
    pub fn new(root: impl Into<PathBuf>, contracts: ContractStore, config: SchemaDriftConfig) -> Self {
        Self {
            root: root.into(),
            contracts,
            config,
        }
    }

    /// Load the contract store for `root` using the configured search order.
    /// Fails only when a contract source exists but is broken.
    pub fn load(root: impl Into<PathBuf>, config: SchemaDriftConfig) -> Result<Self, ContractError> {
        let root = root.into();
        let candidates = contract_candidates(&root, &config);
        let contracts = ContractStore::load_first(&candidates)?;
        Ok(Self::new(root, contracts, config))
    }
}

/// Contract source candidates: configured paths, else the built-in order.
pub fn contract_candidates(root: &Path, config: &SchemaDriftConfig) -> Vec<PathBuf> {
    if config.analysis.contract_paths.is_empty() {
        DEFAULT_CONTRACT_PATHS.iter().map(|p| root.join(p)).collect()
    } else {
        config
            .analysis
            .contract_paths
            .iter()
            .map(|p| root.join(p))
            .collect()
    }
}
