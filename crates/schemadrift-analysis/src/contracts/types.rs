//! Contract types: entities, field descriptors, on-disk document shape.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A declared entity schema. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Entity name, e.g. `User`.
    pub name: String,
    /// Field name -> type descriptor.
    pub schema: BTreeMap<String, FieldType>,
    /// Example payloads, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<serde_json::Value>,
}

impl Contract {
    pub fn has_field(&self, field: &str) -> bool {
        self.schema.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(String::as_str)
    }
}

/// A field's type descriptor: either a bare type name (`string`, `number`)
/// or a structured descriptor kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Named(String),
    Structured(serde_json::Value),
}

impl FieldType {
    /// Short human-readable rendering for report messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::Structured(value) => value
                .get("type")
                .and_then(|t| t.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        }
    }
}

/// Serialization format of a contract source, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractFormat {
    Yaml,
    Json,
}

impl ContractFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// On-disk shape: `{ contracts: { <Entity>: { schema: {...}, examples? } } }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContractDocument {
    #[serde(default)]
    pub contracts: Option<BTreeMap<String, Option<ContractEntry>>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContractEntry {
    #[serde(default)]
    pub schema: Option<BTreeMap<String, FieldType>>,
    #[serde(default)]
    pub examples: Option<serde_json::Value>,
}
