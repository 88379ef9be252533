//! Drift analysis configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for contract loading and drift detection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lines above/below a hit searched for the entity name. Default: 5.
    pub line_window: Option<usize>,
    /// Characters around a field access searched for the entity name. Default: 100.
    pub char_window: Option<usize>,
    /// Check naming drift in both directions (camel->snake and snake->camel). Default: true.
    pub bidirectional_naming: Option<bool>,
    /// Contract source candidates relative to the root, tried in order.
    /// Empty means the built-in search order.
    pub contract_paths: Vec<String>,
    /// Extra wrong-name aliases per contract field, merged with the built-in table.
    pub field_aliases: BTreeMap<String, Vec<String>>,
    /// Evidence locations kept per detection. Default: 10.
    pub max_evidence: Option<usize>,
}

impl AnalysisConfig {
    pub fn effective_line_window(&self) -> usize {
        self.line_window.unwrap_or(5)
    }

    pub fn effective_char_window(&self) -> usize {
        self.char_window.unwrap_or(100)
    }

    pub fn effective_bidirectional_naming(&self) -> bool {
        self.bidirectional_naming.unwrap_or(true)
    }

    pub fn effective_max_evidence(&self) -> usize {
        self.max_evidence.unwrap_or(10)
    }
}
