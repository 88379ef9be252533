//! Rename impact (blast radius) configuration.

use serde::{Deserialize, Serialize};

use super::scan_config::normalize_extensions;

/// Conventional roots searched for references to a renamed field.
pub const DEFAULT_IMPACT_ROOTS: &[&str] = &["src", "app", "components", "types"];

/// Impact scanning also covers structured-data files, which classify as contracts.
pub const DEFAULT_IMPACT_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "sql", "prisma", "json", "yaml", "yml",
];

/// Configuration for the blast-radius analyzer and execution planner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImpactConfig {
    /// Directories (relative to the root) searched for references.
    pub roots: Vec<String>,
    /// Extensions scanned inside those roots.
    pub include_extensions: Vec<String>,
    /// References above which a file is HIGH risk. Default: 10.
    pub high_reference_threshold: Option<u32>,
    /// References above which a file is at least MEDIUM risk. Default: 3.
    pub medium_reference_threshold: Option<u32>,
    /// Line previews kept per file. Default: 3.
    pub max_previews: Option<usize>,
    /// Base minutes of effort per affected file. Default: 2.
    pub minutes_per_file: Option<u32>,
}

impl ImpactConfig {
    pub fn effective_roots(&self) -> Vec<String> {
        if self.roots.is_empty() {
            DEFAULT_IMPACT_ROOTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.roots.clone()
        }
    }

    pub fn effective_include_extensions(&self) -> Vec<String> {
        if self.include_extensions.is_empty() {
            DEFAULT_IMPACT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            normalize_extensions(&self.include_extensions)
        }
    }

    pub fn effective_high_reference_threshold(&self) -> u32 {
        self.high_reference_threshold.unwrap_or(10)
    }

    pub fn effective_medium_reference_threshold(&self) -> u32 {
        self.medium_reference_threshold.unwrap_or(3)
    }

    pub fn effective_max_previews(&self) -> usize {
        self.max_previews.unwrap_or(3)
    }

    pub fn effective_minutes_per_file(&self) -> u32 {
        self.minutes_per_file.unwrap_or(2)
    }
}
