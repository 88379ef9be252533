//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Extensions scanned for contract usage when none are configured.
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "sql", "prisma"];

/// Directories never descended into when none are configured.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    ".next",
    "coverage",
    "target",
];

/// Configuration for the usage scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to include (without the leading dot).
    pub include_extensions: Vec<String>,
    /// Directory names or gitignore-style patterns pruned before descent.
    pub exclude_dirs: Vec<String>,
    /// Skip dot-directories. Default: true.
    pub skip_hidden: Option<bool>,
    /// Maximum file size in bytes. Default: 2 MiB.
    pub max_file_size: Option<u64>,
    /// Worker threads for file reads (0 = rayon default). Default: 0.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective include list, normalised to lowercase without dots.
    pub fn effective_include_extensions(&self) -> Vec<String> {
        if self.include_extensions.is_empty() {
            DEFAULT_INCLUDE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            normalize_extensions(&self.include_extensions)
        }
    }

    /// Returns the effective exclusion list.
    pub fn effective_exclude_dirs(&self) -> Vec<String> {
        if self.exclude_dirs.is_empty() {
            DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            self.exclude_dirs.clone()
        }
    }

    pub fn effective_skip_hidden(&self) -> bool {
        self.skip_hidden.unwrap_or(true)
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(2 * 1024 * 1024)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}

/// Strip leading dots and lowercase, so `.TS` and `ts` are the same entry.
pub fn normalize_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_code_and_schema_files() {
        let config = ScanConfig::default();
        let exts = config.effective_include_extensions();
        assert!(exts.contains(&"tsx".to_string()));
        assert!(exts.contains(&"prisma".to_string()));
        assert!(config.effective_exclude_dirs().contains(&"node_modules".to_string()));
        assert!(config.effective_skip_hidden());
    }

    #[test]
    fn extensions_are_normalized() {
        let config = ScanConfig {
            include_extensions: vec![".TS".into(), " sql ".into(), ".".into()],
            ..Default::default()
        };
        assert_eq!(config.effective_include_extensions(), vec!["ts", "sql"]);
    }
}
