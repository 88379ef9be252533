//! Top-level schemadrift configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ImpactConfig, ScanConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "schemadrift.toml";

/// Everything schemadrift reads from `schemadrift.toml`, one table per subsystem.
///
/// Each layer overrides the ones listed below it:
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SCHEMADRIFT_*`)
/// 3. Project config (`schemadrift.toml` in project root)
/// 4. User config (`~/.schemadrift/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchemaDriftConfig {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub impact: ImpactConfig,
}

/// Values a command-line front end can force onto the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub include_extensions: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    pub scan_threads: Option<usize>,
    pub line_window: Option<usize>,
    pub char_window: Option<usize>,
    pub impact_roots: Option<Vec<String>>,
}

impl SchemaDriftConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::Parse { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Parse and validate a config held in memory.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            origin: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject zero windows, zero sizes and inverted risk thresholds.
    pub fn validate(config: &SchemaDriftConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::invalid("scan.max_file_size", "must be greater than 0"));
        }
        if config.analysis.line_window == Some(0) {
            return Err(ConfigError::invalid("analysis.line_window", "must be greater than 0"));
        }
        if config.analysis.char_window == Some(0) {
            return Err(ConfigError::invalid("analysis.char_window", "must be greater than 0"));
        }
        let medium = config.impact.effective_medium_reference_threshold();
        let high = config.impact.effective_high_reference_threshold();
        if medium >= high {
            return Err(ConfigError::invalid(
                "impact.medium_reference_threshold",
                format!("must be below impact.high_reference_threshold ({high})"),
            ));
        }
        if config.impact.minutes_per_file == Some(0) {
            return Err(ConfigError::invalid("impact.minutes_per_file", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.schemadrift/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".schemadrift").join("config.toml"))
    }

    /// Overlay one TOML file onto `config`. Keys this version does not know are skipped.
    fn merge_toml_file(config: &mut SchemaDriftConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let file_config: SchemaDriftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                origin: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut SchemaDriftConfig, other: &SchemaDriftConfig) {
        // Scan
        if !other.scan.include_extensions.is_empty() {
            base.scan.include_extensions = other.scan.include_extensions.clone();
        }
        if !other.scan.exclude_dirs.is_empty() {
            base.scan.exclude_dirs = other.scan.exclude_dirs.clone();
        }
        if other.scan.skip_hidden.is_some() {
            base.scan.skip_hidden = other.scan.skip_hidden;
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }

        // Analysis
        if other.analysis.line_window.is_some() {
            base.analysis.line_window = other.analysis.line_window;
        }
        if other.analysis.char_window.is_some() {
            base.analysis.char_window = other.analysis.char_window;
        }
        if other.analysis.bidirectional_naming.is_some() {
            base.analysis.bidirectional_naming = other.analysis.bidirectional_naming;
        }
        if !other.analysis.contract_paths.is_empty() {
            base.analysis.contract_paths = other.analysis.contract_paths.clone();
        }
        for (field, aliases) in &other.analysis.field_aliases {
            base.analysis
                .field_aliases
                .insert(field.clone(), aliases.clone());
        }
        if other.analysis.max_evidence.is_some() {
            base.analysis.max_evidence = other.analysis.max_evidence;
        }

        // Impact
        if !other.impact.roots.is_empty() {
            base.impact.roots = other.impact.roots.clone();
        }
        if !other.impact.include_extensions.is_empty() {
            base.impact.include_extensions = other.impact.include_extensions.clone();
        }
        if other.impact.high_reference_threshold.is_some() {
            base.impact.high_reference_threshold = other.impact.high_reference_threshold;
        }
        if other.impact.medium_reference_threshold.is_some() {
            base.impact.medium_reference_threshold = other.impact.medium_reference_threshold;
        }
        if other.impact.max_previews.is_some() {
            base.impact.max_previews = other.impact.max_previews;
        }
        if other.impact.minutes_per_file.is_some() {
            base.impact.minutes_per_file = other.impact.minutes_per_file;
        }
    }

    /// `SCHEMADRIFT_*` environment variables, applied after the TOML layers.
    /// Pattern: `SCHEMADRIFT_SCAN_THREADS`, `SCHEMADRIFT_ANALYSIS_LINE_WINDOW`, etc.
    /// List values are comma-separated.
    fn apply_env_overrides(config: &mut SchemaDriftConfig) {
        if let Ok(val) = std::env::var("SCHEMADRIFT_SCAN_INCLUDE_EXTENSIONS") {
            config.scan.include_extensions = split_list(&val);
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_SCAN_EXCLUDE_DIRS") {
            config.scan.exclude_dirs = split_list(&val);
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_ANALYSIS_LINE_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.line_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_ANALYSIS_CHAR_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.char_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_ANALYSIS_BIDIRECTIONAL_NAMING") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.bidirectional_naming = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCHEMADRIFT_IMPACT_ROOTS") {
            config.impact.roots = split_list(&val);
        }
    }

    /// Flags passed on the command line win over every file and env layer.
    fn apply_cli_overrides(config: &mut SchemaDriftConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.include_extensions {
            config.scan.include_extensions = v.clone();
        }
        if let Some(ref v) = cli.exclude_dirs {
            config.scan.exclude_dirs = v.clone();
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.line_window {
            config.analysis.line_window = Some(v);
        }
        if let Some(v) = cli.char_window {
            config.analysis.char_window = Some(v);
        }
        if let Some(ref v) = cli.impact_roots {
            config.impact.roots = v.clone();
        }
    }

    /// Render the effective config, e.g. for a `config show` command.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `HOME`, falling back to `USERPROFILE` on Windows.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
