//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Failures while reading, parsing or checking `schemadrift.toml` layers.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("config key `{field}` {message}")]
    Invalid { field: String, message: String },

    #[error("config could not be rendered as TOML: {0}")]
    Render(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => error_code::CONFIG_READ_ERROR,
            Self::Parse { .. } | Self::Render(_) => error_code::CONFIG_PARSE_ERROR,
            Self::Invalid { .. } => error_code::CONFIG_INVALID,
        }
    }
}
