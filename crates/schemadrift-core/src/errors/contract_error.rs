//! Contract source errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors raised while loading the contract source.
///
/// A missing contract file is not represented here: absence of contracts is
/// a valid state and yields an empty store.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Malformed contract source {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Cannot read contract source {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported contract format for {path}; expected .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },
}

impl ErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => error_code::CONTRACT_PARSE_ERROR,
            Self::Read { .. } => error_code::CONTRACT_READ_ERROR,
            Self::UnsupportedFormat { .. } => error_code::UNSUPPORTED_FORMAT,
        }
    }
}
