//! Top-level errors surfaced by the engine facade.

use super::error_code::ErrorCode;
use super::{ConfigError, ContractError};

/// The only failures that reach a caller: broken configuration and broken
/// contract sources. File-level problems are recorded, not raised.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Contract(e) => e.error_code(),
        }
    }
}
