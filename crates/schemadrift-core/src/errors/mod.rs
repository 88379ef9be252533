//! Error handling for schemadrift.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod contract_error;
pub mod error_code;
pub mod scan_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use contract_error::ContractError;
pub use error_code::ErrorCode;
pub use scan_error::ScanError;
