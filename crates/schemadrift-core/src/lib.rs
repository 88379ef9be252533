//! schemadrift-core: shared foundation for the contract drift analyzer.
//!
//! - Errors: one `thiserror` enum per subsystem plus stable error codes
//! - Config: TOML-based layered configuration
//! - Tracing: `tracing-subscriber` setup driven by `SCHEMADRIFT_LOG`
//! - Types: collection aliases used across the analysis crate

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::SchemaDriftConfig;
pub use errors::{AnalysisError, ConfigError, ContractError, ErrorCode, ScanError};
