//! Configuration system for schemadrift.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod impact_config;
pub mod scan_config;
pub mod schemadrift_config;

pub use analysis_config::AnalysisConfig;
pub use impact_config::ImpactConfig;
pub use scan_config::ScanConfig;
pub use schemadrift_config::{CliOverrides, SchemaDriftConfig};
