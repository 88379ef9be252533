//! Rename blast-radius simulation.

pub mod analyzer;
pub mod role;
pub mod shapes;
pub mod types;

pub use analyzer::BlastRadiusAnalyzer;
pub use role::FileRole;
pub use shapes::{find_usages, MatchShape, ShapeSet, UsageMatch};
pub use types::{aggregate_risk, FileImpact, PreviewChange, RefactoringImpact, RiskLevel, RiskThresholds};
