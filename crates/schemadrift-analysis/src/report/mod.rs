//! Report assembly: scored, sorted summaries for callers to serialize.

pub mod compliance;
pub mod detections;
pub mod refactoring;

pub use compliance::{compliance_score, ComplianceReport, ComplianceSummary, NO_CONTRACTS_SUMMARY};
pub use detections::DetectionReport;
pub use refactoring::{RefactoringReport, TotalImpact};
