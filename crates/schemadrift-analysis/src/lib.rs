//! schemadrift-analysis: contract drift detection and rename blast-radius simulation.
//!
//! Pipeline:
//! - `contracts`: load entity schemas from the first contract source found
//! - `scanner`: walk the tree, prune excluded directories, read text files
//! - `drift`: field-level violations and set-level detections
//! - `impact`: files referencing a field, their roles and risk
//! - `planner`: phase-ordered execution steps for a rename
//! - `report`: compliance, detection and refactoring summaries
//!
//! `SchemaDriftEngine` ties these together for callers that just want a report.

pub mod context;
pub mod contracts;
pub mod drift;
pub mod engine;
pub mod impact;
pub mod naming;
pub mod planner;
pub mod report;
pub mod scanner;

pub use context::AnalysisContext;
pub use contracts::{Contract, ContractStore};
pub use drift::{Detection, DetectionType, DriftDetector, DriftResult, Severity, Violation};
pub use engine::SchemaDriftEngine;
pub use impact::{BlastRadiusAnalyzer, FileImpact, FileRole, MatchShape, RefactoringImpact, RiskLevel};
pub use planner::ExecutionStep;
pub use report::{ComplianceReport, DetectionReport, RefactoringReport};
pub use scanner::{ScanOutput, Scanner};
