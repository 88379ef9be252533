//! Blast-radius result types and risk scoring.

use schemadrift_core::config::ImpactConfig;
use schemadrift_core::types::collections::SmallVec3;
use serde::{Deserialize, Serialize};

use super::role::FileRole;
use crate::planner::ExecutionStep;
use crate::scanner::ReadFailure;

/// Qualitative risk. Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Effort multiplier applied to the per-file estimate.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.5,
            Self::High => 2.0,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference-count thresholds for per-file risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    /// Counts strictly above this are HIGH.
    pub high: u32,
    /// Counts strictly above this are at least MEDIUM.
    pub medium: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { high: 10, medium: 3 }
    }
}

impl RiskThresholds {
    pub fn from_config(config: &ImpactConfig) -> Self {
        Self {
            high: config.effective_high_reference_threshold(),
            medium: config.effective_medium_reference_threshold(),
        }
    }

    /// Per-file risk. Database files are always HIGH; otherwise the level
    /// never decreases as `references` grows.
    pub fn file_risk(&self, role: FileRole, references: u32) -> RiskLevel {
        if role == FileRole::Database || references > self.high {
            RiskLevel::High
        } else if references > self.medium {
            RiskLevel::Medium
        } else if matches!(role, FileRole::Contract | FileRole::Type) {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }
}

/// Highest level present, LOW for an empty input.
pub fn aggregate_risk(levels: impl IntoIterator<Item = RiskLevel>) -> RiskLevel {
    levels.into_iter().max().unwrap_or_default()
}

/// `ceil(files * minutes_per_file * multiplier(risk))`.
pub fn estimate_minutes(files: usize, minutes_per_file: u32, risk: RiskLevel) -> u32 {
    (files as f64 * minutes_per_file as f64 * risk.multiplier()).ceil() as u32
}

/// A before/after rendering of one line. Never applied to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewChange {
    pub line: u32,
    pub before: String,
    pub after: String,
}

/// One file in a rename's blast radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileImpact {
    pub path: String,
    pub role: FileRole,
    /// Occurrences across all six shapes; overlapping shapes count twice.
    pub reference_count: u32,
    pub risk_level: RiskLevel,
    pub previews: SmallVec3<PreviewChange>,
}

/// Simulated outcome of renaming `from_field` to `to_field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringImpact {
    pub from_field: String,
    pub to_field: String,
    pub entity: String,
    pub total_files: usize,
    pub total_references: u32,
    pub risk_level: RiskLevel,
    pub estimated_minutes: u32,
    /// Reference count descending, then path.
    pub files: Vec<FileImpact>,
    pub execution_plan: Vec<ExecutionStep>,
    pub dependency_chain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_files: Vec<ReadFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_risk_rules() {
        let t = RiskThresholds::default();
        assert_eq!(t.file_risk(FileRole::Database, 1), RiskLevel::High);
        assert_eq!(t.file_risk(FileRole::Component, 11), RiskLevel::High);
        assert_eq!(t.file_risk(FileRole::Component, 10), RiskLevel::Medium);
        assert_eq!(t.file_risk(FileRole::Contract, 4), RiskLevel::Medium);
        assert_eq!(t.file_risk(FileRole::Contract, 3), RiskLevel::Low);
        assert_eq!(t.file_risk(FileRole::Type, 1), RiskLevel::Low);
        assert_eq!(t.file_risk(FileRole::Component, 1), RiskLevel::Medium);
        assert_eq!(t.file_risk(FileRole::Test, 2), RiskLevel::Medium);
    }

    #[test]
    fn aggregate_and_estimate() {
        assert_eq!(aggregate_risk([]), RiskLevel::Low);
        assert_eq!(aggregate_risk([RiskLevel::Low, RiskLevel::Medium]), RiskLevel::Medium);
        assert_eq!(estimate_minutes(3, 2, RiskLevel::Medium), 9);
        assert_eq!(estimate_minutes(1, 2, RiskLevel::High), 4);
        assert_eq!(estimate_minutes(0, 2, RiskLevel::High), 0);
    }

    #[test]
    fn risk_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }
}
