//! Compliance scoring over field-level violations.

use serde::{Deserialize, Serialize};

use crate::drift::{Severity, Violation};

pub const NO_CONTRACTS_SUMMARY: &str = "No contracts defined";

const ERROR_PENALTY: i64 = 10;
const WARNING_PENALTY: i64 = 5;
const MAX_EXAMPLES: usize = 5;

/// 100 minus 10 per error and 5 per warning, clamped to `0..=100`.
pub fn compliance_score(violations: &[Violation]) -> u32 {
    let penalty: i64 = violations
        .iter()
        .map(|v| match v.severity {
            Severity::Error => ERROR_PENALTY,
            Severity::Warning => WARNING_PENALTY,
        })
        .sum();
    (100 - penalty).clamp(0, 100) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    /// The first few violations, in report order.
    pub examples: Vec<Violation>,
}

impl ComplianceSummary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let errors = violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        Self {
            total: violations.len(),
            errors,
            warnings: violations.len() - errors,
            examples: violations.iter().take(MAX_EXAMPLES).cloned().collect(),
        }
    }

    pub fn render(&self) -> String {
        if self.total == 0 {
            return "No contract violations found".to_string();
        }
        let mut out = format!(
            "{} violation(s): {} error(s), {} warning(s)",
            self.total, self.errors, self.warnings
        );
        for v in &self.examples {
            out.push_str(&format!(
                "\n- {} [{}] {}: {}",
                v.location,
                v.severity.name(),
                v.message,
                v.suggestion
            ));
        }
        if self.total > self.examples.len() {
            out.push_str(&format!("\n... and {} more", self.total - self.examples.len()));
        }
        out
    }
}

/// `{ score, violations, summary }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub score: u32,
    pub violations: Vec<Violation>,
    pub summary: String,
}

impl ComplianceReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        let summary = ComplianceSummary::from_violations(&violations).render();
        Self {
            score: compliance_score(&violations),
            violations,
            summary,
        }
    }

    /// No contract source was found. Zero score, not a failure.
    pub fn no_contracts() -> Self {
        Self {
            score: 0,
            violations: Vec::new(),
            summary: NO_CONTRACTS_SUMMARY.to_string(),
        }
    }
}
