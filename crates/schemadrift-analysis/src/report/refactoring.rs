//! Aggregated refactoring impact report.

use serde::{Deserialize, Serialize};

use crate::impact::{RefactoringImpact, RiskLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalImpact {
    pub patterns: usize,
    pub total_files: usize,
    pub total_references: u32,
    pub high_risk_changes: usize,
}

/// `{ suggestions, totalImpact }`; largest blast radius first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactoringReport {
    pub suggestions: Vec<RefactoringImpact>,
    pub total_impact: TotalImpact,
}

impl RefactoringReport {
    pub fn new(mut suggestions: Vec<RefactoringImpact>) -> Self {
        // stable: equal totals keep caller order
        suggestions.sort_by(|a, b| b.total_references.cmp(&a.total_references));
        let total_impact = TotalImpact {
            patterns: suggestions.len(),
            total_files: suggestions.iter().map(|s| s.total_files).sum(),
            total_references: suggestions.iter().map(|s| s.total_references).sum(),
            high_risk_changes: suggestions
                .iter()
                .filter(|s| s.risk_level == RiskLevel::High)
                .count(),
        };
        Self {
            suggestions,
            total_impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impact(from: &str, files: usize, refs: u32, risk: RiskLevel) -> RefactoringImpact {
        RefactoringImpact {
            from_field: from.into(),
            to_field: "x".into(),
            entity: "E".into(),
            total_files: files,
            total_references: refs,
            risk_level: risk,
            estimated_minutes: 0,
            files: Vec::new(),
            execution_plan: Vec::new(),
            dependency_chain: Vec::new(),
            skipped_files: Vec::new(),
        }
    }

    #[test]
    fn sorts_descending_and_totals() {
        let report = RefactoringReport::new(vec![
            impact("a", 1, 2, RiskLevel::Low),
            impact("b", 3, 9, RiskLevel::High),
            impact("c", 2, 5, RiskLevel::High),
        ]);
        let order: Vec<&str> = report.suggestions.iter().map(|s| s.from_field.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(
            report.total_impact,
            TotalImpact {
                patterns: 3,
                total_files: 6,
                total_references: 16,
                high_risk_changes: 2,
            }
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(RefactoringReport::new(Vec::new())).unwrap();
        assert_eq!(json["totalImpact"]["highRiskChanges"], 0);
    }
}
