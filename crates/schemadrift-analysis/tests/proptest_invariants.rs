//! Property-based tests for scoring, risk and planning invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - compliance score bounds and monotone degradation
//!   - per-file risk monotone in reference count, database always HIGH
//!   - aggregate risk never lowered by adding a database file
//!   - execution plan phase order, numbering and closing validation step

use proptest::prelude::*;

use schemadrift_analysis::drift::{Location, Severity, Violation};
use schemadrift_analysis::impact::{aggregate_risk, FileImpact, FileRole, RiskLevel, RiskThresholds};
use schemadrift_analysis::planner::{plan, Phase, VALIDATION_TARGET};
use schemadrift_analysis::report::compliance_score;
use schemadrift_core::types::collections::SmallVec3;

// ---- Strategies ----

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Error), Just(Severity::Warning)]
}

fn role() -> impl Strategy<Value = FileRole> {
    prop::sample::select(FileRole::ALL.to_vec())
}

fn violation(line: u32, severity: Severity) -> Violation {
    Violation {
        entity: "User".into(),
        location: Location::new("src/a.ts", line as usize),
        severity,
        message: String::new(),
        expected: "userId".into(),
        actual: "user_id".into(),
        suggestion: String::new(),
    }
}

fn file_impact(index: usize, role: FileRole, references: u32) -> FileImpact {
    FileImpact {
        path: format!("f{index}"),
        role,
        reference_count: references,
        risk_level: RiskThresholds::default().file_risk(role, references),
        previews: SmallVec3::new(),
    }
}

fn impacts() -> impl Strategy<Value = Vec<FileImpact>> {
    prop::collection::vec((role(), 1u32..40), 0..20).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (role, refs))| file_impact(i, role, refs))
            .collect()
    })
}

// ---- Compliance ----

proptest! {
    #[test]
    fn prop_score_bounded(sev in prop::collection::vec(severity(), 0..40)) {
        let violations: Vec<Violation> =
            sev.iter().enumerate().map(|(i, s)| violation(i as u32 + 1, *s)).collect();
        let score = compliance_score(&violations);
        prop_assert!(score <= 100);
    }

    /// Adding a violation never raises the score.
    #[test]
    fn prop_score_monotone_degradation(
        sev in prop::collection::vec(severity(), 0..30),
        extra in severity()
    ) {
        let mut violations: Vec<Violation> =
            sev.iter().enumerate().map(|(i, s)| violation(i as u32 + 1, *s)).collect();
        let before = compliance_score(&violations);
        violations.push(violation(999, extra));
        let after = compliance_score(&violations);
        prop_assert!(after <= before, "score rose from {} to {}", before, after);
    }
}

// ---- Risk ----

proptest! {
    #[test]
    fn prop_file_risk_monotone_in_references(role in role(), a in 0u32..50, b in 0u32..50) {
        let t = RiskThresholds::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(t.file_risk(role, lo) <= t.file_risk(role, hi));
    }

    #[test]
    fn prop_database_always_high(refs in 0u32..1000) {
        prop_assert_eq!(RiskThresholds::default().file_risk(FileRole::Database, refs), RiskLevel::High);
    }

    /// Adding one database file never lowers the aggregate.
    #[test]
    fn prop_aggregate_monotone_with_database_file(files in impacts(), refs in 1u32..40) {
        let before = aggregate_risk(files.iter().map(|f| f.risk_level));
        let mut extended = files.clone();
        extended.push(file_impact(files.len(), FileRole::Database, refs));
        let after = aggregate_risk(extended.iter().map(|f| f.risk_level));
        prop_assert!(after >= before);
        prop_assert_eq!(after, RiskLevel::High);
    }
}

// ---- Planning ----

proptest! {
    #[test]
    fn prop_plan_order_and_numbering(files in impacts()) {
        let steps = plan(&files);

        let last = steps.last().expect("validation step");
        prop_assert_eq!(&last.files, &vec![VALIDATION_TARGET.to_string()]);
        prop_assert!(last.automated);
        prop_assert_eq!(last.risk_level, RiskLevel::Low);

        for (i, step) in steps.iter().enumerate() {
            prop_assert_eq!(step.sequence as usize, i + 1);
        }

        // phases of the file steps are strictly increasing
        let phases: Vec<Phase> = steps[..steps.len() - 1]
            .iter()
            .map(|s| {
                let first = files.iter().find(|f| f.path == s.files[0]).expect("planned file");
                Phase::for_role(first.role)
            })
            .collect();
        prop_assert!(phases.windows(2).all(|w| w[0] < w[1]));

        // every file is planned exactly once
        let planned: usize = steps[..steps.len() - 1].iter().map(|s| s.files.len()).sum();
        prop_assert_eq!(planned, files.len());

        // only the database step is manual
        for (step, phase) in steps.iter().zip(&phases) {
            prop_assert_eq!(step.automated, *phase != Phase::Database);
        }
    }
}
