//! SchemaDriftEngine: one entry point per caller request.

use std::collections::BTreeSet;
use std::path::PathBuf;

use schemadrift_core::config::{CliOverrides, SchemaDriftConfig};
use schemadrift_core::errors::AnalysisError;

use crate::context::AnalysisContext;
use crate::drift::{DriftDetector, DriftResult};
use crate::impact::{BlastRadiusAnalyzer, RefactoringImpact};
use crate::report::{ComplianceReport, DetectionReport, RefactoringReport};

/// Owns the per-invocation context. Every call runs a fresh scan; nothing
/// is cached between calls.
#[derive(Debug, Clone)]
pub struct SchemaDriftEngine {
    ctx: AnalysisContext,
}

impl SchemaDriftEngine {
    /// Load contracts for `root` with an already resolved config. A contract
    /// source that exists but does not parse aborts here, before any scan.
    pub fn open(root: impl Into<PathBuf>, config: SchemaDriftConfig) -> Result<Self, AnalysisError> {
        let ctx = AnalysisContext::load(root, config)?;
        Ok(Self { ctx })
    }

    /// Resolve layered configuration for `root`, then [`open`](Self::open).
    pub fn open_with_overrides(
        root: impl Into<PathBuf>,
        cli: Option<&CliOverrides>,
    ) -> Result<Self, AnalysisError> {
        let root = root.into();
        let config = SchemaDriftConfig::load(&root, cli)?;
        Self::open(root, config)
    }

    pub fn from_context(ctx: AnalysisContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    pub fn has_contracts(&self) -> bool {
        !self.ctx.contracts.is_empty()
    }

    /// Raw drift output: violations, detections and skipped files.
    pub fn check_drift(&self) -> DriftResult {
        DriftDetector::new(&self.ctx).run()
    }

    pub fn compliance(&self) -> ComplianceReport {
        if !self.has_contracts() {
            return ComplianceReport::no_contracts();
        }
        ComplianceReport::new(self.check_drift().violations)
    }

    pub fn detections(&self) -> DetectionReport {
        DetectionReport::new(self.check_drift().detections)
    }

    /// Both drift reports from a single scan.
    pub fn drift_reports(&self) -> (ComplianceReport, DetectionReport) {
        let result = self.check_drift();
        let compliance = if self.has_contracts() {
            ComplianceReport::new(result.violations)
        } else {
            ComplianceReport::no_contracts()
        };
        (compliance, DetectionReport::new(result.detections))
    }

    pub fn simulate_rename(&self, from_field: &str, to_field: &str, entity: &str) -> RefactoringImpact {
        BlastRadiusAnalyzer::new(&self.ctx).analyze(from_field, to_field, entity)
    }

    /// Simulate every rename that would fix a field violation:
    /// `actual -> expected`, once per (entity, actual, expected).
    pub fn suggest_renames(&self) -> RefactoringReport {
        let drift = self.check_drift();
        let renames: BTreeSet<(String, String, String)> = drift
            .violations
            .into_iter()
            .map(|v| (v.entity, v.actual, v.expected))
            .collect();
        if renames.is_empty() {
            return RefactoringReport::new(Vec::new());
        }

        let analyzer = BlastRadiusAnalyzer::new(&self.ctx);
        let scan = analyzer.scan();
        let suggestions = renames
            .iter()
            .map(|(entity, actual, expected)| analyzer.analyze_scan(&scan, actual, expected, entity))
            .collect();
        tracing::info!(patterns = renames.len(), "rename suggestions simulated");
        RefactoringReport::new(suggestions)
    }
}
