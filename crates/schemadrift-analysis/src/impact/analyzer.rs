//! BlastRadiusAnalyzer: every file that textually references a field.
//!
//! No entity scoping is applied when collecting files. Missing a file breaks
//! the rename silently, an extra file only costs a review.

use std::path::PathBuf;

use rayon::prelude::*;
use regex::{NoExpand, Regex};
use schemadrift_core::types::collections::SmallVec3;

use super::role::FileRole;
use super::shapes::{find_usages, ShapeSet};
use super::types::{
    aggregate_risk, estimate_minutes, FileImpact, PreviewChange, RefactoringImpact, RiskThresholds,
};
use crate::context::AnalysisContext;
use crate::drift::field_mismatch::whole_word;
use crate::naming::is_identifier;
use crate::planner::{dependency_chain, plan};
use crate::scanner::{ReadFailure, ScanOutput, Scanner, SourceFile};

pub struct BlastRadiusAnalyzer<'a> {
    ctx: &'a AnalysisContext,
    thresholds: RiskThresholds,
}

impl<'a> BlastRadiusAnalyzer<'a> {
    pub fn new(ctx: &'a AnalysisContext) -> Self {
        Self {
            ctx,
            thresholds: RiskThresholds::from_config(&ctx.config.impact),
        }
    }

    /// Scan the impact roots plus the contract source.
    pub fn scan(&self) -> ScanOutput {
        let impact = &self.ctx.config.impact;
        let scanner =
            Scanner::with_extensions(&self.ctx.config.scan, impact.effective_include_extensions());
        let roots: Vec<PathBuf> = impact
            .effective_roots()
            .iter()
            .map(|r| self.ctx.root.join(r))
            .collect();
        let extra: Vec<PathBuf> = self
            .ctx
            .contracts
            .source()
            .map(PathBuf::from)
            .into_iter()
            .collect();
        scanner.scan_roots(&self.ctx.root, &roots, &extra)
    }

    /// Simulate renaming `from_field` to `to_field` on `entity`.
    pub fn analyze(&self, from_field: &str, to_field: &str, entity: &str) -> RefactoringImpact {
        if !is_identifier(from_field) {
            tracing::debug!(from_field, "not an identifier, nothing to rename");
            return self.assemble(from_field, to_field, entity, Vec::new(), Vec::new());
        }
        let scan = self.scan();
        self.analyze_scan(&scan, from_field, to_field, entity)
    }

    /// Same as [`analyze`](Self::analyze) over an existing scan, so several
    /// renames can share one walk.
    pub fn analyze_scan(
        &self,
        scan: &ScanOutput,
        from_field: &str,
        to_field: &str,
        entity: &str,
    ) -> RefactoringImpact {
        let (Some(shapes), Some(word)) = (
            is_identifier(from_field).then(|| ShapeSet::new(from_field).ok()).flatten(),
            whole_word(from_field),
        ) else {
            return self.assemble(from_field, to_field, entity, Vec::new(), scan.failures.clone());
        };

        let mut files: Vec<FileImpact> = scan
            .files
            .par_iter()
            .filter_map(|file| self.file_impact(file, &shapes, &word, to_field))
            .collect();
        files.sort_by(|a, b| {
            b.reference_count
                .cmp(&a.reference_count)
                .then_with(|| a.path.cmp(&b.path))
        });

        self.assemble(from_field, to_field, entity, files, scan.failures.clone())
    }

    fn file_impact(
        &self,
        file: &SourceFile,
        shapes: &ShapeSet,
        word: &Regex,
        to_field: &str,
    ) -> Option<FileImpact> {
        let usages = find_usages(file, shapes);
        if usages.is_empty() {
            return None;
        }
        let role = FileRole::classify(&file.relative);
        let reference_count = usages.len() as u32;

        let max_previews = self.ctx.config.impact.effective_max_previews();
        let mut previews: SmallVec3<PreviewChange> = SmallVec3::new();
        let mut last_line = 0;
        for usage in &usages {
            if previews.len() >= max_previews {
                break;
            }
            if usage.line == last_line {
                continue;
            }
            last_line = usage.line;
            let Some(before) = file.line(usage.line as usize) else {
                continue;
            };
            previews.push(PreviewChange {
                line: usage.line,
                before: before.to_string(),
                after: word.replace_all(before, NoExpand(to_field)).into_owned(),
            });
        }

        Some(FileImpact {
            path: file.relative.clone(),
            role,
            reference_count,
            risk_level: self.thresholds.file_risk(role, reference_count),
            previews,
        })
    }

    fn assemble(
        &self,
        from_field: &str,
        to_field: &str,
        entity: &str,
        files: Vec<FileImpact>,
        skipped_files: Vec<ReadFailure>,
    ) -> RefactoringImpact {
        let risk_level = aggregate_risk(files.iter().map(|f| f.risk_level));
        let total_references = files.iter().map(|f| f.reference_count).sum();
        let estimated_minutes = estimate_minutes(
            files.len(),
            self.ctx.config.impact.effective_minutes_per_file(),
            risk_level,
        );

        tracing::info!(
            from_field,
            to_field,
            entity,
            files = files.len(),
            references = total_references,
            risk = %risk_level,
            "blast radius computed"
        );

        RefactoringImpact {
            from_field: from_field.to_string(),
            to_field: to_field.to_string(),
            entity: entity.to_string(),
            total_files: files.len(),
            total_references,
            risk_level,
            estimated_minutes,
            execution_plan: plan(&files),
            dependency_chain: dependency_chain(&files),
            files,
            skipped_files,
        }
    }
}
