//! DriftDetector: compares the contract store against scanned files.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::detections::{convention_mismatches, surfaced_entities, undeclared_accesses};
use super::field_mismatch::FieldMatcher;
use super::types::{Detection, DetectionType, Location, Violation};
use super::view::FileView;
use crate::context::AnalysisContext;
use crate::contracts::Contract;
use crate::naming::EntityVariants;
use crate::scanner::{related_to, ReadFailure, ScanOutput, Scanner, SourceFile};

/// Output of one detection run. Built fresh per run, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftResult {
    /// Sorted by file, line, expected field.
    pub violations: Vec<Violation>,
    /// Sorted by type, then entity.
    pub detections: Vec<Detection>,
    pub read_failures: Vec<ReadFailure>,
    pub files_scanned: usize,
}

struct ContractRules<'a> {
    contract: &'a Contract,
    matcher: FieldMatcher,
}

impl ContractRules<'_> {
    fn entity(&self) -> &EntityVariants {
        self.matcher.entity()
    }
}

/// Everything one file contributes. Indices refer to `DriftDetector::rules`.
#[derive(Default)]
struct FileFindings {
    violations: Vec<Violation>,
    related: Vec<usize>,
    undeclared: Vec<(usize, String, Location)>,
    conventions: Vec<(usize, String, String, Location)>,
    surfaced: Vec<(String, Location)>,
}

pub struct DriftDetector<'a> {
    ctx: &'a AnalysisContext,
    rules: Vec<ContractRules<'a>>,
}

impl<'a> DriftDetector<'a> {
    pub fn new(ctx: &'a AnalysisContext) -> Self {
        let rules = ctx
            .contracts
            .all()
            .map(|(_, contract)| ContractRules {
                contract,
                matcher: FieldMatcher::new(contract, &ctx.config.analysis),
            })
            .collect();
        Self { ctx, rules }
    }

    /// Scan the context root with the configured scanner, then detect.
    pub fn run(&self) -> DriftResult {
        let scan = Scanner::new(&self.ctx.config.scan).scan(&self.ctx.root);
        self.detect(&scan)
    }

    /// Detect drift over an existing scan. Files are processed in parallel;
    /// every output list is sorted afterwards.
    pub fn detect(&self, scan: &ScanOutput) -> DriftResult {
        let findings: Vec<FileFindings> =
            scan.files.par_iter().map(|f| self.examine(f)).collect();

        let mut violations = Vec::new();
        let mut related_counts = vec![0usize; self.rules.len()];
        let mut undeclared: BTreeMap<usize, Vec<(String, Location)>> = BTreeMap::new();
        let mut conventions: BTreeMap<usize, Vec<(String, String, Location)>> = BTreeMap::new();
        let mut surfaced: BTreeMap<String, Vec<Location>> = BTreeMap::new();

        for f in findings {
            violations.extend(f.violations);
            for i in f.related {
                related_counts[i] += 1;
            }
            for (i, field, loc) in f.undeclared {
                undeclared.entry(i).or_default().push((field, loc));
            }
            for (i, field, rendering, loc) in f.conventions {
                conventions.entry(i).or_default().push((field, rendering, loc));
            }
            for (name, loc) in f.surfaced {
                surfaced.entry(name).or_default().push(loc);
            }
        }

        violations.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.expected.cmp(&b.expected))
                .then_with(|| a.entity.cmp(&b.entity))
        });
        violations.dedup_by(|b, a| a.location == b.location && a.expected == b.expected);

        let mut detections = Vec::new();
        detections.extend(self.missing(surfaced));
        detections.extend(self.outdated(undeclared));
        detections.extend(self.unused(&related_counts));
        detections.extend(self.mismatched(conventions));
        detections.sort_by(|a, b| {
            a.detection_type
                .cmp(&b.detection_type)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        detections.dedup_by(|b, a| a.detection_type == b.detection_type && a.entity == b.entity);

        tracing::info!(
            files = scan.files.len(),
            contracts = self.rules.len(),
            violations = violations.len(),
            detections = detections.len(),
            "drift detection complete"
        );

        DriftResult {
            violations,
            detections,
            read_failures: scan.failures.clone(),
            files_scanned: scan.files.len(),
        }
    }

    fn examine(&self, file: &SourceFile) -> FileFindings {
        let view = FileView::new(file);
        let analysis = &self.ctx.config.analysis;
        let char_window = analysis.effective_char_window();
        let bidirectional = analysis.effective_bidirectional_naming();
        let mut out = FileFindings::default();

        for (i, rules) in self.rules.iter().enumerate() {
            let entity = rules.entity();
            let Some(rule) =
                related_to(&view.name_lower, &file.content, &view.content_lower, entity)
            else {
                continue;
            };
            tracing::trace!(file = %file.relative, entity = %entity.name, rule = %rule, "related");
            out.related.push(i);
            out.violations.extend(rules.matcher.check(&view));

            for hit in undeclared_accesses(&view, rules.contract, entity, char_window) {
                out.undeclared
                    .push((i, hit.field, Location::new(file.relative.clone(), hit.line)));
            }
            for hit in convention_mismatches(&view, rules.contract, bidirectional) {
                out.conventions.push((
                    i,
                    hit.field,
                    hit.rendering,
                    Location::new(file.relative.clone(), hit.line),
                ));
            }
        }

        for entity in surfaced_entities(&view) {
            out.surfaced
                .push((entity.name, Location::new(file.relative.clone(), entity.line)));
        }
        out
    }

    fn has_contract(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.entity().names(name))
    }

    fn evidence(&self, mut locations: Vec<Location>) -> Vec<Location> {
        locations.sort();
        locations.dedup();
        locations.truncate(self.ctx.config.analysis.effective_max_evidence());
        locations
    }

    fn missing(&self, surfaced: BTreeMap<String, Vec<Location>>) -> Vec<Detection> {
        surfaced
            .into_iter()
            .filter(|(name, _)| !self.has_contract(name))
            .map(|(name, locations)| Detection {
                detection_type: DetectionType::Missing,
                message: format!("`{name}` is used in code but has no contract"),
                action: format!("Add a `{name}` contract describing its fields"),
                evidence: self.evidence(locations),
                fields: None,
                entity: name,
            })
            .collect()
    }

    fn outdated(&self, undeclared: BTreeMap<usize, Vec<(String, Location)>>) -> Vec<Detection> {
        undeclared
            .into_iter()
            .map(|(i, hits)| {
                let entity = self.rules[i].contract.name.clone();
                let mut fields: Vec<String> = hits.iter().map(|(f, _)| f.clone()).collect();
                fields.sort();
                fields.dedup();
                let locations = hits.into_iter().map(|(_, loc)| loc).collect();
                Detection {
                    detection_type: DetectionType::Outdated,
                    message: format!(
                        "Code reads {} field(s) of `{entity}` that its contract does not declare: {}",
                        fields.len(),
                        fields.join(", ")
                    ),
                    action: format!(
                        "Add the fields to the `{entity}` contract or drop the stale references"
                    ),
                    evidence: self.evidence(locations),
                    fields: Some(fields),
                    entity,
                }
            })
            .collect()
    }

    fn unused(&self, related_counts: &[usize]) -> Vec<Detection> {
        self.rules
            .iter()
            .zip(related_counts)
            .filter(|(_, count)| **count == 0)
            .map(|(rules, _)| {
                let entity = rules.contract.name.clone();
                Detection {
                    detection_type: DetectionType::Unused,
                    message: format!("Contract `{entity}` is not referenced by any scanned file"),
                    action: format!(
                        "Remove the `{entity}` contract or check that its code is in scope"
                    ),
                    evidence: Vec::new(),
                    fields: None,
                    entity,
                }
            })
            .collect()
    }

    fn mismatched(
        &self,
        conventions: BTreeMap<usize, Vec<(String, String, Location)>>,
    ) -> Vec<Detection> {
        conventions
            .into_iter()
            .map(|(i, hits)| {
                let entity = self.rules[i].contract.name.clone();
                let mut pairs: Vec<(String, String)> =
                    hits.iter().map(|(f, r, _)| (f.clone(), r.clone())).collect();
                pairs.sort();
                pairs.dedup();
                let rendered: Vec<String> =
                    pairs.iter().map(|(f, r)| format!("{r} ({f})")).collect();
                let locations = hits.into_iter().map(|(_, _, loc)| loc).collect();
                Detection {
                    detection_type: DetectionType::Mismatch,
                    message: format!(
                        "`{entity}` fields appear under the other naming convention: {}",
                        rendered.join(", ")
                    ),
                    action: "Use the contract spelling or map names explicitly at the boundary"
                        .to_string(),
                    evidence: self.evidence(locations),
                    fields: Some(pairs.into_iter().map(|(f, _)| f).collect()),
                    entity,
                }
            })
            .collect()
    }
}
