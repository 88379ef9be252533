//! Field-level violations: a contract field referenced under a wrong name
//! near the entity it belongs to.

use regex::Regex;
use schemadrift_core::config::AnalysisConfig;

use super::types::{Location, Severity, Violation};
use super::variations::{wrong_variations, WrongVariation};
use super::view::FileView;
use crate::contracts::Contract;
use crate::naming::EntityVariants;

struct CompiledVariation {
    variation: WrongVariation,
    pattern: Regex,
}

struct FieldRule {
    field: String,
    /// Whole-word match of the correct name; its presence silences the line.
    exact: Option<Regex>,
    variations: Vec<CompiledVariation>,
}

/// Precompiled wrong-variation patterns for one contract.
pub struct FieldMatcher {
    entity: EntityVariants,
    rules: Vec<FieldRule>,
    line_window: usize,
}

impl FieldMatcher {
    pub fn new(contract: &Contract, config: &AnalysisConfig) -> Self {
        let bidirectional = config.effective_bidirectional_naming();
        let rules = contract
            .fields()
            .map(|field| {
                let variations = wrong_variations(field, bidirectional, &config.field_aliases)
                    .into_iter()
                    .filter_map(|variation| {
                        let pattern = whole_word(&variation.token)?;
                        Some(CompiledVariation { variation, pattern })
                    })
                    .collect();
                FieldRule {
                    field: field.to_string(),
                    exact: whole_word(field),
                    variations,
                }
            })
            .filter(|rule| !rule.variations.is_empty())
            .collect();

        Self {
            entity: EntityVariants::new(&contract.name),
            rules,
            line_window: config.effective_line_window(),
        }
    }

    pub fn entity(&self) -> &EntityVariants {
        &self.entity
    }

    /// Violations in one file, in line order then field order. At most one
    /// per (field, line): the first variation that matches wins.
    pub fn check(&self, view: &FileView<'_>) -> Vec<Violation> {
        let spellings = self.entity.spellings();
        let loose_file = matches!(view.file.extension().as_deref(), Some("sql" | "prisma"));
        let mut out = Vec::new();

        for (index, line) in view.file.lines.iter().enumerate() {
            for rule in &self.rules {
                if rule.exact.as_ref().is_some_and(|re| re.is_match(line)) {
                    continue;
                }
                let Some(hit) = rule.variations.iter().find(|v| v.pattern.is_match(line)) else {
                    continue;
                };
                if !view.entity_near_line(index, self.line_window, &spellings) {
                    continue;
                }
                let variation = &hit.variation;
                let severity = if variation.kind.is_convention() && !loose_file {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                out.push(Violation {
                    entity: self.entity.name.clone(),
                    location: Location::new(view.file.relative.clone(), index + 1),
                    severity,
                    message: format!(
                        "{} field `{}` referenced as `{}`",
                        self.entity.name, rule.field, variation.token
                    ),
                    expected: rule.field.clone(),
                    actual: variation.token.clone(),
                    suggestion: format!("Rename `{}` to `{}`", variation.token, rule.field),
                });
            }
        }
        out
    }
}

/// `\btoken\b`; `None` for tokens regex cannot compile.
pub(crate) fn whole_word(token: &str) -> Option<Regex> {
    match Regex::new(&format!(r"\b{}\b", regex::escape(token))) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!(token, error = %e, "skipping uncompilable token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;
    use crate::contracts::FieldType;
    use crate::scanner::SourceFile;

    fn contract(name: &str, fields: &[&str]) -> Contract {
        Contract {
            name: name.to_string(),
            schema: fields
                .iter()
                .map(|f| (f.to_string(), FieldType::Named("string".into())))
                .collect::<BTreeMap<_, _>>(),
            examples: None,
        }
    }

    fn check(contract: &Contract, relative: &str, content: &str) -> Vec<Violation> {
        let file = SourceFile::new(PathBuf::from(relative), relative.into(), content.into());
        let matcher = FieldMatcher::new(contract, &AnalysisConfig::default());
        matcher.check(&FileView::new(&file))
    }

    #[test]
    fn alias_on_entity_line_is_reported_once() {
        let c = contract("User", &["userId"]);
        let v = check(&c, "src/a.ts", "const id = User.customer_id;");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].expected, "userId");
        assert_eq!(v[0].actual, "customer_id");
        assert_eq!(v[0].severity, Severity::Warning);
        assert_eq!(v[0].location.line, 1);
    }

    #[test]
    fn first_variation_per_line_wins() {
        let c = contract("User", &["userId"]);
        let v = check(&c, "src/a.ts", "user.user_id ?? user.customer_id");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].actual, "user_id");
        assert_eq!(v[0].severity, Severity::Error);
    }

    #[test]
    fn correct_name_on_line_suppresses() {
        let c = contract("Order", &["totalAmount"]);
        let v = check(&c, "src/a.ts", "order.totalAmount = order.total_amount;");
        assert!(v.is_empty());
    }

    #[test]
    fn alias_containing_field_name_is_reported() {
        let c = contract("User", &["email"]);
        let v = check(
            &c,
            "src/a.ts",
            "user.email_address\nuser.emailAddress\nuser.mail\nuser.email ?? user.mail",
        );
        let hits: Vec<(u32, &str)> =
            v.iter().map(|v| (v.location.line, v.actual.as_str())).collect();
        assert_eq!(
            hits,
            vec![(1, "email_address"), (2, "emailAddress"), (3, "mail")]
        );
    }

    #[test]
    fn whole_word_only() {
        let c = contract("Order", &["totalAmount"]);
        assert!(check(&c, "src/a.ts", "order.subtotal_amount").is_empty());
        assert!(check(&c, "src/a.ts", "const totals = order;").is_empty());
    }

    #[test]
    fn entity_must_be_within_line_window() {
        let c = contract("Order", &["totalAmount"]);
        let near = "const order = load();\n\n\n\n\nconst t = x.total_amount;";
        assert_eq!(check(&c, "src/a.ts", near).len(), 1);
        let far = "const order = load();\n\n\n\n\n\nconst t = x.total_amount;";
        assert!(check(&c, "src/a.ts", far).is_empty());
    }

    #[test]
    fn sql_hits_are_warnings() {
        let c = contract("Order", &["totalAmount"]);
        let v = check(&c, "db/orders.sql", "CREATE TABLE orders (total_amount numeric);");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].severity, Severity::Warning);
    }
}
