//! Entity-to-file association rules.
//!
//! Rules run in priority order and the first hit wins, so a report can say
//! *why* a file was tied to an entity. The rules are deliberately loose:
//! a spurious association costs a little noise, a missed one hides drift.

use serde::{Deserialize, Serialize};

use crate::naming::EntityVariants;

/// Named association heuristics, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationRule {
    /// Lower-cased file name contains the entity name, plural or singular.
    FilenameVariant,
    /// File content contains the entity name, plural or singular (any case).
    ContentToken,
    /// Content uses a naming convention built on the entity:
    /// `use{Entity}`, `{Entity}Tab`, `{Entity}Component`.
    NamingConvention,
}

impl AssociationRule {
    pub const ORDERED: &'static [AssociationRule] = &[
        Self::FilenameVariant,
        Self::ContentToken,
        Self::NamingConvention,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FilenameVariant => "filename_variant",
            Self::ContentToken => "content_token",
            Self::NamingConvention => "naming_convention",
        }
    }

    /// Evaluate this rule alone. `content_lower` must be `content` lower-cased;
    /// callers scanning many entities compute it once per file.
    pub fn matches(
        &self,
        file_name_lower: &str,
        content: &str,
        content_lower: &str,
        entity: &EntityVariants,
    ) -> bool {
        match self {
            Self::FilenameVariant => entity.appears_in(file_name_lower),
            Self::ContentToken => entity.appears_in(content_lower),
            Self::NamingConvention => {
                let name = &entity.name;
                content.contains(&format!("use{name}"))
                    || content.contains(&format!("{name}Tab"))
                    || content.contains(&format!("{name}Component"))
            }
        }
    }
}

impl std::fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// First rule tying the file to `entity`, or `None` when unrelated.
pub fn related_to(
    file_name_lower: &str,
    content: &str,
    content_lower: &str,
    entity: &EntityVariants,
) -> Option<AssociationRule> {
    AssociationRule::ORDERED
        .iter()
        .copied()
        .find(|rule| rule.matches(file_name_lower, content, content_lower, entity))
}
