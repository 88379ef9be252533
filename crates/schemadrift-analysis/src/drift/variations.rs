//! Wrong-name variations of contract fields.

use std::collections::BTreeMap;

use schemadrift_core::types::collections::SmallVec4;
use serde::{Deserialize, Serialize};

use crate::naming::{camel_to_snake, is_camel_case, is_snake_case, snake_to_camel};

/// How a wrong variation was derived from the contract field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationKind {
    /// `totalAmount` written as `total_amount`.
    SnakeCase,
    /// `total_amount` written as `totalAmount`.
    CamelCase,
    /// `userId` written as `user_id` / `userID`.
    IdSuffix,
    /// A known alias such as `customer_id` for `userId`.
    Alias,
}

impl VariationKind {
    /// Case-convention drift is unambiguous; aliases are a guess.
    pub fn is_convention(&self) -> bool {
        !matches!(self, Self::Alias)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongVariation {
    pub token: String,
    pub kind: VariationKind,
}

/// Built-in aliases for fields that are commonly renamed by hand.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("userId", &["customer_id", "customerId", "uid"]),
    ("customerId", &["client_id", "clientId", "user_id"]),
    ("orderId", &["order_number", "orderNumber"]),
    ("totalAmount", &["total", "amount", "price", "total_price", "totalPrice"]),
    ("createdAt", &["created", "date", "created_date", "createdDate", "timestamp"]),
    ("updatedAt", &["updated", "modified", "lastModified", "modified_at"]),
    ("email", &["email_address", "emailAddress", "mail"]),
    ("phoneNumber", &["phone", "tel", "mobile"]),
    ("firstName", &["fname", "first"]),
    ("lastName", &["lname", "surname"]),
];

/// Wrong variations for `field`, case-convention forms first, then aliases.
/// The field itself and duplicates are never included.
pub fn wrong_variations(
    field: &str,
    bidirectional: bool,
    extra_aliases: &BTreeMap<String, Vec<String>>,
) -> SmallVec4<WrongVariation> {
    let mut out: SmallVec4<WrongVariation> = SmallVec4::new();
    let mut push = |token: String, kind: VariationKind| {
        if !token.is_empty() && token != field && !out.iter().any(|v| v.token == token) {
            out.push(WrongVariation { token, kind });
        }
    };

    if let Some(stem) = field.strip_suffix("Id").or_else(|| field.strip_suffix("ID")) {
        if !stem.is_empty() {
            push(format!("{}_id", camel_to_snake(stem)), VariationKind::IdSuffix);
            push(format!("{stem}ID"), VariationKind::IdSuffix);
        }
    }
    if is_camel_case(field) {
        push(camel_to_snake(field), VariationKind::SnakeCase);
    }
    if bidirectional && is_snake_case(field) {
        push(snake_to_camel(field), VariationKind::CamelCase);
    }

    if let Some((_, aliases)) = BUILTIN_ALIASES.iter().find(|(name, _)| *name == field) {
        for alias in aliases.iter() {
            push(alias.to_string(), VariationKind::Alias);
        }
    }
    if let Some(aliases) = extra_aliases.get(field) {
        for alias in aliases {
            push(alias.trim().to_string(), VariationKind::Alias);
        }
    }
    out
}
