//! Per-file signal extraction for set-level detections.
//!
//! Each function looks at one file and returns raw hits; the detector groups
//! them across files into one `Detection` per (type, entity).

use std::sync::LazyLock;

use regex::Regex;

use super::view::FileView;
use crate::contracts::Contract;
use crate::naming::{
    camel_to_snake, is_camel_case, is_snake_case, singularize, snake_to_camel, snake_to_pascal,
    EntityVariants,
};

/// Suffixes marking an exported type as a data entity (`UserData`, `OrderDto`).
const TYPE_SUFFIXES: &[&str] = &[
    "Type", "Data", "Model", "Entity", "Record", "Schema", "Dto", "DTO", "Row",
];

/// Exported type stems that name UI plumbing rather than data.
const UI_TYPE_DENYLIST: &[&str] = &[
    "Props", "State", "Context", "Theme", "Style", "Styles", "Config", "Options", "Component",
    "Button", "Modal", "Form", "Layout", "Page", "Route", "Event", "Handler", "Action",
    "Reducer", "Api", "Response", "Request", "Query", "Column", "Cell", "Table", "Base",
];

/// Array, string, Promise, Object, Map and console members. Domain-looking
/// names (`status`, `name`, `type`) stay reportable.
const COMMON_MEMBERS: &[&str] = &[
    "length", "map", "filter", "forEach", "reduce", "find", "findIndex", "some", "every",
    "includes", "indexOf", "push", "pop", "shift", "unshift", "slice", "splice", "concat",
    "join", "split", "trim", "sort", "reverse", "flat", "flatMap", "replace", "match",
    "startsWith", "endsWith", "toLowerCase", "toUpperCase", "toString", "valueOf", "then",
    "catch", "finally", "keys", "values", "entries", "assign", "freeze", "get", "set", "has",
    "delete", "add", "clear", "prototype", "constructor", "call", "apply", "bind", "test",
    "exec", "log", "error", "warn", "info", "debug", "json", "parse", "stringify", "now",
    "floor", "ceil", "round", "abs", "min", "max", "random",
];

static CREATE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)create\s+table\s+(?:if\s+not\s+exists\s+)?[`"\[]?(?:\w+\.)?([A-Za-z_]\w*)"#)
        .expect("valid regex")
});
static PRISMA_MODEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*model\s+([A-Za-z_]\w*)\s*\{").expect("valid regex")
});
static FROM_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.from\(\s*['"`]([A-Za-z_]\w*)['"`]"#).expect("valid regex")
});
static EXPORTED_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:interface|type)\s+([A-Z]\w*)").expect("valid regex")
});

static DOT_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([A-Za-z_$][\w$]*)\b").expect("valid regex")
});
static BRACKET_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*'([A-Za-z_$][\w$]*)'\s*\]").expect("valid regex")
});
static QUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([A-Za-z_$][\w$]*)"\s*:"#).expect("valid regex")
});
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:import\b|export\s+\*|export\s+\{[^}]*\}\s+from\b|.*\brequire\()"#)
        .expect("valid regex")
});

/// An entity name the codebase declares, with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfacedEntity {
    pub name: String,
    pub line: usize,
}

/// Entities declared by tables, Prisma models, query builders and exported data types.
pub fn surfaced_entities(view: &FileView<'_>) -> Vec<SurfacedEntity> {
    let content = view.file.content.as_str();
    let mut out = Vec::new();
    let mut push = |name: String, offset: usize| {
        if !name.is_empty() {
            out.push(SurfacedEntity {
                name,
                line: view.line_of(offset),
            });
        }
    };

    for re in [&*CREATE_TABLE, &*FROM_TABLE] {
        for caps in re.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                push(table_entity(m.as_str()), m.start());
            }
        }
    }
    for caps in PRISMA_MODEL.captures_iter(content) {
        if let Some(m) = caps.get(1) {
            push(m.as_str().to_string(), m.start());
        }
    }
    for caps in EXPORTED_TYPE.captures_iter(content) {
        if let Some(m) = caps.get(1) {
            if let Some(name) = type_entity(m.as_str()) {
                push(name, m.start());
            }
        }
    }
    out
}

/// `order_items` -> `OrderItem`.
pub fn table_entity(table: &str) -> String {
    snake_to_pascal(&singularize(&table.to_lowercase()))
}

/// Entity behind an exported type name, if the name follows a data-type
/// convention: `UserData` -> `User`, `IOrder` -> `Order`.
pub fn type_entity(type_name: &str) -> Option<String> {
    let stem = TYPE_SUFFIXES
        .iter()
        .find_map(|suffix| type_name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .or_else(|| {
            let rest = type_name.strip_prefix('I')?;
            rest.chars().next()?.is_ascii_uppercase().then_some(rest)
        })?;
    if UI_TYPE_DENYLIST.contains(&stem) || UI_TYPE_DENYLIST.iter().any(|d| stem.ends_with(d)) {
        return None;
    }
    Some(stem.to_string())
}

/// A member accessed near the entity that the contract does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredAccess {
    pub field: String,
    pub line: usize,
}

/// Field-access-shaped tokens (`.x`, `['x']`, `"x":`) close to the entity
/// name that are absent from the contract schema.
pub fn undeclared_accesses(
    view: &FileView<'_>,
    contract: &Contract,
    entity: &EntityVariants,
    char_window: usize,
) -> Vec<UndeclaredAccess> {
    let content = view.file.content.as_str();
    let spellings = entity.spellings();
    let mut out = Vec::new();

    for re in [&*DOT_ACCESS, &*BRACKET_ACCESS, &*QUOTED_KEY] {
        for caps in re.captures_iter(content) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let field = token.as_str();
            if !is_candidate_field(field, contract, entity) {
                continue;
            }
            let line = view.line_of(whole.start());
            if view
                .file
                .line(line)
                .is_some_and(|l| IMPORT_LINE.is_match(l))
            {
                continue;
            }
            if !view.entity_near_span(whole.start(), whole.end(), char_window, &spellings) {
                continue;
            }
            out.push(UndeclaredAccess {
                field: field.to_string(),
                line,
            });
        }
    }
    out.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.field.cmp(&b.field)));
    out.dedup();
    out
}

fn is_candidate_field(field: &str, contract: &Contract, entity: &EntityVariants) -> bool {
    if field.starts_with('_') || field.len() <= 2 || COMMON_MEMBERS.contains(&field) {
        return false;
    }
    if contract.has_field(field) || entity.names(field) {
        return false;
    }
    // Convention drift of a declared field is reported as a mismatch instead.
    let other = if is_snake_case(field) {
        snake_to_camel(field)
    } else {
        camel_to_snake(field)
    };
    !contract.has_field(&other)
}

/// A declared field found in the other naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionHit {
    pub field: String,
    pub rendering: String,
    pub line: usize,
}

/// Lines where a camelCase field appears in snake_case form, and, when
/// `bidirectional`, where a snake_case field appears in camelCase form.
pub fn convention_mismatches(
    view: &FileView<'_>,
    contract: &Contract,
    bidirectional: bool,
) -> Vec<ConventionHit> {
    let mut out = Vec::new();
    for field in contract.fields() {
        let rendering = if is_camel_case(field) {
            camel_to_snake(field)
        } else if bidirectional && is_snake_case(field) {
            snake_to_camel(field)
        } else {
            continue;
        };
        if rendering == field
            || contract.has_field(&rendering)
            || !view.file.content.contains(&rendering)
        {
            continue;
        }
        for (index, line) in view.file.lines.iter().enumerate() {
            if line.contains(&rendering) {
                out.push(ConventionHit {
                    field: field.to_string(),
                    rendering: rendering.clone(),
                    line: index + 1,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;
    use crate::contracts::FieldType;
    use crate::scanner::SourceFile;

    fn file(relative: &str, content: &str) -> SourceFile {
        SourceFile::new(PathBuf::from(relative), relative.into(), content.into())
    }

    fn contract(name: &str, fields: &[&str]) -> Contract {
        Contract {
            name: name.into(),
            schema: fields
                .iter()
                .map(|f| (f.to_string(), FieldType::Named("string".into())))
                .collect::<BTreeMap<_, _>>(),
            examples: None,
        }
    }

    #[test]
    fn type_names_follow_conventions() {
        assert_eq!(type_entity("UserData").as_deref(), Some("User"));
        assert_eq!(type_entity("InvoiceDTO").as_deref(), Some("Invoice"));
        assert_eq!(type_entity("IOrder").as_deref(), Some("Order"));
        assert_eq!(type_entity("ButtonProps"), None);
        assert_eq!(type_entity("ThemeContextType"), None);
        assert_eq!(type_entity("Index"), None);
        assert_eq!(type_entity("Type"), None);
    }

    #[test]
    fn surfaces_tables_models_and_types() {
        let f = file(
            "db/schema.sql",
            "CREATE TABLE IF NOT EXISTS order_items (id int);\n\
             model Shipment {\n}\n\
             const { data } = await supabase.from('invoices').select();\n\
             export interface CustomerRecord { id: string }\n",
        );
        let names: Vec<String> = surfaced_entities(&FileView::new(&f))
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert!(names.contains(&"OrderItem".to_string()));
        assert!(names.contains(&"Shipment".to_string()));
        assert!(names.contains(&"Invoice".to_string()));
        assert!(names.contains(&"Customer".to_string()));
    }

    #[test]
    fn undeclared_access_needs_entity_nearby() {
        let c = contract("User", &["email"]);
        let e = EntityVariants::new("User");
        let f = file("src/u.ts", "const n = user.nickname;\nconst m = user.email;");
        let hits = undeclared_accesses(&FileView::new(&f), &c, &e, 100);
        assert_eq!(hits, vec![UndeclaredAccess { field: "nickname".into(), line: 1 }]);

        let padded = format!("const user = 1;{}x.nickname", " ".repeat(200));
        let f = file("src/u.ts", &padded);
        assert!(undeclared_accesses(&FileView::new(&f), &c, &e, 100).is_empty());
    }

    #[test]
    fn undeclared_access_skips_noise() {
        let c = contract("User", &["userId"]);
        let e = EntityVariants::new("User");
        let f = file(
            "src/u.ts",
            "import { x } from './user.service';\n\
             user._cache; user.id; user.length; user.user_id; user.users;\n\
             const payload = { \"nickname\": user };",
        );
        let hits = undeclared_accesses(&FileView::new(&f), &c, &e, 100);
        let fields: Vec<&str> = hits.iter().map(|h| h.field.as_str()).collect();
        assert_eq!(fields, vec!["nickname"]);
    }

    #[test]
    fn domain_named_members_are_reported() {
        let c = contract("User", &["email"]);
        let e = EntityVariants::new("User");
        let f = file(
            "src/u.ts",
            "user.status; user.name; user.type; user.nickname; user.email; user.keys;",
        );
        let hits = undeclared_accesses(&FileView::new(&f), &c, &e, 100);
        let fields: Vec<&str> = hits.iter().map(|h| h.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "nickname", "status", "type"]);
    }

    #[test]
    fn wide_case_folding_does_not_hide_accesses() {
        let c = contract("User", &["email"]);
        let e = EntityVariants::new("User");
        let content = format!("// {}\nconst x = user.nickname;", "\u{212A}".repeat(60));
        let f = file("src/u.ts", &content);
        let hits = undeclared_accesses(&FileView::new(&f), &c, &e, 100);
        assert_eq!(hits, vec![UndeclaredAccess { field: "nickname".into(), line: 2 }]);
    }

    #[test]
    fn convention_mismatch_both_directions() {
        let c = contract("Order", &["totalAmount", "created_at"]);
        let f = file("src/o.ts", "row.total_amount\nrow.createdAt");
        let hits = convention_mismatches(&FileView::new(&f), &c, true);
        assert_eq!(hits.len(), 2);
        let hits = convention_mismatches(&FileView::new(&f), &c, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rendering, "total_amount");
    }
}
