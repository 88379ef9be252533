//! The six textual shapes under which a field name is referenced.
//!
//! Matching is plain text so that structured data, SQL and component code
//! are all searched the same way.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scanner::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchShape {
    /// `.field`
    PropertyAccess,
    /// `['field']`
    BracketSingle,
    /// `["field"]`
    BracketDouble,
    /// `field:`
    KeyColon,
    /// `field =` (not `==`)
    Assignment,
    /// `"field"`
    Quoted,
}

impl MatchShape {
    pub const ALL: &'static [MatchShape] = &[
        Self::PropertyAccess,
        Self::BracketSingle,
        Self::BracketDouble,
        Self::KeyColon,
        Self::Assignment,
        Self::Quoted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PropertyAccess => "property_access",
            Self::BracketSingle => "bracket_single",
            Self::BracketDouble => "bracket_double",
            Self::KeyColon => "key_colon",
            Self::Assignment => "assignment",
            Self::Quoted => "quoted",
        }
    }

    /// Regex source for this shape of `field`.
    pub fn pattern(&self, field: &str) -> String {
        let f = regex::escape(field);
        match self {
            Self::PropertyAccess => format!(r"\.{f}\b"),
            Self::BracketSingle => format!(r"\['{f}'\]"),
            Self::BracketDouble => format!(r#"\["{f}"\]"#),
            Self::KeyColon => format!(r"\b{f}\s*:"),
            Self::Assignment => format!(r"\b{f}\s*=(?:[^=]|$)"),
            Self::Quoted => format!(r#""{f}""#),
        }
    }
}

impl std::fmt::Display for MatchShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One textual reference to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMatch {
    pub file: String,
    /// 1-based.
    pub line: u32,
    pub token: String,
    pub shape: MatchShape,
}

/// All six shapes compiled for one field.
#[derive(Debug, Clone)]
pub struct ShapeSet {
    field: String,
    patterns: Vec<(MatchShape, Regex)>,
}

impl ShapeSet {
    pub fn new(field: &str) -> Result<Self, regex::Error> {
        let patterns = MatchShape::ALL
            .iter()
            .map(|shape| Regex::new(&shape.pattern(field)).map(|re| (*shape, re)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            field: field.to_string(),
            patterns,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Every occurrence of every shape on one line. Overlapping shapes are
    /// all counted: `["total"]` is both `BracketDouble` and `Quoted`.
    pub fn matches_in_line<'l>(&self, line: &'l str) -> Vec<(MatchShape, &'l str)> {
        self.patterns
            .iter()
            .flat_map(|(shape, re)| re.find_iter(line).map(move |m| (*shape, m.as_str())))
            .collect()
    }
}

/// Usages of the field in `file`, ordered by line then shape.
pub fn find_usages(file: &SourceFile, shapes: &ShapeSet) -> Vec<UsageMatch> {
    let mut out = Vec::new();
    if !file.content.contains(shapes.field()) {
        return out;
    }
    for (index, line) in file.lines.iter().enumerate() {
        if !line.contains(shapes.field()) {
            continue;
        }
        for (shape, token) in shapes.matches_in_line(line) {
            out.push(UsageMatch {
                file: file.relative.clone(),
                line: index as u32 + 1,
                token: token.trim().to_string(),
                shape,
            });
        }
    }
    out.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.shape.cmp(&b.shape)));
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn usages(content: &str) -> Vec<UsageMatch> {
        let file = SourceFile::new(PathBuf::from("a.ts"), "a.ts".into(), content.into());
        find_usages(&file, &ShapeSet::new("total").unwrap())
    }

    fn shapes(content: &str) -> Vec<MatchShape> {
        usages(content).into_iter().map(|u| u.shape).collect()
    }

    #[test]
    fn each_shape_in_isolation() {
        assert_eq!(shapes("order.total"), vec![MatchShape::PropertyAccess]);
        assert_eq!(shapes("order['total']"), vec![MatchShape::BracketSingle]);
        assert_eq!(shapes("let x = 1; total = 2"), vec![MatchShape::Assignment]);
        assert_eq!(shapes("{ total: 1 }"), vec![MatchShape::KeyColon]);
        assert_eq!(
            shapes(r#"order["total"]"#),
            vec![MatchShape::BracketDouble, MatchShape::Quoted]
        );
    }

    #[test]
    fn comparison_is_not_assignment() {
        assert!(shapes("if (total == 1) {}").is_empty());
        assert!(shapes("if (total === 1) {}").is_empty());
    }

    #[test]
    fn partial_identifiers_do_not_match() {
        assert!(shapes("order.totalAmount; subtotal: 1; totals = []").is_empty());
    }

    #[test]
    fn reports_lines_and_counts_overlaps() {
        let u = usages("const a = 1;\n{ \"total\": 2 }\nx.total");
        assert_eq!(u.len(), 2);
        assert_eq!(u[0].line, 2);
        assert_eq!(u[0].shape, MatchShape::Quoted);
        assert_eq!(u[1].line, 3);
    }
}
