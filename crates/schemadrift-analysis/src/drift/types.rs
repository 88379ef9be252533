//! Drift result types.

use serde::{Deserialize, Serialize};

/// A file position; `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: line as u32,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A contract field referenced under a wrong name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub entity: String,
    pub location: Location,
    pub severity: Severity,
    pub message: String,
    /// The contract field name.
    pub expected: String,
    /// The wrong token found in code.
    pub actual: String,
    pub suggestion: String,
}

/// Set-level finding categories. Each is computed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionType {
    /// Entity used in code with no contract.
    Missing,
    /// Code reads fields the contract does not declare.
    Outdated,
    /// Contract entity never referenced.
    Unused,
    /// Contract field appears under the other naming convention.
    Mismatch,
}

impl DetectionType {
    pub const ALL: &'static [DetectionType] =
        &[Self::Missing, Self::Outdated, Self::Unused, Self::Mismatch];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Outdated => "outdated",
            Self::Unused => "unused",
            Self::Mismatch => "mismatch",
        }
    }
}

impl std::fmt::Display for DetectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One detection per (type, entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "type")]
    pub detection_type: DetectionType,
    pub entity: String,
    pub message: String,
    pub action: String,
    pub evidence: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}
