//! File role classification from path and name alone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Contract,
    Type,
    Component,
    Database,
    Test,
}

const CONTRACT_TOKENS: &[&str] = &["contract", "openapi", "swagger"];
const STRUCTURED_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];
const TYPE_DIRS: &[&str] = &["types", "typings", "interfaces", "@types"];
const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec", "e2e", "__mocks__"];
const DATABASE_TOKENS: &[&str] = &["migration", "schema", "database", "prisma", "supabase", "seed"];
const DATABASE_DIRS: &[&str] = &["db", "sql", "migrations"];
const DATABASE_EXTENSIONS: &[&str] = &["sql", "prisma"];

impl FileRole {
    pub const ALL: &'static [FileRole] = &[
        Self::Contract,
        Self::Type,
        Self::Component,
        Self::Database,
        Self::Test,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Type => "type",
            Self::Component => "component",
            Self::Database => "database",
            Self::Test => "test",
        }
    }

    /// Label used in a rename's dependency chain.
    pub fn chain_label(&self) -> &'static str {
        match self {
            Self::Contract => "contracts",
            Self::Type => "types",
            Self::Component => "components",
            Self::Database => "database",
            Self::Test => "tests",
        }
    }

    /// Classify a `/`-separated relative path.
    /// Priority: contract, type, test, database, then component.
    pub fn classify(relative: &str) -> Self {
        let lower = relative.to_lowercase();
        let mut segments: Vec<&str> = lower.split('/').collect();
        let name = segments.pop().unwrap_or_default();
        let dirs = segments;
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

        if STRUCTURED_EXTENSIONS.contains(&extension) || CONTRACT_TOKENS.iter().any(|t| lower.contains(t)) {
            return Self::Contract;
        }
        if name.ends_with(".d.ts")
            || name.contains("type")
            || name.contains("interface")
            || dirs.iter().any(|d| TYPE_DIRS.contains(d))
        {
            return Self::Type;
        }
        if name.contains(".test.")
            || name.contains(".spec.")
            || name.ends_with("_test.ts")
            || dirs.iter().any(|d| TEST_DIRS.contains(d))
        {
            return Self::Test;
        }
        if DATABASE_EXTENSIONS.contains(&extension)
            || DATABASE_TOKENS.iter().any(|t| lower.contains(t))
            || dirs.iter().any(|d| DATABASE_DIRS.contains(d))
        {
            return Self::Database;
        }
        Self::Component
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
