//! Phase-ordered execution steps: contract, type, component, database, validation.

use serde::{Deserialize, Serialize};

use crate::impact::{aggregate_risk, FileImpact, FileRole, RiskLevel};

/// File list of the closing validation step.
pub const VALIDATION_TARGET: &str = "full codebase validation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    /// 1-based, without gaps.
    pub sequence: u32,
    pub description: String,
    pub files: Vec<String>,
    pub risk_level: RiskLevel,
    pub automated: bool,
}

/// Rename phases in execution order. Validation always runs last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Contract,
    Type,
    Component,
    Database,
    Validation,
}

impl Phase {
    pub const FILE_PHASES: &'static [Phase] =
        &[Self::Contract, Self::Type, Self::Component, Self::Database];

    /// Phase a file role is applied in. Tests move with the components they cover.
    pub fn for_role(role: FileRole) -> Self {
        match role {
            FileRole::Contract => Self::Contract,
            FileRole::Type => Self::Type,
            FileRole::Component | FileRole::Test => Self::Component,
            FileRole::Database => Self::Database,
        }
    }

    /// Database changes need a human; everything else is a mechanical rename.
    pub fn automated(&self) -> bool {
        !matches!(self, Self::Database)
    }

    fn describe(&self, files: usize) -> String {
        let noun = if files == 1 { "file" } else { "files" };
        match self {
            Self::Contract => format!("Update contract definitions ({files} {noun})"),
            Self::Type => format!("Update type definitions ({files} {noun})"),
            Self::Component => format!("Update components and tests ({files} {noun})"),
            Self::Database => {
                format!("Review and migrate database schema manually ({files} {noun})")
            }
            Self::Validation => "Run type checks and the test suite".to_string(),
        }
    }
}

/// One step per non-empty phase in fixed order, then validation.
pub fn plan(files: &[FileImpact]) -> Vec<ExecutionStep> {
    let mut steps = Vec::with_capacity(Phase::FILE_PHASES.len() + 1);

    for phase in Phase::FILE_PHASES {
        let members: Vec<&FileImpact> = files
            .iter()
            .filter(|f| Phase::for_role(f.role) == *phase)
            .collect();
        if members.is_empty() {
            continue;
        }
        steps.push(ExecutionStep {
            sequence: steps.len() as u32 + 1,
            description: phase.describe(members.len()),
            files: members.iter().map(|f| f.path.clone()).collect(),
            risk_level: aggregate_risk(members.iter().map(|f| f.risk_level)),
            automated: phase.automated(),
        });
    }

    steps.push(ExecutionStep {
        sequence: steps.len() as u32 + 1,
        description: Phase::Validation.describe(0),
        files: vec![VALIDATION_TARGET.to_string()],
        risk_level: RiskLevel::Low,
        automated: true,
    });
    steps
}

/// Role labels present in `files`, in the order they are edited.
pub fn dependency_chain(files: &[FileImpact]) -> Vec<String> {
    const ORDER: &[FileRole] = &[
        FileRole::Contract,
        FileRole::Type,
        FileRole::Component,
        FileRole::Test,
        FileRole::Database,
    ];
    ORDER
        .iter()
        .filter(|role| files.iter().any(|f| f.role == **role))
        .map(|role| role.chain_label().to_string())
        .collect()
}
