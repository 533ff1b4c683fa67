//! Output formatting.

use anyhow::Result;
use grantscope_auth::AuthorizationConstraint;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConstraintReport {
    constraint: AuthorizationConstraint,
    flags: Vec<&'static str>,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    satisfied: Option<bool>,
    #[serde(skip)]
    kind: ReportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Describe,
    Check,
    Derive,
}

impl ConstraintReport {
    fn new(constraint: AuthorizationConstraint, kind: ReportKind) -> Self {
        Self {
            constraint,
            flags: constraint.names(),
            description: constraint.describe(),
            satisfied: None,
            kind,
        }
    }

    pub fn describe(constraint: AuthorizationConstraint) -> Self {
        Self::new(constraint, ReportKind::Describe)
    }

    pub fn check(constraint: AuthorizationConstraint, satisfied: bool) -> Self {
        Self {
            satisfied: Some(satisfied),
            ..Self::new(constraint, ReportKind::Check)
        }
    }

    pub fn derive(constraint: AuthorizationConstraint) -> Self {
        Self::new(constraint, ReportKind::Derive)
    }

    /// Plain-text rendering: one line per report.
    pub fn render(&self) -> Result<String> {
        let token = self.constraint.to_text()?;
        Ok(match self.kind {
            ReportKind::Describe => format!("{token}: {}", self.description),
            ReportKind::Check => {
                if self.satisfied == Some(true) {
                    "satisfied".to_string()
                } else {
                    "unsatisfied".to_string()
                }
            }
            ReportKind::Derive => token.to_string(),
        })
    }
}
