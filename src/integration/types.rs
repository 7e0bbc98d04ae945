//! Types shared by the integration checker and its reporters

use crate::scoring::{CategoryScore, HealthStatus};
use serde::{Deserialize, Serialize};

/// A labelled data-window output declared by a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSymbol {
    pub file: String,
    pub name: String,
    pub line: usize,
}

/// An `input.source` a script expects another script to satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedSymbol {
    pub file: String,
    pub variable: String,
    pub description: String,
    pub line: usize,
}

/// A problem found while cross-checking scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IntegrationIssue {
    /// An expected script is absent
    MissingScript { file: String },
    /// An import resolves to no export
    MissingExport {
        file: String,
        variable: String,
        description: String,
    },
    /// Two scripts import from each other
    CircularReference { a: String, b: String },
    /// A protected function's arity drifted, or the function is gone
    SignatureMismatch {
        file: String,
        function: String,
        expected: usize,
        found: Option<usize>,
    },
}

impl std::fmt::Display for IntegrationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrationIssue::MissingScript { file } => write!(f, "Missing script: {file}"),
            IntegrationIssue::MissingExport {
                file,
                variable,
                description,
            } => write!(
                f,
                "{file}: input `{variable}` (\"{description}\") matches no exported output"
            ),
            IntegrationIssue::CircularReference { a, b } => {
                write!(f, "Circular reference: {a} <-> {b}")
            }
            IntegrationIssue::SignatureMismatch {
                file,
                function,
                expected,
                found: Some(found),
            } => write!(
                f,
                "{file}: {function}() takes {found} arguments, expected {expected}"
            ),
            IntegrationIssue::SignatureMismatch {
                file,
                function,
                expected,
                found: None,
            } => write!(
                f,
                "{file}: protected function {function}() ({expected} arguments) not found"
            ),
        }
    }
}

/// Raw counts behind the category scores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCounts {
    pub expected_files: usize,
    pub found_files: usize,
    pub valid_exports: usize,
    pub broken_exports: usize,
    pub resolved_imports: usize,
    pub missing_imports: usize,
    pub signatures_passed: usize,
    pub signatures_failed: usize,
    pub links: usize,
    pub circular_pairs: usize,
}

/// Cross-script health of a whole suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub score: u32,
    pub percentage: u32,
    pub status: HealthStatus,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub counts: HealthCounts,
    pub categories: Vec<CategoryScore>,
    pub integration_issues: Vec<IntegrationIssue>,
    pub exports: Vec<ExportedSymbol>,
    pub imports: Vec<ImportedSymbol>,
}

impl HealthReport {
    pub fn is_healthy(&self, min_percentage: u32) -> bool {
        self.percentage >= min_percentage
    }
}
