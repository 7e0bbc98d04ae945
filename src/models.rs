//! Core data models for pinecheck
//!
//! These models are shared by the validator, the integration checker
//! and the reporters. All of them are derived per run and never persisted.

use crate::scoring;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity class of a validation issue
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Advisory nudge, lowest severity
    Suggestion,
    /// Advisory, does not block validity
    Warning,
    /// Blocks `is_valid`
    Error,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Suggestion => write!(f, "suggestion"),
            IssueKind::Warning => write!(f, "warning"),
            IssueKind::Error => write!(f, "error"),
        }
    }
}

/// A single issue raised by one validator rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Id of the rule that raised it (e.g. `structure.brackets`)
    pub rule: String,
    pub message: String,
    /// 1-based line number, when the issue has a location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: rule.into(),
            message: message.into(),
            line: None,
        }
    }

    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueKind::Error, rule, message)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueKind::Warning, rule, message)
    }

    pub fn suggestion(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(IssueKind::Suggestion, rule, message)
    }

    /// Attach a 1-based line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Size and complexity counters collected for one script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMetrics {
    pub line_count: usize,
    /// Control-structure keyword count, base 1
    pub complexity: usize,
    /// Arithmetic operators plus `math.`/`ta.` namespace references
    pub calculations: usize,
    /// Occurrences of recognised built-in functions
    pub builtin_usage: usize,
}

/// Quality report for one script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub suggestions: Vec<ValidationIssue>,
    pub score: u32,
    pub is_valid: bool,
    pub metrics: ScriptMetrics,
}

impl ValidationReport {
    /// Build a report from raw issues, partitioning them by kind and
    /// deriving `score` and `is_valid`.
    ///
    /// Issues keep their discovery order within each kind.
    pub fn from_issues(issues: Vec<ValidationIssue>, metrics: ScriptMetrics) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for issue in issues {
            match issue.kind {
                IssueKind::Error => errors.push(issue),
                IssueKind::Warning => warnings.push(issue),
                IssueKind::Suggestion => suggestions.push(issue),
            }
        }

        let score = scoring::validation_score(errors.len(), warnings.len(), &metrics);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
            score,
            metrics,
        }
    }

    /// Report for a script that could not be read.
    ///
    /// Carries exactly one error and default metrics, so it scores 85.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self::from_issues(
            vec![ValidationIssue::error("file.missing", message)],
            ScriptMetrics::default(),
        )
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// All issues, errors first
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }
}

/// One script loaded from a [`crate::scripts::ScriptSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    /// Absolute or source-rooted path on disk
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated
    pub name: String,
    pub content: String,
}

impl ScriptFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Final path component of `name`
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Whether a configured script name refers to this file.
    ///
    /// Accepts either the full relative name or the bare file name.
    pub fn matches_name(&self, wanted: &str) -> bool {
        self.name == wanted || self.file_name() == wanted
    }
}

/// Validation report tagged with the script it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Aggregate of per-script validation reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub overall_score: u32,
    pub valid_count: usize,
    pub total_count: usize,
    pub all_valid: bool,
    #[serde(rename = "perFileReports")]
    pub reports: Vec<FileReport>,
    /// Batch-level notices that do not belong to any single report
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

impl ValidationSummary {
    pub fn from_reports(reports: Vec<FileReport>, notices: Vec<String>) -> Self {
        let scores: Vec<u32> = reports.iter().map(|r| r.report.score).collect();
        let valid_count = reports.iter().filter(|r| r.report.is_valid).count();
        let total_count = reports.len();
        Self {
            overall_score: scoring::overall_score(&scores),
            valid_count,
            total_count,
            all_valid: valid_count == total_count,
            reports,
            notices,
        }
    }
}
