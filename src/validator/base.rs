//! Base rule trait and shared per-script context
//!
//! Every rule is an independent pass over the same [`RuleContext`]. Rules
//! never see each other's output, so the order they run in does not change
//! the resulting set of issues.

use crate::models::{ScriptMetrics, ValidationIssue};
use crate::scan;
use crate::validator::metrics;

/// Read-only view of one script, shared by all rules
pub struct RuleContext<'a> {
    pub text: &'a str,
    pub lines: Vec<&'a str>,
    pub metrics: ScriptMetrics,
}

impl<'a> RuleContext<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.lines().collect(),
            metrics: metrics::measure(text),
        }
    }

    /// 1-based line number of a byte offset in `text`
    pub fn line_at(&self, offset: usize) -> usize {
        scan::line_number(self.text, offset)
    }
}

/// Trait for all validation rules
///
/// # Example Implementation
///
/// ```ignore
/// pub struct NoTabsRule;
///
/// impl Rule for NoTabsRule {
///     fn id(&self) -> &'static str {
///         "style.tabs"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags tab characters"
///     }
///
///     fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier, `<category>.<name>`
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Run the rule and return its issues in discovery order
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue>;

    /// Category of issues this rule raises
    fn category(&self) -> &'static str {
        self.id().split('.').next().unwrap_or("general")
    }
}
