//! Performance heuristics
//!
//! Built-in usage only feeds the score bonus; the calculation count is the
//! one counter that can raise an issue.

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};

/// Calculation tokens above this suggest the script is doing too much per bar
pub const MAX_CALCULATIONS: usize = 500;

pub struct CalculationLoadRule;

impl Rule for CalculationLoadRule {
    fn id(&self) -> &'static str {
        "performance.calculations"
    }

    fn description(&self) -> &'static str {
        "Keeps arithmetic and ta./math. call volume bounded"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let count = ctx.metrics.calculations;
        if count <= MAX_CALCULATIONS {
            return vec![];
        }
        vec![ValidationIssue::warning(
            self.id(),
            format!(
                "{count} calculation tokens (limit {MAX_CALCULATIONS}); consider caching intermediate series"
            ),
        )]
    }
}
