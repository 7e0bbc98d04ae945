//! Cyclomatic complexity proxy

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};

pub const MAX_COMPLEXITY: usize = 20;

pub struct ComplexityRule;

impl Rule for ComplexityRule {
    fn id(&self) -> &'static str {
        "complexity.cyclomatic"
    }

    fn description(&self) -> &'static str {
        "Counts if/for/while/switch branches"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let complexity = ctx.metrics.complexity;
        if complexity <= MAX_COMPLEXITY {
            return vec![];
        }
        vec![ValidationIssue::warning(
            self.id(),
            format!("Cyclomatic complexity {complexity} exceeds {MAX_COMPLEXITY}; split logic into functions"),
        )]
    }
}
