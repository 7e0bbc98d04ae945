//! Structural rules: bracket balance, line length, indentation

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};

pub const MAX_LINE_LENGTH: usize = 120;
pub const INDENT_WIDTH: usize = 4;

const BRACKET_PAIRS: &[(char, char, &str)] = &[
    ('(', ')', "parentheses"),
    ('[', ']', "square brackets"),
    ('{', '}', "braces"),
];

/// Each bracket kind must open and close the same number of times
pub struct BracketBalanceRule;

impl Rule for BracketBalanceRule {
    fn id(&self) -> &'static str {
        "structure.brackets"
    }

    fn description(&self) -> &'static str {
        "(), [] and {} are balanced across the script"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        BRACKET_PAIRS
            .iter()
            .filter_map(|&(open, close, label)| {
                let opened = ctx.text.chars().filter(|&c| c == open).count();
                let closed = ctx.text.chars().filter(|&c| c == close).count();
                (opened != closed).then(|| {
                    ValidationIssue::error(
                        self.id(),
                        format!("Unbalanced {label}: {opened} `{open}` vs {closed} `{close}`"),
                    )
                })
            })
            .collect()
    }
}

/// Lines longer than 120 characters
pub struct LineLengthRule;

impl Rule for LineLengthRule {
    fn id(&self) -> &'static str {
        "structure.line-length"
    }

    fn description(&self) -> &'static str {
        "Lines stay within 120 characters"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        ctx.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let len = line.chars().count();
                (len > MAX_LINE_LENGTH).then(|| {
                    ValidationIssue::warning(
                        self.id(),
                        format!("Line is {len} characters (limit {MAX_LINE_LENGTH})"),
                    )
                    .at_line(i + 1)
                })
            })
            .collect()
    }
}

/// Indentation uses spaces in multiples of four
pub struct IndentationRule;

impl Rule for IndentationRule {
    fn id(&self) -> &'static str {
        "structure.indentation"
    }

    fn description(&self) -> &'static str {
        "Indentation uses multiples of four spaces"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (i, line) in ctx.lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let indent: String = line.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
            let message = if indent.contains('\t') {
                "Tab indentation; use spaces".to_string()
            } else if indent.len() % INDENT_WIDTH != 0 {
                format!(
                    "Indentation of {} spaces is not a multiple of {INDENT_WIDTH}",
                    indent.len()
                )
            } else {
                continue;
            };
            issues.push(ValidationIssue::warning(self.id(), message).at_line(i + 1));
        }
        issues
    }
}
