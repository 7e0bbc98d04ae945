//! Style and documentation rules
//!
//! Naming, comment density and input metadata. Apart from the generic-name
//! warning these only raise suggestions and never affect validity.

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};
use crate::validator::inputs::input_calls;
use regex::Regex;
use std::sync::OnceLock;

/// Variable names too generic to explain themselves
pub const FORBIDDEN_NAMES: &[&str] = &[
    "a", "b", "c", "x", "y", "z", "tmp", "temp", "data", "val", "foo", "test",
];

/// Minimum share of comment lines among non-empty lines
pub const MIN_COMMENT_RATIO: f64 = 0.10;

static DECLARATION: OnceLock<Regex> = OnceLock::new();
static NUMERIC_CONSTANT: OnceLock<Regex> = OnceLock::new();

fn declaration() -> &'static Regex {
    DECLARATION.get_or_init(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:(?:var|varip)\s+)?(?:(?:int|float|bool|string|color)\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)",
        )
        .expect("valid regex")
    })
}

fn numeric_constant() -> &'static Regex {
    NUMERIC_CONSTANT.get_or_init(|| {
        Regex::new(
            r"(?m)^(?:(?:var|varip|int|float)\s+)*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*-?\d+(?:\.\d+)?\s*(?://.*)?$",
        )
        .expect("valid regex")
    })
}

fn is_upper_snake(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Generic variable names such as `x` or `tmp`
pub struct NamingRule;

impl Rule for NamingRule {
    fn id(&self) -> &'static str {
        "style.naming"
    }

    fn description(&self) -> &'static str {
        "Variables have descriptive names"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        declaration()
            .captures_iter(ctx.text)
            .filter_map(|caps| {
                let name = caps.get(1)?;
                if !FORBIDDEN_NAMES.contains(&name.as_str()) {
                    return None;
                }
                Some(
                    ValidationIssue::warning(
                        self.id(),
                        format!("Variable `{}` is too generic; use a descriptive name", name.as_str()),
                    )
                    .at_line(ctx.line_at(name.start())),
                )
            })
            .collect()
    }
}

/// Top-level numeric literals should be named like constants
pub struct ConstantNamingRule;

impl Rule for ConstantNamingRule {
    fn id(&self) -> &'static str {
        "style.constant-naming"
    }

    fn description(&self) -> &'static str {
        "Top-level numeric constants use UPPER_SNAKE_CASE"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        numeric_constant()
            .captures_iter(ctx.text)
            .filter_map(|caps| {
                let name = caps.get(1)?;
                if is_upper_snake(name.as_str()) {
                    return None;
                }
                Some(
                    ValidationIssue::suggestion(
                        self.id(),
                        format!(
                            "`{}` looks like a constant; consider naming it `{}`",
                            name.as_str(),
                            to_upper_snake(name.as_str())
                        ),
                    )
                    .at_line(ctx.line_at(name.start())),
                )
            })
            .collect()
    }
}

fn to_upper_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_uppercase());
    }
    out
}

/// At least one line in ten should be a comment
pub struct CommentDensityRule;

impl Rule for CommentDensityRule {
    fn id(&self) -> &'static str {
        "style.comments"
    }

    fn description(&self) -> &'static str {
        "Comment lines make up at least 10% of the script"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let non_empty: Vec<&str> = ctx
            .lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        if non_empty.is_empty() {
            return vec![];
        }
        let comments = non_empty.iter().filter(|l| l.starts_with("//")).count();
        let ratio = comments as f64 / non_empty.len() as f64;
        if ratio >= MIN_COMMENT_RATIO {
            return vec![];
        }
        vec![ValidationIssue::suggestion(
            self.id(),
            format!(
                "Only {:.0}% of lines are comments; document the intent of each section",
                ratio * 100.0
            ),
        )]
    }
}

/// Inputs should carry range, group and tooltip metadata
pub struct InputParamsRule;

impl Rule for InputParamsRule {
    fn id(&self) -> &'static str {
        "style.input-params"
    }

    fn description(&self) -> &'static str {
        "Inputs declare minval/maxval, group and tooltip"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        input_calls(ctx.text)
            .into_iter()
            .filter_map(|call| {
                let mut wanted: Vec<&str> = Vec::new();
                if call.is_numeric() {
                    wanted.extend(["minval", "maxval"]);
                }
                wanted.extend(["group", "tooltip"]);

                let missing: Vec<&str> = wanted.into_iter().filter(|p| !call.has_param(p)).collect();
                if missing.is_empty() {
                    return None;
                }
                Some(
                    ValidationIssue::suggestion(
                        self.id(),
                        format!("{} is missing {}", call.callee(), missing.join(", ")),
                    )
                    .at_line(call.line),
                )
            })
            .collect()
    }
}
