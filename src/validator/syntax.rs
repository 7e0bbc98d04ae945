//! Syntax shape rules: version marker, declaration, input titles

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};
use crate::validator::inputs::{input_calls, InputTitle};

/// Literal every script must start with
pub const VERSION_MARKER: &str = "//@version=";

/// Calls that declare the script type
pub const DECLARATIONS: &[&str] = &["indicator(", "strategy(", "library("];

/// Titles shorter than this are not descriptive
const MIN_TITLE_LEN: usize = 3;

/// The script must begin with `//@version=`
pub struct VersionRule;

impl Rule for VersionRule {
    fn id(&self) -> &'static str {
        "syntax.version"
    }

    fn description(&self) -> &'static str {
        "Script starts with a //@version= marker"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let text = ctx.text.strip_prefix('\u{feff}').unwrap_or(ctx.text);
        if text.starts_with(VERSION_MARKER) {
            return vec![];
        }
        vec![ValidationIssue::error(
            self.id(),
            format!("Missing version marker: script must start with `{VERSION_MARKER}<n>`"),
        )
        .at_line(1)]
    }
}

/// The script must declare itself as an indicator, strategy or library
pub struct DeclarationRule;

impl Rule for DeclarationRule {
    fn id(&self) -> &'static str {
        "syntax.declaration"
    }

    fn description(&self) -> &'static str {
        "Script contains an indicator(), strategy() or library() declaration"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        if DECLARATIONS.iter().any(|d| ctx.text.contains(d)) {
            return vec![];
        }
        vec![ValidationIssue::error(
            self.id(),
            "Missing declaration: expected indicator(), strategy() or library()",
        )]
    }
}

/// Every input needs a descriptive title
pub struct InputTitleRule;

impl Rule for InputTitleRule {
    fn id(&self) -> &'static str {
        "syntax.input-title"
    }

    fn description(&self) -> &'static str {
        "Input declarations carry a descriptive title"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        input_calls(ctx.text)
            .into_iter()
            .filter_map(|call| {
                let message = match call.title() {
                    InputTitle::Missing => format!("{} has no title", call.callee()),
                    InputTitle::Literal(title) if title.trim().chars().count() < MIN_TITLE_LEN => {
                        format!("{} title \"{}\" is too short", call.callee(), title)
                    }
                    _ => return None,
                };
                Some(ValidationIssue::warning(self.id(), message).at_line(call.line))
            })
            .collect()
    }
}
