//! Anti-repainting heuristics
//!
//! Pattern-based proxies for look-ahead bias. Only the lookahead flag is
//! treated as certain; the other checks prompt for manual review.

use crate::models::ValidationIssue;
use crate::validator::base::{Rule, RuleContext};
use regex::Regex;
use std::sync::OnceLock;

/// Lookup functions whose results can shift on historical bars
pub const LOOKUP_FUNCTIONS: &[&str] = &["ta.valuewhen", "ta.barssince", "ta.pivothigh", "ta.pivotlow"];

/// Guard that makes cross-timeframe requests safe
pub const CONFIRMATION_GUARD: &str = "barstate.isconfirmed";

static LOOKAHEAD_ON: OnceLock<Regex> = OnceLock::new();
static SECURITY_CALL: OnceLock<Regex> = OnceLock::new();

fn lookahead_on() -> &'static Regex {
    LOOKAHEAD_ON
        .get_or_init(|| Regex::new(r"lookahead\s*=\s*barmerge\.lookahead_on").expect("valid regex"))
}

fn security_call() -> &'static Regex {
    SECURITY_CALL
        .get_or_init(|| Regex::new(r"\b(?:request\.)?security\s*\(").expect("valid regex"))
}

/// `lookahead = barmerge.lookahead_on` leaks future data
pub struct LookaheadRule;

impl Rule for LookaheadRule {
    fn id(&self) -> &'static str {
        "repainting.lookahead"
    }

    fn description(&self) -> &'static str {
        "Flags barmerge.lookahead_on"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        lookahead_on()
            .find_iter(ctx.text)
            .map(|m| {
                ValidationIssue::error(
                    self.id(),
                    "lookahead=barmerge.lookahead_on reads future bars and repaints",
                )
                .at_line(ctx.line_at(m.start()))
            })
            .collect()
    }
}

/// `request.security` without a `barstate.isconfirmed` guard
pub struct SecurityConfirmationRule;

impl Rule for SecurityConfirmationRule {
    fn id(&self) -> &'static str {
        "repainting.security"
    }

    fn description(&self) -> &'static str {
        "Cross-timeframe requests are paired with barstate.isconfirmed"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let Some(first) = security_call().find(ctx.text) else {
            return vec![];
        };
        if ctx.text.contains(CONFIRMATION_GUARD) {
            return vec![];
        }
        vec![ValidationIssue::warning(
            self.id(),
            format!("security() call without a {CONFIRMATION_GUARD} guard may repaint"),
        )
        .at_line(ctx.line_at(first.start()))]
    }
}

/// Lookup functions that deserve a manual repainting review
pub struct LookupFunctionRule;

impl Rule for LookupFunctionRule {
    fn id(&self) -> &'static str {
        "repainting.lookup"
    }

    fn description(&self) -> &'static str {
        "Flags valuewhen/barssince/pivot lookups for review"
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        LOOKUP_FUNCTIONS
            .iter()
            .filter_map(|name| {
                let offset = ctx.text.find(name)?;
                Some(
                    ValidationIssue::warning(
                        self.id(),
                        format!("{name} can repaint; review its use on historical bars"),
                    )
                    .at_line(ctx.line_at(offset)),
                )
            })
            .collect()
    }
}
