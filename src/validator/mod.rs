//! Pine Script validator
//!
//! Runs a fixed set of independent text-scanning rules over one script and
//! folds their issues into a scored [`ValidationReport`]:
//!
//! - `syntax.*`: version marker, declaration, input titles
//! - `repainting.*`: lookahead flag, unguarded security(), lookup functions
//! - `performance.*`: calculation volume
//! - `style.*`: naming, comment density, input metadata
//! - `structure.*`: bracket balance, line length, indentation
//! - `complexity.*`: branch count
//!
//! No rule builds a syntax tree; each one pattern-matches the raw text.

pub mod base;
mod complexity;
mod inputs;
pub mod metrics;
mod performance;
mod repainting;
mod structure;
mod style;
mod syntax;

pub use base::{Rule, RuleContext};
pub use syntax::VERSION_MARKER;

use crate::models::{FileReport, ValidationReport, ValidationSummary};
use crate::scripts::{self, ScriptSource};
use std::path::Path;
use tracing::{debug, info};

/// Scripts longer than this get a batch notice
pub const OVERSIZED_SCRIPT_LINES: usize = 2000;

/// The full built-in rule set
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(syntax::VersionRule),
        Box::new(syntax::DeclarationRule),
        Box::new(syntax::InputTitleRule),
        Box::new(repainting::LookaheadRule),
        Box::new(repainting::SecurityConfirmationRule),
        Box::new(repainting::LookupFunctionRule),
        Box::new(performance::CalculationLoadRule),
        Box::new(style::NamingRule),
        Box::new(style::ConstantNamingRule),
        Box::new(style::CommentDensityRule),
        Box::new(style::InputParamsRule),
        Box::new(structure::BracketBalanceRule),
        Box::new(structure::LineLengthRule),
        Box::new(structure::IndentationRule),
        Box::new(complexity::ComplexityRule),
    ]
}

/// Validate one script's text with the default rules
pub fn validate(text: &str) -> ValidationReport {
    Validator::new().validate(text)
}

pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn validate(&self, text: &str) -> ValidationReport {
        let ctx = RuleContext::new(text);
        let issues = self
            .rules
            .iter()
            .flat_map(|rule| {
                let found = rule.check(&ctx);
                if !found.is_empty() {
                    debug!("{} raised {} issues", rule.id(), found.len());
                }
                found
            })
            .collect();
        ValidationReport::from_issues(issues, ctx.metrics)
    }

    /// Validate a script on disk.
    ///
    /// An unreadable file becomes a report with a single error.
    pub fn validate_file(&self, path: &Path) -> ValidationReport {
        let name = path.display().to_string();
        match scripts::read_script(path, &name) {
            Ok(script) => self.validate(&script.content),
            Err(e) => ValidationReport::unreadable(e.to_string()),
        }
    }

    /// Validate every script in `source` and aggregate the results.
    ///
    /// A script that fails to load is reported and the batch moves on.
    pub fn validate_source(&self, source: &dyn ScriptSource) -> ValidationSummary {
        let mut reports = Vec::new();
        let mut notices = Vec::new();

        for name in source.names() {
            let report = match source.load(&name) {
                Ok(script) => {
                    let lines = script.line_count();
                    if lines > OVERSIZED_SCRIPT_LINES {
                        notices.push(format!(
                            "{name} has {lines} lines (over {OVERSIZED_SCRIPT_LINES}); consider splitting it"
                        ));
                    }
                    self.validate(&script.content)
                }
                Err(e) => ValidationReport::unreadable(e.to_string()),
            };
            debug!("{}: score {} ({} errors)", name, report.score, report.error_count());
            reports.push(FileReport { file: name, report });
        }

        let summary = ValidationSummary::from_reports(reports, notices);
        info!(
            "Validated {} scripts: overall score {}, {} valid",
            summary.total_count, summary.overall_score, summary.valid_count
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueKind;
    use crate::scripts::MemoryScripts;

    const CLEAN: &str = "//@version=5\n\
// Trend filter\n\
indicator(\"Trend Filter\", overlay=true)\n\
// Inputs\n\
length = input.int(20, \"Length\", minval=1, maxval=200, group=\"Core\", tooltip=\"Bars\")\n\
basis = ta.ema(close, length)\n\
plot(basis, \"Basis\")\n";

    #[test]
    fn test_clean_script() {
        let report = validate(CLEAN);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
        assert_eq!(report.metrics.builtin_usage, 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_empty_file_scores_70() {
        let report = validate("");
        let rules: Vec<&str> = report.errors.iter().map(|e| e.rule.as_str()).collect();
        assert_eq!(rules, vec!["syntax.version", "syntax.declaration"]);
        assert!(!report.is_valid);
        assert_eq!(report.score, 70);
    }

    #[test]
    fn test_long_line_with_clean_indentation_scores_95() {
        let long_comment = format!("// {}", "x".repeat(127));
        assert_eq!(long_comment.chars().count(), 130);
        let text = format!(
            "//@version=5\nindicator(\"Line Check\")\n{long_comment}\nbullish = close > open\nif bullish\n    alert(\"up\")\n"
        );

        let report = validate(&text);
        assert!(report.errors.is_empty(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.warnings.len(), 1, "warnings: {:?}", report.warnings);
        assert_eq!(report.warnings[0].rule, "structure.line-length");
        assert_eq!(report.warnings[0].line, Some(3));
        assert!(report.is_valid);
        assert_eq!(report.score, 95);
    }

    #[test]
    fn test_missing_version_marker_is_invalid() {
        for text in ["indicator(\"x\")", "  //@version=5\nindicator(\"x\")", "// @version=5\nindicator(\"x\")"] {
            let report = validate(text);
            assert!(!report.is_valid);
            assert!(report.errors.iter().any(|e| e.rule == "syntax.version"));
        }
    }

    #[test]
    fn test_unmatched_paren_is_error() {
        let report = validate("//@version=5\nindicator(\"x\"\nplot(close)");
        assert!(report.error_count() >= 1);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_lookahead_blocks_validity() {
        let text = "//@version=5\nindicator(\"HTF\")\n// htf close\nhtf = request.security(syminfo.tickerid, \"D\", close, lookahead=barmerge.lookahead_on)\nplot(htf)";
        let report = validate(text);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.rule == "repainting.lookahead"));
        assert!(report.warnings.iter().any(|w| w.rule == "repainting.security"));
    }

    #[test]
    fn test_invariants_hold_over_samples() {
        let branchy = "if a\n".repeat(60);
        let arithmetic = "+-*/".repeat(400);
        let samples: [&str; 6] = [
            "",
            CLEAN,
            "((((((((((",
            "//@version=5\n\tx = 1\n  y = 2\n",
            &branchy,
            &arithmetic,
        ];
        for text in samples {
            let report = validate(text);
            assert!(report.score <= 100);
            assert_eq!(report.is_valid, report.error_count() == 0);
            assert!(report.issues().all(|i| match i.kind {
                IssueKind::Error => report.errors.contains(i),
                IssueKind::Warning => report.warnings.contains(i),
                IssueKind::Suggestion => report.suggestions.contains(i),
            }));
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "//@version=5\nindicator(\"x\")\nx = ta.valuewhen(close > open, close, 0)\n";
        assert_eq!(validate(text), validate(text));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let validator = Validator::new();
        let mut ids: Vec<&str> = validator.rules().iter().map(|r| r.id()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(validator.rules().iter().any(|r| r.category() == "repainting"));
    }

    #[test]
    fn test_custom_rule_set() {
        let validator = Validator::with_rules(vec![Box::new(structure::BracketBalanceRule)]);
        let report = validator.validate("");
        assert!(report.is_valid);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_validate_missing_file_scores_85() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = Validator::new().validate_file(&dir.path().join("gone.pine"));
        assert_eq!(report.error_count(), 1);
        assert!(report.errors[0].message.starts_with("File not found"));
        assert_eq!(report.score, 85);
    }

    #[test]
    fn test_validate_source_aggregates() {
        let oversized = format!("//@version=5\nindicator(\"Big\")\n{}", "// filler\n".repeat(2001));
        let source = MemoryScripts::new(vec![
            ("a.pine", CLEAN.to_string()),
            ("b.pine", String::new()),
            ("c.pine", oversized),
        ]);
        let summary = Validator::new().validate_source(&source);

        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.valid_count, 2);
        assert!(!summary.all_valid);
        let scores: Vec<u32> = summary.reports.iter().map(|r| r.report.score).collect();
        let mean = scores.iter().sum::<u32>() as f64 / scores.len() as f64;
        assert_eq!(summary.overall_score, mean.round() as u32);
        assert_eq!(summary.notices.len(), 1);
        assert!(summary.notices[0].starts_with("c.pine"));
    }

    #[test]
    fn test_validate_empty_source() {
        let summary = Validator::new().validate_source(&MemoryScripts::default());
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.overall_score, 0);
        assert!(summary.all_valid);
    }
}
