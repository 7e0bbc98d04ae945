//! Cross-script integration checker
//!
//! Scripts in a suite talk to each other through the data window: one
//! script publishes `plot(..., display=display.data_window)` outputs and
//! another reads them back with `input.source`. This module extracts both
//! sides, resolves imports against exports, and scores the suite's
//! health across five weighted categories (see [`crate::scoring`]).

mod circular;
mod extract;
mod matcher;
mod signatures;
mod types;

pub use circular::LinkGraph;
pub use extract::{extract_exports, extract_imports, DATA_WINDOW_FLAG};
pub use matcher::{normalize_description, word_set, ExactMatcher, LabelMatcher, SymbolMatcher};
pub use signatures::{call_arity, check_signature};
pub use types::{
    ExportedSymbol, HealthCounts, HealthReport, ImportedSymbol, IntegrationIssue,
};

use crate::config::IntegrationConfig;
use crate::models::ScriptFile;
use crate::scoring::{CategoryScore, HealthStatus, HEALTH_WEIGHTS};
use crate::scripts::ScriptSource;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Check a loaded suite with the default label matcher.
///
/// Imports only resolve against exports of other scripts.
pub fn check_integration(scripts: &[ScriptFile], config: &IntegrationConfig) -> HealthReport {
    IntegrationChecker::new(config.clone()).check_scripts(scripts)
}

pub struct IntegrationChecker {
    config: IntegrationConfig,
    matcher: Box<dyn SymbolMatcher>,
}

impl IntegrationChecker {
    pub fn new(config: IntegrationConfig) -> Self {
        Self::with_matcher(config, Box::new(LabelMatcher))
    }

    pub fn with_matcher(config: IntegrationConfig, matcher: Box<dyn SymbolMatcher>) -> Self {
        Self { config, matcher }
    }

    /// Load every discovered and expected script from `source`, then check them.
    ///
    /// A script that cannot be read is left out of every check and noted in
    /// `warnings`; it still counts as expected, so availability drops.
    /// Expected scripts that do not exist become `MissingScript` issues.
    pub fn check(&self, source: &dyn ScriptSource) -> HealthReport {
        let mut scripts = Vec::new();
        let mut unreadable = Vec::new();
        let mut warnings = Vec::new();

        for name in source.names() {
            match source.load(&name) {
                Ok(script) => scripts.push(script),
                Err(e) => {
                    warn!("{}", e);
                    warnings.push(format!("Unreadable script {name}: {e}"));
                    unreadable.push(name);
                }
            }
        }

        // Expected scripts may sit outside discovery (excluded, other extension)
        for wanted in &self.config.expected_scripts {
            if scripts.iter().any(|s| s.matches_name(wanted)) || unreadable.contains(wanted) {
                continue;
            }
            match source.load(wanted) {
                Ok(script) => scripts.push(script),
                Err(e) if e.is_not_found() => debug!("expected script {} not found", wanted),
                Err(e) => {
                    warn!("{}", e);
                    warnings.push(format!("Unreadable script {wanted}: {e}"));
                }
            }
        }

        self.assess(&scripts, &unreadable, warnings)
    }

    /// Check an already loaded suite.
    ///
    /// An import is only resolved against exports of *other* scripts; a
    /// script never satisfies its own `input.source`.
    pub fn check_scripts(&self, scripts: &[ScriptFile]) -> HealthReport {
        self.assess(scripts, &[], Vec::new())
    }

    fn assess(&self, scripts: &[ScriptFile], unreadable: &[String], mut warnings: Vec<String>) -> HealthReport {
        let mut counts = HealthCounts::default();
        let mut findings: Vec<IntegrationIssue> = Vec::new();

        // Availability
        let expected: Vec<String> = if self.config.expected_scripts.is_empty() {
            scripts
                .iter()
                .map(|s| s.name.clone())
                .chain(unreadable.iter().cloned())
                .collect()
        } else {
            self.config.expected_scripts.clone()
        };
        counts.expected_files = expected.len();
        for wanted in &expected {
            if scripts.iter().any(|s| s.matches_name(wanted)) {
                counts.found_files += 1;
            } else {
                findings.push(IntegrationIssue::MissingScript { file: wanted.clone() });
            }
        }

        // Exports
        let exports: Vec<ExportedSymbol> = scripts.iter().flat_map(extract_exports).collect();
        let mut declared: HashMap<&str, Vec<&str>> = HashMap::new();
        for export in &exports {
            declared.entry(export.name.as_str()).or_default().push(export.file.as_str());
        }
        for export in &exports {
            if declared[export.name.as_str()].len() > 1 {
                counts.broken_exports += 1;
            } else {
                counts.valid_exports += 1;
            }
        }
        let mut duplicated: Vec<(&str, &Vec<&str>)> = declared
            .iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(label, files)| (*label, files))
            .collect();
        duplicated.sort();
        for (label, files) in duplicated {
            warnings.push(format!(
                "Output \"{label}\" is declared {} times ({})",
                files.len(),
                files.join(", ")
            ));
        }

        // Imports
        let imports: Vec<ImportedSymbol> = scripts.iter().flat_map(extract_imports).collect();
        let mut graph = LinkGraph::new();
        for import in &imports {
            let resolved = exports
                .iter()
                .filter(|e| e.file != import.file)
                .find(|e| self.matcher.matches(import, e));
            match resolved {
                Some(export) => {
                    debug!(
                        "{}: `{}` resolved to {} in {}",
                        import.file, import.variable, export.name, export.file
                    );
                    counts.resolved_imports += 1;
                    graph.add_link(&import.file, &export.file);
                }
                None => {
                    counts.missing_imports += 1;
                    findings.push(IntegrationIssue::MissingExport {
                        file: import.file.clone(),
                        variable: import.variable.clone(),
                        description: import.description.clone(),
                    });
                }
            }
        }

        // Circular references
        let pairs = graph.circular_pairs();
        counts.circular_pairs = pairs.len();
        findings.extend(pairs.into_iter().map(|(a, b)| IntegrationIssue::CircularReference { a, b }));

        // Signatures
        for signature in &self.config.protected_functions {
            let Some(script) = scripts.iter().find(|s| s.matches_name(&signature.file)) else {
                counts.signatures_failed += 1;
                warnings.push(format!(
                    "Skipped signature check for {}(): {} not found",
                    signature.name, signature.file
                ));
                continue;
            };
            match check_signature(script, signature) {
                Some(issue) => {
                    counts.signatures_failed += 1;
                    findings.push(issue);
                }
                None => counts.signatures_passed += 1,
            }
        }

        // Communication
        counts.links = graph.link_count();
        let healthy_links = graph.links().filter(|(from, to)| !graph.is_circular(from, to)).count();

        let categories = vec![
            CategoryScore::new(
                "availability",
                HEALTH_WEIGHTS.availability,
                counts.found_files,
                counts.expected_files,
            ),
            CategoryScore::new(
                "exports",
                HEALTH_WEIGHTS.exports,
                counts.valid_exports,
                exports.len(),
            ),
            CategoryScore::new(
                "imports",
                HEALTH_WEIGHTS.imports,
                counts.resolved_imports,
                imports.len(),
            ),
            CategoryScore::new(
                "signatures",
                HEALTH_WEIGHTS.signatures,
                counts.signatures_passed,
                self.config.protected_functions.len(),
            ),
            CategoryScore::new(
                "communication",
                HEALTH_WEIGHTS.communication,
                healthy_links,
                counts.links,
            ),
        ];

        let total: f64 = categories.iter().map(|c| c.score).sum();
        let percentage = (total.round() as u32).min(100);
        let status = HealthStatus::from_percentage(percentage);

        if !findings.is_empty() {
            warn!("{} integration issues found", findings.len());
        }
        info!(
            "Suite health {}% ({}): {} exports, {}/{} imports resolved (matcher: {})",
            percentage,
            status,
            exports.len(),
            counts.resolved_imports,
            imports.len(),
            self.matcher.name()
        );

        HealthReport {
            score: percentage,
            percentage,
            status,
            issues: findings.iter().map(ToString::to_string).collect(),
            warnings,
            counts,
            categories,
            integration_issues: findings,
            exports,
            imports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtectedSignature;
    use crate::config::ScriptsConfig;
    use crate::scripts::{MemoryScripts, ScriptDir};

    const TREND: &str = "//@version=5\n\
indicator(\"Trend\")\n\
calcTrend(src, len) =>\n\
    ta.ema(src, len) - ta.sma(src, len)\n\
trend = calcTrend(close, 20)\n\
plot(trend > 0 ? 1 : 0, \"Bull_Stack\", display=display.data_window)\n";

    const ENTRY: &str = "//@version=5\n\
indicator(\"Entry\")\n\
bull = input.source(close, \"Bull Stack Source\")\n\
plot(bull, \"Entry_Signal\", display=display.data_window)\n";

    fn script(name: &str, text: &str) -> ScriptFile {
        ScriptFile::new(format!("/memory/{name}"), name, text)
    }

    #[test]
    fn test_import_resolves_to_matching_export() {
        let scripts = vec![script("entry.pine", ENTRY), script("trend.pine", TREND)];
        let report = check_integration(&scripts, &IntegrationConfig::default());

        assert!(report.integration_issues.is_empty(), "{:?}", report.integration_issues);
        assert_eq!(report.counts.resolved_imports, 1);
        assert_eq!(report.counts.links, 1);
        assert_eq!(report.percentage, 100);
        assert_eq!(report.score, report.percentage);
        assert_eq!(report.status, HealthStatus::Excellent);
    }

    #[test]
    fn test_unmatched_import_is_one_missing_export() {
        let entry = "//@version=5\n\
indicator(\"Entry\")\n\
mom = input.source(close, \"Momentum Source\")\n";
        let scripts = vec![script("entry.pine", entry), script("trend.pine", TREND)];
        let report = check_integration(&scripts, &IntegrationConfig::default());

        let missing: Vec<&IntegrationIssue> = report
            .integration_issues
            .iter()
            .filter(|i| matches!(i, IntegrationIssue::MissingExport { .. }))
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(report.counts.missing_imports, 1);
        // Imports category drops to zero: 100 - 25
        assert_eq!(report.percentage, 75);
        assert_eq!(report.status, HealthStatus::Good);
    }

    #[test]
    fn test_own_exports_are_not_candidates() {
        let solo = "//@version=5\n\
indicator(\"Solo\")\n\
plot(close, \"Bull_Stack\", display=display.data_window)\n\
bull = input.source(close, \"Bull Stack Source\")\n";
        let report = check_integration(&[script("solo.pine", solo)], &IntegrationConfig::default());
        assert_eq!(report.counts.missing_imports, 1);
        assert_eq!(report.counts.links, 0);
    }

    #[test]
    fn test_circular_pair_reported_once() {
        let a = "//@version=5\n\
indicator(\"A\")\n\
fromB = input.source(close, \"Beta Source\")\n\
plot(close, \"Alpha\", display=display.data_window)\n";
        let b = "//@version=5\n\
indicator(\"B\")\n\
fromA = input.source(close, \"Alpha Source\")\n\
plot(close, \"Beta\", display=display.data_window)\n";
        let report = check_integration(&[script("a.pine", a), script("b.pine", b)], &IntegrationConfig::default());

        let circular: Vec<&IntegrationIssue> = report
            .integration_issues
            .iter()
            .filter(|i| matches!(i, IntegrationIssue::CircularReference { .. }))
            .collect();
        assert_eq!(
            circular,
            vec![&IntegrationIssue::CircularReference {
                a: "a.pine".into(),
                b: "b.pine".into(),
            }]
        );
        // Communication drops to zero: 100 - 15
        assert_eq!(report.percentage, 85);
    }

    #[test]
    fn test_duplicate_labels_break_exports() {
        let other = "//@version=5\n\
indicator(\"Other\")\n\
plot(close, \"Bull_Stack\", display=display.data_window)\n";
        let scripts = vec![script("other.pine", other), script("trend.pine", TREND)];
        let report = check_integration(&scripts, &IntegrationConfig::default());

        assert_eq!(report.counts.broken_exports, 2);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Bull_Stack"));
        assert_eq!(report.percentage, 75);
    }

    #[test]
    fn test_missing_expected_script() {
        let config = IntegrationConfig {
            expected_scripts: vec!["trend.pine".into(), "momentum.pine".into()],
            ..Default::default()
        };
        let source = MemoryScripts::new(vec![("trend.pine", TREND)]);
        let report = IntegrationChecker::new(config).check(&source);

        assert_eq!(report.counts.expected_files, 2);
        assert_eq!(report.counts.found_files, 1);
        assert_eq!(
            report.integration_issues,
            vec![IntegrationIssue::MissingScript {
                file: "momentum.pine".into()
            }]
        );
        // Availability at half: 100 - 10
        assert_eq!(report.percentage, 90);
    }

    #[test]
    fn test_signature_checks() {
        let config = IntegrationConfig {
            protected_functions: vec![
                ProtectedSignature::new("trend.pine", "calcTrend", 2),
                ProtectedSignature::new("trend.pine", "calcTrend", 3),
                ProtectedSignature::new("gone.pine", "calcGone", 1),
            ],
            ..Default::default()
        };
        let report = IntegrationChecker::new(config).check_scripts(&[script("trend.pine", TREND)]);

        assert_eq!(report.counts.signatures_passed, 1);
        assert_eq!(report.counts.signatures_failed, 2);
        assert!(report.integration_issues.iter().any(|i| matches!(
            i,
            IntegrationIssue::SignatureMismatch { expected: 3, found: Some(2), .. }
        )));
        assert!(report.warnings.iter().any(|w| w.starts_with("Skipped signature check")));
        // Signatures at one third: 15 / 3 = 5 of 15
        assert_eq!(report.percentage, 90);
    }

    #[test]
    fn test_exact_matcher_is_stricter() {
        let entry = "//@version=5\n\
indicator(\"Entry\")\n\
bull = input.source(close, \"Bull Source\")\n";
        let scripts = vec![script("entry.pine", entry), script("trend.pine", TREND)];

        let loose = check_integration(&scripts, &IntegrationConfig::default());
        assert_eq!(loose.counts.resolved_imports, 1);

        let strict = IntegrationChecker::with_matcher(IntegrationConfig::default(), Box::new(ExactMatcher))
            .check_scripts(&scripts);
        assert_eq!(strict.counts.resolved_imports, 0);
    }

    #[test]
    fn test_unreadable_script_does_not_stop_the_check() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("trend.pine"), TREND).expect("write");
        std::fs::write(dir.path().join("entry.pine"), ENTRY).expect("write");
        std::fs::write(dir.path().join("bad.pine"), [0xff, 0xfe, 0x00]).expect("write");
        let source = ScriptDir::discover(dir.path(), &ScriptsConfig::default()).expect("discover");

        let report = IntegrationChecker::new(IntegrationConfig::default()).check(&source);

        assert_eq!(report.counts.expected_files, 3);
        assert_eq!(report.counts.found_files, 2);
        assert_eq!(report.counts.resolved_imports, 1);
        assert_eq!(
            report.integration_issues,
            vec![IntegrationIssue::MissingScript {
                file: "bad.pine".into()
            }]
        );
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Unreadable script bad.pine"));
        // Availability at two thirds: 100 - 6.67
        assert_eq!(report.percentage, 93);
    }

    #[test]
    fn test_unreadable_expected_script_counts_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("trend.pine"), TREND).expect("write");
        std::fs::write(dir.path().join("legacy.txt"), [0xff, 0xfe, 0x00]).expect("write");
        let source = ScriptDir::discover(dir.path(), &ScriptsConfig::default()).expect("discover");
        let config = IntegrationConfig {
            expected_scripts: vec!["trend.pine".into(), "legacy.txt".into()],
            ..Default::default()
        };

        let report = IntegrationChecker::new(config).check(&source);

        assert_eq!(report.counts.found_files, 1);
        assert!(report.warnings.iter().any(|w| w.starts_with("Unreadable script legacy.txt")));
        assert_eq!(report.percentage, 90);
    }

    #[test]
    fn test_category_maxima_follow_weights() {
        let report = check_integration(&[], &IntegrationConfig::default());
        let max: u32 = report.categories.iter().map(|c| c.max).sum();
        assert_eq!(max, 100);
        assert_eq!(report.percentage, 100);
        assert!(report.is_healthy(75));
    }
}
