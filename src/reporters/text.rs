//! Text (terminal) reporter with colors and formatting

use crate::integration::HealthReport;
use crate::models::{IssueKind, ValidationIssue, ValidationSummary};
use crate::scoring::HealthStatus;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Per-script issue cap before "...and N more"
const MAX_ISSUES_PER_FILE: usize = 10;

fn kind_color(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Error => "\x1b[31m",      // Red
        IssueKind::Warning => "\x1b[33m",    // Yellow
        IssueKind::Suggestion => "\x1b[34m", // Blue
    }
}

fn kind_tag(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Error => "[E]",
        IssueKind::Warning => "[W]",
        IssueKind::Suggestion => "[S]",
    }
}

fn status_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "\x1b[32m",
        HealthStatus::Good => "\x1b[92m",
        HealthStatus::NeedsAttention => "\x1b[33m",
        HealthStatus::Critical => "\x1b[31m",
    }
}

fn format_score(score: u32) -> String {
    let color = if score >= 80 {
        "\x1b[32m"
    } else if score >= 60 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{score}{RESET}")
}

fn format_issue(issue: &ValidationIssue) -> String {
    let color = kind_color(issue.kind);
    let location = match issue.line {
        Some(line) => format!("{DIM}line {line:<5}{RESET}"),
        None => format!("{DIM}{:<10}{RESET}", ""),
    };
    format!(
        "    {color}{}{RESET} {location} {}  {DIM}({}){RESET}\n",
        kind_tag(issue.kind),
        issue.message,
        issue.rule
    )
}

/// Render a validation summary as terminal output
pub fn render_validation(summary: &ValidationSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Pine Script Validation{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Overall: {BOLD}{}/100{RESET}  Valid: {}/{}\n\n",
        format_score(summary.overall_score),
        summary.valid_count,
        summary.total_count
    ));

    if summary.reports.is_empty() {
        out.push_str(&format!("{DIM}No scripts found.{RESET}\n"));
        return out;
    }

    for file in &summary.reports {
        let report = &file.report;
        let mark = if report.is_valid {
            "\x1b[32m✓\x1b[0m"
        } else {
            "\x1b[31m✗\x1b[0m"
        };
        out.push_str(&format!(
            "{mark} {BOLD}{}{RESET}  score {}  {DIM}{} errors, {} warnings, {} suggestions{RESET}\n",
            file.file,
            format_score(report.score),
            report.errors.len(),
            report.warnings.len(),
            report.suggestions.len()
        ));

        for issue in report.issues().take(MAX_ISSUES_PER_FILE) {
            out.push_str(&format_issue(issue));
        }
        let total = report.errors.len() + report.warnings.len() + report.suggestions.len();
        let remaining = total.saturating_sub(MAX_ISSUES_PER_FILE);
        if remaining > 0 {
            out.push_str(&format!(
                "    {DIM}...and {remaining} more (use --format json for all){RESET}\n"
            ));
        }
    }

    if !summary.notices.is_empty() {
        out.push_str(&format!("\n{BOLD}NOTICES{RESET}\n"));
        for notice in &summary.notices {
            out.push_str(&format!("  {notice}\n"));
        }
    }

    out
}

/// Render a suite health report as terminal output
pub fn render_health(report: &HealthReport) -> String {
    let mut out = String::new();
    let status_c = status_color(report.status);

    out.push_str(&format!("\n{BOLD}Suite Health{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Health: {BOLD}{}%{RESET}  Status: {status_c}{BOLD}{}{RESET}\n\n",
        report.percentage, report.status
    ));

    out.push_str(&format!("{BOLD}CATEGORIES{RESET}\n"));
    for category in &report.categories {
        out.push_str(&format!(
            "  {:<14} {:>5.1}/{:<3} {DIM}({}/{}){RESET}\n",
            category.name, category.score, category.max, category.passed, category.total
        ));
    }

    let c = &report.counts;
    out.push_str(&format!(
        "\n  {DIM}{} exports, {}/{} imports resolved, {} links, {} circular pairs{RESET}\n",
        report.exports.len(),
        c.resolved_imports,
        report.imports.len(),
        c.links,
        c.circular_pairs
    ));

    if !report.issues.is_empty() {
        out.push_str(&format!("\n{BOLD}ISSUES{RESET} ({} total)\n", report.issues.len()));
        for issue in &report.issues {
            out.push_str(&format!("  \x1b[31m•{RESET} {issue}\n"));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("\n{BOLD}WARNINGS{RESET}\n"));
        for warning in &report.warnings {
            out.push_str(&format!("  \x1b[33m•{RESET} {warning}\n"));
        }
    }

    out.push('\n');
    match report.status {
        HealthStatus::Excellent => {
            out.push_str(&format!("{DIM}All scripts are wired up correctly.{RESET}\n"))
        }
        HealthStatus::Good => out.push_str(&format!(
            "{DIM}Good shape. Resolve the remaining issues for EXCELLENT.{RESET}\n"
        )),
        HealthStatus::NeedsAttention | HealthStatus::Critical => out.push_str(&format!(
            "{DIM}Run `pinecheck health --format json` for the full symbol tables.{RESET}\n"
        )),
    }

    out
}
