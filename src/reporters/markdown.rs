//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - CI job summaries
//! - Suite documentation

use crate::integration::HealthReport;
use crate::models::{IssueKind, ValidationSummary};
use crate::scoring::HealthStatus;

/// Maximum issues listed per script
const MAX_ISSUES_PER_FILE: usize = 20;

fn kind_emoji(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Error => "🔴",
        IssueKind::Warning => "🟡",
        IssueKind::Suggestion => "🔵",
    }
}

fn score_indicator(score: u32) -> &'static str {
    if score >= 90 {
        "🟢 Excellent"
    } else if score >= 75 {
        "🟡 Good"
    } else if score >= 50 {
        "🟠 Fair"
    } else {
        "🔴 Poor"
    }
}

/// Escape table-breaking characters
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Render a validation summary as GitHub-flavored Markdown
pub fn render_validation(summary: &ValidationSummary) -> String {
    let mut md = String::new();

    let headline = if summary.all_valid { "✅" } else { "❌" };
    md.push_str(&format!(
        "# {headline} Pine Script Validation\n\n**Overall Score: {}/100** | **Valid: {}/{}**\n\n",
        summary.overall_score, summary.valid_count, summary.total_count
    ));

    md.push_str("## Scripts\n\n");
    md.push_str("| Script | Score | Valid | Errors | Warnings | Suggestions |\n");
    md.push_str("|--------|-------|-------|--------|----------|-------------|\n");
    for file in &summary.reports {
        let r = &file.report;
        md.push_str(&format!(
            "| `{}` | {} ({}) | {} | {} | {} | {} |\n",
            cell(&file.file),
            r.score,
            score_indicator(r.score),
            if r.is_valid { "yes" } else { "no" },
            r.errors.len(),
            r.warnings.len(),
            r.suggestions.len()
        ));
    }
    md.push('\n');

    let flagged: Vec<_> = summary
        .reports
        .iter()
        .filter(|f| f.report.issues().next().is_some())
        .collect();
    if !flagged.is_empty() {
        md.push_str("## Issues\n\n");
    }
    for file in flagged {
        md.push_str(&format!("### `{}`\n\n", file.file));
        for issue in file.report.issues().take(MAX_ISSUES_PER_FILE) {
            let location = issue
                .line
                .map(|l| format!(" (line {l})"))
                .unwrap_or_default();
            md.push_str(&format!(
                "- {} **{}**{}: {} `{}`\n",
                kind_emoji(issue.kind),
                issue.kind,
                location,
                issue.message,
                issue.rule
            ));
        }
        md.push('\n');
    }

    if !summary.notices.is_empty() {
        md.push_str("## Notices\n\n");
        for notice in &summary.notices {
            md.push_str(&format!("- {notice}\n"));
        }
        md.push('\n');
    }

    md
}

/// Render a suite health report as GitHub-flavored Markdown
pub fn render_health(report: &HealthReport) -> String {
    let mut md = String::new();

    let emoji = match report.status {
        HealthStatus::Excellent => "🏆",
        HealthStatus::Good => "⭐",
        HealthStatus::NeedsAttention => "⚠️",
        HealthStatus::Critical => "❌",
    };
    md.push_str(&format!(
        "# {emoji} Suite Health\n\n**Health: {}%** | **Status: {}**\n\n",
        report.percentage, report.status
    ));

    md.push_str("## Categories\n\n");
    md.push_str("| Category | Weight | Score | Checked |\n");
    md.push_str("|----------|--------|-------|---------|\n");
    for category in &report.categories {
        md.push_str(&format!(
            "| {} | {} | {:.1} | {}/{} |\n",
            category.name, category.max, category.score, category.passed, category.total
        ));
    }
    md.push('\n');

    md.push_str("## Issues\n\n");
    if report.issues.is_empty() {
        md.push_str("✅ No integration issues found.\n\n");
    } else {
        for issue in &report.issues {
            md.push_str(&format!("- {issue}\n"));
        }
        md.push('\n');
    }

    if !report.warnings.is_empty() {
        md.push_str("## Warnings\n\n");
        for warning in &report.warnings {
            md.push_str(&format!("- {warning}\n"));
        }
        md.push('\n');
    }

    if !report.exports.is_empty() {
        md.push_str("## Exports\n\n| Script | Label | Line |\n|--------|-------|------|\n");
        for export in &report.exports {
            md.push_str(&format!(
                "| `{}` | `{}` | {} |\n",
                cell(&export.file),
                cell(&export.name),
                export.line
            ));
        }
        md.push('\n');
    }

    md
}
