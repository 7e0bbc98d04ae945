//! Validate command - score every script in the directory

use super::output;
use super::{Settings, Workspace};
use crate::models::ValidationSummary;
use crate::reporters;
use crate::validator::Validator;
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Whether a summary clears the validate gate
pub(super) fn passes(summary: &ValidationSummary, min_score: u32) -> bool {
    summary.all_valid && summary.overall_score >= min_score
}

/// Run validation; returns whether the gate passed
pub fn run(
    path: &Path,
    format: Option<&str>,
    output_path: Option<&Path>,
    min_score: Option<u32>,
) -> Result<bool> {
    let workspace = Workspace::open(path)?;
    let settings = Settings::resolve(&workspace.config, format, min_score, None)?;

    let summary = Validator::new().validate_source(&workspace.scripts);
    let rendered = reporters::render_validation(&summary, settings.format)?;
    output::emit(&rendered, settings.format, output_path)?;

    let passed = passes(&summary, settings.min_score);
    if !passed {
        if summary.overall_score < settings.min_score {
            output::threshold_failed("Overall score", summary.overall_score, settings.min_score);
        } else {
            info!(
                "{} of {} scripts have errors",
                summary.total_count - summary.valid_count,
                summary.total_count
            );
        }
    }
    Ok(passed)
}
