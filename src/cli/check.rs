//! Check command - validate and health in one run

use super::{health, output, validate};
use super::{Settings, Workspace};
use crate::reporters;
use crate::validator::Validator;
use anyhow::Result;
use std::path::Path;

/// Run both checks; passes only if both gates pass
pub fn run(
    path: &Path,
    format: Option<&str>,
    output_path: Option<&Path>,
    min_score: Option<u32>,
    min_health: Option<u32>,
) -> Result<bool> {
    let workspace = Workspace::open(path)?;
    let settings = Settings::resolve(&workspace.config, format, min_score, min_health)?;

    let summary = Validator::new().validate_source(&workspace.scripts);
    let report = health::check_workspace(&workspace);

    let rendered = reporters::render_check(&summary, &report, settings.format)?;
    output::emit(&rendered, settings.format, output_path)?;

    let valid = validate::passes(&summary, settings.min_score);
    if !valid && summary.overall_score < settings.min_score {
        output::threshold_failed("Overall score", summary.overall_score, settings.min_score);
    }
    let healthy = report.is_healthy(settings.min_health);
    if !healthy {
        output::threshold_failed("Health", report.percentage, settings.min_health);
    }
    Ok(valid && healthy)
}
