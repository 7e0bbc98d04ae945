//! Health command - cross-script integration report

use super::output;
use super::{Settings, Workspace};
use crate::integration::{HealthReport, IntegrationChecker};
use crate::reporters;
use anyhow::Result;
use std::path::Path;

pub(super) fn check_workspace(workspace: &Workspace) -> HealthReport {
    IntegrationChecker::new(workspace.config.integration.clone()).check(&workspace.scripts)
}

/// Run the health check; returns whether the gate passed
pub fn run(
    path: &Path,
    format: Option<&str>,
    output_path: Option<&Path>,
    min_health: Option<u32>,
) -> Result<bool> {
    let workspace = Workspace::open(path)?;
    let settings = Settings::resolve(&workspace.config, format, None, min_health)?;

    let report = check_workspace(&workspace);
    let rendered = reporters::render_health(&report, settings.format)?;
    output::emit(&rendered, settings.format, output_path)?;

    let passed = report.is_healthy(settings.min_health);
    if !passed {
        output::threshold_failed("Health", report.percentage, settings.min_health);
    }
    Ok(passed)
}
