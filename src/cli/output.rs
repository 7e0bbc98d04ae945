//! Writing rendered reports to stdout or a file

use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Print `rendered`, or write it to `output_path` when one was given
pub(super) fn emit(rendered: &str, format: OutputFormat, output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            // stderr keeps stdout clean for machine-readable formats
            eprintln!("Report written to: {}", style(path.display()).cyan());
        }
        None => {
            if format == OutputFormat::Json {
                println!("{}", rendered.trim_end());
            } else {
                println!("{rendered}");
            }
        }
    }
    Ok(())
}

/// Tell the user why the exit code is non-zero
pub(super) fn threshold_failed(what: &str, actual: u32, minimum: u32) {
    eprintln!(
        "{} {} {} is below the minimum of {}",
        style("✗").red().bold(),
        what,
        style(actual).red(),
        minimum
    );
}
