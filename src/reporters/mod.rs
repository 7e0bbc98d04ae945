//! Output reporters for validation and health results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON with camelCase fields
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::integration::HealthReport;
use crate::models::ValidationSummary;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a validation summary
pub fn render_validation(summary: &ValidationSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_validation(summary)),
        OutputFormat::Json => json::render(summary),
        OutputFormat::Markdown => Ok(markdown::render_validation(summary)),
    }
}

/// Render a suite health report
pub fn render_health(report: &HealthReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_health(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => Ok(markdown::render_health(report)),
    }
}

/// Render both results as one document (`check`)
pub fn render_check(
    summary: &ValidationSummary,
    health: &HealthReport,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(&serde_json::json!({
            "validation": summary,
            "health": health,
        })),
        _ => Ok(format!(
            "{}\n{}",
            render_validation(summary, format)?,
            render_health(health, format)?
        )),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{IntegrationConfig, ProtectedSignature};
    use crate::integration::IntegrationChecker;
    use crate::models::ScriptFile;
    use crate::scripts::MemoryScripts;
    use crate::validator::Validator;

    /// A two-file summary: one clean script, one empty
    pub(crate) fn test_summary() -> ValidationSummary {
        let source = MemoryScripts::new(vec![
            (
                "trend.pine",
                "//@version=5\nindicator(\"Trend\")\n// basis\nbasis = ta.sma(close, 20)\nplot(basis, \"Basis\")\n",
            ),
            ("empty.pine", ""),
        ]);
        Validator::new().validate_source(&source)
    }

    /// A health report with one missing export and one skipped signature
    pub(crate) fn test_health() -> HealthReport {
        let config = IntegrationConfig {
            protected_functions: vec![ProtectedSignature::new("gone.pine", "calc", 1)],
            ..Default::default()
        };
        let scripts = vec![
            ScriptFile::new(
                "/memory/trend.pine",
                "trend.pine",
                "plot(close, \"Bull_Stack\", display=display.data_window)\n",
            ),
            ScriptFile::new(
                "/memory/entry.pine",
                "entry.pine",
                "mom = input.source(close, \"Momentum Source\")\n",
            ),
        ];
        IntegrationChecker::new(config).check_scripts(&scripts)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_check_json_has_both_sections() {
        let out = render_check(&test_summary(), &test_health(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("parse JSON");
        assert_eq!(parsed["validation"]["totalCount"], 2);
        assert!(parsed["health"]["percentage"].is_number());
    }
}
