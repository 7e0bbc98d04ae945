//! JSON reporter
//!
//! Outputs reports as pretty-printed JSON with the camelCase field names
//! downstream tooling reads (`isValid`, `overallScore`, `perFileReports`).

use anyhow::Result;
use serde::Serialize;

/// Render any report as JSON
pub fn render<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a report as compact JSON (single line)
#[allow(dead_code)] // Public API helper
pub fn render_compact<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_health, test_summary};

    #[test]
    fn test_validation_json_fields() {
        let json_str = render(&test_summary()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["totalCount"], 2);
        assert_eq!(parsed["validCount"], 1);
        assert_eq!(parsed["allValid"], false);
        let reports = parsed["perFileReports"].as_array().expect("reports array");
        assert_eq!(reports[0]["file"], "empty.pine");
        assert_eq!(reports[0]["isValid"], false);
        assert_eq!(reports[0]["score"], 70);
        assert!(reports[0]["metrics"]["lineCount"].is_number());
    }

    #[test]
    fn test_health_json_fields() {
        let json_str = render(&test_health()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["status"], "NEEDS_ATTENTION");
        assert_eq!(parsed["percentage"], 60);
        let issues = parsed["integrationIssues"].as_array().expect("issues array");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["kind"], "missingExport");
    }

    #[test]
    fn test_json_render_compact() {
        let json_str = render_compact(&test_summary()).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&json_str).expect("parse compact JSON");
    }
}
