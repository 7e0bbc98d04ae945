//! Export and import extraction
//!
//! Exports are `plot(<expr>, "<label>", ..., display=display.data_window)`
//! calls. Imports are `<name> = input.source(<default>, "<description>")`
//! assignments.

use crate::integration::types::{ExportedSymbol, ImportedSymbol};
use crate::models::ScriptFile;
use crate::scan;
use regex::Regex;
use std::sync::OnceLock;

/// Display flag that publishes a plot to other scripts
pub const DATA_WINDOW_FLAG: &str = "display.data_window";

static PLOT_CALL: OnceLock<Regex> = OnceLock::new();
static SOURCE_INPUT: OnceLock<Regex> = OnceLock::new();

fn plot_call() -> &'static Regex {
    PLOT_CALL.get_or_init(|| Regex::new(r"\bplot\s*\(").expect("valid regex"))
}

fn source_input() -> &'static Regex {
    SOURCE_INPUT.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*input\.source\s*\(")
            .expect("valid regex")
    })
}

fn literal_or_title(arg: &str) -> Option<&str> {
    if let Some(text) = scan::string_literal(arg) {
        return Some(text);
    }
    match scan::named_argument(arg) {
        Some(("title", value)) => scan::string_literal(value),
        _ => None,
    }
}

/// Data-window outputs declared by `script`, in source order
pub fn extract_exports(script: &ScriptFile) -> Vec<ExportedSymbol> {
    let text = script.content.as_str();
    plot_call()
        .find_iter(text)
        .filter_map(|m| {
            let args = scan::split_arguments(scan::call_arguments(text, m.end() - 1)?);
            let label = literal_or_title(args.get(1)?)?;
            let published = args.iter().any(|a| {
                matches!(scan::named_argument(a), Some(("display", value)) if value.contains(DATA_WINDOW_FLAG))
            });
            if !published || label.trim().is_empty() {
                return None;
            }
            Some(ExportedSymbol {
                file: script.name.clone(),
                name: label.to_string(),
                line: scan::line_number(text, m.start()),
            })
        })
        .collect()
}

/// `input.source` declarations in `script`, in source order
pub fn extract_imports(script: &ScriptFile) -> Vec<ImportedSymbol> {
    let text = script.content.as_str();
    source_input()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let variable = caps.get(1)?.as_str();
            let args = scan::split_arguments(scan::call_arguments(text, whole.end() - 1)?);
            let description = args.iter().find_map(|a| literal_or_title(a))?;
            Some(ImportedSymbol {
                file: script.name.clone(),
                variable: variable.to_string(),
                description: description.to_string(),
                line: scan::line_number(text, caps.get(1)?.start()),
            })
        })
        .collect()
}
