//! Import-to-export matching strategies
//!
//! Labels are free text written by hand on both sides, so the default
//! matcher is deliberately loose. Swap in [`ExactMatcher`] where a
//! stricter contract is wanted.

use crate::integration::types::{ExportedSymbol, ImportedSymbol};
use std::collections::HashSet;

/// Suffix conventionally appended to import descriptions
pub const SOURCE_SUFFIX: &str = " Source";

/// Decides whether an import is satisfied by an export
pub trait SymbolMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, import: &ImportedSymbol, export: &ExportedSymbol) -> bool;
}

/// Strip the ` Source` suffix and map spaces to underscores
pub fn normalize_description(description: &str) -> String {
    let trimmed = description.trim();
    let stripped = trimmed.strip_suffix(SOURCE_SUFFIX).unwrap_or(trimmed);
    stripped.trim().replace(' ', "_")
}

/// Lowercase words split on underscores and whitespace
pub fn word_set(label: &str) -> HashSet<String> {
    label
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Substring containment after normalization, then any shared word
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelMatcher;

impl SymbolMatcher for LabelMatcher {
    fn name(&self) -> &'static str {
        "label"
    }

    fn matches(&self, import: &ImportedSymbol, export: &ExportedSymbol) -> bool {
        let wanted = normalize_description(&import.description);
        if wanted.is_empty() {
            return false;
        }
        if export.name.contains(&wanted) || wanted.contains(export.name.as_str()) {
            return true;
        }
        let export_words = word_set(&export.name);
        word_set(&wanted).iter().any(|w| export_words.contains(w))
    }
}

/// Normalized description must equal the export label
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl SymbolMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matches(&self, import: &ImportedSymbol, export: &ExportedSymbol) -> bool {
        normalize_description(&import.description) == export.name
    }
}
