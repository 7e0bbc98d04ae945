//! Size and complexity counters

use crate::models::ScriptMetrics;
use regex::Regex;
use std::sync::OnceLock;

/// Built-in functions whose use earns a score bonus
pub const BUILTIN_FUNCTIONS: &[&str] = &[
    "ta.sma",
    "ta.ema",
    "ta.rma",
    "ta.wma",
    "ta.rsi",
    "ta.atr",
    "ta.macd",
    "ta.stdev",
    "ta.highest",
    "ta.lowest",
    "ta.crossover",
    "ta.crossunder",
    "ta.change",
    "math.max",
    "math.min",
    "math.abs",
];

static NAMESPACE: OnceLock<Regex> = OnceLock::new();
static CONTROL_KEYWORD: OnceLock<Regex> = OnceLock::new();

fn namespace() -> &'static Regex {
    NAMESPACE.get_or_init(|| Regex::new(r"\b(?:math|ta)\.").expect("valid regex"))
}

fn control_keyword() -> &'static Regex {
    CONTROL_KEYWORD
        .get_or_init(|| Regex::new(r"\b(?:if|for|while|switch)\b").expect("valid regex"))
}

/// Collect every metric for one script
pub fn measure(text: &str) -> ScriptMetrics {
    ScriptMetrics {
        line_count: text.lines().count(),
        complexity: cyclomatic_complexity(text),
        calculations: calculation_count(text),
        builtin_usage: builtin_usage(text),
    }
}

/// Total occurrences of [`BUILTIN_FUNCTIONS`]
pub fn builtin_usage(text: &str) -> usize {
    BUILTIN_FUNCTIONS
        .iter()
        .map(|name| text.matches(name).count())
        .sum()
}

/// Arithmetic operator characters plus `math.`/`ta.` references
pub fn calculation_count(text: &str) -> usize {
    let operators = text
        .chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/'))
        .count();
    operators + namespace().find_iter(text).count()
}

/// `if`/`for`/`while`/`switch` occurrences, base 1
pub fn cyclomatic_complexity(text: &str) -> usize {
    1 + control_keyword().find_iter(text).count()
}
