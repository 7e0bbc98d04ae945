//! Arity checks for protected functions

use crate::config::ProtectedSignature;
use crate::integration::types::IntegrationIssue;
use crate::models::ScriptFile;
use crate::scan;
use regex::Regex;

/// Argument count at the first bare `name(` in `text`.
///
/// Namespaced calls such as `ta.name(` are not the protected function.
/// `None` when the name never appears as a call or the call is unclosed.
pub fn call_arity(text: &str, name: &str) -> Option<usize> {
    let pattern = format!(r"(?m)(?:^|[^.\w]){}\s*\(", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let m = re.find(text)?;
    let args = scan::call_arguments(text, m.end() - 1)?;
    Some(scan::split_arguments(args).len())
}

/// Check one protected signature against its script
pub fn check_signature(script: &ScriptFile, signature: &ProtectedSignature) -> Option<IntegrationIssue> {
    let found = call_arity(&script.content, &signature.name);
    if found == Some(signature.arity) {
        return None;
    }
    Some(IntegrationIssue::SignatureMismatch {
        file: script.name.clone(),
        function: signature.name.clone(),
        expected: signature.arity,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREND: &str = "//@version=5\n\
indicator(\"Trend\")\n\
calcTrend(src, len) =>\n\
    ta.ema(src, len) - ta.sma(src, len)\n\
noop() =>\n\
    0\n\
t = calcTrend(close, 20)\n";

    #[test]
    fn test_call_arity() {
        assert_eq!(call_arity(TREND, "calcTrend"), Some(2));
        assert_eq!(call_arity(TREND, "noop"), Some(0));
        assert_eq!(call_arity(TREND, "ema"), None);
        assert_eq!(call_arity("x = ta.ema(a, b)\nema(c)", "ema"), Some(1));
        assert_eq!(call_arity("y = pema(a, b)", "ema"), None);
        assert_eq!(call_arity(TREND, "missing"), None);
        assert_eq!(call_arity("f(g(a, b), \"x, y\")", "f"), Some(2));
    }

    #[test]
    fn test_check_signature() {
        let script = ScriptFile::new("/memory/trend.pine", "trend.pine", TREND);
        assert!(check_signature(&script, &ProtectedSignature::new("trend.pine", "calcTrend", 2)).is_none());

        let drifted = check_signature(&script, &ProtectedSignature::new("trend.pine", "calcTrend", 3));
        assert_eq!(
            drifted,
            Some(IntegrationIssue::SignatureMismatch {
                file: "trend.pine".into(),
                function: "calcTrend".into(),
                expected: 3,
                found: Some(2),
            })
        );

        let gone = check_signature(&script, &ProtectedSignature::new("trend.pine", "calcMomentum", 1));
        assert!(matches!(gone, Some(IntegrationIssue::SignatureMismatch { found: None, .. })));
    }
}
