//! Input declaration scanning shared by the syntax and style rules

use crate::scan;
use regex::Regex;
use std::sync::OnceLock;

static INPUT_CALL: OnceLock<Regex> = OnceLock::new();

fn input_call() -> &'static Regex {
    INPUT_CALL.get_or_init(|| Regex::new(r"\binput(?:\.([a-z_]+))?\s*\(").expect("valid regex"))
}

/// One `input(...)` / `input.<kind>(...)` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCall<'a> {
    /// 1-based line of the call
    pub line: usize,
    /// `int`, `float`, `source`, ... or `None` for bare `input(`
    pub kind: Option<&'a str>,
    pub args: Vec<&'a str>,
}

/// Title argument of an input call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTitle<'a> {
    Missing,
    Literal(&'a str),
    /// Non-literal expression; cannot be judged
    Expression,
}

impl<'a> InputCall<'a> {
    /// Callee as written, e.g. `input.int`
    pub fn callee(&self) -> String {
        match self.kind {
            Some(kind) => format!("input.{kind}"),
            None => "input".to_string(),
        }
    }

    /// `title=` if named, otherwise the second positional argument
    pub fn title(&self) -> InputTitle<'a> {
        let named = self
            .args
            .iter()
            .filter_map(|a| scan::named_argument(*a))
            .find(|(name, _)| *name == "title")
            .map(|(_, value)| value);
        let positional = || {
            self.args
                .iter()
                .copied()
                .filter(|a| scan::named_argument(a).is_none())
                .nth(1)
        };

        match named.or_else(positional) {
            None => InputTitle::Missing,
            Some(value) => match scan::string_literal(value) {
                Some(text) => InputTitle::Literal(text),
                None => InputTitle::Expression,
            },
        }
    }

    pub fn has_param(&self, param: &str) -> bool {
        self.args
            .iter()
            .filter_map(|a| scan::named_argument(a))
            .any(|(name, _)| name == param)
    }

    /// Whether the input takes a numeric range
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, Some("int") | Some("float"))
    }
}

/// All input calls in source order.
///
/// Calls that are never closed are skipped; the bracket rule reports them.
pub fn input_calls(text: &str) -> Vec<InputCall<'_>> {
    input_call()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let args = scan::call_arguments(text, whole.end() - 1)?;
            Some(InputCall {
                line: scan::line_number(text, whole.start()),
                kind: caps.get(1).map(|m| m.as_str()),
                args: scan::split_arguments(args),
            })
        })
        .collect()
}
