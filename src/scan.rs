//! Shared text-scanning helpers
//!
//! Pine sources are never parsed into a tree. These helpers cover the few
//! places where a regex alone is not enough: balanced call arguments and
//! top-level comma splitting, both aware of string literals.

/// 1-based line number of a byte offset
pub fn line_number(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Argument text of the call whose opening parenthesis sits at `open`.
///
/// Returns the slice between `(` and its matching `)`, or `None` when the
/// call is never closed.
pub fn call_arguments(text: &str, open: usize) -> Option<&str> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }
    let start = open + 1;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => return Some(&text[start..start + i]),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Split call arguments on top-level commas.
///
/// Each piece is trimmed. Blank argument text yields no arguments.
pub fn split_arguments(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut last = 0;

    for (i, c) in args.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[last..i].trim());
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[last..].trim());
    parts
}

/// Split `name = value` into its parts; `None` for positional arguments
pub fn named_argument(arg: &str) -> Option<(&str, &str)> {
    let arg = arg.trim();
    let eq = arg.find('=')?;
    let (name, rest) = (arg[..eq].trim(), &arg[eq + 1..]);
    if rest.starts_with('=') || name.is_empty() {
        return None;
    }
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, rest.trim()))
}

/// Inner text of an argument that is exactly one string literal
pub fn string_literal(arg: &str) -> Option<&str> {
    let arg = arg.trim();
    let quote = arg.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if arg.len() < 2 || !arg.ends_with(quote) {
        return None;
    }
    let inner = &arg[1..arg.len() - 1];
    if inner.contains(quote) {
        return None;
    }
    Some(inner)
}
