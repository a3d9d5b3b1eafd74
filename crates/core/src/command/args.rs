//! Shell-like splitting of free-form parameter strings.

use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:[^\s"']+|"[^"]*"|'[^']*')+"#).expect("token pattern is valid")
    })
}

/// Split `input` into whitespace-separated tokens, keeping single- or
/// double-quoted runs together. Surrounding quotes are removed from the
/// emitted token; whitespace inside a quoted run is preserved verbatim.
///
/// Empty or whitespace-only input yields an empty vector. Unbalanced quotes
/// are not an error: the stray quote character is dropped and splitting
/// degrades to plain whitespace boundaries. That permissive behavior is
/// deliberate; callers pass the result straight to the spawned process.
pub fn tokenize(input: &str) -> Vec<String> {
    token_pattern()
        .find_iter(input)
        .map(|m| strip_quotes(m.as_str()))
        .collect()
}

/// Unwrap a token that is quoted as a whole; interior quotes stay put.
fn strip_quotes(token: &str) -> String {
    let bytes = token.as_bytes();
    if token.len() >= 2 {
        let (first, last) = (bytes[0], bytes[token.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return token[1..token.len() - 1].to_string();
        }
    }
    token.to_string()
}
