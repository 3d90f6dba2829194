//! Turns a fuzzy-match request into a backend pattern string.
//!
//! The relational form is a `LIKE` pattern built by plain concatenation: `%`
//! and `_` already present in the value keep their wildcard meaning. The
//! document form is a regular expression with every metacharacter escaped,
//! matched case-insensitively by the document compiler.

use model::{filter::Backend, query::MatchMode};

/// Characters with a special meaning in a regular expression.
const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Flag stored next to a document pattern to make it case-insensitive.
pub const CASE_INSENSITIVE: &str = "i";

pub fn compile_pattern(backend: Backend, value: &str, mode: MatchMode) -> String {
    match backend {
        Backend::Relational => like_pattern(value, mode),
        Backend::Document => regex_pattern(value, mode),
    }
}

pub fn like_pattern(value: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Contains => format!("%{value}%"),
        MatchMode::StartsWith => format!("{value}%"),
        MatchMode::EndsWith => format!("%{value}"),
    }
}

pub fn regex_pattern(value: &str, mode: MatchMode) -> String {
    let escaped = escape_regex(value);
    match mode {
        MatchMode::Contains => escaped,
        MatchMode::StartsWith => format!("^{escaped}"),
        MatchMode::EndsWith => format!("{escaped}$"),
    }
}

pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if REGEX_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_modes() {
        assert_eq!(like_pattern("john", MatchMode::Contains), "%john%");
        assert_eq!(like_pattern("john", MatchMode::StartsWith), "john%");
        assert_eq!(like_pattern("john", MatchMode::EndsWith), "%john");
    }

    #[test]
    fn test_like_pattern_does_not_escape_wildcards() {
        assert_eq!(like_pattern("50%_off", MatchMode::Contains), "%50%_off%");
        assert_eq!(like_pattern("a.b*c", MatchMode::Contains), "%a.b*c%");
    }

    #[test]
    fn test_like_pattern_empty_value() {
        assert_eq!(like_pattern("", MatchMode::Contains), "%%");
        assert_eq!(like_pattern("", MatchMode::StartsWith), "%");
    }

    #[test]
    fn test_regex_pattern_modes() {
        assert_eq!(regex_pattern("john", MatchMode::Contains), "john");
        assert_eq!(regex_pattern("john", MatchMode::StartsWith), "^john");
        assert_eq!(regex_pattern("john", MatchMode::EndsWith), "john$");
    }

    #[test]
    fn test_escape_every_metacharacter() {
        assert_eq!(escape_regex("a.b*c"), r"a\.b\*c");
        assert_eq!(
            escape_regex(r".*+?^${}()|[]\"),
            r"\.\*\+\?\^\$\{\}\(\)\|\[\]\\"
        );
        assert_eq!(escape_regex("plain-text_123 #&~"), "plain-text_123 #&~");
    }

    #[test]
    fn test_regex_pattern_escapes_before_anchoring() {
        assert_eq!(regex_pattern("$5.00", MatchMode::StartsWith), r"^\$5\.00");
        assert_eq!(regex_pattern("(a)", MatchMode::EndsWith), r"\(a\)$");
    }

    #[test]
    fn test_compile_pattern_dispatches_on_backend() {
        assert_eq!(compile_pattern(Backend::Relational, "x.y", MatchMode::Contains), "%x.y%");
        assert_eq!(compile_pattern(Backend::Document, "x.y", MatchMode::Contains), r"x\.y");
    }
}
