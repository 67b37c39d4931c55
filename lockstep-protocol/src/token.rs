//! Whitespace tokenization and parameter parsing.

/// Iterator over the whitespace-delimited tokens of a line
///
/// Runs of delimiters collapse, so `"v  3"` yields the same tokens as
/// `"v 3"`.
#[derive(Debug, Clone)]
pub struct Tokens<'a>(core::str::SplitAsciiWhitespace<'a>);

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.0.next()
    }
}

/// Split a line into its non-empty tokens
pub fn tokens(line: &str) -> Tokens<'_> {
    Tokens(line.split_ascii_whitespace())
}

/// Parse an integer parameter token
///
/// Unparseable input yields 0, so a garbled parameter degrades to the same
/// sentinel a missing one does and fixed-arity instruction signatures are
/// preserved downstream.
pub fn parse_param(token: &str) -> i32 {
    token.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_collapse_delimiters() {
        let toks: heapless::Vec<&str, 4> = tokens("  v   3  1024 ").collect();
        assert_eq!(&toks[..], &["v", "3", "1024"]);
    }

    #[test]
    fn test_tokens_empty_line() {
        assert!(tokens("").next().is_none());
        assert!(tokens("   ").next().is_none());
    }

    #[test]
    fn test_parse_param_plain() {
        assert_eq!(parse_param("42"), 42);
        assert_eq!(parse_param("-17"), -17);
        assert_eq!(parse_param("+5"), 5);
    }

    #[test]
    fn test_parse_param_garbage_is_zero() {
        assert_eq!(parse_param("abc"), 0);
        assert_eq!(parse_param("12x"), 0);
        assert_eq!(parse_param(""), 0);
    }

    #[test]
    fn test_parse_param_overflow_is_zero() {
        assert_eq!(parse_param("99999999999"), 0);
    }
}
