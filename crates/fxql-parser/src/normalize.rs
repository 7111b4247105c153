//! Splitting raw input into statement fragments.
//!
//! The steps always run in this order:
//!
//! 1. `#` comments are removed up to the end of their physical line
//! 2. escaped newlines (the two characters `\` `n`) become real newlines,
//!    then CRLF becomes LF
//! 3. every whitespace run collapses to one space and the text is trimmed
//! 4. the text is split after each `}`
//!
//! Comments are stripped from the raw text, so an escaped `\n` does not end
//! a comment: everything after `#` up to a real line break is dropped. Because
//! step 3 removes line breaks, every fragment is a single line and positions
//! reported for it are columns within the fragment.

/// Split raw FXQL input into one fragment per candidate statement.
///
/// Fragments that were closed by a `}` in the input end with `}`. Text after
/// the last `}` is returned as is, so a missing closing brace surfaces as a
/// parse error for that fragment.
///
/// ```
/// use fxql_parser::normalize;
///
/// let fragments = normalize("USD-GBP {\\n BUY 100\\n}\\nEUR-JPY { SELL 2 } # note");
/// assert_eq!(fragments, vec!["USD-GBP { BUY 100}", "EUR-JPY { SELL 2}"]);
/// ```
pub fn normalize(input: &str) -> Vec<String> {
    let cleaned = strip_comments(input);
    let unescaped = cleaned.replace("\\n", "\n").replace("\r\n", "\n");
    let collapsed = collapse_whitespace(&unescaped);
    split_statements(&collapsed)
}

/// Remove `#` comments.
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_statements(text: &str) -> Vec<String> {
    let mut pieces: Vec<&str> = text.split('}').collect();
    // `split` always yields at least one piece; the last one was not closed.
    let tail = pieces.pop().unwrap_or_default().trim();

    let mut fragments: Vec<String> = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("{piece}}}"))
        .collect();

    if !tail.is_empty() {
        fragments.push(tail.to_string());
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_statement() {
        assert_eq!(
            normalize("USD-GBP { BUY 100 SELL 200 CAP 93800 }"),
            vec!["USD-GBP { BUY 100 SELL 200 CAP 93800}"]
        );
    }

    #[test]
    fn test_multiline_statement() {
        let input = "USD-GBP {\n  BUY 100\n  SELL 200\n  CAP 93800\n}";
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 100 SELL 200 CAP 93800}"]);
    }

    #[test]
    fn test_escaped_newlines() {
        let input = r"USD-GBP {\n  BUY 100\n  SELL 200\n  CAP 93800\n}";
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 100 SELL 200 CAP 93800}"]);
    }

    #[test]
    fn test_crlf() {
        let input = "USD-GBP {\r\n BUY 1\r\n}\r\nEUR-GBP {\r\n SELL 2\r\n}";
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 1}", "EUR-GBP { SELL 2}"]);
    }

    #[test]
    fn test_comments_removed() {
        let input = "# rates for today\nUSD-GBP { # inline\n BUY 1 # buy side\n}";
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 1}"]);
    }

    #[test]
    fn test_escaped_newline_does_not_end_comment() {
        let input = r"# header\nUSD-GBP { BUY 1 }";
        assert!(normalize(input).is_empty());
    }

    #[test]
    fn test_comment_in_escaped_payload_runs_to_line_end() {
        let input = r"USD-GBP {\n BUY 1 # note\n SELL 2\n}";
        // The comment swallows the closing brace on the same physical line.
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 1"]);
    }

    #[test]
    fn test_comment_before_real_newline_in_escaped_payload() {
        let input = "USD-GBP {\\n BUY 1 # note\n SELL 2\\n}";
        assert_eq!(normalize(input), vec!["USD-GBP { BUY 1 SELL 2}"]);
    }

    #[test]
    fn test_multiple_statements_keep_order() {
        let input = "USD-GBP { BUY 1 }\n\nEUR-JPY { SELL 2 }\nNGN-USD { CAP 3 }";
        assert_eq!(
            normalize(input),
            vec!["USD-GBP { BUY 1}", "EUR-JPY { SELL 2}", "NGN-USD { CAP 3}"]
        );
    }

    #[test]
    fn test_empty_body_kept() {
        assert_eq!(normalize("USD-GBP { }"), vec!["USD-GBP {}"]);
    }

    #[test]
    fn test_stray_braces_discarded() {
        assert_eq!(normalize("} } USD-GBP { BUY 1 } }"), vec!["USD-GBP { BUY 1}"]);
    }

    #[test]
    fn test_only_whitespace_and_comments() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t  ").is_empty());
        assert!(normalize("# nothing here\n# or here").is_empty());
    }

    #[test]
    fn test_unclosed_tail_not_closed() {
        assert_eq!(
            normalize("USD-GBP { BUY 1 } EUR-GBP { SELL 2"),
            vec!["USD-GBP { BUY 1}", "EUR-GBP { SELL 2"]
        );
    }

    #[test]
    fn test_unicode_whitespace_collapsed() {
        assert_eq!(normalize("USD-GBP\u{00A0}{\u{2003}BUY 1 }"), vec!["USD-GBP { BUY 1}"]);
    }
}
