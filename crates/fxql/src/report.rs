//! Failure reporting with source diagnostics.
//!
//! Uses ariadne to print each failed statement with its fragment and a label
//! under the offending token.

use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};
use fxql_parser::ParseFailure;
use std::io::Write;
use std::ops::Range;

/// Report parse failures to the given writer.
///
/// Each failure is rendered against its own normalized fragment, so line and
/// column numbers match the ones in the error.
pub fn report_failures<W: Write>(
    failures: &[ParseFailure],
    source_name: &str,
    color: bool,
    writer: &mut W,
) -> std::io::Result<usize> {
    let mut colors = ColorGenerator::new();

    for failure in failures {
        let label_color = colors.next();
        // A trailing space gives "end of input" errors a character to point at.
        let text = format!("{} ", failure.source_text);
        let span = highlight_range(&text, failure);

        Report::build(ReportKind::Error, (source_name, span.clone()))
            .with_code(failure.error.code())
            .with_message(failure.message())
            .with_label(
                Label::new((source_name, span))
                    .with_message(failure.error.label())
                    .with_color(label_color),
            )
            .with_config(
                Config::default()
                    .with_compact(false)
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .finish()
            .write((source_name, Source::from(text.as_str())), &mut *writer)?;
    }

    Ok(failures.len())
}

/// Byte range of the token at the failure position.
fn highlight_range(text: &str, failure: &ParseFailure) -> Range<usize> {
    let start = failure
        .error
        .position
        .byte_offset(text)
        .unwrap_or(text.len().saturating_sub(1));
    let rest = &text[start..];

    let token_len: usize = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '.')
        .map(char::len_utf8)
        .sum();
    let len = if token_len == 0 {
        rest.chars().next().map_or(0, char::len_utf8)
    } else {
        token_len
    };
    start..start + len
}

/// Print a summary of parsed statements and failures.
pub fn print_summary<W: Write>(
    statements: usize,
    failures: usize,
    color: bool,
    writer: &mut W,
) -> std::io::Result<()> {
    let statement_text = if statements == 1 {
        "statement"
    } else {
        "statements"
    };

    if failures == 0 {
        let mark = paint("\u{2713}", "32", color);
        writeln!(writer, "{mark} {statements} {statement_text} parsed")?;
    } else {
        let failure_text = if failures == 1 { "failure" } else { "failures" };
        let mark = paint("\u{2717}", "31", color);
        writeln!(
            writer,
            "{mark} {failures} {failure_text}, {statements} {statement_text} parsed"
        )?;
    }
    Ok(())
}

fn paint(mark: &str, ansi: &str, color: bool) -> String {
    if color {
        format!("\x1b[{ansi}m{mark}\x1b[0m")
    } else {
        mark.to_string()
    }
}
