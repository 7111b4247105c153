//! FXQL statement formatter.
//!
//! Renders statements back to FXQL source, one command per line. The output
//! parses back to an equal [`Statement`].

use crate::Statement;
use std::fmt::Write;

/// Formatter configuration.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Indentation in front of each command line (default: one space).
    pub indent: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: " ".to_string(),
        }
    }
}

impl FormatConfig {
    /// Create a new config with the specified indent width.
    #[must_use]
    pub fn with_indent(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width),
        }
    }
}

/// Format a statement to a string.
pub fn format_statement(stmt: &Statement, config: &FormatConfig) -> String {
    let mut out = String::new();
    writeln!(out, "{}-{} {{", stmt.base_currency, stmt.quote_currency).unwrap();
    for (cmd, amount) in stmt.commands() {
        writeln!(out, "{}{cmd} {amount}", config.indent).unwrap();
    }
    out.push_str("}\n");
    out
}

/// Format several statements, separated by blank lines.
pub fn format_statements(stmts: &[Statement], config: &FormatConfig) -> String {
    stmts
        .iter()
        .map(|stmt| format_statement(stmt, config))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_full_statement() {
        let stmt = Statement::new("USD", "GBP")
            .with_buy(Amount::new(dec!(100)))
            .with_sell(Amount::new(dec!(200)))
            .with_cap(Amount::new(dec!(93800)));
        assert_eq!(
            format_statement(&stmt, &FormatConfig::default()),
            "USD-GBP {\n BUY 100\n SELL 200\n CAP 93800\n}\n"
        );
    }

    #[test]
    fn test_format_skips_absent_commands() {
        let stmt = Statement::new("EUR", "JPY").with_sell(Amount::new(dec!(0.5)));
        assert_eq!(
            format_statement(&stmt, &FormatConfig::with_indent(2)),
            "EUR-JPY {\n  SELL 0.5\n}\n"
        );
    }

    #[test]
    fn test_format_statements() {
        let stmts = vec![
            Statement::new("USD", "GBP").with_buy(Amount::new(dec!(1))),
            Statement::new("GBP", "USD").with_cap(Amount::zero()),
        ];
        assert_eq!(
            format_statements(&stmts, &FormatConfig::default()),
            "USD-GBP {\n BUY 1\n}\n\nGBP-USD {\n CAP 0\n}\n"
        );
    }
}
