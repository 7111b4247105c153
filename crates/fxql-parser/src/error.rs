//! Parse error types.
//!
//! Every failure belongs to one of three categories: lexical (a character the
//! lexer does not know), syntax (a token of the wrong kind) or semantic
//! (well-formed tokens that break a domain rule). All of them carry the
//! position inside the statement fragment where they were detected.

use fxql_core::Command;
use std::fmt;
use thiserror::Error;

use crate::lexer::TokenKind;
use crate::position::Position;

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Where the error was detected.
    pub position: Position,
}

impl ParseError {
    /// Create a new parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Create a syntax error.
    #[must_use]
    pub const fn syntax(error: SyntaxError, position: Position) -> Self {
        Self::new(ParseErrorKind::Syntax(error), position)
    }

    /// Create a semantic error.
    #[must_use]
    pub const fn semantic(error: SemanticError, position: Position) -> Self {
        Self::new(ParseErrorKind::Semantic(error), position)
    }

    /// The error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match &self.kind {
            ParseErrorKind::Lexical(_) => ErrorCategory::Lexical,
            ParseErrorKind::Syntax(_) => ErrorCategory::Syntax,
            ParseErrorKind::Semantic(_) => ErrorCategory::Semantic,
        }
    }

    /// Line where the error was detected.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Column where the error was detected.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Get a numeric code for the error kind.
    #[must_use]
    pub const fn kind_code(&self) -> u32 {
        match &self.kind {
            ParseErrorKind::Lexical(_) => 1,
            ParseErrorKind::Syntax(SyntaxError::Expected { .. }) => 2,
            ParseErrorKind::Syntax(SyntaxError::MissingBraceAfterPair { .. }) => 3,
            ParseErrorKind::Semantic(err) => match err {
                SemanticError::InvalidCurrencyFormat { .. } => 4,
                SemanticError::UnsupportedCurrency { .. } => 5,
                SemanticError::InvalidAmount { .. } => 6,
                SemanticError::NegativeAmount { .. } => 7,
                SemanticError::CapNotWhole { .. } => 8,
                SemanticError::DuplicateCommand(_) => 9,
                SemanticError::UnknownCommand(_) => 10,
                SemanticError::EmptyStatement => 11,
                SemanticError::AmountOutOfRange { .. } => 12,
            },
        }
    }

    /// Error code as shown to users, e.g. `F0005`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("F{:04}", self.kind_code())
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Get a short label for the error.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match &self.kind {
            ParseErrorKind::Lexical(_) => "unexpected character",
            ParseErrorKind::Syntax(SyntaxError::Expected { .. }) => "unexpected token",
            ParseErrorKind::Syntax(SyntaxError::MissingBraceAfterPair { .. }) => "expected '{'",
            ParseErrorKind::Semantic(err) => match err {
                SemanticError::InvalidCurrencyFormat { .. } => "invalid currency",
                SemanticError::UnsupportedCurrency { .. } => "unsupported currency",
                SemanticError::InvalidAmount { .. } => "invalid amount",
                SemanticError::NegativeAmount { .. } => "negative amount",
                SemanticError::CapNotWhole { .. } => "fractional cap",
                SemanticError::DuplicateCommand(_) => "duplicate command",
                SemanticError::UnknownCommand(_) => "unknown command",
                SemanticError::EmptyStatement => "empty statement",
                SemanticError::AmountOutOfRange { .. } => "amount out of range",
            },
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}

/// The three error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unrecognized character.
    Lexical,
    /// Token kind does not fit the grammar.
    Syntax,
    /// Domain rule violated.
    Semantic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Semantic => "semantic",
        })
    }
}

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Character the lexer does not recognize.
    Lexical(char),
    /// Grammar violation.
    Syntax(SyntaxError),
    /// Domain rule violation.
    Semantic(SemanticError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical(c) => write!(f, "invalid character '{c}'"),
            Self::Syntax(err) => write!(f, "{err}"),
            Self::Semantic(err) => write!(f, "{err}"),
        }
    }
}

/// Grammar violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A token of a different kind was required.
    #[error("expected {expected}, found {found}")]
    Expected {
        /// Kind the grammar requires here.
        expected: TokenKind,
        /// Kind actually present.
        found: TokenKind,
    },
    /// The currency pair is not followed by the statement body.
    #[error("expected single space then '{{' after currency pair, found {found}")]
    MissingBraceAfterPair {
        /// Kind actually present.
        found: TokenKind,
    },
}

/// Which side of the currency pair a code sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyRole {
    /// The currency before the dash.
    Base,
    /// The currency after the dash.
    Quote,
}

impl fmt::Display for CurrencyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Quote => "quote",
        })
    }
}

/// Domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Currency code is not three uppercase letters.
    #[error("invalid currency format '{code}' for {role} currency: must be exactly 3 uppercase letters")]
    InvalidCurrencyFormat {
        /// Side of the pair.
        role: CurrencyRole,
        /// Offending text.
        code: String,
    },
    /// Currency code is well-formed but not whitelisted.
    #[error("unsupported currency '{code}' for {role} currency: must be one of {supported}")]
    UnsupportedCurrency {
        /// Side of the pair.
        role: CurrencyRole,
        /// Offending code.
        code: String,
        /// Comma-separated list of allowed codes.
        supported: String,
    },
    /// Number text does not form a valid decimal.
    #[error("invalid amount format for {command}: '{text}'")]
    InvalidAmount {
        /// Command the amount belongs to.
        command: Command,
        /// Offending text.
        text: String,
    },
    /// Number is well-formed but cannot be held without rounding.
    #[error("{command} amount '{text}' is out of range: at most 28 significant digits are supported")]
    AmountOutOfRange {
        /// Command the amount belongs to.
        command: Command,
        /// Offending text.
        text: String,
    },
    /// Amount is written with a leading minus sign.
    #[error("{command} amount cannot be negative: {text}")]
    NegativeAmount {
        /// Command the amount belongs to.
        command: Command,
        /// Offending text, including the sign.
        text: String,
    },
    /// CAP amount has a fractional part.
    #[error("CAP amount must be a whole number: {text}")]
    CapNotWhole {
        /// Offending text.
        text: String,
    },
    /// A command appears twice in one statement.
    #[error("duplicate {0} command in statement")]
    DuplicateCommand(Command),
    /// Keyword is not BUY, SELL or CAP.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// Statement body has no commands.
    #[error("empty statement")]
    EmptyStatement,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Vec<ParseErrorKind> {
        vec![
            ParseErrorKind::Lexical('@'),
            ParseErrorKind::Syntax(SyntaxError::Expected {
                expected: TokenKind::Number,
                found: TokenKind::RightBrace,
            }),
            ParseErrorKind::Syntax(SyntaxError::MissingBraceAfterPair {
                found: TokenKind::Identifier,
            }),
            ParseErrorKind::Semantic(SemanticError::InvalidCurrencyFormat {
                role: CurrencyRole::Base,
                code: "usd".to_string(),
            }),
            ParseErrorKind::Semantic(SemanticError::UnsupportedCurrency {
                role: CurrencyRole::Quote,
                code: "XYZ".to_string(),
                supported: "USD, GBP".to_string(),
            }),
            ParseErrorKind::Semantic(SemanticError::InvalidAmount {
                command: Command::Buy,
                text: "1.2.3".to_string(),
            }),
            ParseErrorKind::Semantic(SemanticError::NegativeAmount {
                command: Command::Sell,
                text: "-5".to_string(),
            }),
            ParseErrorKind::Semantic(SemanticError::CapNotWhole {
                text: "100.5".to_string(),
            }),
            ParseErrorKind::Semantic(SemanticError::DuplicateCommand(Command::Buy)),
            ParseErrorKind::Semantic(SemanticError::UnknownCommand("RATE".to_string())),
            ParseErrorKind::Semantic(SemanticError::EmptyStatement),
            ParseErrorKind::Semantic(SemanticError::AmountOutOfRange {
                command: Command::Cap,
                text: "100000000000000000000000000000".to_string(),
            }),
        ]
    }

    #[test]
    fn test_kind_codes_are_sequential() {
        for (i, kind) in all_kinds().into_iter().enumerate() {
            let err = ParseError::new(kind, Position::start());
            assert_eq!(err.kind_code() as usize, i + 1);
        }
    }

    #[test]
    fn test_code_format() {
        let err = ParseError::new(ParseErrorKind::Lexical('@'), Position::start());
        assert_eq!(err.code(), "F0001");
    }

    #[test]
    fn test_error_labels() {
        for kind in all_kinds() {
            let err = ParseError::new(kind, Position::start());
            assert!(!err.label().is_empty());
        }
    }

    #[test]
    fn test_categories() {
        let cats: Vec<_> = all_kinds()
            .into_iter()
            .map(|k| ParseError::new(k, Position::start()).category())
            .collect();
        assert_eq!(cats[0], ErrorCategory::Lexical);
        assert_eq!(cats[1], ErrorCategory::Syntax);
        assert_eq!(cats[2], ErrorCategory::Syntax);
        assert!(cats[3..].iter().all(|c| *c == ErrorCategory::Semantic));
    }

    #[test]
    fn test_error_messages() {
        let expected = [
            "invalid character '@'",
            "expected number, found '}'",
            "expected single space then '{' after currency pair, found identifier",
            "invalid currency format 'usd' for base currency: must be exactly 3 uppercase letters",
            "unsupported currency 'XYZ' for quote currency: must be one of USD, GBP",
            "invalid amount format for BUY: '1.2.3'",
            "SELL amount cannot be negative: -5",
            "CAP amount must be a whole number: 100.5",
            "duplicate BUY command in statement",
            "unknown command 'RATE'",
            "empty statement",
            "CAP amount '100000000000000000000000000000' is out of range: at most 28 significant digits are supported",
        ];
        for (kind, msg) in all_kinds().into_iter().zip(expected) {
            assert_eq!(kind.to_string(), msg);
        }
    }

    #[test]
    fn test_display_matches_message() {
        let err = ParseError::semantic(SemanticError::EmptyStatement, Position::new(1, 10));
        assert_eq!(format!("{err}"), err.message());
        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 10);
    }

    #[test]
    fn test_parse_error_is_error_trait() {
        let err = ParseError::new(ParseErrorKind::Lexical('x'), Position::start());
        // Verify it implements std::error::Error
        let _: &dyn std::error::Error = &err;
    }
}
