//! FXQL parser.
//!
//! This crate turns FXQL source text into validated [`Statement`]s. A request
//! may hold many statements; each one is parsed on its own so that a broken
//! statement never hides the valid ones around it.
//!
//! The pipeline is:
//!
//! 1. [`normalize`] splits raw input into one fragment per statement
//! 2. [`Lexer`] turns a fragment into [`Token`]s
//! 3. [`Parser`] consumes the tokens through a [`TokenCursor`] and validates
//! 4. [`parse_batch`] drives the above and collects a [`BatchResult`]
//!
//! # Example
//!
//! ```
//! use fxql_parser::parse_batch;
//!
//! let source = r"
//! USD-GBP {
//!   BUY 100
//!   SELL 200
//!   CAP 93800
//! }
//!
//! XYZ-GBP { BUY 1 }
//! ";
//!
//! let result = parse_batch(source);
//! assert_eq!(result.statements.len(), 1);
//! assert_eq!(result.failures.len(), 1);
//! assert!(result.failures[0].message().contains("unsupported currency"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod cursor;
mod error;
pub mod lexer;
mod normalize;
mod options;
mod parser;
mod position;

pub use batch::{BatchResult, ParseFailure};
pub use cursor::{TokenBuffer, TokenCursor, TokenSource};
pub use error::{
    CurrencyRole, ErrorCategory, ParseError, ParseErrorKind, SemanticError, SyntaxError,
};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use normalize::normalize;
pub use options::ParseOptions;
pub use parser::{parse_statement, Parser};
pub use position::Position;

pub use fxql_core::Statement;

/// Parse FXQL source using the default currency whitelist.
///
/// Every statement in `source` is parsed independently. Valid statements end
/// up in [`BatchResult::statements`] and broken ones in
/// [`BatchResult::failures`], both in input order.
pub fn parse_batch(source: &str) -> BatchResult {
    batch::parse_batch(source, &ParseOptions::default())
}

/// Parse FXQL source with custom options (e.g. a different whitelist).
pub fn parse_batch_with(source: &str, options: &ParseOptions) -> BatchResult {
    batch::parse_batch(source, options)
}
