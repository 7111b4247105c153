//! Batch driver: parse every statement in a request independently.

use fxql_core::Statement;

use crate::error::ParseError;
use crate::normalize::normalize;
use crate::options::ParseOptions;
use crate::parser::parse_statement;

/// A statement that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// The normalized fragment that was parsed.
    pub source_text: String,
    /// Why it failed; positions are relative to `source_text`.
    pub error: ParseError,
}

impl ParseFailure {
    /// Human-readable failure message.
    #[must_use]
    pub fn message(&self) -> String {
        self.error.message()
    }

    /// Line of the failure within the fragment.
    ///
    /// Always `Some`: every parse error carries a position. The `Option`
    /// matches the optional `line`/`column` fields of the error response.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        Some(self.error.position.line)
    }

    /// Column of the failure within the fragment. Always `Some`, like [`Self::line`].
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        Some(self.error.position.column)
    }
}

/// Result of parsing a batch of statements.
///
/// Both lists keep input order. Their lengths are unrelated: the n-th
/// failure is not necessarily next to the n-th statement in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Successfully parsed statements.
    pub statements: Vec<Statement>,
    /// Statements that failed, with their errors.
    pub failures: Vec<ParseFailure>,
}

impl BatchResult {
    /// True when no statement failed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of statements seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len() + self.failures.len()
    }

    /// True when the input held no statements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.failures.is_empty()
    }
}

/// Parse every fragment of `source` with a fresh lexer and parser.
pub(crate) fn parse_batch(source: &str, options: &ParseOptions) -> BatchResult {
    let fragments = normalize(source);
    tracing::debug!("Parsing {} FXQL fragment(s)", fragments.len());

    let mut result = BatchResult::default();
    for fragment in fragments {
        match parse_statement(&fragment, options) {
            Ok(stmt) => result.statements.push(stmt),
            Err(error) => {
                tracing::debug!(
                    "Rejected fragment {:?} at {}: {}",
                    fragment,
                    error.position,
                    error
                );
                result.failures.push(ParseFailure {
                    source_text: fragment,
                    error,
                });
            }
        }
    }
    result
}
