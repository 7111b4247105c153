//! Submission service.
//!
//! [`submit`] takes a raw FXQL request, enforces the request limits, parses
//! every statement and stores the accepted ones. The response types mirror the
//! JSON envelope returned to API clients.

use fxql_core::FxqlEntry;
use fxql_parser::{parse_batch_with, ParseFailure, ParseOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{EntryStore, StoreError};

/// Default maximum request length, in characters.
pub const DEFAULT_MAX_INPUT_LEN: usize = 1000;

/// Default maximum number of statements per request.
pub const DEFAULT_MAX_STATEMENTS: usize = 1000;

/// Message sent with a successful response.
pub const SUCCESS_MESSAGE: &str = "FXQL Statement Parsed Successfully.";

/// Code sent with a successful response.
pub const SUCCESS_CODE: &str = "FXQL-200";

/// Code sent with an error response.
pub const ERROR_CODE: &str = "FXQL-400";

/// Limits and policy for [`submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Longest accepted request, in characters.
    pub max_input_len: usize,
    /// Most statements accepted in one request.
    pub max_statements: usize,
    /// Reject the whole request when any statement fails.
    pub reject_on_failure: bool,
    /// Options passed to the parser.
    pub parse: ParseOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_statements: DEFAULT_MAX_STATEMENTS,
            reject_on_failure: true,
            parse: ParseOptions::default(),
        }
    }
}

impl ServiceConfig {
    /// Set the maximum request length.
    #[must_use]
    pub const fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = max;
        self
    }

    /// Set the maximum statement count.
    #[must_use]
    pub const fn with_max_statements(mut self, max: usize) -> Self {
        self.max_statements = max;
        self
    }

    /// Choose whether one bad statement rejects the whole request.
    #[must_use]
    pub const fn with_reject_on_failure(mut self, reject: bool) -> Self {
        self.reject_on_failure = reject;
        self
    }

    /// Replace the parser options.
    #[must_use]
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

/// Successful response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxqlResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Outcome code, `FXQL-200`.
    pub code: String,
    /// Stored entries with their identifiers.
    pub data: Vec<FxqlEntry>,
}

impl FxqlResponse {
    /// Build a success response around stored entries.
    #[must_use]
    pub fn success(data: Vec<FxqlEntry>) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            code: SUCCESS_CODE.to_string(),
            data,
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub message: String,
    /// Outcome code, `FXQL-400`.
    pub code: String,
    /// Line of the first failure, when a statement failed to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Column of the first failure, when a statement failed to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

/// Reasons a submission is rejected.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request is empty or only whitespace.
    #[error("FXQL input must not be empty")]
    EmptyInput,
    /// The request exceeds the length limit.
    #[error("FXQL input is {len} characters long; the limit is {max}")]
    InputTooLong {
        /// Request length in characters.
        len: usize,
        /// Configured limit.
        max: usize,
    },
    /// The request holds more statements than allowed.
    #[error("FXQL input holds {count} statements; the limit is {max}")]
    TooManyStatements {
        /// Statements found.
        count: usize,
        /// Configured limit.
        max: usize,
    },
    /// Statements failed to parse, or none were found.
    #[error("{}", invalid_message(.0))]
    Invalid(Vec<ParseFailure>),
    /// The store refused an entry.
    #[error("failed to store entry: {0}")]
    Store(#[from] StoreError),
}

fn invalid_message(failures: &[ParseFailure]) -> String {
    match failures {
        [] => "no valid FXQL statements found".to_string(),
        [only] => only.message(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message(), rest.len()),
    }
}

impl ServiceError {
    /// Parse failures carried by [`ServiceError::Invalid`].
    #[must_use]
    pub fn failures(&self) -> &[ParseFailure] {
        match self {
            Self::Invalid(failures) => failures,
            _ => &[],
        }
    }

    /// Build the error envelope sent to clients.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        let first = self.failures().first();
        ErrorResponse {
            message: self.to_string(),
            code: ERROR_CODE.to_string(),
            line: first.and_then(ParseFailure::line),
            column: first.and_then(ParseFailure::column),
        }
    }
}

/// Parse a request and store every statement it holds.
///
/// Nothing is stored unless the request as a whole is accepted, and the
/// accepted entries are handed to [`EntryStore::create_all`] so a store
/// failure leaves no partial request behind.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn submit<S: EntryStore + ?Sized>(
    input: &str,
    config: &ServiceConfig,
    store: &mut S,
) -> Result<FxqlResponse, ServiceError> {
    if input.trim().is_empty() {
        return Err(ServiceError::EmptyInput);
    }

    let len = input.chars().count();
    if len > config.max_input_len {
        return Err(ServiceError::InputTooLong {
            len,
            max: config.max_input_len,
        });
    }

    let result = parse_batch_with(input, &config.parse);
    if result.len() > config.max_statements {
        return Err(ServiceError::TooManyStatements {
            count: result.len(),
            max: config.max_statements,
        });
    }

    if !result.failures.is_empty() && config.reject_on_failure {
        tracing::warn!(
            "Rejecting request: {} of {} statement(s) failed",
            result.failures.len(),
            result.len()
        );
        return Err(ServiceError::Invalid(result.failures));
    }
    if result.statements.is_empty() {
        return Err(ServiceError::Invalid(result.failures));
    }

    let entries: Vec<FxqlEntry> = result.statements.iter().map(FxqlEntry::from).collect();
    let ids = store.create_all(entries.clone())?;
    let data: Vec<FxqlEntry> = entries
        .into_iter()
        .zip(ids)
        .map(|(entry, id)| entry.with_id(id))
        .collect();
    tracing::info!("Stored {} FXQL entries", data.len());

    Ok(FxqlResponse::success(data))
}
