//! FXQL service and CLI tools.
//!
//! This crate builds on `fxql-parser` with:
//!
//! - [`service::submit`]: parse a request, apply request limits and store the entries
//! - [`store::EntryStore`]: where accepted entries go, with an in-memory implementation
//! - [`report`]: ariadne diagnostics for failed statements
//! - `fxql-check`: validate an FXQL file from the command line
//!
//! # Example Usage
//!
//! ```bash
//! fxql-check rates.fxql
//! fxql-check --format json --currency CHF --currency EUR rates.fxql
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod report;
pub mod service;
pub mod store;

pub use service::{submit, ErrorResponse, FxqlResponse, ServiceConfig, ServiceError};
pub use store::{EntryStore, MemoryStore, StoreError};
