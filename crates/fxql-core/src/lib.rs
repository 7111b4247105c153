//! Core types for FXQL
//!
//! This crate provides the fundamental types shared by the FXQL parser and tools:
//!
//! - [`Amount`] - A non-negative decimal rate or cap value
//! - [`Command`] - The `BUY` / `SELL` / `CAP` command keywords
//! - [`Statement`] - One validated currency-pair rate statement
//! - [`CurrencyWhitelist`] - The set of currency codes a statement may use
//! - [`FxqlEntry`] - The persistence record produced from a statement
//!
//! # Example
//!
//! ```
//! use fxql_core::{format_statement, Amount, FormatConfig, Statement};
//! use rust_decimal_macros::dec;
//!
//! let stmt = Statement::new("USD", "GBP")
//!     .with_buy(Amount::new(dec!(100)))
//!     .with_cap(Amount::new(dec!(93800)));
//!
//! assert_eq!(stmt.pair(), "USD-GBP");
//! assert_eq!(
//!     format_statement(&stmt, &FormatConfig::default()),
//!     "USD-GBP {\n BUY 100\n CAP 93800\n}\n"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod currency;
pub mod entry;
pub mod format;
pub mod statement;

pub use amount::{Amount, AmountError};
pub use currency::{is_currency_code, CurrencyWhitelist, DEFAULT_CURRENCIES};
pub use entry::FxqlEntry;
pub use format::{format_statement, format_statements, FormatConfig};
pub use statement::{Command, Statement};

// Re-export commonly used external types
pub use rust_decimal::Decimal;
