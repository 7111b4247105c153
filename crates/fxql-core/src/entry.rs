//! Persistence record for a parsed statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Statement;

/// A stored rate entry.
///
/// Field names serialize in PascalCase (`SourceCurrency`, `BuyPrice`, ...)
/// and prices serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FxqlEntry {
    /// Identifier assigned by the store; `None` until stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u64>,
    /// Base currency of the statement.
    pub source_currency: String,
    /// Quote currency of the statement.
    pub destination_currency: String,
    /// `SELL` rate.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub sell_price: Option<Decimal>,
    /// `BUY` rate.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub buy_price: Option<Decimal>,
    /// `CAP` amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cap_amount: Option<Decimal>,
}

impl FxqlEntry {
    /// Attach the identifier assigned by a store.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.entry_id = Some(id);
        self
    }
}

impl From<&Statement> for FxqlEntry {
    fn from(stmt: &Statement) -> Self {
        Self {
            entry_id: None,
            source_currency: stmt.base_currency.clone(),
            destination_currency: stmt.quote_currency.clone(),
            sell_price: stmt.sell.map(Into::into),
            buy_price: stmt.buy.map(Into::into),
            cap_amount: stmt.cap.map(Into::into),
        }
    }
}

impl From<Statement> for FxqlEntry {
    fn from(stmt: Statement) -> Self {
        Self::from(&stmt)
    }
}
