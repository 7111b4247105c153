//! Parser configuration.

use fxql_core::CurrencyWhitelist;
use serde::{Deserialize, Serialize};

/// Options that control statement validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Currencies allowed on either side of a pair.
    pub currencies: CurrencyWhitelist,
}

impl ParseOptions {
    /// Options with the default whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the currency whitelist.
    #[must_use]
    pub fn with_currencies(mut self, currencies: CurrencyWhitelist) -> Self {
        self.currencies = currencies;
        self
    }
}
