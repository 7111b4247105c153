//! Currency codes and the whitelist of supported currencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies accepted when no whitelist is configured.
pub const DEFAULT_CURRENCIES: [&str; 6] = ["USD", "GBP", "EUR", "JPY", "NZD", "NGN"];

/// Check that `code` is exactly three uppercase ASCII letters.
///
/// ```
/// use fxql_core::is_currency_code;
///
/// assert!(is_currency_code("USD"));
/// assert!(!is_currency_code("usd"));
/// assert!(!is_currency_code("USDT"));
/// ```
#[must_use]
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// An ordered set of currency codes a statement may use.
///
/// Order is preserved so that error messages list the currencies the way
/// they were configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CurrencyWhitelist {
    codes: Vec<String>,
}

impl CurrencyWhitelist {
    /// Build a whitelist from the given codes, dropping duplicates.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for code in codes {
            let code = code.into();
            if !list.contains(&code) {
                list.push(code);
            }
        }
        Self { codes: list }
    }

    /// Check whether `code` is allowed.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// The allowed codes, in configuration order.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of allowed codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no currency is allowed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CurrencyWhitelist {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES)
    }
}

impl From<Vec<String>> for CurrencyWhitelist {
    fn from(codes: Vec<String>) -> Self {
        Self::new(codes)
    }
}

impl From<CurrencyWhitelist> for Vec<String> {
    fn from(list: CurrencyWhitelist) -> Self {
        list.codes
    }
}

impl<S: Into<String>> FromIterator<S> for CurrencyWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for CurrencyWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_whitelist() {
        let list = CurrencyWhitelist::default();
        assert_eq!(list.len(), 6);
        for code in DEFAULT_CURRENCIES {
            assert!(list.contains(code));
        }
        assert!(!list.contains("XYZ"));
        assert!(!list.contains("usd"));
        assert_eq!(list.to_string(), "USD, GBP, EUR, JPY, NZD, NGN");
    }

    #[test]
    fn test_new_drops_duplicates() {
        let list = CurrencyWhitelist::new(["CHF", "USD", "CHF"]);
        assert_eq!(list.codes(), &["CHF".to_string(), "USD".to_string()]);
    }

    #[test]
    fn test_is_currency_code() {
        assert!(is_currency_code("NGN"));
        assert!(!is_currency_code("NG"));
        assert!(!is_currency_code("Ngn"));
        assert!(!is_currency_code("US1"));
        assert!(!is_currency_code(""));
    }

    #[test]
    fn test_serde_as_list() {
        let list: CurrencyWhitelist = serde_json::from_str(r#"["USD","CHF"]"#).unwrap();
        assert!(list.contains("CHF"));
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["USD","CHF"]"#);
    }
}
