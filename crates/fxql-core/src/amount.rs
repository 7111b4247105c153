//! Amount type representing a rate or cap value.
//!
//! An [`Amount`] wraps an exact decimal number. Whether a statement carries a
//! `BUY`, `SELL` or `CAP` value at all is expressed with `Option<Amount>`, so
//! an `Amount` is always a present value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error converting text into an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The text is not an optional `-` followed by digits with at most one `.`.
    #[error("'{0}' is not a decimal number")]
    Malformed(String),

    /// The text is a well-formed number that a 96-bit decimal cannot hold
    /// exactly, either because it is too large or because it has more than
    /// 28 significant fractional digits.
    #[error("'{0}' cannot be represented exactly (at most 28 digits)")]
    OutOfRange(String),
}

/// A decimal value attached to a statement command.
///
/// # Examples
///
/// ```
/// use fxql_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount: Amount = "0.85".parse().unwrap();
/// assert_eq!(amount.value(), dec!(0.85));
/// assert!(!amount.is_whole());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            value: Decimal::ZERO,
        }
    }

    /// Get the decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Check if the amount is strictly below zero.
    ///
    /// A negative zero is not considered negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    /// Check if the amount has no fractional part (`100` and `100.0` both count).
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.value.fract().is_zero()
    }

    /// Get the scale (number of decimal places) of this amount.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.value.scale()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse a plain decimal such as `100`, `0.85` or `-5`.
    ///
    /// Values are never rounded: text whose digits do not all fit is rejected
    /// with [`AmountError::OutOfRange`]. Trailing fractional zeros do not
    /// count towards the limit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let well_formed = !int.is_empty()
            && int.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(AmountError::Malformed(s.to_string()));
        }

        let value = Decimal::from_str(s).map_err(|_| AmountError::OutOfRange(s.to_string()))?;
        let significant = frac.trim_end_matches('0').len();
        if significant > value.scale() as usize {
            return Err(AmountError::OutOfRange(s.to_string()));
        }
        Ok(Self::new(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
