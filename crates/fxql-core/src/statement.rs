//! Statement and command types.
//!
//! A [`Statement`] is one `BASE-QUOTE { ... }` block. Each of the three
//! [`Command`]s may appear at most once, so the statement stores them as
//! optional [`Amount`]s rather than as a list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Amount;

/// A command keyword inside a statement body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    /// `BUY` rate.
    Buy,
    /// `SELL` rate.
    Sell,
    /// `CAP` maximum transaction amount.
    Cap,
}

impl Command {
    /// All commands, in canonical output order.
    pub const ALL: [Self; 3] = [Self::Buy, Self::Sell, Self::Cap];

    /// The keyword as written in FXQL source.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Cap => "CAP",
        }
    }

    /// Look up a command by keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.keyword().eq_ignore_ascii_case(word))
    }

    /// Whether this command only accepts whole numbers.
    #[must_use]
    pub const fn requires_whole_number(self) -> bool {
        matches!(self, Self::Cap)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A currency-pair rate statement.
///
/// # Examples
///
/// ```
/// use fxql_core::{Amount, Command, Statement};
/// use rust_decimal_macros::dec;
///
/// let stmt = Statement::new("EUR", "JPY").with_sell(Amount::new(dec!(161.2)));
/// assert_eq!(stmt.amount(Command::Sell), Some(Amount::new(dec!(161.2))));
/// assert_eq!(stmt.amount(Command::Buy), None);
/// assert!(!stmt.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Base (source) currency code.
    pub base_currency: String,
    /// Quote (destination) currency code.
    pub quote_currency: String,
    /// `BUY` rate, if given.
    pub buy: Option<Amount>,
    /// `SELL` rate, if given.
    pub sell: Option<Amount>,
    /// `CAP` amount, if given.
    pub cap: Option<Amount>,
}

impl Statement {
    /// Create a statement with no commands set.
    #[must_use]
    pub fn new(base_currency: impl Into<String>, quote_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            quote_currency: quote_currency.into(),
            buy: None,
            sell: None,
            cap: None,
        }
    }

    /// Set the `BUY` rate.
    #[must_use]
    pub fn with_buy(mut self, amount: Amount) -> Self {
        self.buy = Some(amount);
        self
    }

    /// Set the `SELL` rate.
    #[must_use]
    pub fn with_sell(mut self, amount: Amount) -> Self {
        self.sell = Some(amount);
        self
    }

    /// Set the `CAP` amount.
    #[must_use]
    pub fn with_cap(mut self, amount: Amount) -> Self {
        self.cap = Some(amount);
        self
    }

    /// Get the amount for a command.
    #[must_use]
    pub const fn amount(&self, command: Command) -> Option<Amount> {
        match command {
            Command::Buy => self.buy,
            Command::Sell => self.sell,
            Command::Cap => self.cap,
        }
    }

    /// Set the amount for a command, returning the previous value.
    pub fn set_amount(&mut self, command: Command, amount: Amount) -> Option<Amount> {
        let slot = match command {
            Command::Buy => &mut self.buy,
            Command::Sell => &mut self.sell,
            Command::Cap => &mut self.cap,
        };
        slot.replace(amount)
    }

    /// Iterate over the commands that are set, in canonical order.
    pub fn commands(&self) -> impl Iterator<Item = (Command, Amount)> + '_ {
        Command::ALL
            .into_iter()
            .filter_map(|cmd| self.amount(cmd).map(|amount| (cmd, amount)))
    }

    /// True when none of `BUY`, `SELL` or `CAP` is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buy.is_none() && self.sell.is_none() && self.cap.is_none()
    }

    /// The `BASE-QUOTE` pair label.
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}-{}", self.base_currency, self.quote_currency)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {{", self.base_currency, self.quote_currency)?;
        for (cmd, amount) in self.commands() {
            write!(f, " {cmd} {amount}")?;
        }
        write!(f, " }}")
    }
}
