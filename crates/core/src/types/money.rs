//! Currency-tagged amounts.
//!
//! A bare `Decimal` in the models is always canonical (USD). Anything a user
//! typed in another currency travels as [`Money`] until it is converted, and
//! pricing inputs say where they came from through [`CostInput`], so an
//! amount can be converted exactly once.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use crate::costing::ExchangeRates;
use crate::error::Result;

/// An amount together with the currency it is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// An amount already in the canonical currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::CANONICAL)
    }

    /// Whether this amount is already canonical.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.currency == CurrencyCode::CANONICAL
    }

    /// Convert to the canonical currency.
    ///
    /// Canonical amounts come back untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CostingError::Overflow`] if the amount does not fit
    /// once converted.
    pub fn canonical(&self, rates: &ExchangeRates) -> Result<Decimal> {
        rates.to_canonical(self.amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Origin of a cost figure fed to the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum CostInput {
    /// Read from storage, already in USD. Never converted.
    Canonical { amount: Decimal },
    /// Typed by a user in some currency. Converted once on use.
    Entered { money: Money },
}

impl CostInput {
    /// A cost taken straight from storage.
    #[must_use]
    pub const fn canonical(amount: Decimal) -> Self {
        Self::Canonical { amount }
    }

    /// A cost typed by a user.
    #[must_use]
    pub const fn entered(amount: Decimal, currency: CurrencyCode) -> Self {
        Self::Entered {
            money: Money::new(amount, currency),
        }
    }

    /// Resolve to a canonical amount.
    ///
    /// # Errors
    ///
    /// Same as [`Money::canonical`].
    pub fn resolve(&self, rates: &ExchangeRates) -> Result<Decimal> {
        match self {
            Self::Canonical { amount } => Ok(*amount),
            Self::Entered { money } => money.canonical(rates),
        }
    }
}

impl Default for CostInput {
    fn default() -> Self {
        Self::canonical(Decimal::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_money_is_untouched() {
        let rates = ExchangeRates::default();
        let money = Money::usd(Decimal::new(1234, 2));
        assert!(money.is_canonical());
        assert_eq!(money.canonical(&rates).unwrap(), Decimal::new(1234, 2));
    }

    #[test]
    fn test_entered_cost_converts_once() {
        let rates = ExchangeRates::default();
        let entered = CostInput::entered(Decimal::new(27850, 0), CurrencyCode::PKR);
        assert_eq!(entered.resolve(&rates).unwrap(), Decimal::new(100, 0));
    }

    #[test]
    fn test_canonical_cost_never_converts() {
        let rates = ExchangeRates::default();
        let stored = CostInput::canonical(Decimal::new(100, 0));
        assert_eq!(stored.resolve(&rates).unwrap(), Decimal::new(100, 0));
    }

    #[test]
    fn test_entered_cost_too_large_to_convert() {
        let rates = ExchangeRates::with_overrides([(CurrencyCode::EUR, Decimal::new(1, 6))]);
        let entered = CostInput::entered(Decimal::MAX, CurrencyCode::EUR);
        assert!(entered.resolve(&rates).is_err());
        // Stored amounts are never converted, so they cannot overflow.
        let stored = CostInput::canonical(Decimal::MAX);
        assert_eq!(stored.resolve(&rates).unwrap(), Decimal::MAX);
    }
}
