//! Display currencies.
//!
//! Every stored amount is in [`CurrencyCode::CANONICAL`] (USD). The other
//! codes exist for presentation and for user entry in a local currency.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when strictly parsing a currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the supported currencies.
    #[error("unsupported currency: {0}")]
    Unknown(String),
}

/// ISO 4217 currency codes supported for display and entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    USD,
    PKR,
    EUR,
    GBP,
    CAD,
    AUD,
    INR,
    JPY,
    CNY,
}

impl CurrencyCode {
    /// The storage currency.
    pub const CANONICAL: Self = Self::USD;

    /// Every supported currency.
    pub const ALL: [Self; 9] = [
        Self::USD,
        Self::PKR,
        Self::EUR,
        Self::GBP,
        Self::CAD,
        Self::AUD,
        Self::INR,
        Self::JPY,
        Self::CNY,
    ];

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::PKR => "PKR",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::INR => "INR",
            Self::JPY => "JPY",
            Self::CNY => "CNY",
        }
    }

    /// Currency symbol as shown in its home locale.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::PKR => "Rs",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
            Self::JPY => "￥",
            Self::CNY => "¥",
        }
    }

    /// BCP 47 tag of the locale used to format this currency.
    #[must_use]
    pub const fn default_locale(self) -> &'static str {
        match self {
            Self::USD => "en-US",
            Self::PKR => "en-PK",
            Self::EUR => "de-DE",
            Self::GBP => "en-GB",
            Self::CAD => "en-CA",
            Self::AUD => "en-AU",
            Self::INR => "en-IN",
            Self::JPY => "ja-JP",
            Self::CNY => "zh-CN",
        }
    }

    /// Number of minor-unit digits shown for whole amounts.
    #[must_use]
    pub const fn fraction_digits(self) -> u32 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }

    /// Units of this currency per one US dollar, as shipped.
    #[must_use]
    pub fn default_rate(self) -> Decimal {
        match self {
            Self::USD => Decimal::ONE,
            Self::PKR => Decimal::new(27850, 2),
            Self::EUR => Decimal::new(92, 2),
            Self::GBP => Decimal::new(79, 2),
            Self::CAD => Decimal::new(136, 2),
            Self::AUD => Decimal::new(152, 2),
            Self::INR => Decimal::new(8312, 2),
            Self::JPY => Decimal::new(14950, 2),
            Self::CNY => Decimal::new(724, 2),
        }
    }

    /// Decode a stored currency code, treating anything unsupported as USD.
    ///
    /// USD is the canonical currency, so the fallback makes every later
    /// conversion an identity.
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        code.parse().unwrap_or_else(|err: CurrencyError| {
            tracing::warn!(code, error = %err, "Unsupported currency, treating as USD");
            Self::CANONICAL
        })
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyError::Unknown(s.to_owned()))
    }
}
