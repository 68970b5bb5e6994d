//! Currency normalization and display formatting.
//!
//! Rates are configuration constants (units of a currency per one USD), never
//! fetched live. Conversion between two identical currencies returns the
//! input untouched so canonical amounts never pick up rounding noise.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CostingError, Result};
use crate::types::CurrencyCode;

/// Static exchange-rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates {
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            rates: CurrencyCode::ALL
                .into_iter()
                .map(|c| (c, c.default_rate()))
                .collect(),
        }
    }
}

impl ExchangeRates {
    /// Build a table from explicit rates only.
    ///
    /// Non-positive rates are dropped; a currency without a rate converts as
    /// if it were USD.
    #[must_use]
    pub fn new(rates: impl IntoIterator<Item = (CurrencyCode, Decimal)>) -> Self {
        let mut table = Self {
            rates: BTreeMap::new(),
        };
        for (currency, rate) in rates {
            table.set_rate(currency, rate);
        }
        table
    }

    /// The shipped rates with some of them replaced.
    #[must_use]
    pub fn with_overrides(overrides: impl IntoIterator<Item = (CurrencyCode, Decimal)>) -> Self {
        let mut table = Self::default();
        for (currency, rate) in overrides {
            table.set_rate(currency, rate);
        }
        table
    }

    /// Set one rate. Non-positive rates are ignored.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: Decimal) {
        if rate <= Decimal::ZERO {
            tracing::warn!(%currency, %rate, "Ignoring non-positive exchange rate");
            return;
        }
        self.rates.insert(currency, rate);
    }

    /// Units of `currency` per one USD.
    ///
    /// USD is always 1. A missing rate falls back to 1, making conversion a
    /// no-op for that currency.
    #[must_use]
    pub fn rate(&self, currency: CurrencyCode) -> Decimal {
        if currency == CurrencyCode::CANONICAL {
            return Decimal::ONE;
        }
        self.rates.get(&currency).copied().unwrap_or_else(|| {
            tracing::warn!(%currency, "No exchange rate configured, using identity");
            Decimal::ONE
        })
    }

    /// Convert `amount` from one currency to another.
    ///
    /// ```
    /// use formulary_core::costing::ExchangeRates;
    /// use formulary_core::CurrencyCode;
    /// use rust_decimal::Decimal;
    ///
    /// let rates = ExchangeRates::default();
    /// let pkr = rates.convert(Decimal::new(100, 0), CurrencyCode::USD, CurrencyCode::PKR)?;
    /// assert_eq!(pkr, Decimal::new(27850, 0));
    /// assert_eq!(rates.convert(pkr, CurrencyCode::PKR, CurrencyCode::USD)?, Decimal::new(100, 0));
    /// # Ok::<(), formulary_core::CostingError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::Overflow`] when the converted amount does not
    /// fit in a `Decimal`.
    pub fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        amount
            .checked_div(self.rate(from))
            .and_then(|usd| usd.checked_mul(self.rate(to)))
            .ok_or(CostingError::Overflow("converting currency"))
    }

    /// Convert a canonical amount into a display currency.
    ///
    /// # Errors
    ///
    /// Same as [`Self::convert`].
    pub fn from_canonical(&self, amount: Decimal, to: CurrencyCode) -> Result<Decimal> {
        self.convert(amount, CurrencyCode::CANONICAL, to)
    }

    /// Convert an amount in `from` into the canonical currency.
    ///
    /// # Errors
    ///
    /// Same as [`Self::convert`].
    pub fn to_canonical(&self, amount: Decimal, from: CurrencyCode) -> Result<Decimal> {
        self.convert(amount, from, CurrencyCode::CANONICAL)
    }
}

/// Separators and symbol placement for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    /// Thousands separator.
    pub group: &'static str,
    /// Decimal separator.
    pub decimal: &'static str,
    /// Lakh/crore grouping (3, then 2s) instead of 3s.
    pub indian_grouping: bool,
    /// Symbol goes after the number.
    pub symbol_after: bool,
}

impl NumberStyle {
    const ENGLISH: Self = Self {
        group: ",",
        decimal: ".",
        indian_grouping: false,
        symbol_after: false,
    };

    /// Look up the style for a BCP 47 locale tag.
    ///
    /// Returns `None` for locales this formatter does not know.
    #[must_use]
    pub fn for_locale(tag: &str) -> Option<Self> {
        match tag {
            "en-US" | "en-GB" | "en-CA" | "en-AU" | "en-PK" | "ja-JP" | "zh-CN" | "en" => {
                Some(Self::ENGLISH)
            }
            "en-IN" | "hi-IN" => Some(Self {
                indian_grouping: true,
                ..Self::ENGLISH
            }),
            "de-DE" | "de-AT" | "it-IT" | "es-ES" | "nl-NL" => Some(Self {
                group: ".",
                decimal: ",",
                indian_grouping: false,
                symbol_after: true,
            }),
            "fr-FR" | "fr-CA" => Some(Self {
                group: "\u{202f}",
                decimal: ",",
                indian_grouping: false,
                symbol_after: true,
            }),
            _ => None,
        }
    }
}

/// Format a canonical amount in a display currency using its home locale.
///
/// JPY shows no fraction digits, every other currency shows two.
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] if the amount cannot be converted.
pub fn format_money(
    amount_usd: Decimal,
    currency: CurrencyCode,
    rates: &ExchangeRates,
) -> Result<String> {
    let digits = currency.fraction_digits();
    Ok(format_with_locale(
        rates.from_canonical(amount_usd, currency)?,
        currency,
        currency.default_locale(),
        digits,
        digits,
    ))
}

/// Format a canonical per-gram cost, allowing two extra fraction digits for
/// sub-cent values.
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] if the amount cannot be converted.
pub fn format_unit_cost(
    amount_usd: Decimal,
    currency: CurrencyCode,
    rates: &ExchangeRates,
) -> Result<String> {
    let digits = currency.fraction_digits();
    Ok(format_with_locale(
        rates.from_canonical(amount_usd, currency)?,
        currency,
        currency.default_locale(),
        digits,
        digits + 2,
    ))
}

/// Format an amount that is already in `currency`.
///
/// Shows between `min_digits` and `max_digits` fraction digits. An unknown
/// locale tag falls back to [`format_plain`].
#[must_use]
pub fn format_with_locale(
    amount: Decimal,
    currency: CurrencyCode,
    locale: &str,
    min_digits: u32,
    max_digits: u32,
) -> String {
    let Some(style) = NumberStyle::for_locale(locale) else {
        tracing::debug!(locale, %currency, "Unsupported locale, using plain formatting");
        return format_plain(amount, currency, max_digits);
    };

    let digits = fixed_digits(amount, min_digits, max_digits.max(min_digits));
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let mut number = group_digits(int_part, style);
    if !frac_part.is_empty() {
        number.push_str(style.decimal);
        number.push_str(frac_part);
    }

    let sign = if is_negative_after_rounding(amount, max_digits) {
        "-"
    } else {
        ""
    };
    let symbol = currency.symbol();
    if style.symbol_after {
        format!("{sign}{number}\u{a0}{symbol}")
    } else if symbol.ends_with(|c: char| c.is_ascii_alphabetic()) {
        format!("{sign}{symbol}\u{a0}{number}")
    } else {
        format!("{sign}{symbol}{number}")
    }
}

/// Symbol followed by the amount to a fixed number of decimals, no grouping.
#[must_use]
pub fn format_plain(amount: Decimal, currency: CurrencyCode, digits: u32) -> String {
    let sign = if is_negative_after_rounding(amount, digits) {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{}",
        currency.symbol(),
        fixed_digits(amount, digits, digits)
    )
}

/// Absolute value rounded to `max` digits, trimmed of trailing zeros down to `min`.
fn fixed_digits(amount: Decimal, min: u32, max: u32) -> String {
    let mut rounded = amount
        .abs()
        .round_dp_with_strategy(max, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.scale() < min {
        rounded.rescale(min);
    }
    rounded.to_string()
}

fn is_negative_after_rounding(amount: Decimal, digits: u32) -> bool {
    amount.is_sign_negative()
        && !amount
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
            .is_zero()
}

fn group_digits(int_part: &str, style: NumberStyle) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();
    let mut size = 3;
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(digits.get(start..end).unwrap_or_default().iter().collect());
        end = start;
        if style.indian_grouping {
            size = 2;
        }
    }
    groups.reverse();
    groups.join(style.group)
}
