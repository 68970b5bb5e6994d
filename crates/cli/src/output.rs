//! Report rendering.
//!
//! Human-readable lines go through `tracing::info!`. With `--json` the
//! command's result is written to stdout as one JSON document instead.

use std::io::Write;

use formulary_core::{
    CostingError, CurrencyCode, ExchangeRates, format_money, format_unit_cost, format_with_locale,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::CliConfig;

/// Formats canonical amounts for display.
#[derive(Debug, Clone)]
pub struct Presenter {
    currency: CurrencyCode,
    locale: Option<String>,
    rates: ExchangeRates,
    json: bool,
}

impl Presenter {
    pub fn new(config: &CliConfig, json: bool) -> Self {
        Self {
            currency: config.currency,
            locale: config.locale.clone(),
            rates: config.rates.clone(),
            json,
        }
    }

    pub const fn json(&self) -> bool {
        self.json
    }

    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub const fn rates(&self) -> &ExchangeRates {
        &self.rates
    }

    /// A canonical amount in the display currency.
    pub fn money(&self, amount: Decimal) -> Result<String, CostingError> {
        let digits = self.currency.fraction_digits();
        match &self.locale {
            Some(locale) => self.localized(amount, locale, digits, digits),
            None => format_money(amount, self.currency, &self.rates),
        }
    }

    /// A canonical per-gram cost in the display currency.
    pub fn unit_cost(&self, amount: Decimal) -> Result<String, CostingError> {
        let digits = self.currency.fraction_digits();
        match &self.locale {
            Some(locale) => self.localized(amount, locale, digits, digits + 2),
            None => format_unit_cost(amount, self.currency, &self.rates),
        }
    }

    fn localized(
        &self,
        amount: Decimal,
        locale: &str,
        min: u32,
        max: u32,
    ) -> Result<String, CostingError> {
        let converted = self.rates.from_canonical(amount, self.currency)?;
        Ok(format_with_locale(converted, self.currency, locale, min, max))
    }

    /// Write `value` to stdout as pretty JSON.
    pub fn emit_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        Ok(())
    }
}

/// A weight or share for display: at most two decimals, no trailing zeros.
pub fn quantity(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn presenter(currency: CurrencyCode, locale: Option<&str>) -> Presenter {
        let config = CliConfig {
            currency,
            locale: locale.map(str::to_string),
            rates: ExchangeRates::default(),
        };
        Presenter::new(&config, false)
    }

    #[test]
    fn test_money_uses_home_locale() {
        let pkr = presenter(CurrencyCode::PKR, None);
        assert_eq!(pkr.money(Decimal::ONE_HUNDRED).unwrap(), "Rs\u{a0}27,850.00");
    }

    #[test]
    fn test_locale_override() {
        let eur_in_us_style = presenter(CurrencyCode::EUR, Some("en-US"));
        assert_eq!(eur_in_us_style.money(Decimal::new(2000, 0)).unwrap(), "€1,840.00");
    }

    #[test]
    fn test_unit_cost_digits() {
        let usd = presenter(CurrencyCode::USD, None);
        assert_eq!(usd.unit_cost(Decimal::new(3198, 5)).unwrap(), "$0.032");
        let overridden = presenter(CurrencyCode::USD, Some("en-GB"));
        assert_eq!(overridden.unit_cost(Decimal::new(3198, 5)).unwrap(), "$0.032");
    }

    #[test]
    fn test_amount_too_large_to_display() {
        let jpy = presenter(CurrencyCode::JPY, Some("en-US"));
        assert!(jpy.money(Decimal::MAX).is_err());
        let usd = presenter(CurrencyCode::USD, None);
        assert!(usd.money(Decimal::MAX).is_ok());
    }

    #[test]
    fn test_quantity() {
        assert_eq!(quantity(Decimal::new(25000, 2)), "250");
        assert_eq!(quantity(Decimal::new(283_495, 4)), "28.35");
    }
}
