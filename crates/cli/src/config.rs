//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FORMULARY_CURRENCY` - Display currency code (default: USD)
//! - `FORMULARY_LOCALE` - Locale tag used for number formatting (default: the
//!   display currency's home locale)
//! - `FORMULARY_RATES_FILE` - YAML file of `CODE: rate` pairs replacing the
//!   shipped exchange rates
//! - `FORMULARY_LOG_JSON` - Emit logs as JSON when set to any value
//!
//! Command-line flags take precedence over all of these.

use std::path::Path;

use formulary_core::{CurrencyCode, ExchangeRates};
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid rates file {0}: {1}")]
    RatesFile(String, String),
}

/// Resolved CLI settings.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Currency amounts are shown in.
    pub currency: CurrencyCode,
    /// Locale override for number formatting.
    pub locale: Option<String>,
    /// Exchange rate table.
    pub rates: ExchangeRates,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the currency code is unknown or the rates
    /// file cannot be read.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(get_optional_env)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let currency_code = var("FORMULARY_CURRENCY").unwrap_or_else(|| "USD".to_string());
        let currency = currency_code.parse::<CurrencyCode>().map_err(|e| {
            ConfigError::InvalidEnvVar("FORMULARY_CURRENCY".to_string(), e.to_string())
        })?;
        let locale = var("FORMULARY_LOCALE").filter(|l| !l.trim().is_empty());
        let rates = match var("FORMULARY_RATES_FILE") {
            Some(path) => load_rates(Path::new(&path))?,
            None => ExchangeRates::default(),
        };

        Ok(Self {
            currency,
            locale,
            rates,
        })
    }

    /// Apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the rates file cannot be read.
    pub fn with_overrides(
        mut self,
        currency: Option<CurrencyCode>,
        locale: Option<String>,
        rates_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(currency) = currency {
            self.currency = currency;
        }
        if locale.is_some() {
            self.locale = locale;
        }
        if let Some(path) = rates_file {
            self.rates = load_rates(path)?;
        }
        Ok(self)
    }
}

/// Whether logs should be emitted as JSON.
#[must_use]
pub fn json_logs_enabled() -> bool {
    get_optional_env("FORMULARY_LOG_JSON").is_some()
}

/// Read a rates file. Currencies it does not list keep their shipped rate.
///
/// # Errors
///
/// Returns `ConfigError::RatesFile` if the file is unreadable, is not a YAML
/// mapping, names an unknown currency, or holds a non-positive rate.
pub fn load_rates(path: &Path) -> Result<ExchangeRates, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::RatesFile(path.display().to_string(), e.to_string()))?;
    parse_rates(&content)
        .map_err(|reason| ConfigError::RatesFile(path.display().to_string(), reason))
}

/// Parse `CODE: rate` pairs. Rates may be written as YAML numbers or strings.
fn parse_rates(content: &str) -> Result<ExchangeRates, String> {
    let raw: std::collections::BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    let mut overrides = Vec::with_capacity(raw.len());
    for (code, value) in raw {
        let currency = code.parse::<CurrencyCode>().map_err(|e| e.to_string())?;
        let text = match value {
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::String(s) => s,
            _ => return Err(format!("rate for {code} is not a number")),
        };
        let rate = text
            .trim()
            .parse::<Decimal>()
            .map_err(|e| format!("rate for {code}: {e}"))?;
        if rate <= Decimal::ZERO {
            return Err(format!("rate for {code} must be positive"));
        }
        overrides.push((currency, rate));
    }
    Ok(ExchangeRates::with_overrides(overrides))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
