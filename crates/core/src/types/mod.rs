//! Core types for Formulary.
//!
//! This module provides type-safe wrappers for the domain's identities,
//! measurement units, and money.

pub mod currency;
pub mod id;
pub mod money;
pub mod unit;

pub use currency::{CurrencyCode, CurrencyError};
pub use id::*;
pub use money::{CostInput, Money};
pub use unit::{UnitError, VolumeUnit, WeightUnit};
