//! Measurement units for purchase quantities and recipe amounts.
//!
//! All cost math runs in grams. [`WeightUnit`] covers the four mass units the
//! costing path understands. [`VolumeUnit`] exists so inventory records written
//! in milliliters or liters can be recognised, but volume is its own axis and
//! is never converted to grams.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when strictly parsing a unit code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The code is not a known unit.
    #[error("unknown weight unit: {0}")]
    Unknown(String),
    /// The code names a volume unit, which has no gram equivalent.
    #[error("{0} is a volume unit and cannot be converted to grams")]
    Volume(String),
}

/// A unit of mass.
///
/// Gram is the canonical unit; every other unit carries an exact
/// multiplicative factor to grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeightUnit {
    #[default]
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

impl WeightUnit {
    /// Every supported weight unit, in display order.
    pub const ALL: [Self; 4] = [Self::Gram, Self::Kilogram, Self::Ounce, Self::Pound];

    /// Grams per one of this unit.
    #[must_use]
    pub fn grams_factor(self) -> Decimal {
        match self {
            Self::Gram => Decimal::ONE,
            Self::Kilogram => Decimal::ONE_THOUSAND,
            Self::Ounce => Decimal::new(283_495, 4),
            Self::Pound => Decimal::new(453_592, 3),
        }
    }

    /// Short code used in storage and on screen.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
        }
    }

    /// Decode a stored unit code, treating anything unrecognised as grams.
    ///
    /// Records written before a unit was validated still load; the fallback
    /// is logged so the calling layer can see partially-migrated data.
    #[must_use]
    pub fn from_code_lenient(code: &str) -> Self {
        code.parse().unwrap_or_else(|err: UnitError| {
            tracing::warn!(code, error = %err, "Unrecognised weight unit, treating as grams");
            Self::Gram
        })
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WeightUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "g" | "gram" | "grams" => Ok(Self::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(Self::Kilogram),
            "oz" | "ounce" | "ounces" => Ok(Self::Ounce),
            "lb" | "lbs" | "pound" | "pounds" => Ok(Self::Pound),
            other if other.parse::<VolumeUnit>().is_ok() => Err(UnitError::Volume(s.to_owned())),
            _ => Err(UnitError::Unknown(s.to_owned())),
        }
    }
}

impl Serialize for WeightUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for WeightUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code_lenient(&code))
    }
}

/// A unit of volume, recognised for inventory records only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
}

impl VolumeUnit {
    /// Short code used in storage and on screen.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Milliliter => "ml",
            Self::Liter => "l",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VolumeUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Ok(Self::Milliliter)
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(Self::Liter),
            _ => Err(UnitError::Unknown(s.to_owned())),
        }
    }
}
