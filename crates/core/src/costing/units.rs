//! Weight conversion to and from grams.

use rust_decimal::Decimal;

use crate::error::{CostingError, Result};
use crate::types::WeightUnit;

/// Convert a weight to grams.
///
/// Sign is not checked; callers reject non-positive quantities where that
/// matters (purchase amounts, scaling targets).
///
/// ```
/// use formulary_core::costing::to_grams;
/// use formulary_core::WeightUnit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_grams(Decimal::new(2, 0), WeightUnit::Kilogram)?, Decimal::new(2000, 0));
/// # Ok::<(), formulary_core::CostingError>(())
/// ```
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] when the gram weight does not fit in a
/// `Decimal`.
pub fn to_grams(value: Decimal, unit: WeightUnit) -> Result<Decimal> {
    match unit {
        WeightUnit::Gram => Ok(value),
        _ => value
            .checked_mul(unit.grams_factor())
            .ok_or(CostingError::Overflow("converting to grams")),
    }
}

/// Express a gram weight in another unit.
///
/// Ounce and pound round trips are not exact past the 28th significant digit.
#[must_use]
pub fn from_grams(grams: Decimal, unit: WeightUnit) -> Decimal {
    match unit {
        WeightUnit::Gram => grams,
        _ => grams / unit.grams_factor(),
    }
}
