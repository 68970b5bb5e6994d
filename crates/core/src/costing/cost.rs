//! Cost derivation from purchase data.

use rust_decimal::Decimal;

use super::units::to_grams;
use crate::error::{CostingError, Result};
use crate::types::WeightUnit;

/// Canonical cost of one gram of a material bought as `total_quantity` `unit`
/// for `total_cost`.
///
/// A purchase with no quantity yet has a cost per gram of zero.
///
/// ```
/// use formulary_core::costing::cost_per_gram;
/// use formulary_core::WeightUnit;
/// use rust_decimal::Decimal;
///
/// let rate = cost_per_gram(Decimal::new(1599, 2), Decimal::new(500, 0), WeightUnit::Gram)?;
/// assert_eq!(rate, Decimal::new(3198, 5));
/// assert_eq!(cost_per_gram(Decimal::new(1599, 2), Decimal::ZERO, WeightUnit::Gram)?, Decimal::ZERO);
/// # Ok::<(), formulary_core::CostingError>(())
/// ```
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] when the quantity or the rate does not
/// fit in a `Decimal`.
pub fn cost_per_gram(
    total_cost: Decimal,
    total_quantity: Decimal,
    unit: WeightUnit,
) -> Result<Decimal> {
    let grams = to_grams(total_quantity, unit)?;
    if grams.is_zero() {
        return Ok(Decimal::ZERO);
    }
    total_cost
        .checked_div(grams)
        .ok_or(CostingError::Overflow("deriving cost per gram"))
}

/// Cost of `used_grams` of a material at `cost_per_gram`.
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] when the product does not fit.
pub fn line_cost(used_grams: Decimal, cost_per_gram: Decimal) -> Result<Decimal> {
    used_grams
        .checked_mul(cost_per_gram)
        .ok_or(CostingError::Overflow("costing a line"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_scenario() {
        let rate =
            cost_per_gram(Decimal::new(1599, 2), Decimal::new(500, 0), WeightUnit::Gram).unwrap();
        assert_eq!(rate, Decimal::new(3198, 5));
        assert_eq!(line_cost(Decimal::new(100, 0), rate).unwrap(), Decimal::new(3198, 3));
    }

    #[test]
    fn test_zero_cost_is_zero_rate() {
        for unit in WeightUnit::ALL {
            assert_eq!(
                cost_per_gram(Decimal::ZERO, Decimal::new(250, 0), unit).unwrap(),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn test_zero_quantity_is_zero_rate() {
        for unit in WeightUnit::ALL {
            assert_eq!(
                cost_per_gram(Decimal::new(42, 0), Decimal::ZERO, unit).unwrap(),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn test_kilogram_purchase() {
        // 2 kg for $30 is 1.5 cents per gram
        let rate =
            cost_per_gram(Decimal::new(30, 0), Decimal::new(2, 0), WeightUnit::Kilogram).unwrap();
        assert_eq!(rate, Decimal::new(15, 3));
    }

    #[test]
    fn test_pound_purchase_matches_gram_purchase() {
        let by_pound = cost_per_gram(Decimal::new(10, 0), Decimal::ONE, WeightUnit::Pound).unwrap();
        let by_gram =
            cost_per_gram(Decimal::new(10, 0), Decimal::new(453_592, 3), WeightUnit::Gram).unwrap();
        assert_eq!(by_pound, by_gram);
    }

    #[test]
    fn test_vanishing_quantity_overflows() {
        // A billion paid for 1e-27 g
        let err = cost_per_gram(
            Decimal::new(1_000_000_000, 0),
            Decimal::new(1, 27),
            WeightUnit::Gram,
        )
        .unwrap_err();
        assert_eq!(err, CostingError::Overflow("deriving cost per gram"));
        assert!(line_cost(Decimal::MAX, Decimal::TWO).is_err());
    }
}
