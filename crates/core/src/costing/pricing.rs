//! Sale price from cost, packaging and margin.
//!
//! Inputs are canonical amounts. Converting user-entered figures happens
//! before this point, through [`crate::CostInput`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CostingError, Result};

/// Result of one pricing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Material + packaging + container.
    pub total_cost: Decimal,
    /// `total_cost * margin / 100`.
    pub profit_amount: Decimal,
    /// `total_cost + profit_amount`.
    pub final_price: Decimal,
}

/// Price a product.
///
/// The margin is a markup on total cost. No range check is applied here.
///
/// ```
/// use formulary_core::costing::price;
/// use rust_decimal::Decimal;
///
/// let quote = price(Decimal::new(10, 0), Decimal::ONE, Decimal::new(5, 1), Decimal::new(20, 0))?;
/// assert_eq!(quote.total_cost, Decimal::new(115, 1));
/// assert_eq!(quote.profit_amount, Decimal::new(23, 1));
/// assert_eq!(quote.final_price, Decimal::new(138, 1));
/// # Ok::<(), formulary_core::CostingError>(())
/// ```
///
/// # Errors
///
/// Returns [`CostingError::Overflow`] when a total does not fit in a `Decimal`.
pub fn price(
    actual_cost: Decimal,
    packaging_cost: Decimal,
    container_cost: Decimal,
    margin_percent: Decimal,
) -> Result<PriceQuote> {
    let overflow = || CostingError::Overflow("pricing");
    let total_cost = actual_cost
        .checked_add(packaging_cost)
        .and_then(|sum| sum.checked_add(container_cost))
        .ok_or_else(overflow)?;
    let profit_amount = total_cost
        .checked_mul(margin_percent)
        .map(|markup| markup / Decimal::ONE_HUNDRED)
        .ok_or_else(overflow)?;
    let final_price = total_cost.checked_add(profit_amount).ok_or_else(overflow)?;
    Ok(PriceQuote {
        total_cost,
        profit_amount,
        final_price,
    })
}
