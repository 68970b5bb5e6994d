//! Inventory sufficiency for one batch.
//!
//! Purchased quantity stands in for stock on hand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{AggregatedRecipe, MaterialLookup, resolve_owned};
use crate::error::{CostingError, Result};
use crate::types::MaterialId;

/// Requirement against stock for one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    /// Material checked.
    pub material_id: MaterialId,
    /// Material trade name.
    pub name: String,
    /// Grams the batch needs.
    pub required_grams: Decimal,
    /// Grams on hand.
    pub available_grams: Decimal,
    /// Grams missing, zero when covered.
    pub shortfall_grams: Decimal,
}

/// Stock check for a whole recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    /// One line per distinct material, in first-use order.
    pub lines: Vec<StockLine>,
    /// Whole batches the stock covers. `None` when nothing is required.
    pub max_batches: Option<Decimal>,
}

impl StockReport {
    /// True when no material is short.
    #[must_use]
    pub fn is_sufficient(&self) -> bool {
        self.lines.iter().all(|l| l.shortfall_grams.is_zero())
    }

    /// Lines with a shortfall.
    pub fn shortages(&self) -> impl Iterator<Item = &StockLine> {
        self.lines.iter().filter(|l| l.shortfall_grams > Decimal::ZERO)
    }
}

/// Compare what `aggregated` needs with what `materials` hold.
///
/// # Errors
///
/// Returns [`CostingError::MissingMaterial`] if a line's material is not in
/// `materials`, [`CostingError::ForeignMaterial`] if it belongs to another
/// account than the recipe, and [`CostingError::Overflow`] when a quantity
/// does not fit in a `Decimal`.
pub fn check_stock<M: MaterialLookup + ?Sized>(
    aggregated: &AggregatedRecipe,
    materials: &M,
) -> Result<StockReport> {
    let overflow = || CostingError::Overflow("checking stock");
    let mut lines: Vec<StockLine> = Vec::new();
    for line in &aggregated.lines {
        if let Some(existing) = lines.iter_mut().find(|l| l.material_id == line.material_id) {
            existing.required_grams = existing
                .required_grams
                .checked_add(line.amount_in_grams)
                .ok_or_else(overflow)?;
            continue;
        }
        let material = resolve_owned(materials, line.material_id, aggregated.user_id)?;
        lines.push(StockLine {
            material_id: material.id,
            name: material.name.clone(),
            required_grams: line.amount_in_grams,
            available_grams: material.quantity_in_grams()?,
            shortfall_grams: Decimal::ZERO,
        });
    }

    for line in &mut lines {
        line.shortfall_grams = line
            .required_grams
            .checked_sub(line.available_grams)
            .ok_or_else(overflow)?
            .max(Decimal::ZERO);
    }

    let mut max_batches: Option<Decimal> = None;
    for line in lines.iter().filter(|l| l.required_grams > Decimal::ZERO) {
        let batches = line
            .available_grams
            .checked_div(line.required_grams)
            .ok_or_else(overflow)?
            .floor();
        max_batches = Some(max_batches.map_or(batches, |m| m.min(batches)));
    }

    let report = StockReport { lines, max_batches };
    if !report.is_sufficient() {
        tracing::debug!(
            recipe_id = %aggregated.recipe_id,
            short = report.shortages().count(),
            "Insufficient stock"
        );
    }
    Ok(report)
}
