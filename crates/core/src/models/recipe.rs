//! Recipe (formulation) domain model.
//!
//! A recipe stores each line's gram weight and cost, and its total cost, as a
//! cache of the last aggregation. Anything financial re-aggregates against
//! the live materials instead of trusting the cache.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::{AggregatedRecipe, MaterialLookup, aggregate};
use crate::error::{CostingError, Result};
use crate::types::{MaterialId, RecipeId, UserId, WeightUnit};

/// One ingredient in a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientLine {
    /// Referenced raw material.
    pub material_id: MaterialId,
    /// Amount used, in `unit`.
    pub amount: Decimal,
    /// Unit of `amount`.
    pub unit: WeightUnit,
    /// Cached gram weight.
    #[serde(default)]
    pub amount_in_grams: Decimal,
    /// Cached line cost (canonical currency).
    #[serde(default)]
    pub cost: Decimal,
}

impl RecipeIngredientLine {
    /// Create a line. Its cached weight and cost stay zero until the recipe
    /// is next refreshed.
    #[must_use]
    pub const fn new(material_id: MaterialId, amount: Decimal, unit: WeightUnit) -> Self {
        Self {
            material_id,
            amount,
            unit,
            amount_in_grams: Decimal::ZERO,
            cost: Decimal::ZERO,
        }
    }
}

/// A formulation: an ordered list of ingredient lines plus batch metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe ID.
    pub id: RecipeId,
    /// Owning account.
    pub user_id: UserId,
    /// Recipe name.
    pub name: String,
    /// Ingredient lines in insertion order.
    #[serde(default)]
    pub lines: Vec<RecipeIngredientLine>,
    /// Cached sum of line costs (canonical currency).
    #[serde(default)]
    pub total_cost: Decimal,
    /// Target total weight in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<Decimal>,
    /// Number of finished units the batch fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<u32>,
    /// Weight the recipe was written for, in grams. Scaling reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_batch_size: Option<Decimal>,
}

impl Recipe {
    /// Create a recipe and aggregate it against `materials`.
    ///
    /// The original batch size is the explicit batch size when given,
    /// otherwise the summed ingredient weight.
    ///
    /// # Errors
    ///
    /// Returns an error if a line references a material that is missing from
    /// `materials` or owned by another account.
    pub fn create<M: MaterialLookup + ?Sized>(
        id: RecipeId,
        user_id: UserId,
        name: impl Into<String>,
        lines: Vec<RecipeIngredientLine>,
        batch_size: Option<Decimal>,
        number_of_units: Option<u32>,
        materials: &M,
    ) -> Result<Self> {
        let mut recipe = Self {
            id,
            user_id,
            name: name.into(),
            lines,
            total_cost: Decimal::ZERO,
            batch_size,
            number_of_units,
            original_batch_size: None,
        };
        let aggregated = recipe.refresh(materials)?;
        recipe.original_batch_size = Some(batch_size.unwrap_or(aggregated.total_weight));
        Ok(recipe)
    }

    /// Re-aggregate against `materials` and rewrite the cached weights and costs.
    ///
    /// # Errors
    ///
    /// Returns an error if a line's material is missing or foreign. The
    /// recipe is left untouched in that case.
    pub fn refresh<M: MaterialLookup + ?Sized>(&mut self, materials: &M) -> Result<AggregatedRecipe> {
        let aggregated = aggregate(self, materials)?;
        for (line, fresh) in self.lines.iter_mut().zip(&aggregated.lines) {
            line.amount_in_grams = fresh.amount_in_grams;
            line.cost = fresh.cost;
        }
        self.total_cost = aggregated.total_cost;
        Ok(aggregated)
    }

    /// Append an ingredient line.
    ///
    /// # Errors
    ///
    /// Returns an error if the new line's material cannot be resolved; the
    /// line is not added.
    pub fn add_line<M: MaterialLookup + ?Sized>(
        &mut self,
        line: RecipeIngredientLine,
        materials: &M,
    ) -> Result<AggregatedRecipe> {
        self.lines.push(line);
        self.refresh(materials).inspect_err(|_| {
            self.lines.pop();
        })
    }

    /// Change the amount and unit of an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::LineOutOfRange`] for a bad index, or a lookup
    /// error from re-aggregation (the edit is rolled back).
    pub fn update_line<M: MaterialLookup + ?Sized>(
        &mut self,
        index: usize,
        amount: Decimal,
        unit: WeightUnit,
        materials: &M,
    ) -> Result<AggregatedRecipe> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CostingError::LineOutOfRange { index, len })?;
        let previous = (line.amount, line.unit);
        line.amount = amount;
        line.unit = unit;

        self.refresh(materials).inspect_err(|_| {
            if let Some(line) = self.lines.get_mut(index) {
                (line.amount, line.unit) = previous;
            }
        })
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::LineOutOfRange`] for a bad index, or a lookup
    /// error from re-aggregating the remaining lines (the line is put back).
    pub fn remove_line<M: MaterialLookup + ?Sized>(
        &mut self,
        index: usize,
        materials: &M,
    ) -> Result<RecipeIngredientLine> {
        let len = self.lines.len();
        if index >= len {
            return Err(CostingError::LineOutOfRange { index, len });
        }
        let removed = self.lines.remove(index);
        match self.refresh(materials) {
            Ok(_) => Ok(removed),
            Err(e) => {
                self.lines.insert(index, removed);
                Err(e)
            }
        }
    }

    /// Cached gram weight of all lines.
    #[must_use]
    pub fn cached_weight(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, l| total.saturating_add(l.amount_in_grams))
    }

    /// Cost of one finished unit, from the cached total.
    #[must_use]
    pub fn cost_per_unit(&self) -> Option<Decimal> {
        per_unit(self.total_cost, self.number_of_units)
    }
}

/// Split a total over a unit count, if there is one.
pub(crate) fn per_unit(total: Decimal, units: Option<u32>) -> Option<Decimal> {
    units
        .filter(|n| *n > 0)
        .map(|n| total / Decimal::from(n))
}
