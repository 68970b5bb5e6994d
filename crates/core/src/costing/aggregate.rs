//! Recipe aggregation.
//!
//! Every line is re-resolved against the live material record: the gram
//! weight, cost per gram and cost cached on the line are ignored.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cost::line_cost;
use super::units::to_grams;
use crate::error::{CostingError, Result};
use crate::models::recipe::per_unit;
use crate::models::{RawMaterial, Recipe};
use crate::types::{MaterialId, RecipeId, UserId, WeightUnit};

/// Source of current material records.
///
/// Implemented for slices, vectors and maps so callers can hand over
/// whatever their persistence layer returned.
pub trait MaterialLookup {
    /// Find a material by ID.
    fn material(&self, id: MaterialId) -> Option<&RawMaterial>;
}

impl MaterialLookup for [RawMaterial] {
    fn material(&self, id: MaterialId) -> Option<&RawMaterial> {
        self.iter().find(|m| m.id == id)
    }
}

impl MaterialLookup for Vec<RawMaterial> {
    fn material(&self, id: MaterialId) -> Option<&RawMaterial> {
        self.as_slice().material(id)
    }
}

impl<S: BuildHasher> MaterialLookup for HashMap<MaterialId, RawMaterial, S> {
    fn material(&self, id: MaterialId) -> Option<&RawMaterial> {
        self.get(&id)
    }
}

impl MaterialLookup for BTreeMap<MaterialId, RawMaterial> {
    fn material(&self, id: MaterialId) -> Option<&RawMaterial> {
        self.get(&id)
    }
}

/// One line of an aggregated recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLine {
    /// Referenced material.
    pub material_id: MaterialId,
    /// Material trade name.
    pub material_name: String,
    /// Name for ingredient labels (INCI when known).
    pub label_name: String,
    /// Amount used, in `unit`.
    pub amount: Decimal,
    /// Unit of `amount`.
    pub unit: WeightUnit,
    /// Weight in grams.
    pub amount_in_grams: Decimal,
    /// Live cost per gram of the material.
    pub cost_per_gram: Decimal,
    /// Line cost (canonical currency).
    pub cost: Decimal,
    /// Share of the recipe's total weight, 0-100.
    pub percentage: Decimal,
}

/// A recipe with every derived figure recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRecipe {
    /// Recipe that was aggregated.
    pub recipe_id: RecipeId,
    /// Account owning the recipe and every material it resolved.
    pub user_id: UserId,
    /// Lines in insertion order.
    pub lines: Vec<AggregatedLine>,
    /// Sum of line weights in grams.
    pub total_weight: Decimal,
    /// Sum of line costs (canonical currency).
    pub total_cost: Decimal,
    /// Finished units the batch fills.
    pub number_of_units: Option<u32>,
    /// `total_cost` split over `number_of_units`.
    pub cost_per_unit: Option<Decimal>,
}

/// Aggregate a recipe against the current material records.
///
/// # Errors
///
/// Returns [`CostingError::MissingMaterial`] when a line's material is not in
/// `materials`, [`CostingError::ForeignMaterial`] when it belongs to a
/// different account than the recipe, and [`CostingError::Overflow`] when a
/// weight or cost does not fit in a `Decimal`.
pub fn aggregate<M: MaterialLookup + ?Sized>(
    recipe: &Recipe,
    materials: &M,
) -> Result<AggregatedRecipe> {
    let mut lines = Vec::with_capacity(recipe.lines.len());
    for line in &recipe.lines {
        let material = resolve_owned(materials, line.material_id, recipe.user_id)?;
        let amount_in_grams = to_grams(line.amount, line.unit)?;
        let cost_per_gram = material.live_cost_per_gram()?;
        lines.push(AggregatedLine {
            material_id: material.id,
            material_name: material.name.clone(),
            label_name: material.label_name().to_owned(),
            amount: line.amount,
            unit: line.unit,
            amount_in_grams,
            cost_per_gram,
            cost: line_cost(amount_in_grams, cost_per_gram)?,
            percentage: Decimal::ZERO,
        });
    }

    let total_weight = checked_sum(lines.iter().map(|l| l.amount_in_grams))?;
    let total_cost = checked_sum(lines.iter().map(|l| l.cost))?;
    if !total_weight.is_zero() {
        for line in &mut lines {
            line.percentage = line
                .amount_in_grams
                .checked_div(total_weight)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or(CostingError::Overflow("totalling a recipe"))?;
        }
    }

    tracing::debug!(
        recipe_id = %recipe.id,
        lines = lines.len(),
        %total_weight,
        %total_cost,
        "Aggregated recipe"
    );

    Ok(AggregatedRecipe {
        recipe_id: recipe.id,
        user_id: recipe.user_id,
        lines,
        total_weight,
        total_cost,
        number_of_units: recipe.number_of_units,
        cost_per_unit: per_unit(total_cost, recipe.number_of_units),
    })
}

/// Look up a material and check that `owner` holds it.
pub(crate) fn resolve_owned<M: MaterialLookup + ?Sized>(
    materials: &M,
    id: MaterialId,
    owner: UserId,
) -> Result<&RawMaterial> {
    let material = materials
        .material(id)
        .ok_or(CostingError::MissingMaterial(id))?;
    if material.user_id != owner {
        return Err(CostingError::ForeignMaterial {
            material: material.id,
            owner: material.user_id,
        });
    }
    Ok(material)
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    values
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .ok_or(CostingError::Overflow("totalling a recipe"))
}
