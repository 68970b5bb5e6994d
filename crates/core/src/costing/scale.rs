//! Recipe scaling.
//!
//! Scaling multiplies every line by one factor and then re-aggregates from
//! the live materials, so a price change since the recipe was saved shows up
//! in the scaled total. The total is never `old_total * factor`.
//!
//! A stored reference weight only serves as the basis while it still
//! describes the lines. Once lines have been scaled or edited it goes stale,
//! and the live aggregated weight is used instead.

use rust_decimal::Decimal;

use super::aggregate::{AggregatedRecipe, MaterialLookup, aggregate};
use super::units::to_grams;
use crate::error::{CostingError, Result};
use crate::models::Recipe;
use crate::types::WeightUnit;

/// Fixed "round" batch sizes offered as scaling targets.
const ROUND_SIZES: [u32; 22] = [
    1, 2, 3, 4, 5, 6, 8, 10, 12, 15, 16, 20, 25, 30, 50, 75, 100, 150, 200, 250, 500, 1000,
];

/// Multiples of the current size offered as scaling targets, in hundredths.
const MULTIPLES: [i64; 10] = [25, 50, 75, 125, 150, 200, 250, 300, 500, 1000];

/// Multiples used when too few suggestions survive, in hundredths.
const FALLBACK_MULTIPLES: [i64; 4] = [50, 200, 300, 500];

const MAX_SUGGESTIONS: usize = 12;
const MIN_SUGGESTIONS: usize = 4;

/// Relative gap (parts per million) within which a stored reference weight
/// still describes the live line weight.
const BASIS_TOLERANCE_PPM: i64 = 1;

/// A recipe rescaled to a new batch weight.
#[derive(Debug, Clone)]
pub struct ScaledRecipe<'a> {
    /// The recipe before scaling.
    pub original: &'a Recipe,
    /// The new recipe state: same identity, scaled lines, refreshed caches.
    pub recipe: Recipe,
    /// Figures for the new state.
    pub aggregated: AggregatedRecipe,
    /// Reference weight the factor was taken against, in grams.
    pub basis: Decimal,
    /// `target / basis`.
    pub scaling_factor: Decimal,
}

impl ScaledRecipe<'_> {
    /// The state to persist.
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        self.recipe
    }
}

/// Scale `recipe` to `target_grams` total weight.
///
/// The reference weight is the first positive of the original batch size
/// and the batch size that matches the live aggregated weight, falling back
/// to the live weight itself. A recipe whose lines weigh nothing keeps the
/// first positive stored weight.
///
/// # Errors
///
/// Returns [`CostingError::InvalidScaleTarget`] for a non-positive target,
/// [`CostingError::InvalidScaleBasis`] when no positive reference weight
/// exists, [`CostingError::Overflow`] when a scaled amount does not fit, or a
/// lookup error from aggregation.
pub fn scale<'a, M: MaterialLookup + ?Sized>(
    recipe: &'a Recipe,
    target_grams: Decimal,
    materials: &M,
) -> Result<ScaledRecipe<'a>> {
    if target_grams <= Decimal::ZERO {
        return Err(CostingError::InvalidScaleTarget(target_grams));
    }

    let live_weight = aggregate(recipe, materials)?.total_weight;
    let basis = reference_weight(recipe, live_weight);
    if basis <= Decimal::ZERO {
        return Err(CostingError::InvalidScaleBasis(basis));
    }

    let overflow = || CostingError::Overflow("scaling a recipe");
    let scaling_factor = target_grams.checked_div(basis).ok_or_else(overflow)?;
    let mut scaled = recipe.clone();
    for line in &mut scaled.lines {
        line.amount = line
            .amount
            .checked_mul(scaling_factor)
            .ok_or_else(overflow)?;
    }
    scaled.batch_size = Some(target_grams);
    let aggregated = scaled.refresh(materials)?;

    tracing::debug!(
        recipe_id = %recipe.id,
        %basis,
        target = %target_grams,
        factor = %scaling_factor,
        total_cost = %aggregated.total_cost,
        "Scaled recipe"
    );

    Ok(ScaledRecipe {
        original: recipe,
        recipe: scaled,
        aggregated,
        basis,
        scaling_factor,
    })
}

fn reference_weight(recipe: &Recipe, live_weight: Decimal) -> Decimal {
    let mut stored = [recipe.original_batch_size, recipe.batch_size]
        .into_iter()
        .flatten()
        .filter(|w| *w > Decimal::ZERO);
    if live_weight <= Decimal::ZERO {
        return stored.next().unwrap_or(live_weight);
    }
    let tolerance = live_weight * Decimal::new(BASIS_TOLERANCE_PPM, 6);
    stored
        .find(|w| (*w - live_weight).abs() <= tolerance)
        .unwrap_or(live_weight)
}

/// Scale `recipe` to `target` expressed in `unit`.
///
/// # Errors
///
/// Same as [`scale`], plus [`CostingError::Overflow`] when the target does
/// not fit in grams.
pub fn scale_to<'a, M: MaterialLookup + ?Sized>(
    recipe: &'a Recipe,
    target: Decimal,
    unit: WeightUnit,
    materials: &M,
) -> Result<ScaledRecipe<'a>> {
    scale(recipe, to_grams(target, unit)?, materials)
}

/// Candidate batch sizes to offer next to a recipe of size `current`.
///
/// Round sizes within a factor of ten of `current` are combined with
/// multiples of `current`. The result is ascending, deduplicated, never
/// within 0.1 of `current`, and at most twelve long.
#[must_use]
pub fn suggested_sizes(current: Decimal) -> Vec<Decimal> {
    let round = ROUND_SIZES.iter().map(|&s| Decimal::from(s));
    if current <= Decimal::ZERO {
        return curate(round, current);
    }

    let (low, high) = (
        current / Decimal::TEN,
        current.checked_mul(Decimal::TEN).unwrap_or(Decimal::MAX),
    );
    let mut suggestions = curate(
        round
            .filter(|s| *s >= low && *s <= high)
            .chain(multiples(current, &MULTIPLES)),
        current,
    );
    if suggestions.len() < MIN_SUGGESTIONS {
        suggestions = curate(
            suggestions
                .into_iter()
                .chain(multiples(current, &FALLBACK_MULTIPLES)),
            current,
        );
    }
    suggestions
}

fn multiples(current: Decimal, hundredths: &[i64]) -> impl Iterator<Item = Decimal> + '_ {
    hundredths
        .iter()
        .filter_map(move |&m| current.checked_mul(Decimal::new(m, 2)))
        .map(|size| size.round_dp(2))
}

fn curate(candidates: impl Iterator<Item = Decimal>, current: Decimal) -> Vec<Decimal> {
    let min_gap = Decimal::new(1, 1);
    let mut sizes: Vec<Decimal> = candidates
        .filter(|c| *c > Decimal::ZERO && (*c - current).abs() >= min_gap)
        .map(|c| c.normalize())
        .collect();
    sizes.sort();
    sizes.dedup();
    sizes.truncate(MAX_SUGGESTIONS);
    sizes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{RawMaterial, RecipeIngredientLine};
    use crate::types::{MaterialId, RecipeId, UserId};

    fn materials() -> Vec<RawMaterial> {
        vec![
            RawMaterial::new(
                MaterialId::new(1),
                UserId::new(1),
                "Shea Butter",
                Decimal::new(1599, 2),
                Decimal::new(500, 0),
                WeightUnit::Gram,
            )
            .unwrap(),
            RawMaterial::new(
                MaterialId::new(2),
                UserId::new(1),
                "Beeswax",
                Decimal::new(12, 0),
                Decimal::ONE,
                WeightUnit::Pound,
            )
            .unwrap(),
            RawMaterial::new(
                MaterialId::new(3),
                UserId::new(1),
                "Vitamin E",
                Decimal::new(9, 0),
                Decimal::new(2, 0),
                WeightUnit::Ounce,
            )
            .unwrap(),
        ]
    }

    fn single_line_recipe() -> Recipe {
        Recipe::create(
            RecipeId::new(1),
            UserId::new(1),
            "Whipped Shea",
            vec![RecipeIngredientLine::new(
                MaterialId::new(1),
                Decimal::ONE_HUNDRED,
                WeightUnit::Gram,
            )],
            None,
            None,
            materials().as_slice(),
        )
        .unwrap()
    }

    fn balm() -> Recipe {
        Recipe::create(
            RecipeId::new(2),
            UserId::new(1),
            "Lip Balm",
            vec![
                RecipeIngredientLine::new(MaterialId::new(1), Decimal::new(45, 0), WeightUnit::Gram),
                RecipeIngredientLine::new(MaterialId::new(2), Decimal::new(1, 0), WeightUnit::Ounce),
                RecipeIngredientLine::new(MaterialId::new(3), Decimal::new(15, 1), WeightUnit::Gram),
            ],
            None,
            Some(10),
            materials().as_slice(),
        )
        .unwrap()
    }

    fn assert_close(a: Decimal, b: Decimal) {
        assert!((a - b).abs() < Decimal::new(1, 18), "{a} != {b}");
    }

    #[test]
    fn test_scale_scenario() {
        let recipe = single_line_recipe();
        let materials = materials();
        let scaled = scale(&recipe, Decimal::new(250, 0), &materials).unwrap();
        assert_eq!(scaled.scaling_factor, Decimal::new(25, 1));
        let line = &scaled.aggregated.lines[0];
        assert_eq!(line.amount, Decimal::new(250, 0));
        assert_eq!(line.cost, Decimal::new(7995, 3));
        assert_eq!(line.percentage, Decimal::ONE_HUNDRED);
        assert_eq!(scaled.aggregated.total_weight, Decimal::new(250, 0));
        assert_eq!(scaled.recipe.total_cost, Decimal::new(7995, 3));
    }

    #[test]
    fn test_scale_preserves_identity_and_reference_weight() {
        let recipe = balm();
        let scaled = scale(&recipe, Decimal::new(500, 0), materials().as_slice()).unwrap();
        assert_eq!(scaled.recipe.id, recipe.id);
        assert_eq!(scaled.recipe.original_batch_size, recipe.original_batch_size);
        assert_eq!(scaled.recipe.batch_size, Some(Decimal::new(500, 0)));
        assert_eq!(scaled.original, &recipe);
    }

    #[test]
    fn test_scale_hits_target_and_keeps_shares() {
        let recipe = balm();
        let materials = materials();
        let before = aggregate(&recipe, &materials).unwrap();
        for target in [Decimal::new(15, 0), Decimal::new(3333, 1), Decimal::new(2, 3)] {
            let scaled = scale(&recipe, target, &materials).unwrap();
            assert_close(scaled.aggregated.total_weight, target);
            for (old, new) in before.lines.iter().zip(&scaled.aggregated.lines) {
                assert_close(old.percentage, new.percentage);
            }
        }
    }

    #[test]
    fn test_scale_to_current_weight_is_identity() {
        let recipe = balm();
        let materials = materials();
        let before = aggregate(&recipe, &materials).unwrap();
        let scaled = scale(&recipe, before.total_weight, &materials).unwrap();
        assert_eq!(scaled.scaling_factor, Decimal::ONE);
        assert_eq!(scaled.aggregated.total_weight, before.total_weight);
        assert_eq!(scaled.aggregated.total_cost, before.total_cost);
        for (old, new) in before.lines.iter().zip(&scaled.aggregated.lines) {
            assert_eq!(old.amount_in_grams, new.amount_in_grams);
            assert_eq!(old.cost, new.cost);
        }
    }

    #[test]
    fn test_scale_recomputes_cost_per_unit() {
        let recipe = balm();
        let scaled = scale(&recipe, Decimal::new(1000, 0), materials().as_slice()).unwrap();
        let expected = scaled.aggregated.total_cost / Decimal::TEN;
        assert_eq!(scaled.aggregated.cost_per_unit, Some(expected));
        assert_eq!(scaled.recipe.cost_per_unit(), Some(expected));
    }

    #[test]
    fn test_scale_picks_up_price_changes() {
        let recipe = single_line_recipe();
        let mut materials = materials();
        materials[0]
            .set_purchase(Decimal::new(3198, 2), Decimal::new(500, 0), WeightUnit::Gram)
            .unwrap();
        let scaled = scale(&recipe, Decimal::new(200, 0), &materials).unwrap();
        // 200 g at the new 0.06396/g, not 2 x the saved 3.198
        assert_eq!(scaled.aggregated.total_cost, Decimal::new(12792, 3));
    }

    #[test]
    fn test_scale_to_kilograms() {
        let recipe = single_line_recipe();
        let scaled = scale_to(&recipe, Decimal::ONE, WeightUnit::Kilogram, materials().as_slice())
            .unwrap();
        assert_eq!(scaled.scaling_factor, Decimal::TEN);
        assert_eq!(scaled.aggregated.total_weight, Decimal::new(1000, 0));
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let recipe = single_line_recipe();
        let materials = materials();
        assert_eq!(
            scale(&recipe, Decimal::ZERO, &materials).unwrap_err(),
            CostingError::InvalidScaleTarget(Decimal::ZERO)
        );
        assert!(matches!(
            scale(&recipe, Decimal::NEGATIVE_ONE, &materials),
            Err(CostingError::InvalidScaleTarget(_))
        ));
    }

    #[test]
    fn test_rejects_empty_basis() {
        let mut recipe = single_line_recipe();
        recipe.original_batch_size = None;
        recipe.lines[0].amount = Decimal::ZERO;
        assert_eq!(
            scale(&recipe, Decimal::TEN, materials().as_slice()).unwrap_err(),
            CostingError::InvalidScaleBasis(Decimal::ZERO)
        );
    }

    #[test]
    fn test_basis_prefers_stored_weight_matching_lines() {
        let mut recipe = single_line_recipe();
        let materials = materials();
        let basis = |r: &Recipe| scale(r, Decimal::ONE_HUNDRED, &materials).unwrap().basis;

        assert_eq!(basis(&recipe), Decimal::ONE_HUNDRED);

        // Stale original size, batch size within tolerance of the lines.
        recipe.original_batch_size = Some(Decimal::new(50, 0));
        recipe.batch_size = Some(Decimal::new(10_000_005, 5));
        assert_eq!(basis(&recipe), Decimal::new(10_000_005, 5));

        // Both stale: the live weight wins.
        recipe.batch_size = Some(Decimal::new(400, 0));
        assert_eq!(basis(&recipe), Decimal::ONE_HUNDRED);

        // Zero counts as unset.
        recipe.original_batch_size = Some(Decimal::ZERO);
        recipe.batch_size = None;
        assert_eq!(basis(&recipe), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_weightless_lines_keep_stored_basis() {
        let mut recipe = single_line_recipe();
        recipe.lines[0].amount = Decimal::ZERO;
        recipe.original_batch_size = Some(Decimal::new(50, 0));
        let scaled = scale(&recipe, Decimal::ONE_HUNDRED, materials().as_slice()).unwrap();
        assert_eq!(scaled.basis, Decimal::new(50, 0));
        assert_eq!(scaled.scaling_factor, Decimal::TWO);
    }

    #[test]
    fn test_rescaling_a_saved_scale() {
        let materials = materials();
        let recipe = single_line_recipe();
        let saved = scale(&recipe, Decimal::new(250, 0), &materials)
            .unwrap()
            .into_recipe();
        assert_eq!(saved.original_batch_size, Some(Decimal::ONE_HUNDRED));

        let again = scale(&saved, Decimal::new(250, 0), &materials).unwrap();
        assert_eq!(again.scaling_factor, Decimal::ONE);
        assert_eq!(again.aggregated.total_weight, Decimal::new(250, 0));
        assert_eq!(again.aggregated.total_cost, Decimal::new(7995, 3));

        let halved = scale(&saved, Decimal::new(125, 0), &materials).unwrap();
        assert_eq!(halved.aggregated.total_weight, Decimal::new(125, 0));
        assert_eq!(halved.aggregated.lines[0].amount, Decimal::new(125, 0));
    }

    #[test]
    fn test_rescaling_an_edited_recipe() {
        let materials = materials();
        let mut recipe = balm();
        recipe
            .update_line(0, Decimal::new(90, 0), WeightUnit::Gram, materials.as_slice())
            .unwrap();
        let current = aggregate(&recipe, &materials).unwrap();

        let identity = scale(&recipe, current.total_weight, &materials).unwrap();
        assert_eq!(identity.scaling_factor, Decimal::ONE);
        assert_eq!(identity.aggregated.total_cost, current.total_cost);

        let scaled = scale(&recipe, Decimal::new(500, 0), &materials).unwrap();
        assert_close(scaled.aggregated.total_weight, Decimal::new(500, 0));
        for (old, new) in current.lines.iter().zip(&scaled.aggregated.lines) {
            assert_close(old.percentage, new.percentage);
        }
    }

    #[test]
    fn test_scaling_overflow_is_an_error() {
        let recipe = single_line_recipe();
        let mut materials = materials();
        materials[0]
            .set_purchase(Decimal::new(1599, 2), Decimal::ONE, WeightUnit::Gram)
            .unwrap();
        assert!(matches!(
            scale(&recipe, Decimal::MAX, &materials),
            Err(CostingError::Overflow(_))
        ));
        assert_eq!(
            scale_to(&recipe, Decimal::MAX, WeightUnit::Pound, &materials).unwrap_err(),
            CostingError::Overflow("converting to grams")
        );
    }

    #[test]
    fn test_suggestions_for_huge_batches() {
        let sizes = suggested_sizes(Decimal::MAX);
        assert!(sizes.len() <= 12);
        assert!(sizes.iter().all(|s| *s > Decimal::ZERO));
    }

    #[test]
    fn test_suggestions_for_hundred_grams() {
        let sizes = suggested_sizes(Decimal::ONE_HUNDRED);
        assert_eq!(sizes.len(), 12);
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert!(!sizes.contains(&Decimal::ONE_HUNDRED));
        assert_eq!(sizes[0], Decimal::TEN);
        assert!(sizes.contains(&Decimal::new(125, 0)));
    }

    #[test]
    fn test_suggestions_exclude_near_current() {
        let current = Decimal::new(25005, 2);
        let sizes = suggested_sizes(current);
        assert!(sizes.iter().all(|s| (*s - current).abs() >= Decimal::new(1, 1)));
        assert!(!sizes.contains(&Decimal::new(250, 0)));
    }

    #[test]
    fn test_suggestions_fall_back_for_tiny_batches() {
        let sizes = suggested_sizes(Decimal::new(5, 2));
        assert!(!sizes.is_empty());
        assert!(sizes.len() <= 12);
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_suggestions_without_current_size() {
        let sizes = suggested_sizes(Decimal::ZERO);
        assert_eq!(sizes.len(), 12);
        assert_eq!(sizes[0], Decimal::ONE);
    }
}
