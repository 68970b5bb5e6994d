//! `formulary scale` - rescale a recipe to a new batch weight.

use std::path::Path;

use formulary_core::{WeightUnit, scale_to};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::{load_workbook, save_workbook};
use crate::output::{Presenter, quantity};

#[derive(Serialize)]
struct ScaleReport<'a> {
    basis: Decimal,
    scaling_factor: Decimal,
    aggregated: &'a formulary_core::AggregatedRecipe,
}

/// Scale the workbook's recipe and optionally save the result.
///
/// # Errors
///
/// Returns an error for a non-positive target, a recipe with no weight to
/// scale from, or workbook I/O failures.
pub fn run(
    path: &Path,
    target: Decimal,
    unit: WeightUnit,
    output: Option<&Path>,
    presenter: &Presenter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = load_workbook(path)?;
    workbook.refresh()?;
    let scaled = scale_to(&workbook.recipe, target, unit, &workbook.materials)?;

    if presenter.json() {
        Presenter::emit_json(&ScaleReport {
            basis: scaled.basis,
            scaling_factor: scaled.scaling_factor,
            aggregated: &scaled.aggregated,
        })?;
    } else {
        info!(
            "Scaled {} from {} g to {} g (x{})",
            scaled.original.name,
            quantity(scaled.basis),
            quantity(scaled.aggregated.total_weight),
            scaled.scaling_factor.round_dp(4).normalize(),
        );
        for line in &scaled.aggregated.lines {
            let cost = presenter.money(line.cost)?;
            info!(
                "  {}: {} {} = {cost}",
                line.material_name,
                quantity(line.amount),
                line.unit,
            );
        }
        let total = presenter.money(scaled.aggregated.total_cost)?;
        info!("Total cost: {total}");
    }

    if let Some(output) = output {
        workbook.recipe = scaled.into_recipe();
        save_workbook(output, &workbook)?;
        info!("Wrote scaled workbook to {}", output.display());
    }
    Ok(())
}
