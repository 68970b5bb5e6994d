//! `formulary cost` - aggregate a recipe and print its lines and totals.

use std::path::Path;

use tracing::info;

use super::load_workbook;
use crate::output::{Presenter, quantity};

/// Print the costed recipe.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or a line's material
/// cannot be resolved.
pub fn run(path: &Path, presenter: &Presenter) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = load_workbook(path)?;
    let aggregated = workbook.refresh()?;

    if presenter.json() {
        return Presenter::emit_json(&aggregated);
    }

    info!("{}", workbook.recipe.name);
    for line in &aggregated.lines {
        let rate = presenter.unit_cost(line.cost_per_gram)?;
        let cost = presenter.money(line.cost)?;
        info!(
            "  {}: {} {} ({} g, {}%) @ {rate}/g = {cost}",
            line.material_name,
            quantity(line.amount),
            line.unit,
            quantity(line.amount_in_grams),
            quantity(line.percentage),
        );
    }
    info!("Total weight: {} g", quantity(aggregated.total_weight));
    let total = presenter.money(aggregated.total_cost)?;
    info!("Total cost: {total}");
    if let (Some(units), Some(per_unit)) = (aggregated.number_of_units, aggregated.cost_per_unit) {
        let per_unit = presenter.money(per_unit)?;
        info!("Cost per unit ({units} units): {per_unit}");
    }
    Ok(())
}
