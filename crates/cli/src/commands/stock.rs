//! `formulary stock` - check purchased stock against one batch.

use std::path::Path;

use formulary_core::{WeightUnit, check_stock, scale_to};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::load_workbook;
use crate::output::{Presenter, quantity};

/// Report whether stock covers a batch, optionally scaled to `target` first.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded, aggregated or scaled.
pub fn run(
    path: &Path,
    target: Option<Decimal>,
    unit: WeightUnit,
    presenter: &Presenter,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = load_workbook(path)?;
    let aggregated = workbook.refresh()?;
    let report = match target {
        Some(target) => {
            let scaled = scale_to(&workbook.recipe, target, unit, &workbook.materials)?;
            check_stock(&scaled.aggregated, &workbook.materials)?
        }
        None => check_stock(&aggregated, &workbook.materials)?,
    };

    if presenter.json() {
        return Presenter::emit_json(&report);
    }

    for line in &report.lines {
        if line.shortfall_grams > Decimal::ZERO {
            warn!(
                "  {}: need {} g, have {} g (short {} g)",
                line.name,
                quantity(line.required_grams),
                quantity(line.available_grams),
                quantity(line.shortfall_grams),
            );
        } else {
            info!(
                "  {}: need {} g, have {} g",
                line.name,
                quantity(line.required_grams),
                quantity(line.available_grams),
            );
        }
    }
    if report.is_sufficient() {
        info!("Stock is sufficient");
    } else {
        warn!("Stock is insufficient for one batch");
    }
    if let Some(batches) = report.max_batches {
        info!("Whole batches covered: {batches}");
    }
    Ok(())
}
