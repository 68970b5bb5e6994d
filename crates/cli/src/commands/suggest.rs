//! `formulary suggest` - list batch sizes worth scaling to.

use std::path::Path;

use formulary_core::suggested_sizes;
use rust_decimal::Decimal;
use tracing::info;

use super::load_workbook;
use crate::output::{Presenter, quantity};

/// Print suggested batch sizes around the recipe's current weight.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or aggregated.
pub fn run(path: &Path, presenter: &Presenter) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = load_workbook(path)?;
    let aggregated = workbook.refresh()?;
    let current = workbook
        .recipe
        .batch_size
        .filter(|w| *w > Decimal::ZERO)
        .unwrap_or(aggregated.total_weight);
    let sizes = suggested_sizes(current);

    if presenter.json() {
        return Presenter::emit_json(&sizes);
    }

    info!("Current batch: {} g", quantity(current));
    let listed: Vec<String> = sizes.iter().map(|s| format!("{} g", quantity(*s))).collect();
    info!("Suggested sizes: {}", listed.join(", "));
    Ok(())
}
