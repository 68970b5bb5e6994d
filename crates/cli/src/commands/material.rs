//! `formulary material` - derive a cost per gram from purchase data.

use formulary_core::{CostInput, CurrencyCode, WeightUnit, cost_per_gram, to_grams};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::output::{Presenter, quantity};

#[derive(Serialize)]
struct MaterialQuote {
    total_cost: Decimal,
    quantity_in_grams: Decimal,
    cost_per_gram: Decimal,
}

/// Print the canonical cost per gram of a purchase.
///
/// The cost is taken to be in `entered_in`, or the display currency when
/// that is not given, and converted to canonical once.
///
/// # Errors
///
/// Returns an error if a figure is too large to compute or JSON output fails.
pub fn run(
    cost: Decimal,
    quantity_purchased: Decimal,
    unit: WeightUnit,
    entered_in: Option<CurrencyCode>,
    presenter: &Presenter,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency = entered_in.unwrap_or_else(|| presenter.currency());
    let total_cost = CostInput::entered(cost, currency).resolve(presenter.rates())?;
    let quote = MaterialQuote {
        total_cost,
        quantity_in_grams: to_grams(quantity_purchased, unit)?,
        cost_per_gram: cost_per_gram(total_cost, quantity_purchased, unit)?,
    };

    if presenter.json() {
        return Presenter::emit_json(&quote);
    }

    let paid = presenter.money(quote.total_cost)?;
    let rate = presenter.unit_cost(quote.cost_per_gram)?;
    info!(
        "{paid} for {} {} ({} g)",
        quantity(quantity_purchased),
        unit,
        quantity(quote.quantity_in_grams),
    );
    info!("Cost per gram: {rate}");
    Ok(())
}
