//! `formulary price` - turn a cost into a sale price.

use std::path::Path;

use formulary_core::{
    CostInput, CurrencyCode, PriceBreakdown, PriceBreakdownId, PriceSource, PricingBasis,
};
use rust_decimal::Decimal;
use tracing::info;

use super::load_workbook;
use crate::output::{Presenter, quantity};

/// Breakdowns priced from the CLI are never stored.
const UNSAVED: PriceBreakdownId = PriceBreakdownId::new(0);

/// What the material cost comes from.
pub enum CostSource<'a> {
    /// A workbook's recipe, whole batch or per unit.
    Workbook { path: &'a Path, per_unit: bool },
    /// A typed-in cost.
    Actual(Decimal),
}

/// Amounts typed on the command line.
pub struct PriceArgs {
    pub packaging: Decimal,
    pub container: Decimal,
    pub margin: Decimal,
    pub entered_in: Option<CurrencyCode>,
}

/// Print a price breakdown.
///
/// Typed amounts are in `entered_in`, or the display currency when that is
/// not given. A workbook's cost is already canonical and is used as is.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or aggregated, or a
/// figure is too large to compute.
pub fn run(
    source: CostSource<'_>,
    args: &PriceArgs,
    presenter: &Presenter,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency = args.entered_in.unwrap_or_else(|| presenter.currency());
    let typed = |amount| CostInput::entered(amount, currency);

    let breakdown = match source {
        CostSource::Workbook { path, per_unit } => {
            let mut workbook = load_workbook(path)?;
            let aggregated = workbook.refresh()?;
            let basis = if per_unit {
                PricingBasis::PerUnit
            } else {
                PricingBasis::Batch
            };
            PriceBreakdown::for_recipe(
                UNSAVED,
                &aggregated,
                basis,
                typed(args.packaging),
                typed(args.container),
                args.margin,
                presenter.rates(),
            )?
        }
        CostSource::Actual(actual) => PriceBreakdown::calculate(
            UNSAVED,
            PriceSource::AdHoc,
            typed(actual),
            typed(args.packaging),
            typed(args.container),
            args.margin,
            presenter.rates(),
        )?,
    };

    if presenter.json() {
        return Presenter::emit_json(&breakdown);
    }

    let actual = presenter.money(breakdown.actual_cost)?;
    let packaging = presenter.money(breakdown.packaging_cost)?;
    let container = presenter.money(breakdown.container_cost)?;
    let total = presenter.money(breakdown.total_cost)?;
    let profit = presenter.money(breakdown.profit_amount)?;
    let final_price = presenter.money(breakdown.final_price)?;
    info!("Material cost: {actual}");
    info!("Packaging: {packaging}");
    info!("Container: {container}");
    info!("Total cost: {total}");
    info!("Profit ({}%): {profit}", quantity(breakdown.margin_percent));
    info!("Final price: {final_price}");
    Ok(())
}
