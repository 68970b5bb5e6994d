//! Price breakdown domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::{AggregatedRecipe, ExchangeRates, PriceQuote, price};
use crate::error::Result;
use crate::types::{CostInput, PriceBreakdownId, RecipeId};

/// What a breakdown was priced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "recipe_id", rename_all = "snake_case")]
pub enum PriceSource {
    /// A saved recipe's aggregated cost.
    Recipe(RecipeId),
    /// A cost typed in directly.
    AdHoc,
}

/// Which recipe cost to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    /// The whole batch.
    #[default]
    Batch,
    /// One finished unit (falls back to the batch without a unit count).
    PerUnit,
}

/// One stored pricing calculation. All amounts are canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Unique breakdown ID.
    pub id: PriceBreakdownId,
    /// Recipe or ad-hoc.
    pub source: PriceSource,
    /// Material cost.
    pub actual_cost: Decimal,
    /// Packaging cost.
    pub packaging_cost: Decimal,
    /// Container or other add-on cost.
    pub container_cost: Decimal,
    /// Markup percentage on total cost.
    pub margin_percent: Decimal,
    /// Sum of the three costs.
    pub total_cost: Decimal,
    /// Markup amount.
    pub profit_amount: Decimal,
    /// Sale price.
    pub final_price: Decimal,
}

impl PriceBreakdown {
    /// Price from tagged inputs, converting each entered figure once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CostingError::Overflow`] if a conversion or a total
    /// does not fit in a `Decimal`.
    pub fn calculate(
        id: PriceBreakdownId,
        source: PriceSource,
        actual: CostInput,
        packaging: CostInput,
        container: CostInput,
        margin_percent: Decimal,
        rates: &ExchangeRates,
    ) -> Result<Self> {
        let actual_cost = actual.resolve(rates)?;
        let packaging_cost = packaging.resolve(rates)?;
        let container_cost = container.resolve(rates)?;
        let quote = price(actual_cost, packaging_cost, container_cost, margin_percent)?;
        Ok(Self::from_quote(
            id,
            source,
            (actual_cost, packaging_cost, container_cost),
            margin_percent,
            quote,
        ))
    }

    /// Price an aggregated recipe. Its cost is canonical and is not converted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate`].
    pub fn for_recipe(
        id: PriceBreakdownId,
        aggregated: &AggregatedRecipe,
        basis: PricingBasis,
        packaging: CostInput,
        container: CostInput,
        margin_percent: Decimal,
        rates: &ExchangeRates,
    ) -> Result<Self> {
        let actual = match basis {
            PricingBasis::Batch => aggregated.total_cost,
            PricingBasis::PerUnit => aggregated.cost_per_unit.unwrap_or(aggregated.total_cost),
        };
        Self::calculate(
            id,
            PriceSource::Recipe(aggregated.recipe_id),
            CostInput::canonical(actual),
            packaging,
            container,
            margin_percent,
            rates,
        )
    }

    fn from_quote(
        id: PriceBreakdownId,
        source: PriceSource,
        (actual_cost, packaging_cost, container_cost): (Decimal, Decimal, Decimal),
        margin_percent: Decimal,
        quote: PriceQuote,
    ) -> Self {
        Self {
            id,
            source,
            actual_cost,
            packaging_cost,
            container_cost,
            margin_percent,
            total_cost: quote.total_cost,
            profit_amount: quote.profit_amount,
            final_price: quote.final_price,
        }
    }
}
