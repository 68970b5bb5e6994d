//! The costing engine.
//!
//! Leaf-first: [`units`] and [`currency`] convert, [`cost`] derives unit
//! costs, [`aggregate`] totals a recipe, [`scale`] rescales it, and
//! [`pricing`] turns a cost into a sale price. [`label`] and [`stock`] are
//! further read-only traversals of an aggregated recipe.

pub mod aggregate;
pub mod cost;
pub mod currency;
pub mod label;
pub mod pricing;
pub mod scale;
pub mod stock;
pub mod units;

pub use aggregate::{AggregatedLine, AggregatedRecipe, MaterialLookup, aggregate};
pub use cost::{cost_per_gram, line_cost};
pub use currency::{ExchangeRates, NumberStyle, format_money, format_plain, format_unit_cost, format_with_locale};
pub use label::{LabelEntry, ingredient_label, label_text};
pub use pricing::{PriceQuote, price};
pub use scale::{ScaledRecipe, scale, scale_to, suggested_sizes};
pub use stock::{StockLine, StockReport, check_stock};
pub use units::{from_grams, to_grams};
