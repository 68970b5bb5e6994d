//! Formulary Core - recipe costing and scaling engine.
//!
//! This crate holds the computations behind a formulator's workbench:
//! converting purchase quantities to grams, deriving cost per gram, totalling
//! recipes, rescaling batches, and pricing finished products.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no global state. Persistence and presentation layers hand it plain
//! data and render what it returns. Every function is safe to call
//! concurrently from any number of requests.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, weight units, currency codes, tagged money
//! - [`models`] - Raw materials, recipes, price breakdowns, workbooks
//! - [`costing`] - Unit conversion, currency normalization, cost derivation,
//!   aggregation, scaling, pricing, labels, and stock checks
//! - [`error`] - Error types shared by the costing operations
//!
//! # Example
//!
//! ```
//! use formulary_core::costing::{aggregate, cost_per_gram};
//! use formulary_core::{MaterialId, RawMaterial, Recipe, RecipeId, RecipeIngredientLine, UserId, WeightUnit};
//! use rust_decimal::Decimal;
//!
//! let owner = UserId::new(1);
//! let shea = RawMaterial::new(
//!     MaterialId::new(1),
//!     owner,
//!     "Shea Butter",
//!     Decimal::new(1599, 2),
//!     Decimal::new(500, 0),
//!     WeightUnit::Gram,
//! )?;
//! assert_eq!(shea.cost_per_gram, Decimal::new(3198, 5));
//! assert_eq!(
//!     cost_per_gram(Decimal::new(1599, 2), Decimal::new(500, 0), WeightUnit::Gram)?,
//!     shea.cost_per_gram
//! );
//!
//! let line = RecipeIngredientLine::new(shea.id, Decimal::new(100, 0), WeightUnit::Gram);
//! let materials = vec![shea];
//! let recipe = Recipe::create(RecipeId::new(1), owner, "Body Butter", vec![line], None, None, materials.as_slice())?;
//!
//! let totals = aggregate(&recipe, materials.as_slice())?;
//! assert_eq!(totals.total_cost, Decimal::new(3198, 3));
//! # Ok::<(), formulary_core::CostingError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod costing;
pub mod error;
pub mod models;
pub mod types;

pub use costing::{
    AggregatedLine, AggregatedRecipe, ExchangeRates, LabelEntry, MaterialLookup, PriceQuote,
    ScaledRecipe, StockLine, StockReport, aggregate, check_stock, cost_per_gram, format_money,
    format_plain, format_unit_cost, format_with_locale, from_grams, ingredient_label, label_text,
    line_cost, price, scale, scale_to, suggested_sizes, to_grams,
};
pub use error::{CostingError, Result};
pub use models::*;
pub use types::*;
