//! Domain models.
//!
//! Plain data handed to the core by the persistence layer and handed back
//! for storage. Derived fields are caches refreshed by the costing engine.

pub mod material;
pub mod price_breakdown;
pub mod recipe;
pub mod workbook;

pub use material::RawMaterial;
pub use price_breakdown::{PriceBreakdown, PriceSource, PricingBasis};
pub use recipe::{Recipe, RecipeIngredientLine};
pub use workbook::Workbook;
