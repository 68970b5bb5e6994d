//! A self-contained set of materials and one recipe that uses them.
//!
//! This is the document shape exchanged with tools that keep recipes in
//! files rather than a database.

use serde::{Deserialize, Serialize};

use crate::costing::AggregatedRecipe;
use crate::error::Result;
use crate::models::{RawMaterial, Recipe};

/// Materials plus a recipe drawn from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    /// Every material the recipe may reference.
    #[serde(default)]
    pub materials: Vec<RawMaterial>,
    /// The recipe.
    pub recipe: Recipe,
}

impl Workbook {
    /// Recompute every derived figure: material costs per gram, then the
    /// recipe's line caches and total.
    ///
    /// # Errors
    ///
    /// Returns an error if a material's figures overflow or a recipe line
    /// cannot be resolved against the workbook's materials.
    pub fn refresh(&mut self) -> Result<AggregatedRecipe> {
        for material in &mut self.materials {
            material.cost_per_gram = material.live_cost_per_gram()?;
        }
        self.recipe.refresh(&self.materials)
    }
}
