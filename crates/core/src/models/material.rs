//! Raw material domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::{cost_per_gram, to_grams};
use crate::error::Result;
use crate::types::{MaterialId, UserId, WeightUnit};

/// A purchasable ingredient with its purchase data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// Unique material ID.
    pub id: MaterialId,
    /// Owning account.
    pub user_id: UserId,
    /// Trade name.
    pub name: String,
    /// INCI name printed on labels, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inci_name: Option<String>,
    /// Total paid for the purchase (canonical currency).
    pub total_cost: Decimal,
    /// Quantity purchased, in `unit`.
    pub total_quantity: Decimal,
    /// Unit of `total_quantity`.
    pub unit: WeightUnit,
    /// Derived canonical cost per gram, as last stored.
    #[serde(default)]
    pub cost_per_gram: Decimal,
}

impl RawMaterial {
    /// Create a material, deriving its cost per gram.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CostingError::Overflow`] if the purchase data gives a
    /// quantity or rate too large for a `Decimal`.
    pub fn new(
        id: MaterialId,
        user_id: UserId,
        name: impl Into<String>,
        total_cost: Decimal,
        total_quantity: Decimal,
        unit: WeightUnit,
    ) -> Result<Self> {
        Ok(Self {
            id,
            user_id,
            name: name.into(),
            inci_name: None,
            total_cost,
            total_quantity,
            unit,
            cost_per_gram: cost_per_gram(total_cost, total_quantity, unit)?,
        })
    }

    /// Attach the label name.
    #[must_use]
    pub fn with_inci_name(mut self, inci_name: impl Into<String>) -> Self {
        self.inci_name = Some(inci_name.into());
        self
    }

    /// Replace the purchase data and recompute the cost per gram.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`]. The material is unchanged on error.
    pub fn set_purchase(
        &mut self,
        total_cost: Decimal,
        total_quantity: Decimal,
        unit: WeightUnit,
    ) -> Result<()> {
        self.cost_per_gram = cost_per_gram(total_cost, total_quantity, unit)?;
        self.total_cost = total_cost;
        self.total_quantity = total_quantity;
        self.unit = unit;
        Ok(())
    }

    /// Cost per gram derived from the purchase data right now.
    ///
    /// Aggregation uses this rather than the stored field, which may predate
    /// an edit made elsewhere.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn live_cost_per_gram(&self) -> Result<Decimal> {
        cost_per_gram(self.total_cost, self.total_quantity, self.unit)
    }

    /// Purchased quantity in grams.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CostingError::Overflow`] if it does not fit.
    pub fn quantity_in_grams(&self) -> Result<Decimal> {
        to_grams(self.total_quantity, self.unit)
    }

    /// Name to print on an ingredient label.
    #[must_use]
    pub fn label_name(&self) -> &str {
        self.inci_name.as_deref().unwrap_or(&self.name)
    }
}
