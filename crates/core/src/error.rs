//! Errors raised by costing operations.
//!
//! Zero denominators are not errors: a material with no purchased quantity
//! has a cost per gram of zero and an empty recipe has 0% shares. The
//! variants here are caller contract violations whose result would be
//! meaningless, or figures too large for a `Decimal`.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{MaterialId, UserId};

/// Error type for costing, aggregation and scaling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostingError {
    /// Scaling target weight must be positive.
    #[error("Cannot scale recipe: target weight must be positive (got {0})")]
    InvalidScaleTarget(Decimal),

    /// No positive reference weight was available to scale from.
    #[error("Cannot scale recipe: reference batch weight must be positive (got {0})")]
    InvalidScaleBasis(Decimal),

    /// A line references a material that was not supplied.
    #[error("Material not found: {0}")]
    MissingMaterial(MaterialId),

    /// A line references a material owned by another account.
    #[error("Material {material} belongs to user {owner}")]
    ForeignMaterial {
        /// The referenced material.
        material: MaterialId,
        /// The account that owns it.
        owner: UserId,
    },

    /// An ingredient line index was past the end of the recipe.
    #[error("Ingredient line {index} out of range (recipe has {len} lines)")]
    LineOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of lines in the recipe.
        len: usize,
    },

    /// A result did not fit in a `Decimal`.
    #[error("Arithmetic overflow while {0}")]
    Overflow(&'static str),
}

/// Convenience alias for costing results.
pub type Result<T> = std::result::Result<T, CostingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostingError::MissingMaterial(MaterialId::new(9));
        assert_eq!(err.to_string(), "Material not found: 9");

        let err = CostingError::LineOutOfRange { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Ingredient line 3 out of range (recipe has 2 lines)"
        );

        let err = CostingError::InvalidScaleTarget(Decimal::ZERO);
        assert_eq!(
            err.to_string(),
            "Cannot scale recipe: target weight must be positive (got 0)"
        );

        let err = CostingError::Overflow("converting to grams");
        assert_eq!(err.to_string(), "Arithmetic overflow while converting to grams");
    }
}
