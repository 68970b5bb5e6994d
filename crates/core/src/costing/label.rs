//! Ingredient label listing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::AggregatedRecipe;
use crate::types::MaterialId;

/// One ingredient as printed on a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// INCI name, or the trade name when none is recorded.
    pub name: String,
    /// Share of the batch weight, 0-100.
    pub percentage: Decimal,
}

/// Label entries by descending share of weight.
///
/// Several lines using the same material are listed once with their shares
/// added up. Ties keep the order the material first appears in the recipe.
#[must_use]
pub fn ingredient_label(aggregated: &AggregatedRecipe) -> Vec<LabelEntry> {
    let mut merged: Vec<(MaterialId, LabelEntry)> = Vec::with_capacity(aggregated.lines.len());
    for line in &aggregated.lines {
        if let Some((_, entry)) = merged.iter_mut().find(|(id, _)| *id == line.material_id) {
            entry.percentage = entry.percentage.saturating_add(line.percentage);
        } else {
            merged.push((
                line.material_id,
                LabelEntry {
                    name: line.label_name.clone(),
                    percentage: line.percentage,
                },
            ));
        }
    }

    let mut entries: Vec<LabelEntry> = merged.into_iter().map(|(_, entry)| entry).collect();
    entries.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    entries
}

/// Render entries as a single label line.
///
/// ```
/// use formulary_core::costing::{LabelEntry, label_text};
/// use rust_decimal::Decimal;
///
/// let entries = vec![
///     LabelEntry { name: "Butyrospermum Parkii Butter".into(), percentage: Decimal::new(80, 0) },
///     LabelEntry { name: "Tocopherol".into(), percentage: Decimal::new(20, 0) },
/// ];
/// assert_eq!(label_text(&entries), "Ingredients: Butyrospermum Parkii Butter, Tocopherol.");
/// assert_eq!(label_text(&[]), "Ingredients: none.");
/// ```
#[must_use]
pub fn label_text(entries: &[LabelEntry]) -> String {
    if entries.is_empty() {
        return "Ingredients: none.".to_string();
    }
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    format!("Ingredients: {}.", names.join(", "))
}
