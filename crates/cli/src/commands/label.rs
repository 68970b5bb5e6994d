//! `formulary label` - print the ingredient list for packaging.

use std::path::Path;

use formulary_core::{ingredient_label, label_text};
use tracing::info;

use super::load_workbook;
use crate::output::{Presenter, quantity};

/// Print the ingredient label.
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or aggregated.
pub fn run(path: &Path, presenter: &Presenter) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = load_workbook(path)?;
    let entries = ingredient_label(&workbook.refresh()?);

    if presenter.json() {
        return Presenter::emit_json(&entries);
    }

    info!("{}", label_text(&entries));
    for entry in &entries {
        info!("  {:>6}%  {}", quantity(entry.percentage), entry.name);
    }
    Ok(())
}
