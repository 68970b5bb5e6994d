//! Integration tests for Formulary.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p formulary-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `costing` - Aggregation, labels and stock checks on fixture workbooks
//! - `scaling` - Rescaling and batch size suggestions
//! - `pricing` - Price breakdowns, currency conversion and display
//! - `properties` - Invariants checked over grids of inputs
//!
//! Fixture workbooks live in `fixtures/` and are compiled in with
//! `include_str!`, so the tests need no files at runtime.

use formulary_core::Workbook;

/// One material, one 100 g line.
pub const SHEA_ONLY: &str = include_str!("../fixtures/shea_only.yaml");

/// Three materials in mixed purchase units, two finished units.
pub const BODY_BUTTER: &str = include_str!("../fixtures/body_butter.yaml");

/// Lines entered in ounces and kilograms.
pub const MIXED_UNITS: &str = include_str!("../fixtures/mixed_units.yaml");

/// Parse a fixture workbook and refresh its derived figures.
///
/// # Errors
///
/// Returns an error if the YAML does not describe a workbook or a recipe
/// line cannot be resolved.
pub fn load(yaml: &str) -> Result<Workbook, Box<dyn std::error::Error>> {
    let mut workbook: Workbook = serde_yaml::from_str(yaml)?;
    workbook.refresh()?;
    Ok(workbook)
}
