//! Integration tests for recipe aggregation, labels and stock checks.

use formulary_core::{
    CostingError, MaterialId, RecipeIngredientLine, WeightUnit, aggregate, check_stock,
    ingredient_label, label_text, scale,
};
use formulary_integration_tests::{BODY_BUTTER, MIXED_UNITS, SHEA_ONLY, load};
use rust_decimal::Decimal;

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_shea_scenario() {
    let workbook = load(SHEA_ONLY).expect("fixture should load");
    let shea = &workbook.materials[0];
    assert_eq!(shea.cost_per_gram, Decimal::new(3198, 5));

    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");
    assert_eq!(aggregated.total_weight, Decimal::ONE_HUNDRED);
    assert_eq!(aggregated.total_cost, Decimal::new(3198, 3));
    assert_eq!(aggregated.lines[0].percentage, Decimal::ONE_HUNDRED);
}

#[test]
fn test_body_butter_totals() {
    let workbook = load(BODY_BUTTER).expect("fixture should load");
    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");

    let costs: Vec<Decimal> = aggregated.lines.iter().map(|l| l.cost).collect();
    assert_eq!(
        costs,
        vec![Decimal::new(22386, 4), Decimal::new(5, 1), Decimal::new(15, 1)]
    );
    assert_eq!(aggregated.total_cost, Decimal::new(42386, 4));
    assert_eq!(aggregated.cost_per_unit, Some(Decimal::new(21193, 4)));
    let shares: Decimal = aggregated.lines.iter().map(|l| l.percentage).sum();
    assert_eq!(shares, Decimal::ONE_HUNDRED);

    // The refreshed cache agrees with a fresh aggregation.
    assert_eq!(workbook.recipe.total_cost, aggregated.total_cost);
    assert_eq!(workbook.recipe.cost_per_unit(), aggregated.cost_per_unit);
}

#[test]
fn test_mixed_units_are_converted_to_grams() {
    let workbook = load(MIXED_UNITS).expect("fixture should load");
    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");

    assert_eq!(aggregated.lines[0].amount_in_grams, Decimal::new(56_699, 3));
    assert_eq!(aggregated.lines[1].amount_in_grams, Decimal::new(50, 0));
    assert_eq!(aggregated.total_weight, Decimal::new(106_699, 3));

    let total: Decimal = aggregated.lines.iter().map(|l| l.percentage).sum();
    assert!((total - Decimal::ONE_HUNDRED).abs() < Decimal::new(1, 20));
}

#[test]
fn test_price_change_reaches_recipe() {
    let mut workbook = load(BODY_BUTTER).expect("fixture should load");
    let before = workbook.recipe.total_cost;

    // Shea doubles in price.
    workbook.materials[0]
        .set_purchase(Decimal::new(3198, 2), Decimal::new(500, 0), WeightUnit::Gram)
        .expect("should reprice");
    let aggregated = workbook.refresh().expect("should refresh");

    assert_eq!(aggregated.total_cost - before, Decimal::new(22386, 4));
    assert_eq!(workbook.recipe.lines[0].cost, Decimal::new(44772, 4));
}

#[test]
fn test_editing_lines() {
    let mut workbook = load(BODY_BUTTER).expect("fixture should load");

    let aggregated = workbook
        .recipe
        .update_line(1, Decimal::new(50, 0), WeightUnit::Gram, &workbook.materials)
        .expect("should update");
    assert_eq!(aggregated.total_weight, Decimal::new(125, 0));
    assert_eq!(aggregated.lines[1].percentage, Decimal::new(40, 0));

    let err = workbook
        .recipe
        .add_line(
            RecipeIngredientLine::new(MaterialId::new(42), Decimal::ONE, WeightUnit::Gram),
            &workbook.materials,
        )
        .expect_err("unknown material should be rejected");
    assert_eq!(err, CostingError::MissingMaterial(MaterialId::new(42)));
    assert_eq!(workbook.recipe.lines.len(), 3);

    workbook
        .recipe
        .remove_line(2, &workbook.materials)
        .expect("should remove");
    assert_eq!(workbook.recipe.total_cost, Decimal::new(32386, 4));
}

#[test]
fn test_missing_material_in_workbook() {
    let yaml = SHEA_ONLY.replace("material_id: 1", "material_id: 9");
    let err = load(&yaml).expect_err("dangling material should fail");
    assert!(err.to_string().contains("Material not found: 9"), "{err}");
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn test_body_butter_label() {
    let workbook = load(BODY_BUTTER).expect("fixture should load");
    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");
    let entries = ingredient_label(&aggregated);

    assert_eq!(
        label_text(&entries),
        "Ingredients: Butyrospermum Parkii Butter, Simmondsia Chinensis Seed Oil, Tocopherol."
    );
    let shares: Vec<Decimal> = entries.iter().map(|e| e.percentage).collect();
    assert_eq!(
        shares,
        vec![Decimal::new(70, 0), Decimal::new(25, 0), Decimal::new(5, 0)]
    );
}

#[test]
fn test_label_falls_back_to_trade_name() {
    let workbook = load(MIXED_UNITS).expect("fixture should load");
    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");
    assert_eq!(
        label_text(&ingredient_label(&aggregated)),
        "Ingredients: Shea Butter, Beeswax."
    );
}

// =============================================================================
// Stock
// =============================================================================

#[test]
fn test_stock_for_one_batch() {
    let workbook = load(BODY_BUTTER).expect("fixture should load");
    let aggregated = aggregate(&workbook.recipe, &workbook.materials).expect("should aggregate");
    let report = check_stock(&aggregated, &workbook.materials).expect("should check");

    assert!(report.is_sufficient());
    // Vitamin E limits: 30 g on hand, 5 g per batch.
    assert_eq!(report.max_batches, Some(Decimal::new(6, 0)));
}

#[test]
fn test_stock_for_large_batch() {
    let workbook = load(BODY_BUTTER).expect("fixture should load");
    let scaled = scale(&workbook.recipe, Decimal::ONE_THOUSAND, &workbook.materials)
        .expect("should scale");
    let report = check_stock(&scaled.aggregated, &workbook.materials).expect("should check");

    assert!(!report.is_sufficient());
    let short: Vec<(&str, Decimal)> = report
        .shortages()
        .map(|l| (l.name.as_str(), l.shortfall_grams))
        .collect();
    assert_eq!(
        short,
        vec![
            ("Shea Butter", Decimal::new(200, 0)),
            ("Vitamin E", Decimal::new(20, 0)),
        ]
    );
    assert_eq!(report.max_batches, Some(Decimal::ZERO));
}
