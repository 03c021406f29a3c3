//! Financial and OTB planning upserts.

use atelier_core::planning::FieldValue;
use atelier_db::models::planning::{FinancialPlanFilter, UpsertFinancialPlan, UpsertOtbPlan};
use atelier_db::repositories::{FinancialPlanRepo, OtbPlanRepo};
use sqlx::PgPool;

fn plan_row(month: i32, planned_sales: Option<f64>) -> UpsertFinancialPlan {
    UpsertFinancialPlan {
        year: 2026,
        season_code: "SS26".to_string(),
        division_name: "Womens".to_string(),
        month,
        planned_sales,
        actual_sales: None,
        planned_margin_pct: None,
        actual_margin_pct: None,
        planned_units: Some(100),
        actual_units: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_financial_upsert_updates_in_place(pool: PgPool) {
    let first = FinancialPlanRepo::upsert_many(&pool, &[plan_row(3, Some(1000.0))])
        .await
        .unwrap();
    let second = FinancialPlanRepo::upsert_many(&pool, &[plan_row(3, Some(2500.0))])
        .await
        .unwrap();

    assert_eq!(first[0].id, second[0].id);
    assert_eq!(second[0].planned_sales, Some(2500.0));

    let all = FinancialPlanRepo::list(&pool, &FinancialPlanFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_financial_upsert_keeps_values_not_sent(pool: PgPool) {
    FinancialPlanRepo::upsert_many(&pool, &[plan_row(4, Some(800.0))])
        .await
        .unwrap();
    let saved = FinancialPlanRepo::upsert_many(&pool, &[plan_row(4, None)])
        .await
        .unwrap();
    assert_eq!(saved[0].planned_sales, Some(800.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_financial_update_field(pool: PgPool) {
    let saved = FinancialPlanRepo::upsert_many(&pool, &[plan_row(5, None)])
        .await
        .unwrap();

    let updated = FinancialPlanRepo::update_field(
        &pool,
        saved[0].id,
        "actual_units",
        FieldValue::Units(42),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.actual_units, Some(42));

    let updated = FinancialPlanRepo::update_field(
        &pool,
        saved[0].id,
        "actual_sales",
        FieldValue::Amount(99.5),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.actual_sales, Some(99.5));

    let missing =
        FinancialPlanRepo::update_field(&pool, 987_654, "actual_sales", FieldValue::Amount(1.0))
            .await
            .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_month_check_constraint(pool: PgPool) {
    let err = FinancialPlanRepo::upsert_many(&pool, &[plan_row(13, None)])
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.code()).as_deref(),
        Some("23514")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_otb_units_derived_and_recomputed(pool: PgPool) {
    let saved = OtbPlanRepo::upsert_many(
        &pool,
        &[UpsertOtbPlan {
            style_number: "AT-1".to_string(),
            week_number: 12,
            planned_units: 120,
            received_units: 20,
            sold_units: 0,
            otb_units: None,
            unit_cost: Some(7.25),
        }],
    )
    .await
    .unwrap();
    assert_eq!(saved[0].otb_units, 100);

    let updated = OtbPlanRepo::update_field(
        &pool,
        saved[0].id,
        "received_units",
        FieldValue::Units(150),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.received_units, 150);
    assert_eq!(updated.otb_units, 0);

    let updated = OtbPlanRepo::update_field(
        &pool,
        saved[0].id,
        "planned_units",
        FieldValue::Units(200),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.otb_units, 50);
}
