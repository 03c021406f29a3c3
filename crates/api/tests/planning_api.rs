//! HTTP-level tests for financial and open-to-buy planning.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn financial_upsert_is_idempotent_on_period(pool: PgPool) {
    let rows = json!([
        { "year": 2026, "season_code": "SS26", "division_name": "Mens", "month": 3, "planned_sales": 1000.0 },
        { "year": 2026, "season_code": "SS26", "division_name": "Mens", "month": 4, "planned_sales": 1500.0 }
    ]);
    let response = post_json(build_test_app(pool.clone()), "/api/v1/financial-planning", rows).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/financial-planning",
        json!([{ "year": 2026, "season_code": "SS26", "division_name": "Mens", "month": 3, "actual_sales": 900.0 }]),
    )
    .await;
    let row = body_json(response).await["data"][0].clone();
    assert_eq!(row["planned_sales"], 1000.0);
    assert_eq!(row["actual_sales"], 900.0);

    let response = get(
        build_test_app(pool),
        "/api/v1/financial-planning?year=2026&season_code=SS26",
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn financial_upsert_validates_rows(pool: PgPool) {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/financial-planning", json!([])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/financial-planning",
        json!([{ "year": 2026, "season_code": "SS26", "division_name": "Mens", "month": 13 }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn field_update_uses_allow_list(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/financial-planning",
        json!([{ "year": 2027, "season_code": "FW27", "division_name": "Womens", "month": 9 }]),
    )
    .await;
    let id = body_json(response).await["data"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/financial-planning/{id}/field");

    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "field": "actual_units", "value": 41.6 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["actual_units"], 42);

    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "field": "year", "value": 1999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("cannot be updated"));

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/financial-planning/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = patch_json(
        build_test_app(pool),
        &uri,
        json!({ "field": "actual_units", "value": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn otb_units_derived_and_rederived(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/otb-planning",
        json!([{ "style_number": "ST-1", "week_number": 12, "planned_units": 100, "received_units": 30 }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let row = body_json(response).await["data"][0].clone();
    assert_eq!(row["otb_units"], 70);
    let id = row["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/otb-planning/{id}/field"),
        json!({ "field": "received_units", "value": 120 }),
    )
    .await;
    let row = body_json(response).await["data"].clone();
    assert_eq!(row["received_units"], 120);
    assert_eq!(row["otb_units"], 0);

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/otb-planning/{id}/field"),
        json!({ "field": "style_number", "value": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(pool), "/api/v1/otb-planning?style_number=ST-1").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_units_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/otb-planning",
        json!([{ "style_number": "ST-9", "week_number": 3, "planned_units": 0, "received_units": i64::MIN }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/otb-planning",
        json!([{ "style_number": "ST-9", "week_number": 3, "planned_units": 10 }]),
    )
    .await;
    let id = body_json(response).await["data"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/otb-planning/{id}/field");

    for value in [json!(1e300), json!(-5)] {
        let response = patch_json(
            build_test_app(pool.clone()),
            &uri,
            json!({ "field": "planned_units", "value": value }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let response = get(build_test_app(pool), "/api/v1/otb-planning?style_number=ST-9").await;
    assert_eq!(body_json(response).await["data"][0]["planned_units"], 10);
}
