//! HTTP-level tests for samples and their nested BOM, costs and progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create(pool: &PgPool, uri: &str, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

struct Fixture {
    product_id: i64,
    color_id: i64,
    size_id: i64,
    material_id: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let product_id = create(
        pool,
        "/api/v1/products",
        json!({ "style_number": "KN-01", "name": "Rib Sweater" }),
    )
    .await;
    let color_id = create(pool, "/api/v1/colors", json!({ "name": "Navy", "code": "NV" })).await;
    let group_id = create(pool, "/api/v1/size-groups", json!({ "name": "Alpha" })).await;
    let size_id = create(
        pool,
        &format!("/api/v1/size-groups/{group_id}/sizes"),
        json!({ "label": "M" }),
    )
    .await;
    let material_id = create(
        pool,
        "/api/v1/materials",
        json!({ "name": "Merino Rib", "code": "MR-1", "composition": "100% Wool" }),
    )
    .await;
    Fixture {
        product_id,
        color_id,
        size_id,
        material_id,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_nested_rows_and_read_back(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/samples",
        json!({
            "product_id": f.product_id,
            "colors": [f.color_id],
            "sizes": [{ "size_master_id": f.size_id, "quantity": 2 }],
            "materials": [{ "material_id": f.material_id, "placement": "body" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["sample_number"], "KN-01-S01");
    assert_eq!(created["status"], "REQUESTED");
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool), &format!("/api/v1/samples/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["colors"][0]["name"], "Navy");
    assert_eq!(detail["sizes"][0]["label"], "M");
    assert_eq!(detail["sizes"][0]["quantity"], 2);
    assert_eq!(detail["materials"][0]["material_name"], "Merino Rib");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_nested_write_leaves_nothing(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/samples",
        json!({
            "product_id": f.product_id,
            "colors": [f.color_id, 999_999]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/samples?product_id={}", f.product_id),
    )
    .await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_validated_on_patch_and_put_replaces_nested(pool: PgPool) {
    let f = fixture(&pool).await;
    let id = create(
        &pool,
        "/api/v1/samples",
        json!({ "product_id": f.product_id, "colors": [f.color_id] }),
    )
    .await;
    let uri = format!("/api/v1/samples/{id}");

    let response = patch_json(build_test_app(pool.clone()), &uri, json!({ "status": "LOST" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        patch_json(build_test_app(pool.clone()), &uri, json!({ "status": "RECEIVED" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "RECEIVED");

    let response = put_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "product_id": f.product_id, "sample_number": "KN-01-S01", "colors": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert!(detail["colors"].as_array().unwrap().is_empty());

    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_product_is_not_found_with_or_without_number(pool: PgPool) {
    for body in [
        json!({ "product_id": 9999 }),
        json!({ "product_id": 9999, "sample_number": "GHOST-S01" }),
    ] {
        let response = post_json(build_test_app(pool.clone()), "/api/v1/samples", body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["error"], "Product with id 9999 not found");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bom_lines_lifecycle(pool: PgPool) {
    let f = fixture(&pool).await;
    let sample_id = create(&pool, "/api/v1/samples", json!({ "product_id": f.product_id })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/samples/{sample_id}/bom"),
        json!({ "material_id": f.material_id, "quantity": 1.25, "unit": "m" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let line = body_json(response).await["data"].clone();
    assert_eq!(line["material_name"], "Merino Rib");
    let line_id = line["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/bom-items/{line_id}"),
        json!({ "material_id": f.material_id, "quantity": 2.0 }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["quantity"], 2.0);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/bom-items/{line_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/samples/{sample_id}/bom")).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = get(build_test_app(pool), "/api/v1/samples/999999/bom").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn costs_carry_computed_totals(pool: PgPool) {
    let f = fixture(&pool).await;
    let sample_id = create(&pool, "/api/v1/samples", json!({ "product_id": f.product_id })).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/samples/{sample_id}/costs"),
        json!({
            "material_cost": 6.0,
            "trim_cost": 1.0,
            "labor_cost": 2.5,
            "overhead_cost": 0.5,
            "duty_rate": 0.1,
            "target_retail_price": 44.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cost = body_json(response).await["data"].clone();
    assert_eq!(cost["total_cost"], 10.0);
    assert_eq!(cost["landed_cost"], 11.0);
    assert_eq!(cost["margin_pct"], 75.0);
    let cost_id = cost["id"].as_i64().unwrap();

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/costs/{cost_id}"),
        json!({ "target_retail_price": 22.0 }),
    )
    .await;
    let cost = body_json(response).await["data"].clone();
    assert_eq!(cost["margin_amount"], 11.0);
    assert_eq!(cost["material_cost"], 6.0);

    let response = patch_json(
        build_test_app(pool),
        &format!("/api/v1/costs/{cost_id}"),
        json!({ "duty_rate": 1.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn milestone_progress_upserts(pool: PgPool) {
    let f = fixture(&pool).await;
    let sample_id = create(&pool, "/api/v1/samples", json!({ "product_id": f.product_id })).await;
    let milestone_id =
        create(&pool, "/api/v1/milestones", json!({ "name": "Proto fit" })).await;
    let uri = format!("/api/v1/samples/{sample_id}/progress/{milestone_id}");

    let response =
        put_json(build_test_app(pool.clone()), &uri, json!({ "status": "IN_PROGRESS" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "status": "DONE" })).await;
    let progress = body_json(response).await["data"].clone();
    assert_eq!(progress["status"], "DONE");
    assert!(progress["completed_at"].is_string());

    let response = put_json(build_test_app(pool.clone()), &uri, json!({ "status": "MAYBE" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/samples/{sample_id}/progress"),
    )
    .await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["milestone_name"], "Proto fit");
}
