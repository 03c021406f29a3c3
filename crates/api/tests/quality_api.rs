//! HTTP-level tests for care derivation and quality inspections.

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

/// A sample knitted from wool in navy.
async fn wool_sample(pool: &PgPool) -> i64 {
    let product_id = create(
        pool,
        "/api/v1/products",
        json!({ "style_number": "QA-1", "name": "Crew Knit" }),
    )
    .await;
    let color_id = create(pool, "/api/v1/colors", json!({ "name": "Navy", "code": "NV-1" })).await;
    let material_id = create(
        pool,
        "/api/v1/materials",
        json!({ "name": "Lambswool Jersey", "code": "LW-1", "composition": "100% Wool" }),
    )
    .await;
    create(
        pool,
        "/api/v1/samples",
        json!({
            "product_id": product_id,
            "colors": [color_id],
            "materials": [{ "material_id": material_id }]
        }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn derive_previews_without_storing(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/quality/derive",
        json!({
            "category": "knit",
            "fibers": ["wool"],
            "color": "dark",
            "care_method": "hand_wash"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["care_symbols"].as_array().unwrap().len(), 5);
    assert_eq!(data["care_symbols"][0]["category"], "washing");
    assert!(!data["care_notes"].as_array().unwrap().is_empty());
    assert!(!data["inspection_items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_vocabulary_rejected(pool: PgPool) {
    let sample_id = wool_sample(&pool).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/quality-inspections",
        json!({ "sample_id": sample_id, "category": "outerwear" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/quality-inspections",
        json!({ "sample_id": sample_id, "category": "knit", "fibers": ["kevlar"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_detects_from_sample_and_keeps_manual_items(pool: PgPool) {
    let sample_id = wool_sample(&pool).await;
    let inspection_id = create(
        &pool,
        "/api/v1/quality-inspections",
        json!({ "sample_id": sample_id, "category": "knit" }),
    )
    .await;

    create(
        &pool,
        &format!("/api/v1/quality-inspections/{inspection_id}/items"),
        json!({ "category": "custom", "item_name": "Logo placement" }),
    )
    .await;

    let generate_uri = format!("/api/v1/quality-inspections/{inspection_id}/generate");
    let response = post_json(build_test_app(pool.clone()), &generate_uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["care_labels"].as_array().unwrap().len(), 5);
    assert_eq!(detail["care_labels"][0]["symbol_code"], "W30G");

    let items = detail["items"].as_array().unwrap();
    let derived_count = items.iter().filter(|i| i["is_derived"] == true).count();
    assert!(derived_count > 0);
    assert!(items.iter().any(|i| i["item_name"] == "Logo placement"));

    // Regenerating replaces derived rows instead of appending.
    let response = post_json(build_test_app(pool.clone()), &generate_uri, json!({})).await;
    let detail = body_json(response).await["data"].clone();
    let items = detail["items"].as_array().unwrap();
    assert_eq!(
        items.iter().filter(|i| i["is_derived"] == true).count(),
        derived_count
    );
    assert_eq!(
        items.iter().filter(|i| i["item_name"] == "Logo placement").count(),
        1
    );
    assert_eq!(detail["care_labels"].as_array().unwrap().len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn regeneration_follows_sample_edits(pool: PgPool) {
    let product_id = create(
        &pool,
        "/api/v1/products",
        json!({ "style_number": "QA-2", "name": "Easy Shirt" }),
    )
    .await;
    let blend_id = create(
        &pool,
        "/api/v1/materials",
        json!({ "name": "Mystery Blend", "code": "MB-1" }),
    )
    .await;
    let wool_id = create(
        &pool,
        "/api/v1/materials",
        json!({ "name": "Lambswool", "code": "LW-2", "composition": "100% Wool" }),
    )
    .await;
    let sample_id = create(
        &pool,
        "/api/v1/samples",
        json!({ "product_id": product_id, "materials": [{ "material_id": blend_id }] }),
    )
    .await;
    let inspection_id = create(
        &pool,
        "/api/v1/quality-inspections",
        json!({ "sample_id": sample_id, "category": "midwear" }),
    )
    .await;
    let generate_uri = format!("/api/v1/quality-inspections/{inspection_id}/generate");

    // Unknown material falls back to cotton.
    let response = post_json(build_test_app(pool.clone()), &generate_uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["care_labels"][0]["symbol_code"], "W40");

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/samples/{sample_id}"),
        json!({ "product_id": product_id, "materials": [{ "material_id": wool_id }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(build_test_app(pool.clone()), &generate_uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["care_labels"][0]["symbol_code"], "W30G");
    assert_eq!(detail["fibers"], json!([]));
    assert!(detail["color_depth"].is_null());

    // Values set on the inspection still take precedence.
    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/quality-inspections/{inspection_id}"),
        json!({ "fibers": ["cotton"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json(build_test_app(pool), &generate_uri, json!({})).await;
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["care_labels"][0]["symbol_code"], "W40");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_results_validated_and_inspection_deleted(pool: PgPool) {
    let sample_id = wool_sample(&pool).await;
    let inspection_id = create(
        &pool,
        "/api/v1/quality-inspections",
        json!({ "sample_id": sample_id, "category": "midwear", "care_method": "dry_clean" }),
    )
    .await;
    let item_id = create(
        &pool,
        &format!("/api/v1/quality-inspections/{inspection_id}/items"),
        json!({ "category": "appearance", "item_name": "Shade match" }),
    )
    .await;
    let item_uri = format!("/api/v1/quality-inspection-items/{item_id}");

    let response = patch_json(build_test_app(pool.clone()), &item_uri, json!({ "result": "MAYBE" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(build_test_app(pool.clone()), &item_uri, json!({ "result": "PASS" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["result"], "PASS");

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/quality-inspections/{inspection_id}"),
        json!({ "result": "FAIL", "notes": "Shade off" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["result"], "FAIL");

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/quality-inspections?sample_id={sample_id}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/quality-inspections/{inspection_id}");
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete(build_test_app(pool), &item_uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
