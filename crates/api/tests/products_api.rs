//! HTTP-level tests for `/products` and `/products/{id}/samples`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, patch_json, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_sanitizes_name_and_defaults_status(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "style_number": "ST-100", "name": "Mens Test Shirt" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["name"], "Test Shirt");
    assert_eq!(created["status"], "DRAFT");

    let id = created["id"].as_i64().unwrap();
    let response = get(build_test_app(pool), &format!("/api/v1/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Test Shirt");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_name_and_unknown_status_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "style_number": "ST-1", "name": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("name"));

    let response = post_json(
        build_test_app(pool),
        "/api/v1/products",
        json!({ "style_number": "ST-1", "name": "Tee", "status": "SHIPPED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_style_number_conflicts(pool: PgPool) {
    let body = json!({ "style_number": "DUP-1", "name": "Tee" });
    post_json(build_test_app(pool.clone()), "/api/v1/products", body.clone()).await;

    let response = post_json(build_test_app(pool), "/api/v1/products", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_replaces_and_patch_merges(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({
            "style_number": "ST-200",
            "name": "Parka",
            "category": "Outerwear",
            "description": "Warm"
        }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/products/{id}");

    let response = patch_json(
        build_test_app(pool.clone()),
        &uri,
        json!({ "name": "Ladies Parka", "status": "APPROVED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await["data"].clone();
    assert_eq!(patched["name"], "Parka");
    assert_eq!(patched["status"], "APPROVED");
    assert_eq!(patched["category"], "Outerwear");

    let response = put_json(
        build_test_app(pool),
        &uri,
        json!({ "style_number": "ST-200", "name": "Parka" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let replaced = body_json(response).await["data"].clone();
    assert!(replaced["category"].is_null());
    assert!(replaced["description"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_and_delete(pool: PgPool) {
    for (style, name, status) in [
        ("A-1", "Oxford Shirt", "DRAFT"),
        ("A-2", "Denim Jacket", "APPROVED"),
    ] {
        post_json(
            build_test_app(pool.clone()),
            "/api/v1/products",
            json!({ "style_number": style, "name": name, "status": status }),
        )
        .await;
    }

    let response = get(build_test_app(pool.clone()), "/api/v1/products?search=oxford").await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["style_number"], "A-1");

    let response = get(build_test_app(pool.clone()), "/api/v1/products?status=APPROVED").await;
    let json = body_json(response).await;
    let id = json["data"][0]["id"].as_i64().unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/products/{id}");
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_samples_listed(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "style_number": "SS-9", "name": "Tee" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    post_json(
        build_test_app(pool.clone()),
        "/api/v1/samples",
        json!({ "product_id": id }),
    )
    .await;

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/products/{id}/samples")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["sample_number"], "SS-9-S01");

    let response = get(build_test_app(pool), "/api/v1/products/999999/samples").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
