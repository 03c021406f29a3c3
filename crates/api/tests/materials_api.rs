//! HTTP-level tests for `/materials`, including the in-use delete guard.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_material(pool: &PgPool, code: &str, name: &str, category: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/materials",
        json!({ "name": name, "code": code, "category": category }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn defaults_and_filters(pool: PgPool) {
    create_material(&pool, "F-1", "Cotton Poplin", "fabric").await;
    create_material(&pool, "T-1", "Horn Button", "trim").await;

    let response = get(build_test_app(pool.clone()), "/api/v1/materials?search=poplin").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["currency"], "USD");

    let response = get(build_test_app(pool), "/api/v1/materials?category=trim").await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["code"], "T-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_refused_while_referenced(pool: PgPool) {
    let material_id = create_material(&pool, "F-9", "Twill", "fabric").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        json!({ "style_number": "P-9", "name": "Chino" }),
    )
    .await;
    let product_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/samples",
        json!({ "product_id": product_id }),
    )
    .await;
    let sample_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/samples/{sample_id}/bom"),
        json!({ "material_id": material_id, "quantity": 1.5 }),
    )
    .await;
    let line_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/materials/{material_id}");
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("1 BOM item"));

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    delete(build_test_app(pool.clone()), &format!("/api/v1/bom-items/{line_id}")).await;
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
