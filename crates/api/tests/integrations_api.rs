//! HTTP-level tests for the endpoints backed by third-party services.
//!
//! No API keys are configured in tests, so these cover the offline paths:
//! input validation, the Pantone reference-table fallback and the
//! not-configured error.

mod common;

use atelier_core::image_color::ColorSample;
use atelier_core::pantone::{nearest_pantone, Rgb};
use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, post_multipart};
use image::{DynamicImage, Rgb as Pixel, RgbImage};
use serde_json::json;
use sqlx::PgPool;

fn solid_png(color: [u8; 3]) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Pixel(color)));
    ColorSample::from_image(image).to_png().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pantone_match_falls_back_without_gemini(pool: PgPool) {
    let png = solid_png([15, 76, 129]);
    let response = post_multipart(
        build_test_app(pool),
        "/api/v1/colors/pantone-match",
        "image",
        "swatch.png",
        &png,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let expected = nearest_pantone(Rgb::new(15, 76, 129));
    assert_eq!(data["source"], "fallback");
    assert_eq!(data["hex"], "#0F4C81");
    assert_eq!(data["code"], expected.code.as_str());
    assert_eq!(data["alternates"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pantone_match_rejects_bad_uploads(pool: PgPool) {
    let response = post_multipart(
        build_test_app(pool.clone()),
        "/api/v1/colors/pantone-match",
        "image",
        "empty.png",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_multipart(
        build_test_app(pool.clone()),
        "/api/v1/colors/pantone-match",
        "image",
        "notes.txt",
        b"definitely not an image",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_multipart(
        build_test_app(pool),
        "/api/v1/colors/pantone-match",
        "file",
        "swatch.png",
        &solid_png([200, 16, 46]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn design_generation_checks_prompt_then_key(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/designs/generate",
        json!({ "prompt": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/designs/generate",
        json!({ "prompt": "Cable-knit cardigan in oatmeal", "aspect_ratio": "portrait_2_3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_CONFIGURED");
    assert_eq!(json["error"], "FREEPIK_API_KEY is not configured");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trend_search_checks_query_then_token(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/trends/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(pool), "/api/v1/trends/search?query=quiet%20luxury").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "TWITTER_BEARER_TOKEN is not configured"
    );
}
