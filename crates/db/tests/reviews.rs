//! Review storage and analytics queries.

use atelier_db::models::review::{CreateReview, RatingBucket, ReviewFilter, TagCount};
use atelier_db::repositories::ReviewRepo;
use sqlx::PgPool;

fn review(external_id: &str, code: &str, rating: f64, body: &str) -> CreateReview {
    CreateReview {
        external_id: external_id.to_string(),
        product_id: None,
        product_name: Some(format!("Product {code}")),
        product_code: Some(code.to_string()),
        rating,
        title: None,
        body: body.to_string(),
        author: None,
        review_date: None,
    }
}

async fn set_tags(pool: &PgPool, id: i64, tags: &[&str]) {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    sqlx::query("UPDATE product_reviews SET tags = $2 WHERE id = $1")
        .bind(id)
        .bind(&tags)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_distribution_has_all_buckets(pool: PgPool) {
    for (i, rating) in [5.0, 4.6, 4.4, 2.5, 0.0].into_iter().enumerate() {
        ReviewRepo::upsert(&pool, &review(&format!("r{i}"), "P1", rating, "ok"))
            .await
            .unwrap();
    }

    let buckets = ReviewRepo::rating_distribution(&pool).await.unwrap();
    let expected = [(1, 1), (2, 0), (3, 1), (4, 1), (5, 2)]
        .map(|(rating, count)| RatingBucket { rating, count });
    assert_eq!(buckets, expected.to_vec());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_frequency_orders_by_count_then_tag(pool: PgPool) {
    let tag_sets: [&[&str]; 3] = [&["Fit"], &["Fit", "Color"], &["Color"]];
    for (i, tags) in tag_sets.into_iter().enumerate() {
        let saved = ReviewRepo::upsert(&pool, &review(&format!("t{i}"), "P1", 4.0, "x"))
            .await
            .unwrap();
        set_tags(&pool, saved.id, tags).await;
    }

    let counts = ReviewRepo::tag_counts(&pool).await.unwrap();
    assert_eq!(
        counts,
        vec![
            TagCount { tag: "Color".to_string(), count: 2 },
            TagCount { tag: "Fit".to_string(), count: 2 },
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_and_bottom_products(pool: PgPool) {
    let rows = [
        ("a1", "GOOD", 5.0),
        ("a2", "GOOD", 4.5),
        ("a3", "GOOD", 5.0),
        ("b1", "FINE", 4.6),
        ("c1", "MEH", 4.0),
        ("d1", "BAD", 2.0),
        ("d2", "BAD", 3.0),
        ("e1", "EDGE", 3.0),
    ];
    for (ext, code, rating) in rows {
        ReviewRepo::upsert(&pool, &review(ext, code, rating, "text")).await.unwrap();
    }

    let top = ReviewRepo::top_products(&pool, 10).await.unwrap();
    let codes: Vec<&str> = top.iter().map(|p| p.product_code.as_str()).collect();
    assert_eq!(codes, vec!["GOOD", "FINE"]);
    assert_eq!(top[0].review_count, 3);

    let bottom = ReviewRepo::bottom_products(&pool, 10).await.unwrap();
    let codes: Vec<&str> = bottom.iter().map(|p| p.product_code.as_str()).collect();
    assert_eq!(codes, vec!["BAD", "EDGE"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_by_external_id_resets_analysis_on_new_body(pool: PgPool) {
    let saved = ReviewRepo::upsert(&pool, &review("x1", "P1", 4.0, "Soft fabric"))
        .await
        .unwrap();
    assert!(ReviewRepo::apply_analysis(&pool, saved.id, "Soft.", &["Fabric".to_string()])
        .await
        .unwrap());

    let same = ReviewRepo::upsert(&pool, &review("x1", "P1", 5.0, "Soft fabric"))
        .await
        .unwrap();
    assert_eq!(same.id, saved.id);
    assert_eq!(same.rating, 5.0);
    assert_eq!(same.summary_en.as_deref(), Some("Soft."));

    let edited = ReviewRepo::upsert(&pool, &review("x1", "P1", 5.0, "Pilled after a wash"))
        .await
        .unwrap();
    assert_eq!(edited.summary_en, None);
    assert!(edited.tags.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_batch_cursor_and_fill_once(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..3 {
        let saved = ReviewRepo::upsert(&pool, &review(&format!("p{i}"), "P1", 3.0, "body"))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let batch = ReviewRepo::pending_batch(&pool, 0, 2).await.unwrap();
    assert_eq!(batch.iter().map(|r| r.id).collect::<Vec<_>>(), ids[..2].to_vec());

    let next = ReviewRepo::pending_batch(&pool, ids[1], 2).await.unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].id, ids[2]);

    assert!(ReviewRepo::apply_analysis(&pool, ids[0], "First.", &[]).await.unwrap());
    assert!(!ReviewRepo::apply_analysis(&pool, ids[0], "Again.", &[]).await.unwrap());

    let stored = ReviewRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert_eq!(stored.summary_en.as_deref(), Some("First."));
    assert!(stored.analyzed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_pagination(pool: PgPool) {
    for i in 0..5 {
        let rating = f64::from(i + 1);
        ReviewRepo::upsert(&pool, &review(&format!("l{i}"), "P1", rating, "Great drape"))
            .await
            .unwrap();
    }

    let high = ReviewRepo::list(
        &pool,
        &ReviewFilter {
            min_rating: Some(4.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(high.len(), 2);

    let page = ReviewRepo::list(
        &pool,
        &ReviewFilter {
            search: Some("DRAPE".to_string()),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 2);
}
