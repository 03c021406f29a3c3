//! The periodic loop against a real database and a canned model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use atelier_db::models::review::CreateReview;
use atelier_db::repositories::ReviewRepo;
use atelier_integrations::gemini::TextGenerator;
use atelier_integrations::IntegrationError;
use atelier_worker::review_analysis;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Summarises whichever review id it was seeded with.
struct CannedModel {
    review_id: i64,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for CannedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, IntegrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::json!([
            { "id": self.review_id, "summary": "Runs small", "tags": ["Fit"] }
        ])
        .to_string())
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_tick_runs_immediately_and_cancel_stops_loop(pool: PgPool) {
    let review = ReviewRepo::upsert(
        &pool,
        &CreateReview {
            external_id: "wb-1".to_string(),
            product_id: None,
            product_name: None,
            product_code: Some("KN-1".to_string()),
            rating: 3.0,
            title: None,
            body: "Маломерит, берите на размер больше".to_string(),
            author: None,
            review_date: None,
        },
    )
    .await
    .unwrap();

    let model = Arc::new(CannedModel {
        review_id: review.id,
        calls: AtomicUsize::new(0),
    });
    let cancel = CancellationToken::new();
    let job = tokio::spawn(review_analysis::run(
        pool.clone(),
        model.clone(),
        Duration::from_secs(3600),
        cancel.clone(),
    ));

    let summarised = tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let current = ReviewRepo::find_by_id(&pool, review.id).await.unwrap().unwrap();
            if current.summary_en.is_some() {
                return current;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("review was not summarised");
    assert_eq!(summarised.summary_en.as_deref(), Some("Runs small"));
    assert_eq!(summarised.tags, vec!["Fit".to_string()]);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), job)
        .await
        .expect("loop did not stop")
        .unwrap();
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}
