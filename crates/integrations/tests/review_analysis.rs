//! Review summarisation job against a real database and a scripted model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atelier_db::models::review::CreateReview;
use atelier_db::repositories::ReviewRepo;
use atelier_integrations::gemini::TextGenerator;
use atelier_integrations::review_analysis::{AnalysisReport, ReviewAnalyzer};
use atelier_integrations::IntegrationError;
use sqlx::PgPool;

/// Replays canned replies in order; errors once the script runs out.
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, IntegrationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(replies: Vec<Result<String, IntegrationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, IntegrationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(IntegrationError::Parse("script exhausted".to_string())))
    }
}

fn analyses_for(ids: &[i64]) -> Vec<serde_json::Value> {
    ids.iter()
        .map(|id| serde_json::json!({ "id": id, "summary": format!("Summary {id}"), "tags": ["Fit"] }))
        .collect()
}

fn fenced(items: Vec<serde_json::Value>) -> String {
    format!("```json\n{}\n```", serde_json::Value::Array(items))
}

fn reply_for(ids: &[i64]) -> String {
    fenced(analyses_for(ids))
}

async fn seed(pool: &PgPool, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let review = ReviewRepo::upsert(
            pool,
            &CreateReview {
                external_id: format!("ext-{i}"),
                product_id: None,
                product_name: None,
                product_code: Some("TS-01".to_string()),
                rating: 4.0,
                title: None,
                body: format!("Review body number {i}"),
                author: None,
                review_date: None,
            },
        )
        .await
        .unwrap();
        ids.push(review.id);
    }
    ids
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batches_applied_and_bad_reply_skipped(pool: PgPool) {
    let ids = seed(&pool, 12).await;
    let model = ScriptedModel::new(vec![
        Ok(reply_for(&ids[..10])),
        Ok("Sorry, I cannot help with that.".to_string()),
    ]);
    let analyzer = ReviewAnalyzer::new(model.clone());

    let report = analyzer.run(&pool).await.unwrap();
    assert_eq!(
        report,
        AnalysisReport {
            batches: 2,
            analyzed: 10,
            skipped: 2
        }
    );
    assert_eq!(model.prompt_count(), 2);

    let first = ReviewRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert_eq!(first.summary_en.as_deref(), Some(format!("Summary {}", ids[0]).as_str()));
    assert_eq!(first.tags, vec!["Fit".to_string()]);
    assert!(first.analyzed_at.is_some());

    let pending = ReviewRepo::find_by_id(&pool, ids[11]).await.unwrap().unwrap();
    assert!(pending.summary_en.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_next_run_picks_up_remaining_reviews(pool: PgPool) {
    let ids = seed(&pool, 3).await;
    let first_run = ScriptedModel::new(vec![Ok(reply_for(&ids[..1]))]);
    let report = ReviewAnalyzer::new(first_run).run(&pool).await.unwrap();
    assert_eq!(report.analyzed, 1);
    assert_eq!(report.skipped, 2);

    let second_run = ScriptedModel::new(vec![Ok(reply_for(&ids[1..]))]);
    let report = ReviewAnalyzer::new(second_run.clone()).run(&pool).await.unwrap();
    assert_eq!(
        report,
        AnalysisReport {
            batches: 1,
            analyzed: 2,
            skipped: 0
        }
    );
    assert!(!second_run.prompts.lock().unwrap()[0].contains(&format!("\"id\":{}", ids[0])));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_run_stops_after_batch_limit(pool: PgPool) {
    seed(&pool, 60).await;
    let model = ScriptedModel::new(Vec::new());

    let report = ReviewAnalyzer::new(model.clone()).run(&pool).await.unwrap();
    assert_eq!(report.batches, 5);
    assert_eq!(report.analyzed, 0);
    assert_eq!(report.skipped, 50);
    assert_eq!(model.prompt_count(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invented_ids_are_ignored(pool: PgPool) {
    let ids = seed(&pool, 1).await;
    let model = ScriptedModel::new(vec![Ok(reply_for(&[ids[0], ids[0] + 1000]))]);

    let report = ReviewAnalyzer::new(model).run(&pool).await.unwrap();
    assert_eq!(report.analyzed, 1);
    assert_eq!(report.skipped, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_table_runs_no_batches(pool: PgPool) {
    let model = ScriptedModel::new(Vec::new());
    let report = ReviewAnalyzer::new(model.clone()).run(&pool).await.unwrap();
    assert_eq!(report, AnalysisReport::default());
    assert_eq!(model.prompt_count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_update_skips_review_and_continues(pool: PgPool) {
    let ids = seed(&pool, 20).await;
    // Postgres rejects NUL bytes in text columns.
    let mut first = analyses_for(&ids[..10]);
    first[0]["summary"] = serde_json::json!("Broken\u{0000}summary");
    let model = ScriptedModel::new(vec![Ok(fenced(first)), Ok(reply_for(&ids[10..]))]);

    let report = ReviewAnalyzer::new(model.clone()).run(&pool).await.unwrap();
    assert_eq!(
        report,
        AnalysisReport {
            batches: 2,
            analyzed: 19,
            skipped: 1
        }
    );
    assert_eq!(model.prompt_count(), 2);

    let broken = ReviewRepo::find_by_id(&pool, ids[0]).await.unwrap().unwrap();
    assert!(broken.summary_en.is_none());
    let neighbour = ReviewRepo::find_by_id(&pool, ids[1]).await.unwrap().unwrap();
    assert!(neighbour.summary_en.is_some());
    let later = ReviewRepo::find_by_id(&pool, ids[19]).await.unwrap().unwrap();
    assert!(later.summary_en.is_some());
}
