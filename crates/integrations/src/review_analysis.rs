//! Batch job that writes English summaries and topic tags onto reviews.
//!
//! One invocation walks unanalysed reviews in id order, at most
//! [`MAX_BATCHES`] batches of [`BATCH_SIZE`]. The id cursor always moves
//! past a batch, so a review the model cannot handle is not re-sent in the
//! same invocation.

use std::sync::Arc;

use atelier_core::review_summary::{build_prompt, parse_reply, ReviewInput, BATCH_SIZE, MAX_BATCHES};
use atelier_db::repositories::ReviewRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::IntegrationError;
use crate::gemini::TextGenerator;

/// Counts from one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub batches: usize,
    pub analyzed: usize,
    pub skipped: usize,
}

#[derive(Clone)]
pub struct ReviewAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl ReviewAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Run one invocation of the job.
    ///
    /// Database errors abort the run. Generation and parse failures skip
    /// the affected batch and are logged.
    pub async fn run(&self, pool: &PgPool) -> Result<AnalysisReport, IntegrationError> {
        let mut report = AnalysisReport::default();
        let mut cursor = 0;

        while report.batches < MAX_BATCHES {
            let batch = ReviewRepo::pending_batch(pool, cursor, BATCH_SIZE).await?;
            let Some(last) = batch.last() else {
                break;
            };
            cursor = last.id;
            report.batches += 1;

            let inputs: Vec<ReviewInput<'_>> = batch
                .iter()
                .map(|r| ReviewInput {
                    id: r.id,
                    rating: r.rating,
                    title: r.title.as_deref(),
                    body: &r.body,
                })
                .collect();

            let reply = match self.generator.generate_text(&build_prompt(&inputs)).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(error = %e, after_id = cursor, "Review batch generation failed");
                    report.skipped += batch.len();
                    continue;
                }
            };
            let analyses = match parse_reply(&reply) {
                Ok(analyses) => analyses,
                Err(e) => {
                    tracing::warn!(error = %e, after_id = cursor, "Review batch reply unparseable");
                    report.skipped += batch.len();
                    continue;
                }
            };

            let mut applied = 0;
            for analysis in analyses {
                // Ignore ids the model invented.
                if !batch.iter().any(|r| r.id == analysis.id) {
                    continue;
                }
                let result = ReviewRepo::apply_analysis(
                    pool,
                    analysis.id,
                    &analysis.summary,
                    &analysis.tags,
                )
                .await;
                match result {
                    Ok(true) => applied += 1,
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(
                            review_id = analysis.id,
                            error = %e,
                            "Review analysis update failed"
                        );
                    }
                }
            }
            report.analyzed += applied;
            report.skipped += batch.len() - applied;
        }

        tracing::info!(
            batches = report.batches,
            analyzed = report.analyzed,
            skipped = report.skipped,
            "Review analysis finished"
        );
        Ok(report)
    }
}
