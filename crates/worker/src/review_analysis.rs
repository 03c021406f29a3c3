//! Periodic review summarisation.
//!
//! Runs one [`ReviewAnalyzer`] invocation per tick of a fixed interval. The
//! first tick fires immediately, so a freshly started worker catches up on
//! reviews imported while it was down.

use std::sync::Arc;
use std::time::Duration;

use atelier_integrations::gemini::TextGenerator;
use atelier_integrations::review_analysis::ReviewAnalyzer;
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default time between runs: 1 hour.
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Read `REVIEW_ANALYSIS_INTERVAL_SECS`, falling back to the default for
/// missing, unparseable or zero values.
pub fn interval_from_env() -> Duration {
    let secs = std::env::var("REVIEW_ANALYSIS_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    Duration::from_secs(secs)
}

/// Run the summarisation loop until `cancel` is triggered.
///
/// A failed run is logged and retried on the next tick.
pub async fn run(
    pool: PgPool,
    generator: Arc<dyn TextGenerator>,
    every: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = every.as_secs(), "Review analysis job started");

    let analyzer = ReviewAnalyzer::new(generator);
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Review analysis job stopping");
                break;
            }
            _ = interval.tick() => {
                match analyzer.run(&pool).await {
                    Ok(report) if report.analyzed > 0 || report.skipped > 0 => {
                        tracing::info!(
                            batches = report.batches,
                            analyzed = report.analyzed,
                            skipped = report.skipped,
                            "Review analysis: run finished"
                        );
                    }
                    Ok(_) => tracing::debug!("Review analysis: nothing pending"),
                    Err(e) => tracing::error!(error = %e, "Review analysis: run failed"),
                }
            }
        }
    }
}
