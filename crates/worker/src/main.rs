use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_integrations::gemini::{GeminiClient, GeminiConfig, TextGenerator};
use atelier_worker::review_analysis;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_worker=debug,atelier_integrations=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gemini = GeminiClient::new(GeminiConfig::from_env());
    if !gemini.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set, review analysis disabled");
        return;
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = atelier_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    atelier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    let cancel = CancellationToken::new();
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);
    let job = tokio::spawn(review_analysis::run(
        pool,
        generator,
        review_analysis::interval_from_env(),
        cancel.clone(),
    ));

    shutdown_signal().await;
    cancel.cancel();
    if let Err(e) = job.await {
        tracing::error!(error = %e, "Review analysis task panicked");
    }

    tracing::info!("Worker stopped");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
