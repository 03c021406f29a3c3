/// Errors from third-party adapters.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// The service is not configured; carries the environment variable name.
    #[error("{0} is not configured")]
    MissingApiKey(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Upstream API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response did not have the expected shape.
    #[error("Unexpected upstream response: {0}")]
    Parse(String),

    /// Polling gave up before the task finished.
    #[error("Timed out after {attempts} polling attempts")]
    Timeout { attempts: u32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
