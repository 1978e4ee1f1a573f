use thiserror::Error;

/// Failures surfaced by the API layer. Everything remote collapses into a
/// single human-readable message, matching what the banner displays;
/// validation errors are raised locally, before any network round-trip.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with a non-2xx status.
    #[error("{0}")]
    Api(String),

    /// The request never completed (connection refused, timeout, bad body).
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local pre-submission validation.
    #[error("{0}")]
    Validation(String),
}
