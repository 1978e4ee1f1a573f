pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod template;

pub use routes::AppState;

/// Create app router for testing
///
/// This function creates the Axum router with all routes configured,
/// useful for integration testing without starting the full server.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let state = AppState::new(config)?;
    Ok(routes::router(state))
}
