use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use mealboard_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] StoreError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    error_title: String,
    error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_title, error_message) = match self {
            AppError::Api(err) => {
                tracing::error!("API error: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Backend Unavailable".to_string(),
                    err.to_string(),
                )
            }
            AppError::Render(err) => {
                tracing::error!("Template error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        let template = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            error_title,
            error_message,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:?}", e);
                (status_code, crate::template::SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
