use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// Thin JSON client for the meal-planning REST backend. The base URL and the
/// blanket request timeout come from the startup configuration; there is no
/// retry policy beyond the caller pressing the button again.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        tracing::debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::read_json(response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        tracing::debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        tracing::debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        tracing::debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }

    /// One-shot reachability probe against the backend root. Used by the
    /// dashboard health indicator and its manual retry.
    pub async fn health(&self) -> bool {
        match self.http.get(self.url("/")).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::warn!(error = %err, "backend health probe failed");
                false
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let response = Self::check_status(response).await?;

        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api(flatten_error(status, &body)))
    }
}

/// Collapse an error response into one displayable string. FastAPI-style
/// bodies carry a `detail` field; otherwise the raw text (or the status line
/// when the body is empty) is used.
fn flatten_error(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_owned();
        }
    }

    if body.trim().is_empty() {
        format!("API request failed ({status})")
    } else {
        body.trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_detail_field() {
        let message = flatten_error(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Ingredient not found"}"#,
        );
        assert_eq!(message, "Ingredient not found");
    }

    #[test]
    fn falls_back_to_plain_text_then_status() {
        assert_eq!(
            flatten_error(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            flatten_error(StatusCode::BAD_GATEWAY, ""),
            "API request failed (502 Bad Gateway)"
        );
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/ingredients/"), "http://localhost:8000/ingredients/");
    }
}
