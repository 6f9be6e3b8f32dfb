//! HTTP client for the MemoGenius REST API.
//!
//! [`ApiClient`] holds the connection pool and base URL and carries no session
//! state. Authenticated calls go through a [`ScopedClient`], which pairs the
//! client with an explicit bearer [`Credential`] and [`UserId`] for the
//! lifetime of a borrow. The endpoint families live in [`auth`], [`chat`] and
//! [`reminders`].

pub mod auth;
pub mod chat;
pub mod error;
pub mod reminders;
pub mod types;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

pub use error::ApiError;

use crate::config::ApiConfig;
use crate::session::types::{Credential, UserId};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Transport {
                path: base_url.clone(),
                source,
            })?;

        Ok(Self { http, base_url })
    }

    /// Client pointed at `base_url` with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request. The bearer credential, when given, is attached to this
    /// request only.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match credential {
            Some(credential) => builder.bearer_auth(credential.as_str()),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body on success.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(path, request).await?;
        response.json::<T>().await.map_err(|source| {
            tracing::warn!(path, error = %source, "failed to decode response");
            ApiError::Decode {
                path: path.to_string(),
                source,
            }
        })
    }

    /// Send a request whose body is only an acknowledgment. An empty body
    /// decodes to `Null`, a non-JSON body to a string.
    pub async fn send_ack(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.send_checked(path, request).await?;
        let body = response.text().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) => Ok(serde_json::Value::String(body)),
        }
    }

    async fn send_checked(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!(path, "sending request");

        let response = request.send().await.map_err(|source| {
            tracing::warn!(path, error = %source, "request failed");
            ApiError::Transport {
                path: path.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
        tracing::warn!(path, status = status.as_u16(), %detail, "request rejected");
        Err(ApiError::Rejected {
            path: path.to_string(),
            status,
            detail,
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// FastAPI answers `{"detail": "..."}` for handled errors and
/// `{"detail": [...]}` for validation failures.
fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        Err(_) => Some(trimmed.to_string()),
    }
}

/// An [`ApiClient`] bound to one authenticated user.
///
/// Obtained from [`crate::session::Session::scope`]; holding one proves an
/// identity was resolved when the borrow began.
#[derive(Debug, Clone, Copy)]
pub struct ScopedClient<'a> {
    api: &'a ApiClient,
    credential: &'a Credential,
    user_id: UserId,
}

impl<'a> ScopedClient<'a> {
    pub fn new(api: &'a ApiClient, credential: &'a Credential, user_id: UserId) -> Self {
        Self {
            api,
            credential,
            user_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.api.request(method, path, Some(self.credential))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.api.send_json(path, request).await
    }

    pub(crate) async fn send_ack(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<serde_json::Value, ApiError> {
        self.api.send_ack(path, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/reminders/"), "http://localhost:8000/api/reminders/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn detail_extraction() {
        assert_eq!(
            extract_detail(r#"{"detail":"Invalid access key"}"#).as_deref(),
            Some("Invalid access key")
        );
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body","text"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","text"]}]"#)
        );
        assert_eq!(extract_detail("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(extract_detail("  "), None);
    }
}
