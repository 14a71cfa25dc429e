//! HTTP client for the Kiwi backend API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    hooks::{ExpiryReason, LogSessionHooks, SessionHooks},
    types::{ContYn, ErrorBody, KiwoomRequest},
    ApiError, Outcome,
};

/// HTTP method accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Client for the Kiwi backend's REST endpoints.
///
/// Dispatches one request per call and classifies the response into a
/// payload, a session-expired outcome, or an [`ApiError`]. Session expiry
/// (an explicit 401, or a truncated body on a success status) notifies the
/// configured [`SessionHooks`] instead of surfacing an error. No retries
/// and no timeout beyond what the transport applies.
pub struct Client {
    /// Base URL for the backend. Defaults to the local server address.
    base_url: String,
    http: reqwest::Client,
    hooks: Arc<dyn SessionHooks>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client pointing at the locally running backend.
    pub fn new() -> Self {
        Self::with_base_url("http://127.0.0.1:8000")
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            hooks: Arc::new(LogSessionHooks),
        }
    }

    /// Replaces the session-expiry hooks. Frontends install their
    /// login-redirect behavior here.
    pub fn with_session_hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    fn get_url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(format!("{}{}", self.base_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            ApiError::internal(e)
        })
    }

    /// Dispatches one request and classifies the response.
    ///
    /// `data`, when present, is serialized as the JSON request body. The
    /// `Content-Type: application/json` header is always sent.
    pub async fn call<T>(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> Result<Outcome<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path)?;
        let mut request = self
            .http
            .request(method.into(), url)
            .header("content-type", "application/json");
        if let Some(data) = data {
            request = request.json(data);
        }
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", path, e);
            ApiError::internal(e)
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("{} answered 401, session expired", path);
            self.hooks.on_session_expired(ExpiryReason::Unauthorized);
            return Ok(Outcome::SessionExpired);
        }

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            ApiError::internal(e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            if content_type.contains("application/json") {
                let parsed = match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(parsed) => parsed,
                    // A cut-off error body means the session dropped
                    // server-side before the response was written out.
                    Err(e) if e.is_eof() => {
                        tracing::warn!(
                            "Truncated error body from {}, treating session as expired",
                            path
                        );
                        self.hooks.on_session_expired(ExpiryReason::TruncatedBody);
                        return Ok(Outcome::SessionExpired);
                    }
                    Err(_) => ErrorBody::default(),
                };
                return Err(ApiError {
                    status: status.as_u16(),
                    message: parsed.message(),
                    server_time: parsed.server_time,
                });
            }
            return Err(ApiError {
                status: status.as_u16(),
                message: "Unexpected response format".to_string(),
                server_time: None,
            });
        }

        match serde_json::from_str::<T>(&body) {
            Ok(value) => Ok(Outcome::Success(value)),
            // An empty or cut-off body on a success status is what a
            // server-side session drop looks like from here.
            Err(e) if e.is_eof() => {
                tracing::warn!("Truncated body from {}, treating session as expired", path);
                self.hooks.on_session_expired(ExpiryReason::TruncatedBody);
                Ok(Outcome::SessionExpired)
            }
            Err(e) => {
                let snippet = truncate_body(&body);
                tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
                Err(ApiError::internal(e))
            }
        }
    }

    /// Issues a GET request, returning the decoded JSON body.
    pub async fn get(&self, path: &str) -> Result<Outcome<Value>, ApiError> {
        self.call(Method::Get, path, None).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post(&self, path: &str, data: &Value) -> Result<Outcome<Value>, ApiError> {
        self.call(Method::Post, path, Some(data)).await
    }

    /// Issues a PUT request with a JSON body.
    pub async fn put(&self, path: &str, data: &Value) -> Result<Outcome<Value>, ApiError> {
        self.call(Method::Put, path, Some(data)).await
    }

    /// Issues a DELETE request with an optional JSON body.
    pub async fn delete(
        &self,
        path: &str,
        data: Option<&Value>,
    ) -> Result<Outcome<Value>, ApiError> {
        self.call(Method::Delete, path, data).await
    }

    /// Calls a Kiwoom API by id (e.g. `ka10001`) through the backend's
    /// continuous-query envelope.
    ///
    /// Pass [`ContYn::Y`] together with the previous response's `next_key`
    /// to fetch the next page of a continuous query.
    pub async fn call_kiwoom_api(
        &self,
        api_id: &str,
        payload: Value,
        cont_yn: ContYn,
        next_key: Option<String>,
    ) -> Result<Outcome<Value>, ApiError> {
        let envelope = KiwoomRequest {
            api_id: api_id.to_string(),
            cont_yn,
            next_key,
            payload,
        };
        let body = serde_json::to_value(&envelope).map_err(|e| {
            tracing::error!("Failed to serialize Kiwoom envelope: {}", e);
            ApiError::internal(e)
        })?;
        self.post(format!("/api/v1/kiwoom/{}", api_id).as_str(), &body)
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        // Floor the cut to a char boundary so multi-byte text cannot
        // panic the slice.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...[truncated]", &body[..cut])
    }
}
