//! The API client core: single point of outbound communication with the
//! backend.

use std::sync::Arc;

use binwatch_core::config::ClientConfig;
use binwatch_core::error::{BinwatchError, Result};
use binwatch_core::session::{SessionKey, SessionStore};
use serde_json::Value;
use tracing::{debug, error};

use crate::request::{ApiResponse, RequestBody, RequestOptions};

/// Builds the outbound header set by merging, in order: the default JSON
/// content type, the `Authorization` header when a token is stored, then
/// caller overrides (caller wins on conflict, matched case-insensitively).
///
/// A multipart body suppresses the default content type so the transport
/// layer can set the boundary itself.
fn build_headers(
    body: &RequestBody,
    token: Option<&str>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();

    if !body.is_multipart() {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
    }
    if let Some(token) = token {
        headers.push(("Authorization".to_string(), format!("Token {}", token)));
    }
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }

    headers
}

/// Stateful wrapper around outbound HTTP requests to the backend.
///
/// The client attaches authentication credentials, normalizes
/// request/response encoding, and owns the session credential lifecycle
/// through an injected [`SessionStore`]. It performs no retries and sets no
/// request timeout; every failure surfaces to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Creates a client with the given configuration and session store.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            store,
        }
    }

    /// The session store this client reads credentials from.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn auth_token(&self) -> Result<Option<String>> {
        self.store.get(SessionKey::AuthToken)
    }

    /// Sends a request to `path` (relative to the base URL).
    ///
    /// On a non-success status this fails with [`BinwatchError::Http`]
    /// carrying the status code and the response body text. On success the
    /// response is decoded according to its declared content type: JSON is
    /// parsed, anything else is returned as raw text.
    ///
    /// # Errors
    ///
    /// Transport failures (connection, body read, JSON decode) map to
    /// [`BinwatchError::Transport`]; they are never retried.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = options.method.as_str(), %url, "sending request");

        let token = self.auth_token()?;
        let headers = build_headers(&options.body, token.as_deref(), &options.headers);

        let mut builder = self.http.request(options.method.into(), &url);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(form) => builder.multipart(form.into_form()?),
        };

        let response = builder.send().await.map_err(|err| {
            error!(%url, %err, "request failed");
            BinwatchError::transport(format!("request to {} failed: {}", url, err))
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = status.as_u16(), %body, "backend returned an error");
            return Err(BinwatchError::http(status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.contains("application/json") {
            let value: Value = response.json().await?;
            Ok(ApiResponse::Json(value))
        } else {
            let text = response.text().await?;
            Ok(ApiResponse::Text(text))
        }
    }

    /// Sends a GET request and returns the raw response bytes.
    ///
    /// Shares header assembly with [`request`](Self::request) (so the stored
    /// token is attached) but bypasses content-type dispatch entirely; used
    /// for binary downloads such as the CSV export.
    pub async fn request_bytes(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "downloading");

        let token = self.auth_token()?;
        let headers = build_headers(&RequestBody::Empty, token.as_deref(), &[]);

        let mut builder = self.http.get(&url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|err| {
            error!(%url, %err, "download failed");
            BinwatchError::transport(format!("request to {} failed: {}", url, err))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(BinwatchError::http(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
