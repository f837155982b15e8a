//! HTTP transport for the request pipeline
//!
//! [`HttpTransport`] wraps a configured `reqwest::Client`: base URL,
//! fixed per-request timeout, JSON content type, user agent. It sends
//! one request and returns either the parsed response [`Envelope`] or
//! the raw `reqwest::Error` for the pipeline to classify. It performs
//! no business logic and never retries.

use crate::config::ClientConfig;
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The backend's uniform response envelope.
///
/// Every endpoint answers `{code, message, data}`; code 200 means
/// success, 401 means the session is invalid, anything else is a
/// business error. The envelope is a fixed wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Business status code
    pub code: i64,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Endpoint-specific payload; `null` for void operations
    #[serde(default)]
    pub data: Value,
}

/// Envelope code signalling success.
pub const CODE_SUCCESS: i64 = 200;

/// Envelope code signalling an invalid or expired session.
pub const CODE_UNAUTHENTICATED: i64 = 401;

/// Configured HTTP client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// initialized.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(crate::error::ClientError::Http)?;

        tracing::debug!(base_url = %config.trimmed_base_url(), "initialized transport");

        Ok(Self {
            client,
            base_url: config.trimmed_base_url().to_string(),
        })
    }

    /// The absolute URL for an API path.
    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send one request and parse the response envelope.
    ///
    /// When `bearer` is present it is attached as an `Authorization:
    /// Bearer` header (the request phase of the auth interceptor);
    /// otherwise the request goes out unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns the raw `reqwest::Error` on connection failure, timeout,
    /// non-2xx HTTP status, or an unparsable body. Classification into
    /// the client error taxonomy happens in the pipeline, not here.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> std::result::Result<Envelope, reqwest::Error> {
        let url = self.endpoint(path);
        tracing::debug!(%method, %url, authenticated = bearer.is_some(), "sending request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?.error_for_status()?;
        response.json::<Envelope>().await
    }
}
