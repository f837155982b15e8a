//! Response-phase and failure-phase classification
//!
//! The pure half of the auth interceptor. Given a response envelope or
//! a transport failure, these functions decide which [`ClientError`]
//! the caller sees; the impure half (notice surfacing, session
//! clearing, redirect) lives in [`crate::client::Client::send`].

use crate::error::ClientError;
use crate::routes;
use crate::transport::{Envelope, CODE_SUCCESS, CODE_UNAUTHENTICATED};
use reqwest::StatusCode;
use serde_json::Value;

/// Dispatch a response envelope.
///
/// Success passes `data` through unchanged. Code 401 maps to
/// [`ClientError::Auth`], which the pipeline treats as session
/// invalidation; every other non-success code becomes a
/// [`ClientError::Business`] carrying the envelope message.
pub fn dispatch(envelope: Envelope) -> std::result::Result<Value, ClientError> {
    match envelope.code {
        CODE_SUCCESS => Ok(envelope.data),
        CODE_UNAUTHENTICATED => Err(ClientError::Auth(or_default(
            envelope.message,
            "session invalid, please sign in again",
        ))),
        code => Err(ClientError::Business {
            code,
            message: or_default(envelope.message, "request failed"),
        }),
    }
}

/// Classify a transport failure (no envelope was received).
pub fn classify(error: reqwest::Error) -> ClientError {
    if let Some(status) = error.status() {
        return classify_status(status);
    }
    if error.is_timeout() {
        return ClientError::Timeout(error.to_string());
    }
    ClientError::Network(error.to_string())
}

/// Classify a non-2xx HTTP status.
pub fn classify_status(status: StatusCode) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => {
            ClientError::Auth("login expired, please sign in again".to_string())
        }
        StatusCode::FORBIDDEN => {
            ClientError::Permission("you do not have access to this resource".to_string())
        }
        StatusCode::NOT_FOUND => {
            ClientError::NotFound("the requested resource does not exist".to_string())
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            ClientError::Server("the server encountered an internal error".to_string())
        }
        other => ClientError::Network(format!("unexpected HTTP status {}", other)),
    }
}

/// The login route matching the current navigation path.
///
/// Paths under the administrative prefix redirect to the admin login
/// entry point; everything else goes to the standard login route.
pub fn login_route_for(current_path: &str, admin_prefix: &str) -> &'static str {
    if current_path.starts_with(admin_prefix) {
        routes::ADMIN_LOGIN
    } else {
        routes::LOGIN
    }
}

fn or_default(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
