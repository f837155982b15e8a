//! Transient user-visible notices
//!
//! Every classified request failure is surfaced exactly once as a
//! [`Notice`] at the pipeline boundary. The presentation layer decides
//! how a notice is rendered (toast, banner, status line) by providing
//! a [`NoticeSink`]; the library ships [`TracingNotices`], which logs
//! notices through `tracing`.

use crate::error::ClientError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// Something went wrong but the application keeps working
    Warning,
    /// A request failed
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity of the notice
    pub level: NoticeLevel,
    /// Human-readable message
    pub message: String,
}

impl Notice {
    /// Build an error-level notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Build an info-level notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// The notice shown for a classified request failure.
    pub fn from_error(error: &ClientError) -> Self {
        Self::error(error.to_string())
    }
}

/// Receiver for transient notices.
///
/// Implemented by the presentation layer. Implementations must not
/// block: the pipeline calls `notice` inline on the request path.
pub trait NoticeSink: Send + Sync {
    /// Surface one notice to the user.
    fn notice(&self, notice: Notice);
}

/// Default [`NoticeSink`] that logs notices through `tracing`.
#[derive(Debug, Default)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notice(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(target: "community_client::notice", "{}", notice.message),
            NoticeLevel::Warning => {
                tracing::warn!(target: "community_client::notice", "{}", notice.message)
            }
            NoticeLevel::Error => {
                tracing::error!(target: "community_client::notice", "{}", notice.message)
            }
        }
    }
}
