//! Community client - typed client library for the campus community platform
//!
//! This library implements the platform's client core: an authenticated
//! request pipeline, the session state machine, the in-app notification
//! store, route guarding, and the typed API surface for auth, profiles,
//! posts, comments, clubs, and chat.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: the request pipeline wiring transport, interceptor, and stores
//! - `transport`: configured HTTP client and the response envelope
//! - `interceptor`: envelope dispatch and transport-failure classification
//! - `session`: session state machine with unified persistence
//! - `notifications`: notification list and the daily-summary gate
//! - `routes`: route guard over the session's authentication flag
//! - `api`: typed endpoint wrappers per backend area
//! - `storage`, `navigator`, `notices`: the host application seams
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use community_client::{
//!     Client, ClientConfig, LoginRequest, MemoryStore, NavigationTarget, Navigator,
//! };
//!
//! struct NoNavigation;
//!
//! impl Navigator for NoNavigation {
//!     fn navigate(&self, _target: NavigationTarget) {}
//!     fn current_path(&self) -> String {
//!         "/".to_string()
//!     }
//!     fn set_title(&self, _title: &str) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::new(
//!         ClientConfig::default(),
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(NoNavigation),
//!     )?;
//!
//!     let profile = client
//!         .login(&LoginRequest {
//!             username: "lihua".to_string(),
//!             password: "secret".to_string(),
//!         })
//!         .await?;
//!     println!("signed in as {}", profile.display_name());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod navigator;
pub mod notices;
pub mod notifications;
pub mod profile;
pub mod routes;
pub mod session;
pub mod storage;
pub mod transport;

// Re-export commonly used types
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use navigator::{NavigationTarget, Navigator};
pub use notices::{Notice, NoticeLevel, NoticeSink};
pub use notifications::{
    DailySummary, DailySummarySource, Notification, NotificationId, NotificationKind,
    NotificationStore,
};
pub use profile::{AuthPayload, LoginRequest, ProfilePatch, RegisterRequest, UserProfile};
pub use routes::{GuardDecision, RouteGuard, RouteTarget};
pub use session::{Session, SessionState};
pub use storage::{MemoryStore, SledStore, StateStore};
pub use transport::Envelope;

#[cfg(test)]
pub mod test_utils;
