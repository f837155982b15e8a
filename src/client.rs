//! The client: transport + interceptor + stores wired together
//!
//! [`Client`] owns the request pipeline. Every typed endpoint wrapper
//! in [`crate::api`] funnels through [`Client::send`], which attaches
//! the session credential, dispatches the response envelope, and on
//! failure surfaces exactly one user-visible notice before propagating
//! the rejection. A session-invalidation failure additionally clears
//! the session and forces navigation to the login route matching the
//! current path.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::interceptor;
use crate::navigator::{NavigationTarget, Navigator};
use crate::notices::{Notice, NoticeSink, TracingNotices};
use crate::notifications::{DailySummarySource, NotificationStore, StaticSummarySource};
use crate::routes::RouteGuard;
use crate::session::Session;
use crate::storage::StateStore;
use crate::transport::HttpTransport;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Community platform client
///
/// Construct one per application (or per user session in a
/// server-rendered host) and share it behind an `Arc`. All state the
/// client carries is interior-mutable; no method takes `&mut self`.
pub struct Client {
    config: ClientConfig,
    transport: HttpTransport,
    session: Arc<Session>,
    notifications: Arc<NotificationStore>,
    navigator: Arc<dyn Navigator>,
    notices: Arc<dyn NoticeSink>,
    summary_source: Arc<dyn DailySummarySource>,
}

impl Client {
    /// Build a client from configuration, a state store, and the host's
    /// navigation system.
    ///
    /// Notices default to [`TracingNotices`] and the daily digest to
    /// [`StaticSummarySource`]; both can be replaced with the
    /// `with_*` builders.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn StateStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        let session = Arc::new(Session::new(store.clone()));
        let notifications = Arc::new(NotificationStore::new(store));

        Ok(Self {
            config,
            transport,
            session,
            notifications,
            navigator,
            notices: Arc::new(TracingNotices),
            summary_source: Arc::new(StaticSummarySource),
        })
    }

    /// Replace the notice sink.
    pub fn with_notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Replace the daily digest source.
    pub fn with_summary_source(mut self, source: Arc<dyn DailySummarySource>) -> Self {
        self.summary_source = source;
        self
    }

    /// The session store.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The notification store.
    pub fn notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }

    /// A route guard over this client's session and navigator.
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone(), self.navigator.clone())
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn summary_source(&self) -> &Arc<dyn DailySummarySource> {
        &self.summary_source
    }

    // -- request pipeline --------------------------------------------------

    /// Send one request through the authenticated pipeline.
    ///
    /// # Errors
    ///
    /// Any classified failure is surfaced once as a notice and then
    /// propagated. [`ClientError::Auth`] has already cleared the
    /// session and triggered the login redirect by the time the caller
    /// sees it.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let bearer = self.session.token();
        match self
            .transport
            .send(method, path, query, bearer.as_deref(), body)
            .await
        {
            Ok(envelope) => match interceptor::dispatch(envelope) {
                Ok(data) => Ok(data),
                Err(error) => Err(self.report(error)),
            },
            Err(raw) => Err(self.report(interceptor::classify(raw))),
        }
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.send(Method::GET, path, query, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.send(Method::POST, path, &[], body).await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Deserialize envelope data into a typed value.
    pub(crate) fn parse<T: DeserializeOwned>(data: Value) -> Result<T> {
        serde_json::from_value(data).map_err(|e| ClientError::Serialization(e).into())
    }

    /// Surface one notice for a classified failure and run the
    /// session-invalidation side effects when applicable.
    fn report(&self, error: ClientError) -> anyhow::Error {
        self.notices.notice(Notice::from_error(&error));

        if error.is_session_invalid() {
            tracing::warn!("session invalidated by backend, clearing local state");
            self.session.invalidate();

            let current = self.navigator.current_path();
            let route = interceptor::login_route_for(&current, &self.config.admin_prefix);
            self.navigator.navigate(NavigationTarget::named(route));
        }

        error.into()
    }
}
