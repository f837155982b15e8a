//! Authentication endpoints and session orchestration
//!
//! Login is the compound operation of the crate: one network call, one
//! atomic session transition, one persisted record, and the once-per-
//! day digest check. Logout mirrors it: a best-effort server call whose
//! failure never blocks the unconditional local cleanup.

use crate::client::Client;
use crate::error::Result;
use crate::profile::{AuthPayload, LoginRequest, RegisterRequest, UserProfile};

impl Client {
    /// Sign in with username and password.
    ///
    /// On success the session transitions to authenticated, the unified
    /// token/profile record is persisted, and the daily digest is
    /// pushed if it has not been shown today. On failure the session is
    /// left untouched and the error propagates to the caller; there is
    /// no retry.
    ///
    /// # Errors
    ///
    /// Any classified pipeline failure, or a serialization error when
    /// the response payload does not match the wire contract.
    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile> {
        let _mutations = self.session().lock_mutations().await;

        let body = serde_json::to_value(request)?;
        let data = self.post("/auth/login", Some(&body)).await?;
        let payload: AuthPayload = Client::parse(data)?;

        tracing::info!(user = %payload.profile.username, "login succeeded");
        self.session()
            .establish(payload.token.clone(), payload.profile.clone());

        self.push_daily_summary(&payload.profile).await;

        Ok(payload.profile)
    }

    /// Create a new account.
    ///
    /// Returns the token and profile the backend issues for the fresh
    /// account. The session is not established; callers that want an
    /// auto sign-in follow up with [`Client::login`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload> {
        let body = serde_json::to_value(request)?;
        let data = self.post("/auth/register", Some(&body)).await?;
        Client::parse(data)
    }

    /// Sign out.
    ///
    /// Attempts a best-effort server-side logout when a credential
    /// exists; its failure is swallowed. Local state and the persisted
    /// record are cleared unconditionally. Idempotent.
    pub async fn logout(&self) {
        let _mutations = self.session().lock_mutations().await;
        self.logout_locked().await;
    }

    /// Logout body, called with the session mutation lock already held.
    pub(crate) async fn logout_locked(&self) {
        if self.session().is_authenticated() {
            if let Err(e) = self.post("/user/logout", None).await {
                tracing::debug!("server-side logout failed, proceeding with local cleanup: {}", e);
            }
        }
        self.session().invalidate();
    }

    /// Push the daily digest if today's gate is still open.
    async fn push_daily_summary(&self, profile: &UserProfile) {
        if !self.notifications().should_show_today() {
            return;
        }

        match self.summary_source().daily_summary(profile).await {
            Ok(summary) => {
                self.notifications().add_daily_summary(summary);
                if let Err(e) = self.notifications().mark_shown_today() {
                    tracing::warn!("failed to advance daily-summary gate: {}", e);
                }
            }
            Err(e) => tracing::warn!("daily digest source failed: {}", e),
        }
    }
}
