//! Session state machine
//!
//! A session is either `Anonymous` or `Authenticated`; the bearer token
//! and the user profile live and die together, so the "credential
//! present but profile missing" inconsistency cannot be represented.
//!
//! The authenticated pair is persisted as one JSON record under a
//! single storage key. Compound operations (login, logout, refresh)
//! serialize on an async mutex held across their network awaits, so
//! two concurrent logins cannot interleave their state transitions.
//!
//! Network orchestration lives on [`crate::client::Client`]; this type
//! owns only the local state, its persistence, and the derived
//! queries.

use crate::error::{ClientError, Result};
use crate::profile::{ProfilePatch, UserProfile};
use crate::storage::StateStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::MutexGuard;

/// Storage key of the unified session record.
const SESSION_KEY: &str = "session";

/// The two states a client session can be in.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No credential, no profile
    #[default]
    Anonymous,
    /// Bearer token plus the profile it belongs to
    Authenticated {
        /// Opaque bearer token
        token: String,
        /// The authenticated user's profile
        profile: UserProfile,
    },
}

/// The persisted form of an authenticated session.
///
/// Token and profile are written as one document so that a crash can
/// lose the record but never split it.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    profile: UserProfile,
}

/// Client session store
pub struct Session {
    state: RwLock<SessionState>,
    store: Arc<dyn StateStore>,
    mutation: tokio::sync::Mutex<()>,
}

impl Session {
    /// Create an anonymous session backed by the given state store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            state: RwLock::new(SessionState::Anonymous),
            store,
            mutation: tokio::sync::Mutex::new(()),
        }
    }

    /// Restore a persisted session, if one exists.
    ///
    /// Called once at startup. A corrupt record is discarded rather
    /// than propagated: the user simply has to sign in again.
    ///
    /// # Returns
    ///
    /// `true` when a session was restored.
    pub fn restore(&self) -> Result<bool> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(false);
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(record) => {
                tracing::info!(user = %record.profile.username, "restored persisted session");
                *self.write_state() = SessionState::Authenticated {
                    token: record.token,
                    profile: record.profile,
                };
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("discarding corrupt session record: {}", e);
                if let Err(e) = self.store.remove(SESSION_KEY) {
                    tracing::warn!("failed to remove corrupt session record: {}", e);
                }
                Ok(false)
            }
        }
    }

    /// Transition to `Authenticated` and persist the unified record.
    ///
    /// Persistence is best-effort: a failed write is logged and the
    /// in-memory transition stands.
    pub(crate) fn establish(&self, token: String, profile: UserProfile) {
        self.persist(&token, &profile);
        *self.write_state() = SessionState::Authenticated { token, profile };
        tracing::info!("session established");
    }

    /// Replace the profile of an authenticated session.
    ///
    /// No-op when anonymous.
    pub(crate) fn replace_profile(&self, profile: UserProfile) {
        let mut state = self.write_state();
        if let SessionState::Authenticated { token, .. } = &*state {
            let token = token.clone();
            self.persist(&token, &profile);
            *state = SessionState::Authenticated { token, profile };
        }
    }

    /// Clear the session and its persisted record. Idempotent.
    pub(crate) fn invalidate(&self) {
        {
            let mut state = self.write_state();
            if matches!(&*state, SessionState::Authenticated { .. }) {
                tracing::info!("session cleared");
            }
            *state = SessionState::Anonymous;
        }
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::warn!("failed to remove persisted session: {}", e);
        }
    }

    /// Merge a settings patch into the profile, in memory and in the
    /// persisted record. No network call; no-op when anonymous.
    pub fn patch_profile(&self, patch: &ProfilePatch) {
        let patched = {
            let mut state = self.write_state();
            match &mut *state {
                SessionState::Authenticated { token, profile } => {
                    patch.apply_to(profile);
                    Some((token.clone(), profile.clone()))
                }
                SessionState::Anonymous => None,
            }
        };

        match patched {
            Some((token, profile)) => self.persist(&token, &profile),
            None => tracing::debug!("ignoring profile patch on anonymous session"),
        }
    }

    /// Serialize session mutations.
    ///
    /// Compound operations hold this guard across their awaits so a
    /// second login/logout/refresh observes the completed transition
    /// instead of racing it.
    pub(crate) async fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().await
    }

    // -- derived queries ---------------------------------------------------
    //
    // All of these recompute from the current state on every call;
    // nothing here is cached.

    /// Whether the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.read_state(), SessionState::Authenticated { .. })
    }

    /// Whether the authenticated user carries the administrator role.
    pub fn is_admin(&self) -> bool {
        match &*self.read_state() {
            SessionState::Authenticated { profile, .. } => profile.is_admin(),
            SessionState::Anonymous => false,
        }
    }

    /// The authenticated user's id.
    pub fn user_id(&self) -> Option<i64> {
        match &*self.read_state() {
            SessionState::Authenticated { profile, .. } => Some(profile.user_id),
            SessionState::Anonymous => None,
        }
    }

    /// The name shown in the interface: nickname, falling back to the
    /// username.
    pub fn display_name(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::Authenticated { profile, .. } => {
                Some(profile.display_name().to_string())
            }
            SessionState::Anonymous => None,
        }
    }

    /// The authenticated user's avatar URL.
    pub fn avatar_url(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::Authenticated { profile, .. } => profile.avatar.clone(),
            SessionState::Anonymous => None,
        }
    }

    /// The current bearer token.
    pub fn token(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::Authenticated { token, .. } => Some(token.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// A copy of the current profile for the presentation layer.
    pub fn profile(&self) -> Option<UserProfile> {
        match &*self.read_state() {
            SessionState::Authenticated { profile, .. } => Some(profile.clone()),
            SessionState::Anonymous => None,
        }
    }

    // -- internals ---------------------------------------------------------

    fn persist(&self, token: &str, profile: &UserProfile) {
        let record = PersistedSession {
            token: token.to_string(),
            profile: profile.clone(),
        };
        let result = serde_json::to_string(&record)
            .map_err(|e| ClientError::Serialization(e).into())
            .and_then(|json| self.store.set(SESSION_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("failed to persist session: {}", e);
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        // A poisoned lock means a reader or writer panicked mid-access;
        // the state itself is still a valid SessionState value.
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
