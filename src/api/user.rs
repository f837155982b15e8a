//! Profile endpoints and settings updates
//!
//! Settings screens save server-side first and then patch the session
//! profile locally, so the interface reflects the change without a
//! second round-trip.

use crate::client::Client;
use crate::error::Result;
use crate::profile::{ProfilePatch, UserProfile};

/// Notification preference toggles.
#[derive(Debug, Clone, Copy)]
pub struct NotificationSettings {
    pub post_reply: bool,
    pub comment_reply: bool,
    pub mention: bool,
    pub club_activity: bool,
    pub system: bool,
}

/// Email preference toggles.
#[derive(Debug, Clone, Copy)]
pub struct EmailSettings {
    pub system_notify: bool,
    pub activity_remind: bool,
    pub weekly_digest: bool,
}

/// Privacy preference toggles.
#[derive(Debug, Clone, Copy)]
pub struct PrivacySettings {
    pub public_profile: bool,
    pub show_online: bool,
    pub allow_message: bool,
}

/// Interface preference toggles.
#[derive(Debug, Clone, Copy)]
pub struct UiSettings {
    pub dark_mode: bool,
    pub compact_mode: bool,
}

impl Client {
    /// Fetch the authenticated user's full profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        let data = self.get("/user/profile", &[]).await?;
        Client::parse(data)
    }

    /// Re-fetch the profile and update the session with it.
    ///
    /// Returns `None` without a network call when the session is
    /// anonymous. Any fetch failure is treated as session invalidation:
    /// the client performs a full logout and returns `None` — it never
    /// distinguishes a dead server from a revoked token.
    pub async fn refresh(&self) -> Option<UserProfile> {
        let _mutations = self.session().lock_mutations().await;

        if !self.session().is_authenticated() {
            return None;
        }

        let data = self.get("/user/profile", &[]).await;
        match data.and_then(Client::parse::<UserProfile>) {
            Ok(profile) => {
                self.session().replace_profile(profile.clone());
                Some(profile)
            }
            Err(e) => {
                tracing::warn!("profile refresh failed, clearing session: {}", e);
                self.logout_locked().await;
                None
            }
        }
    }

    /// Fetch another user's public profile.
    pub async fn public_profile(&self, user_id: i64) -> Result<UserProfile> {
        let data = self.get(&format!("/user/{}", user_id), &[]).await?;
        Client::parse(data)
    }

    /// Save a profile patch server-side, then merge it into the session
    /// profile and the persisted record.
    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<()> {
        self.put("/user/profile", &serde_json::to_value(patch)?).await?;
        self.session().patch_profile(patch);
        Ok(())
    }

    /// Save notification preferences.
    pub async fn update_notification_settings(&self, settings: &NotificationSettings) -> Result<()> {
        self.update_profile(&ProfilePatch {
            notify_post_reply: Some(settings.post_reply),
            notify_comment_reply: Some(settings.comment_reply),
            notify_mention: Some(settings.mention),
            notify_club_activity: Some(settings.club_activity),
            notify_system: Some(settings.system),
            ..Default::default()
        })
        .await
    }

    /// Save email preferences.
    pub async fn update_email_settings(&self, settings: &EmailSettings) -> Result<()> {
        self.update_profile(&ProfilePatch {
            email_system_notify: Some(settings.system_notify),
            email_activity_remind: Some(settings.activity_remind),
            email_weekly_digest: Some(settings.weekly_digest),
            ..Default::default()
        })
        .await
    }

    /// Save privacy preferences.
    pub async fn update_privacy_settings(&self, settings: &PrivacySettings) -> Result<()> {
        self.update_profile(&ProfilePatch {
            public_profile: Some(settings.public_profile),
            show_online: Some(settings.show_online),
            allow_message: Some(settings.allow_message),
            ..Default::default()
        })
        .await
    }

    /// Save interface preferences.
    pub async fn update_ui_settings(&self, settings: &UiSettings) -> Result<()> {
        self.update_profile(&ProfilePatch {
            dark_mode: Some(settings.dark_mode),
            compact_mode: Some(settings.compact_mode),
            ..Default::default()
        })
        .await
    }
}
