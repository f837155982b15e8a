//! User identity and profile types
//!
//! These structs mirror the backend wire contract (camelCase JSON).
//! The profile is owned exclusively by the session: it is replaced
//! wholesale on login and refresh, and patched locally through
//! [`ProfilePatch`] after a settings screen has already saved
//! server-side.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role string the backend assigns to administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

/// The authenticated user's profile as returned by the backend.
///
/// Fields beyond the identity core are optional: the login response
/// carries only the basics, while `GET /user/profile` returns the full
/// record including settings flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    // Identity
    pub user_id: i64,
    pub username: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<NaiveDateTime>,

    // Extended profile
    pub student_id: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub college: Option<String>,
    pub birthday: Option<String>,
    pub qq_number: Option<String>,
    pub wechat_id: Option<String>,

    // Linked account and verification status (read-only)
    pub wechat_linked: Option<bool>,
    pub qq_linked: Option<bool>,
    pub github_linked: Option<bool>,
    pub email_verified: Option<bool>,
    pub password_updated_at: Option<NaiveDateTime>,
    pub two_factor_enabled: Option<bool>,
    pub sms_verify_enabled: Option<bool>,

    // Notification settings
    pub notify_post_reply: Option<bool>,
    pub notify_comment_reply: Option<bool>,
    pub notify_mention: Option<bool>,
    pub notify_club_activity: Option<bool>,
    pub notify_system: Option<bool>,

    // Email settings
    pub email_system_notify: Option<bool>,
    pub email_activity_remind: Option<bool>,
    pub email_weekly_digest: Option<bool>,

    // Privacy settings
    pub public_profile: Option<bool>,
    pub show_online: Option<bool>,
    pub allow_message: Option<bool>,

    // Interface settings
    pub dark_mode: Option<bool>,
    pub compact_mode: Option<bool>,
}

impl UserProfile {
    /// The name shown in the interface: nickname, falling back to the
    /// username when no nickname is set.
    pub fn display_name(&self) -> &str {
        match &self.nickname {
            Some(nickname) if !nickname.is_empty() => nickname,
            _ => &self.username,
        }
    }

    /// Whether this profile carries the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Partial profile update, merged into the session profile locally
/// after the corresponding `PUT /user/profile` succeeded.
///
/// Only set fields are serialized into the request body and only set
/// fields are merged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qq_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_post_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_comment_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_mention: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_club_activity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_system: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_system_notify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_activity_remind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_weekly_digest: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_profile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_message: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_mode: Option<bool>,
}

macro_rules! merge_field {
    ($patch:expr, $profile:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $profile.$field = Some(value.clone());
            }
        )+
    };
}

impl ProfilePatch {
    /// Merge every set field of this patch into `profile`.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        merge_field!(
            self, profile, nickname, avatar, phone, student_id, gender, bio, major, grade,
            college, birthday, qq_number, wechat_id, notify_post_reply, notify_comment_reply,
            notify_mention, notify_club_activity, notify_system, email_system_notify,
            email_activity_remind, email_weekly_digest, public_profile, show_online,
            allow_message, dark_mode, compact_mode,
        );
    }

    /// Whether no field of the patch is set.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().map(|o| o.is_empty()).unwrap_or(true))
            .unwrap_or(true)
    }
}

/// Credentials submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload submitted to `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Login and registration response: a bearer token next to the basic
/// profile fields, flattened in the same JSON object.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}
