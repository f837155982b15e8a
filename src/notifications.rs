//! In-app notification store
//!
//! Holds the ordered list of notifications (newest first), the derived
//! unread count, and the once-per-day gate for the synthetic daily
//! summary pushed on first login of a calendar day.
//!
//! The unread count is recomputed from the list on every call; there is
//! no cached counter to drift out of sync.

use crate::error::Result;
use crate::profile::UserProfile;
use crate::storage::StateStore;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use ulid::Ulid;

/// Storage key of the daily-summary gate date stamp.
const GATE_KEY: &str = "last_ai_summary_date";

/// Unique, sortable notification identifier.
pub type NotificationId = Ulid;

/// What produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Platform announcement or account event
    System,
    /// The synthetic daily activity digest
    AiSummary,
    /// Anything else
    Other,
}

/// One in-app notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id, assigned at construction
    pub id: NotificationId,
    /// Kind of notification
    pub kind: NotificationKind,
    /// Short heading
    pub title: String,
    /// Message body
    pub body: String,
    /// Whether the user has read this notification
    pub read: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Optional structured payload for the presentation layer
    pub payload: Option<Value>,
}

impl Notification {
    /// Build an unread notification with a fresh id and timestamp.
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Ulid::new(),
            kind,
            title: title.into(),
            body: body.into(),
            read: false,
            created_at: Utc::now(),
            payload: None,
        }
    }

    /// Attach a structured payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// The daily activity digest shown once per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Digest text
    pub content: String,
}

/// Source of the daily digest content.
///
/// The digest backend does not exist yet; [`StaticSummarySource`] is
/// the placeholder implementation the login flow uses until a real
/// generator replaces it. The once-per-day gate is independent of the
/// source.
#[async_trait]
pub trait DailySummarySource: Send + Sync {
    /// Produce today's digest for the given user.
    async fn daily_summary(&self, profile: &UserProfile) -> Result<DailySummary>;
}

/// Placeholder digest source with simulated content.
#[derive(Debug, Default)]
pub struct StaticSummarySource;

#[async_trait]
impl DailySummarySource for StaticSummarySource {
    async fn daily_summary(&self, _profile: &UserProfile) -> Result<DailySummary> {
        Ok(DailySummary {
            content: "Today in your clubs:\n\n\
                      1. The basketball club posted a new training plan; meet at the gym Saturday 3pm\n\n\
                      2. The photography club is recruiting new members\n\n\
                      3. The reading group published this week's pick, \"Sapiens\"\n\n\
                      Have a great day!"
                .to_string(),
        })
    }
}

/// Ordered notification list with a persisted daily-summary gate
pub struct NotificationStore {
    items: RwLock<VecDeque<Notification>>,
    store: Arc<dyn StateStore>,
}

impl NotificationStore {
    /// Create an empty store backed by the given state store (used only
    /// for the gate date stamp).
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            items: RwLock::new(VecDeque::new()),
            store,
        }
    }

    /// Insert a notification at the head of the list.
    ///
    /// The read flag is forced to `false`: a notification enters the
    /// list unread regardless of how it was constructed.
    ///
    /// # Returns
    ///
    /// The id of the inserted notification.
    pub fn add(&self, mut notification: Notification) -> NotificationId {
        notification.read = false;
        let id = notification.id;
        tracing::debug!(%id, kind = ?notification.kind, "notification added");
        self.write_items().push_front(notification);
        id
    }

    /// Insert today's daily digest.
    pub fn add_daily_summary(&self, summary: DailySummary) -> NotificationId {
        let body = summary.content.clone();
        let payload = serde_json::to_value(&summary).unwrap_or(Value::Null);
        self.add(
            Notification::new(NotificationKind::AiSummary, "Today's club digest", body)
                .with_payload(payload),
        )
    }

    /// Insert a system notification.
    pub fn add_system(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> NotificationId {
        self.add(Notification::new(NotificationKind::System, title, body))
    }

    /// Mark the matching notification as read.
    ///
    /// # Returns
    ///
    /// `true` when a notification with the given id was found.
    pub fn mark_read(&self, id: NotificationId) -> bool {
        let mut items = self.write_items();
        match items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification as read. Idempotent.
    pub fn mark_all_read(&self) {
        for notification in self.write_items().iter_mut() {
            notification.read = true;
        }
    }

    /// Remove the first notification with the given id.
    ///
    /// # Returns
    ///
    /// `true` when a notification was removed.
    pub fn remove(&self, id: NotificationId) -> bool {
        let mut items = self.write_items();
        match items.iter().position(|n| n.id == id) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove all notifications.
    pub fn clear(&self) {
        self.write_items().clear();
    }

    /// Number of unread notifications, recomputed from the list.
    pub fn unread_count(&self) -> usize {
        self.read_items().iter().filter(|n| !n.read).count()
    }

    /// Number of notifications in the list.
    pub fn len(&self) -> usize {
        self.read_items().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    /// An ordered copy of the list (newest first) for the presentation
    /// layer.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.read_items().iter().cloned().collect()
    }

    // -- daily-summary gate ------------------------------------------------

    /// Whether the daily digest has not yet been shown today.
    ///
    /// Compares the persisted date stamp against the current local
    /// calendar date. A storage failure counts as "not shown": showing
    /// the digest twice is preferable to silently never showing it.
    pub fn should_show_today(&self) -> bool {
        match self.store.get(GATE_KEY) {
            Ok(Some(stamp)) => stamp != today_stamp(),
            Ok(None) => true,
            Err(e) => {
                tracing::warn!("failed to read daily-summary gate: {}", e);
                true
            }
        }
    }

    /// Advance the gate date stamp to today.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the stamp cannot be written.
    pub fn mark_shown_today(&self) -> Result<()> {
        self.store.set(GATE_KEY, &today_stamp())
    }

    // -- internals ---------------------------------------------------------

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<Notification>> {
        self.items.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_items(&self) -> std::sync::RwLockWriteGuard<'_, VecDeque<Notification>> {
        self.items.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// The local calendar date as a gate stamp, e.g. `2026-08-07`.
fn today_stamp() -> String {
    Local::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> NotificationStore {
        NotificationStore::new(Arc::new(MemoryStore::new()))
    }

    fn system(store: &NotificationStore, title: &str) -> NotificationId {
        store.add_system(title, "body")
    }

    #[test]
    fn test_add_inserts_at_head() {
        let store = store();
        let first = system(&store, "first");
        let second = system(&store, "second");

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, second);
        assert_eq!(snapshot[1].id, first);
    }

    #[test]
    fn test_add_forces_unread() {
        let store = store();
        let mut notification = Notification::new(NotificationKind::Other, "t", "b");
        notification.read = true;

        let id = store.add(notification);
        assert_eq!(store.unread_count(), 1);
        assert!(store.mark_read(id));
    }

    #[test]
    fn test_mark_read_on_missing_id_leaves_list_unchanged() {
        let store = store();
        let a = system(&store, "a");
        let b = system(&store, "b");

        let before: Vec<_> = store.snapshot().iter().map(|n| n.id).collect();
        assert!(!store.mark_read(Ulid::new()));
        let after: Vec<_> = store.snapshot().iter().map(|n| n.id).collect();

        assert_eq!(before, after);
        assert_eq!(after, vec![b, a]);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn test_unread_count_tracks_mutations() {
        let store = store();
        let a = system(&store, "a");
        let b = system(&store, "b");
        let c = system(&store, "c");
        assert_eq!(store.unread_count(), 3);

        assert!(store.mark_read(b));
        assert_eq!(store.unread_count(), 2);

        // Marking the same notification again changes nothing.
        assert!(store.mark_read(b));
        assert_eq!(store.unread_count(), 2);

        assert!(store.remove(a));
        assert_eq!(store.unread_count(), 1);

        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.len(), 2);

        // mark_all_read is idempotent.
        store.mark_all_read();
        assert_eq!(store.unread_count(), 0);

        assert!(store.remove(c));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_remove_missing_id_returns_false() {
        let store = store();
        system(&store, "a");
        assert!(!store.remove(Ulid::new()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_daily_summary_notification_shape() {
        let store = store();
        let summary = DailySummary {
            content: "digest text".to_string(),
        };
        let id = store.add_daily_summary(summary);

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].id, id);
        assert_eq!(snapshot[0].kind, NotificationKind::AiSummary);
        assert_eq!(snapshot[0].body, "digest text");
        assert_eq!(snapshot[0].payload.as_ref().unwrap()["content"], "digest text");
    }

    #[test]
    fn test_gate_opens_once_per_day() {
        let store = store();
        assert!(store.should_show_today());

        store.mark_shown_today().expect("mark");
        assert!(!store.should_show_today());

        // Still closed on a repeated check the same day.
        assert!(!store.should_show_today());
    }

    #[test]
    fn test_gate_reopens_on_a_new_day() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(GATE_KEY, "2000-01-01").expect("set");

        let store = NotificationStore::new(backing);
        assert!(store.should_show_today());
    }

    #[tokio::test]
    async fn test_static_summary_source_produces_content() {
        let source = StaticSummarySource;
        let summary = source
            .daily_summary(&UserProfile::default())
            .await
            .expect("summary");
        assert!(!summary.content.is_empty());
    }

    #[test]
    fn test_notification_serde_roundtrip() {
        let notification = Notification::new(NotificationKind::System, "维护公告", "今晚十点维护")
            .with_payload(serde_json::json!({"scope": "all"}));

        let json = serde_json::to_string(&notification).expect("serialize");
        assert!(json.contains("\"system\""));

        let restored: Notification = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.id, notification.id);
        assert_eq!(restored.kind, NotificationKind::System);
        assert_eq!(restored.title, "维护公告");
    }
}
