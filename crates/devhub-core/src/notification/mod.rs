//! Notification queue with read-state tracking.
//!
//! Notifications are kept most-recent-first. The only mutation on an
//! individual entry is the one-way `read` flag; the list as a whole can be
//! cleared. There is no expiry.

pub mod model;

use model::{Notification, NotificationKind};
use std::collections::HashSet;
use tracing::{debug, warn};

/// In-memory notification list owned by a single consumer.
#[derive(Debug, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list, kept in the given order.
    ///
    /// Ids must be unique: a later entry repeating an earlier id is dropped.
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        let mut seen = HashSet::new();
        let notifications = notifications
            .into_iter()
            .filter(|n| {
                let fresh = seen.insert(n.id.clone());
                if !fresh {
                    warn!(id = %n.id, "Duplicate notification id dropped");
                }
                fresh
            })
            .collect();
        Self { notifications }
    }

    /// Add a new unread notification at the head of the list.
    pub fn add(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification::new(message, kind);
        debug!(id = %notification.id, kind = kind.as_str(), "Notification added");
        self.notifications.insert(0, notification);
    }

    /// Mark a notification as read.
    ///
    /// Returns `false` when no notification has this id; that is a no-op,
    /// not an error. Marking an already-read notification changes nothing.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                debug!(id = %id, "Notification marked read");
                true
            }
            None => {
                debug!(id = %id, "mark_read ignored: unknown notification");
                false
            }
        }
    }

    /// Remove every notification.
    pub fn clear(&mut self) {
        debug!(count = self.notifications.len(), "Notifications cleared");
        self.notifications.clear();
    }

    /// Number of unread notifications, counted from the list on each call.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// All notifications, most recent first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(store: &NotificationStore, message: &str) -> String {
        store
            .notifications()
            .iter()
            .find(|n| n.message == message)
            .map(|n| n.id.clone())
            .unwrap()
    }

    #[test]
    fn test_most_recent_first_and_unread_count() {
        let mut store = NotificationStore::new();
        store.add("build failed", NotificationKind::Error);
        store.add("build passed", NotificationKind::Success);

        let messages: Vec<&str> = store
            .notifications()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(messages, vec!["build passed", "build failed"]);
        assert_eq!(store.unread_count(), 2);

        let failed = id_of(&store, "build failed");
        assert!(store.mark_read(&failed));
        assert_eq!(store.unread_count(), 1);
        assert!(store.get(&failed).unwrap().read);
        assert!(!store.notifications()[0].read);
    }

    #[test]
    fn test_unread_count_matches_list_after_many_adds() {
        let mut store = NotificationStore::new();
        let kinds = [
            NotificationKind::Info,
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
        ];
        for i in 0..25 {
            store.add(format!("event {}", i), kinds[i % kinds.len()]);
            if i % 3 == 0 {
                let id = store.notifications()[0].id.clone();
                store.mark_read(&id);
            }
            let expected = store.notifications().iter().filter(|n| !n.read).count();
            assert_eq!(store.unread_count(), expected);
        }
        assert_eq!(store.len(), 25);
        assert_eq!(store.unread_count(), 25 - 9);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = NotificationStore::new();
        for _ in 0..100 {
            store.add("same message", NotificationKind::Info);
        }
        let ids: HashSet<&str> = store.notifications().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut store = NotificationStore::new();
        store.add("a", NotificationKind::Info);
        store.add("b", NotificationKind::Warning);
        let id = id_of(&store, "a");

        store.mark_read(&id);
        let once = store.notifications().to_vec();
        assert!(store.mark_read(&id));
        assert_eq!(store.notifications(), once.as_slice());
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_mark_read_unknown_id_is_noop() {
        let mut store = NotificationStore::new();
        store.add("a", NotificationKind::Info);
        let before = store.notifications().to_vec();

        assert!(!store.mark_read("does-not-exist"));
        assert_eq!(store.notifications(), before.as_slice());
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_with_notifications_keeps_order_and_read_state() {
        let mut seen = Notification::new("older", NotificationKind::Info);
        seen.read = true;
        let fresh = Notification::new("newer", NotificationKind::Success);
        let mut store = NotificationStore::with_notifications(vec![fresh, seen]);
        assert_eq!(store.unread_count(), 1);

        store.add("newest", NotificationKind::Info);
        let messages: Vec<&str> = store
            .notifications()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(messages, vec!["newest", "newer", "older"]);
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn test_with_notifications_drops_repeated_ids() {
        let first = Notification::new("first", NotificationKind::Info);
        let mut repeat = Notification::new("repeat", NotificationKind::Error);
        repeat.id = first.id.clone();
        let other = Notification::new("other", NotificationKind::Info);

        let store = NotificationStore::with_notifications(vec![first.clone(), repeat, other]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&first.id).unwrap().message, "first");
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut store = NotificationStore::new();
        store.add("a", NotificationKind::Info);
        store.add("b", NotificationKind::Info);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_notification_defaults() {
        let n = Notification::new("hello", NotificationKind::Warning);
        assert!(!n.read);
        assert_eq!(n.kind, NotificationKind::Warning);
        assert!(!n.id.is_empty());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(NotificationKind::from_str("ERROR"), Some(NotificationKind::Error));
        assert_eq!(NotificationKind::from_str("warn"), Some(NotificationKind::Warning));
        assert_eq!(NotificationKind::from_str("fatal"), None);
        assert_eq!(
            serde_json::to_string(&NotificationKind::Success).unwrap(),
            "\"success\""
        );
    }
}
