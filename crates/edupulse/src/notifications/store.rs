use super::domain::{NewNotification, Notification, NotificationId};
use tracing::debug;

/// Alert collection for one session, with an incrementally maintained unread counter.
///
/// Every mutation updates the collection and `unread_count` within the same `&mut self`
/// call, so `unread_count` always equals the number of notifications with `read == false`.
/// Unknown ids are tolerated as no-ops.
#[derive(Debug, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    unread_count: usize,
    next_sequence: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an unread notification and returns its id.
    pub fn add(&mut self, notification: NewNotification) -> NotificationId {
        self.next_sequence += 1;
        let id = NotificationId(self.next_sequence.to_string());

        self.notifications
            .push(Notification::unread(id.clone(), notification));
        self.unread_count += 1;

        debug!(%id, unread = self.unread_count, "notification added");
        id
    }

    /// Marks one notification read. Returns `false` when it was absent or already read.
    pub fn mark_as_read(&mut self, id: &NotificationId) -> bool {
        let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
        else {
            return false;
        };

        if notification.is_read() {
            return false;
        }

        notification.set_read();
        self.unread_count = self.unread_count.saturating_sub(1);
        true
    }

    /// Marks everything read in one pass. Returns how many were unread beforehand.
    pub fn mark_all_as_read(&mut self) -> usize {
        let previously_unread = self.unread_count;
        for notification in &mut self.notifications {
            notification.set_read();
        }
        self.unread_count = 0;
        previously_unread
    }

    /// Deletes a notification whatever its read state.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let index = self
            .notifications
            .iter()
            .position(|notification| notification.id() == id)?;

        let removed = self.notifications.remove(index);
        if !removed.is_read() {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        Some(removed)
    }

    /// Notifications in insertion order.
    pub fn list(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id() == id)
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
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
    use crate::notifications::domain::{NotificationKind, Priority};
    use chrono::{TimeZone, Utc};

    fn alert(title: &str, priority: Priority) -> NewNotification {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        NewNotification::new(NotificationKind::System, priority, title, "body", timestamp)
    }

    fn live_unread(store: &NotificationStore) -> usize {
        store.list().iter().filter(|n| !n.is_read()).count()
    }

    #[test]
    fn add_assigns_distinct_ids_and_counts_unread() {
        let mut store = NotificationStore::new();
        let first = store.add(alert("one", Priority::Low));
        let second = store.add(alert("two", Priority::High));

        assert_ne!(first, second);
        assert_eq!(store.unread_count(), 2);
        assert!(store.list().iter().all(|n| !n.is_read()));
    }

    #[test]
    fn mark_as_read_is_idempotent() {
        let mut store = NotificationStore::new();
        let id = store.add(alert("one", Priority::Medium));
        store.add(alert("two", Priority::Medium));

        assert!(store.mark_as_read(&id));
        assert!(!store.mark_as_read(&id));
        assert_eq!(store.unread_count(), 1);
        assert_eq!(live_unread(&store), 1);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = NotificationStore::new();
        store.add(alert("one", Priority::Low));
        let missing = NotificationId("missing".to_string());

        assert!(!store.mark_as_read(&missing));
        assert!(store.remove(&missing).is_none());
        assert_eq!(store.unread_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_only_decrements_for_unread_entries() {
        let mut store = NotificationStore::new();
        let read = store.add(alert("read", Priority::Low));
        let unread = store.add(alert("unread", Priority::High));
        store.mark_as_read(&read);

        store.remove(&read).expect("read entry removed");
        assert_eq!(store.unread_count(), 1);

        store.remove(&unread).expect("unread entry removed");
        assert_eq!(store.unread_count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn mark_all_as_read_resets_counter() {
        let mut store = NotificationStore::new();
        let id = store.add(alert("one", Priority::Low));
        store.add(alert("two", Priority::Low));
        store.add(alert("three", Priority::Low));
        store.mark_as_read(&id);

        assert_eq!(store.mark_all_as_read(), 2);
        assert_eq!(store.unread_count(), 0);
        assert_eq!(live_unread(&store), 0);
        assert_eq!(store.mark_all_as_read(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut store = NotificationStore::new();
        let first = store.add(alert("one", Priority::Low));
        store.remove(&first);
        let second = store.add(alert("two", Priority::Low));
        assert_ne!(first, second);
    }
}
