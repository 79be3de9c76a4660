use super::domain::{Notification, NotificationId, NotificationKind, Priority};
use super::store::NotificationStore;
use crate::display::{BadgeVariant, Indicator};
use crate::risk::StudentId;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub icon: Indicator,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<StudentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub age_label: String,
    pub read: bool,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub priority_badge: BadgeVariant,
}

impl NotificationView {
    pub fn new(notification: &Notification, now: DateTime<Utc>) -> Self {
        let student = notification.student();
        Self {
            id: notification.id().clone(),
            kind: notification.kind(),
            icon: notification.kind().icon(),
            title: notification.title().to_string(),
            message: notification.message().to_string(),
            student_id: student.map(|s| s.student_id.clone()),
            student_name: student.map(|s| s.student_name.clone()),
            timestamp: notification.timestamp(),
            age_label: format_relative(notification.timestamp(), now),
            read: notification.is_read(),
            priority: notification.priority(),
            priority_label: notification.priority().label(),
            priority_badge: notification.priority().badge(),
        }
    }
}

/// Snapshot of a store as the notification center renders it.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationFeed {
    pub unread_count: usize,
    pub notifications: Vec<NotificationView>,
}

impl NotificationFeed {
    pub fn from_store(store: &NotificationStore, now: DateTime<Utc>) -> Self {
        Self {
            unread_count: store.unread_count(),
            notifications: store
                .list()
                .iter()
                .map(|notification| NotificationView::new(notification, now))
                .collect(),
        }
    }
}

/// `"{m}m ago"` under an hour, `"{h}h ago"` under a day, `"{d}d ago"` beyond.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).max(chrono::Duration::zero());
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use chrono::Duration;

    #[test]
    fn relative_labels_floor_each_unit() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::seconds(59), now), "0m ago");
        assert_eq!(format_relative(now - Duration::minutes(30), now), "30m ago");
        assert_eq!(format_relative(now - Duration::minutes(150), now), "2h ago");
        assert_eq!(format_relative(now - Duration::hours(47), now), "1d ago");
        assert_eq!(format_relative(now + Duration::minutes(5), now), "0m ago");
    }

    #[test]
    fn feed_mirrors_store_order_and_counter() {
        let now = Utc::now();
        let store = NotificationStore::seeded(Role::Teacher, now);
        let feed = NotificationFeed::from_store(&store, now);

        assert_eq!(feed.unread_count, 2);
        let ages: Vec<&str> = feed.notifications.iter().map(|n| n.age_label.as_str()).collect();
        assert_eq!(ages, vec!["30m ago", "2h ago", "4h ago", "1d ago"]);
        assert_eq!(feed.notifications[0].icon, Indicator::AlertTriangle);
        assert_eq!(feed.notifications[3].priority_badge, BadgeVariant::Outline);
        assert_eq!(feed.notifications[0].student_name.as_deref(), Some("Carol Davis"));
    }
}
