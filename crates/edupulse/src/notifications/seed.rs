use super::domain::{NewNotification, NotificationKind, Priority};
use super::store::NotificationStore;
use crate::risk::StudentId;
use crate::session::Role;
use chrono::{DateTime, Duration, Utc};

/// Starter alert for a role, with whether it begins already read.
#[derive(Debug, Clone)]
pub struct SeedNotification {
    pub notification: NewNotification,
    pub read: bool,
}

/// Baseline alerts shown when a role's session starts, newest first.
pub fn seed_notifications(role: Role, now: DateTime<Utc>) -> Vec<SeedNotification> {
    match role {
        Role::Teacher => teacher_seed(now),
        Role::Student => student_seed(now),
    }
}

impl NotificationStore {
    /// A store preloaded with the role's baseline alerts.
    ///
    /// Seeds go through `add` and `mark_as_read`, so the unread counter is consistent
    /// from the first observable state.
    pub fn seeded(role: Role, now: DateTime<Utc>) -> Self {
        let mut store = Self::new();
        for seed in seed_notifications(role, now) {
            let id = store.add(seed.notification);
            if seed.read {
                store.mark_as_read(&id);
            }
        }
        store
    }
}

fn teacher_seed(now: DateTime<Utc>) -> Vec<SeedNotification> {
    vec![
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::HighRisk,
                Priority::High,
                "High Risk Student Alert",
                "Carol Davis has been identified as high risk due to low attendance (45%) and poor assignment completion.",
                now - Duration::minutes(30),
            )
            .about_student(StudentId("ST003".to_string()), "Carol Davis"),
            read: false,
        },
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::HighRisk,
                Priority::High,
                "High Risk Student Alert",
                "Henry Taylor requires immediate attention - attendance dropped to 38%.",
                now - Duration::hours(2),
            )
            .about_student(StudentId("ST008".to_string()), "Henry Taylor"),
            read: false,
        },
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::AttendanceAlert,
                Priority::Medium,
                "Attendance Warning",
                "Jack Anderson has missed 3 consecutive classes.",
                now - Duration::hours(4),
            )
            .about_student(StudentId("ST010".to_string()), "Jack Anderson"),
            read: true,
        },
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::System,
                Priority::Low,
                "Weekly Report Ready",
                "Your weekly student progress report is now available for download.",
                now - Duration::days(1),
            ),
            read: true,
        },
    ]
}

fn student_seed(now: DateTime<Utc>) -> Vec<SeedNotification> {
    vec![
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::AssignmentOverdue,
                Priority::Medium,
                "Assignment Due Soon",
                "Mathematics Assignment #5 is due tomorrow at 11:59 PM.",
                now - Duration::hours(1),
            ),
            read: false,
        },
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::AttendanceAlert,
                Priority::Medium,
                "Attendance Notice",
                "Your attendance has dropped to 85%. Maintain above 75% to avoid academic issues.",
                now - Duration::hours(6),
            ),
            read: false,
        },
        SeedNotification {
            notification: NewNotification::new(
                NotificationKind::System,
                Priority::Low,
                "Exam Schedule Updated",
                "Physics exam has been rescheduled to January 20th, 2:00 PM.",
                now - Duration::hours(12),
            ),
            read: true,
        },
    ]
}
