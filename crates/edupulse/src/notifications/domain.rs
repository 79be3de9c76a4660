use crate::display::{BadgeVariant, Indicator};
use crate::risk::StudentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier unique within one notification store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    HighRisk,
    AttendanceAlert,
    AssignmentOverdue,
    System,
}

impl NotificationKind {
    pub const fn icon(self) -> Indicator {
        match self {
            Self::HighRisk => Indicator::AlertTriangle,
            Self::AttendanceAlert | Self::AssignmentOverdue => Indicator::Clock,
            Self::System => Indicator::Bell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Low => BadgeVariant::Outline,
            Self::Medium => BadgeVariant::Secondary,
            Self::High => BadgeVariant::Destructive,
        }
    }
}

/// Student an alert refers to. Not resolved against any roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRef {
    pub student_id: StudentId,
    pub student_name: String,
}

/// Alert payload handed to [`super::NotificationStore::add`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub student: Option<StudentRef>,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
}

impl NewNotification {
    pub fn new(
        kind: NotificationKind,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            student: None,
            timestamp,
            priority,
        }
    }

    pub fn about_student(mut self, student_id: StudentId, student_name: impl Into<String>) -> Self {
        self.student = Some(StudentRef {
            student_id,
            student_name: student_name.into(),
        });
        self
    }
}

/// Stored alert. Only `read` changes after creation, and only from unread to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    id: NotificationId,
    #[serde(rename = "type")]
    kind: NotificationKind,
    title: String,
    message: String,
    #[serde(flatten)]
    student: Option<StudentRef>,
    timestamp: DateTime<Utc>,
    read: bool,
    priority: Priority,
}

impl Notification {
    pub(crate) fn unread(id: NotificationId, new: NewNotification) -> Self {
        Self {
            id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            student: new.student,
            timestamp: new.timestamp,
            read: false,
            priority: new.priority,
        }
    }

    pub(crate) fn set_read(&mut self) {
        self.read = true;
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn student(&self) -> Option<&StudentRef> {
        self.student.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}
