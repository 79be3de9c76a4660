//! Per-role session state, replacing ambient storage keyed by strings.

use crate::config::ScoringConfig;
use crate::notifications::{high_risk_transition, NotificationId, NotificationStore};
use crate::profile::StudentProfile;
use crate::roster::{Roster, StudentRecord};
use crate::risk::{MetricsError, RiskTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown role '{0}', expected student or teacher")]
    UnknownRole(String),
    #[error("session identity must not be empty")]
    MissingIdentity,
    #[error("no active session for the supplied token")]
    UnknownSession,
    #[error("{actual} sessions cannot access {required} features")]
    Forbidden { required: Role, actual: Role },
    #[error("student profile could not be seeded: {0}")]
    InvalidProfile(#[from] MetricsError),
}

/// Who is signed in. The identity is opaque and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub role: Role,
    pub identity: String,
}

impl SessionContext {
    pub fn new(role: Role, identity: impl Into<String>) -> Result<Self, SessionError> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(SessionError::MissingIdentity);
        }
        Ok(Self {
            role,
            identity: identity.trim().to_string(),
        })
    }
}

/// Result of submitting one student's metrics in a teacher session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentUpsert {
    pub previous_tier: Option<RiskTier>,
    pub tier: RiskTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<NotificationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub alerts_raised: usize,
}

/// Counts reported when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub role: Role,
    pub identity: String,
    pub notifications: usize,
    pub unread: usize,
    pub students: usize,
}

/// State owned by one signed-in role: its notifications plus the roster for teachers
/// or the student's own profile.
#[derive(Debug)]
pub struct Session {
    context: SessionContext,
    scoring: ScoringConfig,
    notifications: NotificationStore,
    roster: Option<Roster>,
    profile: Option<StudentProfile>,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Seeds the role's notifications and its roster or profile. A student's identity
    /// doubles as their student id.
    pub fn init(
        context: SessionContext,
        scoring: ScoringConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let notifications = NotificationStore::seeded(context.role, now);
        let (roster, profile) = match context.role {
            Role::Teacher => (Some(Roster::sample()), None),
            Role::Student => (
                None,
                Some(StudentProfile::seeded(&context.identity, &scoring)?),
            ),
        };

        info!(
            role = %context.role,
            identity = %context.identity,
            unread = notifications.unread_count(),
            "session started"
        );

        Ok(Self {
            context,
            scoring,
            notifications,
            roster,
            profile,
            started_at: now,
        })
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationStore {
        &mut self.notifications
    }

    pub fn roster(&self) -> Result<&Roster, SessionError> {
        self.roster.as_ref().ok_or(SessionError::Forbidden {
            required: Role::Teacher,
            actual: self.context.role,
        })
    }

    pub fn profile(&self) -> Result<&StudentProfile, SessionError> {
        self.profile.as_ref().ok_or(SessionError::Forbidden {
            required: Role::Student,
            actual: self.context.role,
        })
    }

    /// Adds or updates a student and raises a `high_risk` alert on entry into High,
    /// when enabled in the scoring configuration.
    pub fn upsert_student(
        &mut self,
        student: StudentRecord,
        now: DateTime<Utc>,
    ) -> Result<StudentUpsert, SessionError> {
        let actual = self.context.role;
        let roster = self.roster.as_mut().ok_or(SessionError::Forbidden {
            required: Role::Teacher,
            actual,
        })?;

        let assessment = student.assess();
        let alert = if self.scoring.raise_high_risk_alerts {
            let previous = roster.get(student.student_id()).map(|s| s.assess().tier);
            high_risk_transition(previous, &student, &assessment, now)
        } else {
            None
        };

        let previous_tier = roster.upsert(student);
        let alert = alert.map(|notification| {
            let student_id = notification
                .student
                .as_ref()
                .map(|s| s.student_id.to_string())
                .unwrap_or_default();
            let id = self.notifications.add(notification);
            info!(%id, %student_id, score = assessment.score, "high risk alert raised");
            id
        });

        Ok(StudentUpsert {
            previous_tier,
            tier: assessment.tier,
            alert,
        })
    }

    pub fn import_students(
        &mut self,
        students: Vec<StudentRecord>,
        now: DateTime<Utc>,
    ) -> Result<ImportSummary, SessionError> {
        let mut summary = ImportSummary {
            imported: 0,
            alerts_raised: 0,
        };

        for student in students {
            let outcome = self.upsert_student(student, now)?;
            summary.imported += 1;
            if outcome.alert.is_some() {
                summary.alerts_raised += 1;
            }
        }

        info!(
            imported = summary.imported,
            alerts = summary.alerts_raised,
            "student import applied"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            role: self.context.role,
            identity: self.context.identity.clone(),
            notifications: self.notifications.len(),
            unread: self.notifications.unread_count(),
            students: self.roster.as_ref().map(Roster::len).unwrap_or(0),
        }
    }

    /// Ends the session, dropping its state.
    pub fn teardown(self) -> SessionSummary {
        let summary = self.summary();
        info!(role = %summary.role, identity = %summary.identity, "session ended");
        summary
    }
}
