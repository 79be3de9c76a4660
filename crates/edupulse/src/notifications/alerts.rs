use super::domain::{NewNotification, NotificationKind, Priority};
use crate::risk::{RiskAssessment, RiskTier};
use crate::roster::StudentRecord;
use chrono::{DateTime, Utc};

/// Builds a `high_risk` alert when a student enters the High tier.
///
/// `previous` is the tier before this update, `None` for a newly added student.
/// Staying in High does not re-alert.
pub fn high_risk_transition(
    previous: Option<RiskTier>,
    student: &StudentRecord,
    assessment: &RiskAssessment,
    now: DateTime<Utc>,
) -> Option<NewNotification> {
    if assessment.tier != RiskTier::High || previous == Some(RiskTier::High) {
        return None;
    }

    let drivers: Vec<String> = assessment
        .critical_factors()
        .map(|factor| format!("{} {}%", factor.name.to_lowercase(), factor.value))
        .collect();

    let message = if drivers.is_empty() {
        format!(
            "{} has been identified as high risk (score {}).",
            student.name(), assessment.score
        )
    } else {
        format!(
            "{} has been identified as high risk (score {}) due to {}.",
            student.name(),
            assessment.score,
            drivers.join(", ")
        )
    };

    let notification = NewNotification::new(
        NotificationKind::HighRisk,
        Priority::High,
        "High Risk Student Alert",
        message,
        now,
    )
    .about_student(student.student_id().clone(), student.name().to_string());

    Some(notification)
}
