use crate::display::{BadgeVariant, Indicator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Test score substituted when a record is captured without a measured score.
pub const DEFAULT_TEST_SCORE: f64 = 75.0;

const GOOD_THRESHOLD: f64 = 75.0;
const WARNING_THRESHOLD: f64 = 50.0;

/// Stable identifier assigned to a student by the school (e.g. `ST003`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contract violations raised before a record can reach the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("student id must not be empty")]
    MissingStudentId,
    #[error("student name must not be empty")]
    MissingStudentName,
    #[error("total assignments must be greater than zero")]
    ZeroTotalAssignments,
    #[error("{field} must be a percentage between 0 and 100 (found {value})")]
    PercentageOutOfRange { field: &'static str, value: f64 },
}

/// Raw per-student metrics captured by the student-management surface.
///
/// `assignments_done` may exceed `total_assignments`; the completion rate is then
/// above 100 and is deliberately left unclamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    student_id: StudentId,
    attendance_pct: f64,
    assignments_done: u32,
    total_assignments: u32,
    test_score_pct: f64,
}

impl MetricsRecord {
    pub fn new(
        student_id: impl Into<String>,
        attendance_pct: f64,
        assignments_done: u32,
        total_assignments: u32,
        test_score_pct: f64,
    ) -> Result<Self, MetricsError> {
        let student_id = student_id.into();
        if student_id.trim().is_empty() {
            return Err(MetricsError::MissingStudentId);
        }
        if total_assignments == 0 {
            return Err(MetricsError::ZeroTotalAssignments);
        }
        check_percentage("attendance", attendance_pct)?;
        check_percentage("test score", test_score_pct)?;

        Ok(Self {
            student_id: StudentId(student_id.trim().to_string()),
            attendance_pct,
            assignments_done,
            total_assignments,
            test_score_pct,
        })
    }

    /// Builds a record for a student whose test score has not been measured yet.
    pub fn without_test_score(
        student_id: impl Into<String>,
        attendance_pct: f64,
        assignments_done: u32,
        total_assignments: u32,
        default_test_score: f64,
    ) -> Result<Self, MetricsError> {
        Self::new(
            student_id,
            attendance_pct,
            assignments_done,
            total_assignments,
            default_test_score,
        )
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn attendance_pct(&self) -> f64 {
        self.attendance_pct
    }

    pub fn assignments_done(&self) -> u32 {
        self.assignments_done
    }

    pub fn total_assignments(&self) -> u32 {
        self.total_assignments
    }

    pub fn test_score_pct(&self) -> f64 {
        self.test_score_pct
    }

    pub fn assignment_rate_pct(&self) -> f64 {
        100.0 * f64::from(self.assignments_done) / f64::from(self.total_assignments)
    }

    /// One-line remark shown on the student's own attendance card.
    pub fn attendance_remark(&self) -> &'static str {
        if self.attendance_pct >= GOOD_THRESHOLD {
            "Good attendance"
        } else {
            "Needs improvement"
        }
    }
}

fn check_percentage(field: &'static str, value: f64) -> Result<(), MetricsError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(MetricsError::PercentageOutOfRange { field, value })
    }
}

/// Overall classification derived from the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub fn from_score(score: u32) -> Self {
        let score = f64::from(score);
        if score >= GOOD_THRESHOLD {
            Self::Low
        } else if score >= WARNING_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::Low => BadgeVariant::Default,
            Self::Medium => BadgeVariant::Secondary,
            Self::High => BadgeVariant::Destructive,
        }
    }

    pub const fn trend(self) -> RiskTrend {
        match self {
            Self::Low => RiskTrend::Improving,
            Self::Medium => RiskTrend::Stable,
            Self::High => RiskTrend::Increasing,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction a dashboard shows next to the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTrend {
    Improving,
    Stable,
    Increasing,
}

impl RiskTrend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Increasing => "Increasing",
        }
    }

    pub const fn indicator(self) -> Indicator {
        match self {
            Self::Improving => Indicator::TrendingDown,
            Self::Stable => Indicator::AlertTriangle,
            Self::Increasing => Indicator::TrendingUp,
        }
    }
}

/// Per-factor health, using the same bands as [`RiskTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorStatus {
    Good,
    Warning,
    Critical,
}

impl FactorStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= GOOD_THRESHOLD {
            Self::Good
        } else if value >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub const fn indicator(self) -> Indicator {
        match self {
            Self::Good => Indicator::TrendingUp,
            Self::Warning => Indicator::AlertTriangle,
            Self::Critical => Indicator::TrendingDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Attendance,
    AssignmentCompletion,
    TestScores,
}

impl FactorKind {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::Attendance,
            Self::AssignmentCompletion,
            Self::TestScores,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Attendance => "Attendance",
            Self::AssignmentCompletion => "Assignment Completion",
            Self::TestScores => "Test Scores",
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            Self::Attendance => 0.4,
            Self::AssignmentCompletion => 0.3,
            Self::TestScores => 0.3,
        }
    }
}

/// One weighted input to the score, as shown in the factor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub kind: FactorKind,
    pub name: &'static str,
    pub value: u32,
    pub weight: f64,
    pub status: FactorStatus,
}

/// Derived classification for one metrics record; recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub tier: RiskTier,
    pub factors: [RiskFactor; 3],
}

impl RiskAssessment {
    pub fn factor(&self, kind: FactorKind) -> &RiskFactor {
        let index = match kind {
            FactorKind::Attendance => 0,
            FactorKind::AssignmentCompletion => 1,
            FactorKind::TestScores => 2,
        };
        &self.factors[index]
    }

    pub fn critical_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors
            .iter()
            .filter(|factor| factor.status == FactorStatus::Critical)
    }
}
