use super::StudentRecord;
use crate::risk::{diversity, RiskAssessment, RiskDistribution, RiskTier};
use serde::Serialize;

/// Headline figures for the teacher dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortOverview {
    pub total_students: usize,
    pub high_risk_count: usize,
    pub average_attendance_pct: u32,
    pub average_assignment_rate_pct: u32,
    pub distribution: RiskDistribution,
}

impl CohortOverview {
    /// Averages are rounded class means; an empty cohort reports zeros.
    pub fn from_students(students: &[StudentRecord]) -> Self {
        let assessments: Vec<RiskAssessment> = students.iter().map(StudentRecord::assess).collect();
        let high_risk_count = assessments
            .iter()
            .filter(|assessment| assessment.tier == RiskTier::High)
            .count();

        Self {
            total_students: students.len(),
            high_risk_count,
            average_attendance_pct: rounded_mean(
                students.iter().map(|s| s.metrics().attendance_pct()),
            ),
            average_assignment_rate_pct: rounded_mean(
                students.iter().map(|s| s.metrics().assignment_rate_pct()),
            ),
            distribution: diversity(&assessments),
        }
    }
}

fn rounded_mean<I>(values: I) -> u32
where
    I: Iterator<Item = f64>,
{
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0
    } else {
        (sum / count as f64).round().max(0.0) as u32
    }
}
