//! Class roster for a teacher session, plus bulk CSV import.

mod import;
pub mod overview;

pub use import::{import_csv, ImportError};
pub use overview::CohortOverview;

use crate::display::BadgeVariant;
use crate::risk::{
    assess, diversity, recommend, MetricsError, MetricsRecord, RiskAssessment, RiskDistribution,
    RiskTier, RiskTrend, StudentId,
};
use serde::Serialize;
use tracing::{debug, warn};

/// A student as the teacher dashboard lists them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    name: String,
    metrics: MetricsRecord,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, metrics: MetricsRecord) -> Result<Self, MetricsError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MetricsError::MissingStudentName);
        }
        Ok(Self {
            name: name.trim().to_string(),
            metrics,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &MetricsRecord {
        &self.metrics
    }

    pub fn student_id(&self) -> &StudentId {
        self.metrics.student_id()
    }

    pub fn assess(&self) -> RiskAssessment {
        assess(&self.metrics)
    }
}

/// Insertion-ordered students keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten-student class a teacher sees on first login.
    pub fn sample() -> Self {
        let rows: [(&str, &str, f64, u32, f64); 10] = [
            ("ST001", "Alice Johnson", 92.0, 8, 88.0),
            ("ST002", "Bob Smith", 78.0, 6, 72.0),
            ("ST003", "Carol Davis", 45.0, 3, 42.0),
            ("ST004", "David Wilson", 88.0, 9, 85.0),
            ("ST005", "Emma Brown", 65.0, 5, 68.0),
            ("ST006", "Frank Miller", 95.0, 10, 92.0),
            ("ST007", "Grace Lee", 72.0, 7, 78.0),
            ("ST008", "Henry Taylor", 38.0, 2, 35.0),
            ("ST009", "Ivy Chen", 85.0, 8, 82.0),
            ("ST010", "Jack Anderson", 55.0, 4, 48.0),
        ];

        let students = rows
            .into_iter()
            .filter_map(|(id, name, attendance, done, test)| {
                match MetricsRecord::new(id, attendance, done, 10, test)
                    .and_then(|metrics| StudentRecord::new(name, metrics))
                {
                    Ok(student) => Some(student),
                    Err(err) => {
                        warn!(student_id = id, error = %err, "sample student rejected");
                        None
                    }
                }
            })
            .collect();

        Self { students }
    }

    /// Adds a student or replaces the metrics of an existing one.
    ///
    /// Returns the tier the student had before the update, if they were already listed.
    pub fn upsert(&mut self, record: StudentRecord) -> Option<RiskTier> {
        match self
            .students
            .iter_mut()
            .find(|existing| existing.student_id() == record.student_id())
        {
            Some(existing) => {
                let previous = existing.assess().tier;
                debug!(student_id = %record.student_id(), "student metrics resubmitted");
                *existing = record;
                Some(previous)
            }
            None => {
                debug!(student_id = %record.student_id(), "student added to roster");
                self.students.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.students
            .iter()
            .find(|student| student.student_id() == id)
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn assessments(&self) -> Vec<(&StudentRecord, RiskAssessment)> {
        self.students
            .iter()
            .map(|student| (student, student.assess()))
            .collect()
    }

    pub fn high_risk(&self) -> Vec<&StudentRecord> {
        self.students
            .iter()
            .filter(|student| student.assess().tier == RiskTier::High)
            .collect()
    }

    pub fn diversity(&self) -> RiskDistribution {
        let assessments: Vec<RiskAssessment> =
            self.students.iter().map(StudentRecord::assess).collect();
        diversity(&assessments)
    }

    pub fn overview(&self) -> CohortOverview {
        CohortOverview::from_students(&self.students)
    }

    pub fn views(&self) -> Vec<StudentRiskView> {
        self.students.iter().map(StudentRiskView::new).collect()
    }
}

/// Row of the teacher's student table with its derived assessment.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRiskView {
    pub student_id: StudentId,
    pub name: String,
    pub attendance_pct: f64,
    pub attendance_remark: &'static str,
    pub assignments_done: u32,
    pub total_assignments: u32,
    pub test_score_pct: f64,
    pub assessment: RiskAssessment,
    pub tier_badge: BadgeVariant,
    pub trend: RiskTrend,
    pub recommendations: Vec<String>,
}

impl StudentRiskView {
    pub fn new(student: &StudentRecord) -> Self {
        let assessment = student.assess();
        let recommendations = recommend(&assessment.factors);
        Self {
            student_id: student.student_id().clone(),
            name: student.name().to_string(),
            attendance_pct: student.metrics().attendance_pct(),
            attendance_remark: student.metrics().attendance_remark(),
            assignments_done: student.metrics().assignments_done(),
            total_assignments: student.metrics().total_assignments(),
            test_score_pct: student.metrics().test_score_pct(),
            tier_badge: assessment.tier.badge(),
            trend: assessment.tier.trend(),
            assessment,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, attendance: f64, done: u32, test: f64) -> StudentRecord {
        let metrics = MetricsRecord::new(id, attendance, done, 10, test).expect("valid metrics");
        StudentRecord::new(format!("Student {id}"), metrics).expect("valid student")
    }

    #[test]
    fn record_requires_a_name() {
        let metrics = MetricsRecord::new("ST030", 80.0, 8, 10, 80.0).expect("valid");
        assert_eq!(
            StudentRecord::new("  ", metrics.clone()),
            Err(MetricsError::MissingStudentName)
        );

        let named = StudentRecord::new(" Tara Singh ", metrics).expect("valid student");
        assert_eq!(named.name(), "Tara Singh");
        assert_eq!(named.student_id().0, "ST030");
    }

    #[test]
    fn sample_class_has_ten_students_in_order() {
        let roster = Roster::sample();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster.students()[0].student_id().0, "ST001");
        assert_eq!(roster.students()[9].name(), "Jack Anderson");
    }

    #[test]
    fn sample_class_high_risk_students() {
        let roster = Roster::sample();
        let ids: Vec<&str> = roster
            .high_risk()
            .into_iter()
            .map(|s| s.student_id().0.as_str())
            .collect();
        assert_eq!(ids, vec!["ST003", "ST008", "ST010"]);
    }

    #[test]
    fn upsert_replaces_in_place_and_reports_previous_tier() {
        let mut roster = Roster::new();
        assert_eq!(roster.upsert(student("ST020", 90.0, 9, 90.0)), None);
        roster.upsert(student("ST021", 60.0, 6, 60.0));

        let previous = roster.upsert(student("ST020", 30.0, 2, 30.0));
        assert_eq!(previous, Some(RiskTier::Low));
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.students()[0].student_id().0, "ST020");
        assert_eq!(roster.students()[0].assess().tier, RiskTier::High);
    }

    #[test]
    fn views_carry_recommendations() {
        let roster = Roster::sample();
        let views = roster.views();
        let carol = views
            .iter()
            .find(|view| view.student_id.0 == "ST003")
            .expect("carol listed");
        assert_eq!(carol.assessment.score, 40);
        assert_eq!(carol.recommendations.len(), 6);
        assert_eq!(carol.trend, RiskTrend::Increasing);
        assert_eq!(carol.attendance_remark, "Needs improvement");

        let frank = views
            .iter()
            .find(|view| view.student_id.0 == "ST006")
            .expect("frank listed");
        assert!(frank.recommendations.is_empty());
    }
}
