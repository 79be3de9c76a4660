//! The signed-in student's own record, as shown on the student dashboard.

use crate::config::ScoringConfig;
use crate::risk::{MetricsError, MetricsRecord};
use crate::roster::{StudentRecord, StudentRiskView};
use serde::Serialize;

const SEED_NAME: &str = "Alex Johnson";
const SEED_ATTENDANCE_PCT: f64 = 85.0;
const SEED_ASSIGNMENTS_DONE: u32 = 6;
const SEED_TOTAL_ASSIGNMENTS: u32 = 8;

/// Attendance for one month of the current term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendancePoint {
    pub month: &'static str,
    pub attendance_pct: u32,
}

const SEED_HISTORY: [AttendancePoint; 6] = [
    AttendancePoint { month: "Jul", attendance_pct: 78 },
    AttendancePoint { month: "Aug", attendance_pct: 82 },
    AttendancePoint { month: "Sep", attendance_pct: 85 },
    AttendancePoint { month: "Oct", attendance_pct: 88 },
    AttendancePoint { month: "Nov", attendance_pct: 85 },
    AttendancePoint { month: "Dec", attendance_pct: 85 },
];

#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    student: StudentRecord,
    attendance_history: Vec<AttendancePoint>,
}

impl StudentProfile {
    pub fn new(student: StudentRecord, attendance_history: Vec<AttendancePoint>) -> Self {
        Self {
            student,
            attendance_history,
        }
    }

    /// Profile a student session opens with. The test score is not measured yet, so the
    /// configured default stands in for it.
    pub fn seeded(student_id: &str, scoring: &ScoringConfig) -> Result<Self, MetricsError> {
        let metrics = MetricsRecord::without_test_score(
            student_id,
            SEED_ATTENDANCE_PCT,
            SEED_ASSIGNMENTS_DONE,
            SEED_TOTAL_ASSIGNMENTS,
            scoring.default_test_score,
        )?;
        let student = StudentRecord::new(SEED_NAME, metrics)?;
        Ok(Self::new(student, SEED_HISTORY.to_vec()))
    }

    pub fn student(&self) -> &StudentRecord {
        &self.student
    }

    pub fn attendance_history(&self) -> &[AttendancePoint] {
        &self.attendance_history
    }

    pub fn view(&self) -> StudentSelfView {
        StudentSelfView {
            student: StudentRiskView::new(&self.student),
            attendance_history: self.attendance_history.clone(),
        }
    }
}

/// Assessment, remark, trend and recommendations for the signed-in student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSelfView {
    #[serde(flatten)]
    pub student: StudentRiskView,
    pub attendance_history: Vec<AttendancePoint>,
}
