use super::StudentRecord;
use crate::risk::{MetricsError, MetricsRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read student export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid student CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    InvalidRow { row: usize, source: MetricsError },
}

/// Parses a student export with headers
/// `student_id,name,attendance,assignments_done,total_assignments[,test_score]`.
///
/// A blank or missing `test_score` falls back to `default_test_score`. The first row
/// that breaks the metrics contract aborts the import; `row` counts data rows from 1.
pub fn import_csv<R: Read>(
    reader: R,
    default_test_score: f64,
) -> Result<Vec<StudentRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut students = Vec::new();

    for (index, row) in csv_reader.deserialize::<StudentRow>().enumerate() {
        let row = row?;
        let student = MetricsRecord::new(
            row.student_id,
            row.attendance,
            row.assignments_done,
            row.total_assignments,
            row.test_score.unwrap_or(default_test_score),
        )
        .and_then(|metrics| StudentRecord::new(row.name, metrics))
        .map_err(|source| ImportError::InvalidRow {
            row: index + 1,
            source,
        })?;

        students.push(student);
    }

    Ok(students)
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    student_id: String,
    name: String,
    attendance: f64,
    assignments_done: u32,
    total_assignments: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    test_score: Option<f64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_test_score_uses_default() {
        let csv = "student_id,name,attendance,assignments_done,total_assignments,test_score\n\
ST021, Mia Wong ,81,7,10,\n";
        let students = import_csv(csv.as_bytes(), 75.0).expect("import succeeds");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name(), "Mia Wong");
        assert!((students[0].metrics().test_score_pct() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_column_is_optional() {
        let csv = "student_id,name,attendance,assignments_done,total_assignments\n\
ST022,Noah Park,64,5,8\n";
        let students = import_csv(csv.as_bytes(), 70.0).expect("import succeeds");
        assert!((students[0].metrics().test_score_pct() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contract_violation_reports_row_number() {
        let csv = "student_id,name,attendance,assignments_done,total_assignments,test_score\n\
ST023,Ola Ade,90,9,10,80\n\
ST024,Pia Lund,70,3,0,60\n";
        match import_csv(csv.as_bytes(), 75.0) {
            Err(ImportError::InvalidRow { row: 2, source }) => {
                assert_eq!(source, MetricsError::ZeroTotalAssignments);
            }
            other => panic!("expected invalid row error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numbers_surface_as_csv_errors() {
        let csv = "student_id,name,attendance,assignments_done,total_assignments\n\
ST025,Quin Ross,ninety,9,10\n";
        assert!(matches!(
            import_csv(csv.as_bytes(), 75.0),
            Err(ImportError::Csv(_))
        ));
    }
}
