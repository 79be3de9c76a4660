use chrono::Utc;
use edupulse::config::ScoringConfig;
use edupulse::risk::RiskTier;
use edupulse::roster::{import_csv, ImportError, Roster};
use edupulse::session::{Role, Session, SessionContext};

const EXPORT: &str = "student_id,name,attendance,assignments_done,total_assignments,test_score
ST003,Carol Davis,82,8,10,79
ST011,Lena Ortiz,35,2,10,
ST012,Omar Haddad,88,9,10,91
";

#[test]
fn import_applies_rows_through_the_teacher_session() {
    let context = SessionContext::new(Role::Teacher, "T-007").expect("valid context");
    let mut session =
        Session::init(context, ScoringConfig::default(), Utc::now()).expect("teacher session");

    let students = import_csv(EXPORT.as_bytes(), session.scoring().default_test_score)
        .expect("export parses");
    assert_eq!(students.len(), 3);

    let summary = session
        .import_students(students, Utc::now())
        .expect("teacher can import");
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.alerts_raised, 1, "only the new high-risk student alerts");

    let roster = session.roster().expect("teacher roster");
    assert_eq!(roster.len(), 12);

    let carol = roster
        .views()
        .into_iter()
        .find(|view| view.student_id.0 == "ST003")
        .expect("carol still listed");
    assert_eq!(carol.assessment.tier, RiskTier::Low);

    let overview = roster.overview();
    assert_eq!(overview.high_risk_count, 3);
    assert_eq!(overview.distribution.total_count(), 12);
}

#[test]
fn sample_roster_distribution_matches_class_mix() {
    let distribution = Roster::sample().diversity();
    let counts: Vec<(RiskTier, usize)> = distribution
        .iter()
        .map(|(tier, share)| (tier, share.count))
        .collect();
    assert_eq!(
        counts,
        vec![(RiskTier::Low, 4), (RiskTier::Medium, 3), (RiskTier::High, 3)]
    );
    assert_eq!(distribution.total_percentage(), 100);
}

#[test]
fn rejected_rows_abort_the_import() {
    let export = "student_id,name,attendance,assignments_done,total_assignments\n\
ST013,Ravi Nair,120,5,10\n";
    match import_csv(export.as_bytes(), 75.0) {
        Err(ImportError::InvalidRow { row, .. }) => assert_eq!(row, 1),
        other => panic!("expected invalid row, got {other:?}"),
    }
}
