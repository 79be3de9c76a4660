use chrono::{Duration, TimeZone, Utc};
use edupulse::config::ScoringConfig;
use edupulse::notifications::{
    NewNotification, NotificationFeed, NotificationId, NotificationKind, NotificationStore,
    Priority,
};
use edupulse::risk::MetricsRecord;
use edupulse::roster::StudentRecord;
use edupulse::session::{Role, Session, SessionContext};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn alert(priority: Priority) -> NewNotification {
    NewNotification::new(
        NotificationKind::AttendanceAlert,
        priority,
        "Attendance Warning",
        "Missed 3 consecutive classes.",
        now() - Duration::minutes(5),
    )
}

fn assert_unread_invariant(store: &NotificationStore) {
    let live = store.list().iter().filter(|n| !n.is_read()).count();
    assert_eq!(store.unread_count(), live, "unread counter drifted");
}

#[test]
fn removing_the_only_unread_high_priority_alert_empties_the_store() {
    let mut store = NotificationStore::new();
    let id = store.add(alert(Priority::High));
    assert_eq!(store.unread_count(), 1);

    let removed = store.remove(&id).expect("notification removed");

    assert_eq!(removed.priority(), Priority::High);
    assert_eq!(store.unread_count(), 0);
    assert!(store.list().is_empty());
}

#[test]
fn unread_counter_tracks_any_operation_sequence() {
    let mut store = NotificationStore::new();
    let mut ids: Vec<NotificationId> = Vec::new();
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;

    for _ in 0..500 {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let pick = (state >> 33) as usize;

        match pick % 7 {
            0..=2 => ids.push(store.add(alert(Priority::Medium))),
            3 | 4 if !ids.is_empty() => {
                store.mark_as_read(&ids[pick % ids.len()]);
            }
            5 if !ids.is_empty() => {
                store.remove(&ids[pick % ids.len()]);
            }
            6 if pick % 5 == 0 => {
                store.mark_all_as_read();
            }
            _ => {
                store.mark_as_read(&NotificationId("stale".to_string()));
            }
        }

        assert_unread_invariant(&store);
    }
}

#[test]
fn double_mark_as_read_decrements_once() {
    let mut store = NotificationStore::new();
    let first = store.add(alert(Priority::Low));
    store.add(alert(Priority::Low));

    store.mark_as_read(&first);
    store.mark_as_read(&first);

    assert_eq!(store.unread_count(), 1);
    assert_unread_invariant(&store);
}

#[test]
fn list_preserves_insertion_order_regardless_of_priority() {
    let mut store = NotificationStore::new();
    let low = store.add(alert(Priority::Low));
    let high = store.add(alert(Priority::High));
    let medium = store.add(alert(Priority::Medium));

    let order: Vec<&NotificationId> = store.list().iter().map(|n| n.id()).collect();
    assert_eq!(order, vec![&low, &high, &medium]);
}

#[test]
fn teacher_session_lifecycle_keeps_feed_consistent() {
    let context = SessionContext::new(Role::Teacher, "T-042").expect("valid context");
    let mut session =
        Session::init(context, ScoringConfig::default(), now()).expect("teacher session");

    let feed = NotificationFeed::from_store(session.notifications(), now());
    assert_eq!(feed.unread_count, 2);
    assert_eq!(feed.notifications.len(), 4);

    let first = feed.notifications[0].id.clone();
    session.notifications_mut().mark_as_read(&first);
    session.notifications_mut().mark_as_read(&first);
    assert_eq!(session.notifications().unread_count(), 1);

    let metrics = MetricsRecord::new("ST011", 40.0, 2, 10, 45.0).expect("valid record");
    let struggling = StudentRecord::new("Lena Ortiz", metrics).expect("valid student");
    let outcome = session
        .upsert_student(struggling.clone(), now())
        .expect("teacher can add students");
    let alert_id = outcome.alert.expect("entering high raises an alert");
    assert_eq!(session.notifications().unread_count(), 2);

    let raised = session
        .notifications()
        .get(&alert_id)
        .expect("alert stored");
    assert_eq!(raised.kind(), NotificationKind::HighRisk);
    assert_eq!(
        raised.student().map(|s| s.student_name.as_str()),
        Some("Lena Ortiz")
    );

    let repeat = session
        .upsert_student(struggling, now())
        .expect("resubmission accepted");
    assert!(repeat.alert.is_none(), "staying high must not re-alert");

    session.notifications_mut().mark_all_as_read();
    let summary = session.teardown();
    assert_eq!(summary.unread, 0);
    assert_eq!(summary.notifications, 5);
    assert_eq!(summary.students, 11);
}

#[test]
fn student_session_is_seeded_for_the_student_role() {
    let context = SessionContext::new(Role::Student, "ST001").expect("valid context");
    let session =
        Session::init(context, ScoringConfig::default(), now()).expect("student session");

    let kinds: Vec<NotificationKind> = session
        .notifications()
        .list()
        .iter()
        .map(|n| n.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::AssignmentOverdue,
            NotificationKind::AttendanceAlert,
            NotificationKind::System,
        ]
    );
    assert_eq!(session.notifications().unread_count(), 2);
    assert!(session.roster().is_err());
}
