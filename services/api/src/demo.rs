use chrono::Utc;
use clap::Args;
use edupulse::config::{AppConfig, ScoringConfig};
use edupulse::error::AppError;
use edupulse::notifications::NotificationFeed;
use edupulse::profile::StudentProfile;
use edupulse::risk::{recommend, FactorKind, MetricsRecord, RiskAssessment, RiskTier};
use edupulse::roster::{import_csv, Roster, StudentRecord};
use edupulse::session::{Role, Session, SessionContext};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Attendance percentage (0-100)
    #[arg(long)]
    pub(crate) attendance: f64,
    /// Assignments completed
    #[arg(long)]
    pub(crate) done: u32,
    /// Assignments set (must be greater than zero)
    #[arg(long)]
    pub(crate) total: u32,
    /// Average test score percentage; falls back to RISK_DEFAULT_TEST_SCORE when omitted
    #[arg(long)]
    pub(crate) test_score: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CohortArgs {
    /// Student CSV export to summarize instead of the sample class
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Role to sign in as (teacher or student)
    #[arg(long, default_value = "teacher", value_parser = parse_role)]
    pub(crate) role: Role,
    /// Identity attached to the demo session
    #[arg(long, default_value = "demo-user")]
    pub(crate) identity: String,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|err| err.to_string())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let scoring = AppConfig::load()?.scoring;
    let AssessArgs {
        attendance,
        done,
        total,
        test_score,
    } = args;

    let record = match test_score {
        Some(score) => MetricsRecord::new("cli", attendance, done, total, score)?,
        None => MetricsRecord::without_test_score(
            "cli",
            attendance,
            done,
            total,
            scoring.default_test_score,
        )?,
    };

    let assessment = edupulse::risk::assess(&record);
    render_assessment(&assessment);
    println!("\nAttendance: {}", record.attendance_remark());
    if test_score.is_none() {
        println!(
            "(test score not supplied, assumed {:.0}%)",
            scoring.default_test_score
        );
    }
    Ok(())
}

pub(crate) fn run_cohort(args: CohortArgs) -> Result<(), AppError> {
    let scoring = AppConfig::load()?.scoring;

    let (roster, source) = match args.csv {
        Some(path) => {
            let file = File::open(&path)?;
            let mut roster = Roster::new();
            for student in import_csv(file, scoring.default_test_score)? {
                roster.upsert(student);
            }
            (roster, format!("CSV import ({})", path.display()))
        }
        None => (Roster::sample(), "Sample class".to_string()),
    };

    render_cohort(&roster, &source);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let scoring = AppConfig::load()?.scoring;
    let DemoArgs { role, identity } = args;

    let context = SessionContext::new(role, identity)?;
    let now = Utc::now();
    let mut session = Session::init(context, scoring, now)?;

    println!("Risk dashboard demo ({} session)", role);
    render_feed("Notifications on sign-in", &session);

    match role {
        Role::Teacher => run_teacher_walkthrough(&mut session, scoring)?,
        Role::Student => run_student_walkthrough(&mut session)?,
    }

    let summary = session.teardown();
    println!(
        "\nSession closed: {} notifications ({} unread), {} students on roster",
        summary.notifications, summary.unread, summary.students
    );
    Ok(())
}

fn run_teacher_walkthrough(session: &mut Session, scoring: ScoringConfig) -> Result<(), AppError> {
    let metrics = MetricsRecord::new("ST007", 40.0, 3, 10, 40.0)?;
    let student = StudentRecord::new("Grace Lee", metrics)?;

    println!("\nResubmitting Grace Lee with attendance 40% and 3/10 assignments");
    let outcome = session.upsert_student(student, Utc::now())?;
    println!(
        "- Tier {} -> {}",
        outcome
            .previous_tier
            .map(RiskTier::label)
            .unwrap_or("new"),
        outcome.tier.label()
    );
    match &outcome.alert {
        Some(id) => println!("- High risk alert raised ({})", id),
        None if scoring.raise_high_risk_alerts => println!("- No alert needed"),
        None => println!("- Alerts disabled (RISK_HIGH_ALERTS=false)"),
    }

    render_feed("Notifications after update", session);

    let cleared = session.notifications_mut().mark_all_as_read();
    println!("\nMarked {} notifications as read", cleared);
    Ok(())
}

fn run_student_walkthrough(session: &mut Session) -> Result<(), AppError> {
    render_profile(session.profile()?);

    let first_unread = session
        .notifications()
        .list()
        .iter()
        .find(|notification| !notification.is_read())
        .map(|notification| notification.id().clone());

    if let Some(id) = first_unread {
        session.notifications_mut().mark_as_read(&id);
        println!("\nOpened notification {}", id);
    }

    let oldest = session
        .notifications()
        .list()
        .last()
        .map(|notification| notification.id().clone());
    if let Some(id) = oldest {
        if let Some(removed) = session.notifications_mut().remove(&id) {
            println!("Dismissed \"{}\"", removed.title());
        }
    }

    render_feed("Notifications after review", session);
    Ok(())
}

fn render_profile(profile: &StudentProfile) {
    let student = profile.student();
    let metrics = student.metrics();
    println!("\nMy progress: {} ({})", student.name(), student.student_id());
    println!(
        "- Attendance {:.0}% ({}) | assignments {}/{} | test score {:.0}%",
        metrics.attendance_pct(),
        metrics.attendance_remark(),
        metrics.assignments_done(),
        metrics.total_assignments(),
        metrics.test_score_pct()
    );

    let history: Vec<String> = profile
        .attendance_history()
        .iter()
        .map(|point| format!("{} {}%", point.month, point.attendance_pct))
        .collect();
    println!("- Attendance trend: {}", history.join(", "));

    println!();
    render_assessment(&student.assess());
}

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "Risk score: {} ({} risk, {})",
        assessment.score,
        assessment.tier.label(),
        assessment.tier.trend().label()
    );

    println!("\nFactors");
    for kind in FactorKind::ordered() {
        let factor = assessment.factor(kind);
        println!(
            "- {}: {}% (weight {:.0}%, {})",
            factor.name,
            factor.value,
            factor.weight * 100.0,
            factor.status.label()
        );
    }

    let recommendations = recommend(&assessment.factors);
    if recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &recommendations {
            println!("- {}", recommendation);
        }
    }
}

fn render_cohort(roster: &Roster, source: &str) {
    let overview = roster.overview();
    println!("Cohort overview");
    println!("Data source: {}", source);
    println!(
        "- {} students | {} high risk | {}% avg attendance | {}% avg assignment completion",
        overview.total_students,
        overview.high_risk_count,
        overview.average_attendance_pct,
        overview.average_assignment_rate_pct
    );

    if overview.distribution.is_empty() {
        println!("\nRisk distribution: no students");
    } else {
        println!("\nRisk distribution");
        for (tier, share) in overview.distribution.iter() {
            println!(
                "- {}: {} students ({}%)",
                tier.label(),
                share.count,
                share.percentage_pct
            );
        }
    }

    let high_risk = roster.high_risk();
    if high_risk.is_empty() {
        println!("\nHigh risk students: none");
    } else {
        println!("\nHigh risk students");
        for student in high_risk {
            let assessment = student.assess();
            let critical: Vec<&str> = assessment
                .critical_factors()
                .map(|factor| factor.name)
                .collect();
            println!(
                "- {} ({}): score {}, critical {}",
                student.name(),
                student.student_id(),
                assessment.score,
                if critical.is_empty() {
                    "none".to_string()
                } else {
                    critical.join(", ")
                }
            );
        }
    }
}

fn render_feed(heading: &str, session: &Session) {
    let feed = NotificationFeed::from_store(session.notifications(), Utc::now());
    println!("\n{} ({} unread)", heading, feed.unread_count);
    for view in &feed.notifications {
        let marker = if view.read { " " } else { "*" };
        println!(
            "{} [{}] {} - {} ({})",
            marker, view.priority_label, view.title, view.message, view.age_label
        );
    }
}
