use crate::infra::{AppState, InMemorySessionRegistry, SessionToken, SESSION_HEADER};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use edupulse::display::BadgeVariant;
use edupulse::error::AppError;
use edupulse::notifications::{NotificationFeed, NotificationId};
use edupulse::profile::{StudentProfile, StudentSelfView};
use edupulse::risk::{
    assess, recommend, MetricsRecord, RiskAssessment, RiskDistribution, RiskTrend,
};
use edupulse::roster::{import_csv, CohortOverview, Roster, StudentRecord, StudentRiskView};
use edupulse::session::{
    ImportSummary, Role, Session, SessionContext, SessionError, SessionSummary, StudentUpsert,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct OpenSessionRequest {
    pub(crate) role: String,
    pub(crate) identity: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionOpened {
    pub(crate) token: SessionToken,
    pub(crate) role: Role,
    pub(crate) identity: String,
    pub(crate) unread_count: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    #[serde(default)]
    pub(crate) student_id: Option<String>,
    pub(crate) attendance: f64,
    pub(crate) assignments_done: u32,
    pub(crate) total_assignments: u32,
    #[serde(default)]
    pub(crate) test_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessResponse {
    pub(crate) assessment: RiskAssessment,
    pub(crate) tier_badge: BadgeVariant,
    pub(crate) trend: RiskTrend,
    pub(crate) attendance_remark: &'static str,
    pub(crate) recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentSubmission {
    pub(crate) student_id: String,
    pub(crate) name: String,
    pub(crate) attendance: f64,
    pub(crate) assignments_done: u32,
    pub(crate) total_assignments: u32,
    #[serde(default)]
    pub(crate) test_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentSubmitted {
    pub(crate) student: StudentRiskView,
    pub(crate) outcome: StudentUpsert,
}

#[derive(Debug, Serialize)]
pub(crate) struct CohortResponse {
    pub(crate) overview: CohortOverview,
    pub(crate) students: Vec<StudentRiskView>,
}

/// Full service router: probes and metrics plus the dashboard API.
pub(crate) fn with_dashboard_routes(sessions: InMemorySessionRegistry) -> Router {
    dashboard_router(sessions)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) fn dashboard_router(sessions: InMemorySessionRegistry) -> Router {
    Router::new()
        .route("/api/v1/sessions", post(open_session))
        .route("/api/v1/sessions/current", delete(close_session))
        .route("/api/v1/notifications", get(list_notifications))
        .route("/api/v1/notifications/read-all", post(mark_all_read))
        .route("/api/v1/notifications/:notification_id/read", post(mark_read))
        .route(
            "/api/v1/notifications/:notification_id",
            delete(remove_notification),
        )
        .route("/api/v1/me", get(profile_endpoint))
        .route("/api/v1/assess", post(assess_endpoint))
        .route("/api/v1/cohort", get(cohort_endpoint))
        .route("/api/v1/cohort/students", post(upsert_student_endpoint))
        .route("/api/v1/cohort/import", post(import_endpoint))
        .route("/api/v1/cohort/diversity", get(diversity_endpoint))
        .with_state(sessions)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn session_token(headers: &HeaderMap) -> Result<SessionToken, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| SessionToken(value.to_string()))
        .ok_or(AppError::Session(SessionError::UnknownSession))
}

fn feed(session: &Session) -> NotificationFeed {
    NotificationFeed::from_store(session.notifications(), Utc::now())
}

pub(crate) async fn open_session(
    State(sessions): State<InMemorySessionRegistry>,
    Json(payload): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionOpened>), AppError> {
    let role: Role = payload.role.parse()?;
    let context = SessionContext::new(role, payload.identity)?;
    let identity = context.identity.clone();

    let (token, unread_count) = sessions.open(context, Utc::now(), |session| {
        session.notifications().unread_count()
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SessionOpened {
            token,
            role,
            identity,
            unread_count,
        }),
    ))
}

pub(crate) async fn close_session(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<SessionSummary>, AppError> {
    let token = session_token(&headers)?;
    Ok(Json(sessions.close(&token)?))
}

pub(crate) async fn list_notifications(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<NotificationFeed>, AppError> {
    let token = session_token(&headers)?;
    Ok(Json(sessions.with_session(&token, |session| feed(session))?))
}

pub(crate) async fn mark_read(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Result<Json<NotificationFeed>, AppError> {
    let token = session_token(&headers)?;
    let id = NotificationId(notification_id);
    let payload = sessions.with_session(&token, |session| {
        session.notifications_mut().mark_as_read(&id);
        feed(session)
    })?;
    Ok(Json(payload))
}

pub(crate) async fn mark_all_read(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<NotificationFeed>, AppError> {
    let token = session_token(&headers)?;
    let payload = sessions.with_session(&token, |session| {
        session.notifications_mut().mark_all_as_read();
        feed(session)
    })?;
    Ok(Json(payload))
}

pub(crate) async fn remove_notification(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Result<Json<NotificationFeed>, AppError> {
    let token = session_token(&headers)?;
    let id = NotificationId(notification_id);
    let payload = sessions.with_session(&token, |session| {
        session.notifications_mut().remove(&id);
        feed(session)
    })?;
    Ok(Json(payload))
}

pub(crate) async fn profile_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<StudentSelfView>, AppError> {
    let token = session_token(&headers)?;
    let view = sessions.with_session(&token, |session| {
        session.profile().map(StudentProfile::view)
    })??;
    Ok(Json(view))
}

pub(crate) async fn assess_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, AppError> {
    let token = session_token(&headers)?;
    let default_test_score = sessions.with_session(&token, |session| {
        session.scoring().default_test_score
    })?;

    let record = MetricsRecord::new(
        payload.student_id.unwrap_or_else(|| "adhoc".to_string()),
        payload.attendance,
        payload.assignments_done,
        payload.total_assignments,
        payload.test_score.unwrap_or(default_test_score),
    )?;

    let assessment = assess(&record);
    let recommendations = recommend(&assessment.factors);
    Ok(Json(AssessResponse {
        tier_badge: assessment.tier.badge(),
        trend: assessment.tier.trend(),
        attendance_remark: record.attendance_remark(),
        assessment,
        recommendations,
    }))
}

pub(crate) async fn cohort_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<CohortResponse>, AppError> {
    let token = session_token(&headers)?;
    let payload = sessions.with_session(&token, |session| {
        session.roster().map(|roster| CohortResponse {
            overview: roster.overview(),
            students: roster.views(),
        })
    })??;
    Ok(Json(payload))
}

pub(crate) async fn upsert_student_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
    Json(payload): Json<StudentSubmission>,
) -> Result<Json<StudentSubmitted>, AppError> {
    let token = session_token(&headers)?;
    let submitted = sessions.with_session(&token, |session| -> Result<_, AppError> {
        session.roster()?;
        let metrics = MetricsRecord::new(
            payload.student_id,
            payload.attendance,
            payload.assignments_done,
            payload.total_assignments,
            payload
                .test_score
                .unwrap_or(session.scoring().default_test_score),
        )?;
        let student = StudentRecord::new(payload.name, metrics)?;
        let view = StudentRiskView::new(&student);
        let outcome = session.upsert_student(student, Utc::now())?;
        Ok(StudentSubmitted {
            student: view,
            outcome,
        })
    })??;
    Ok(Json(submitted))
}

pub(crate) async fn import_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportSummary>, AppError> {
    let token = session_token(&headers)?;
    let summary = sessions.with_session(&token, |session| -> Result<_, AppError> {
        session.roster()?;
        let students = import_csv(body.as_bytes(), session.scoring().default_test_score)?;
        Ok(session.import_students(students, Utc::now())?)
    })??;
    Ok(Json(summary))
}

pub(crate) async fn diversity_endpoint(
    State(sessions): State<InMemorySessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<RiskDistribution>, AppError> {
    let token = session_token(&headers)?;
    let distribution =
        sessions.with_session(&token, |session| session.roster().map(Roster::diversity))??;
    Ok(Json(distribution))
}
