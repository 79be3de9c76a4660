use chrono::{DateTime, Utc};
use edupulse::config::ScoringConfig;
use edupulse::session::{Session, SessionContext, SessionError, SessionSummary};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const SESSION_HEADER: &str = "x-session-token";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Handle returned when a role signs in.
///
/// Tokens are built from the open sequence and the sign-in timestamp, so they are
/// guessable. They key an unauthenticated demo session and are not a credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct SessionToken(pub(crate) String);

/// Live sessions keyed by token.
///
/// Every access runs under the registry mutex, so each notification-store operation is
/// one critical section with respect to the unread counter.
#[derive(Clone)]
pub(crate) struct InMemorySessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionToken, Session>>>,
    sequence: Arc<AtomicU64>,
    scoring: ScoringConfig,
}

impl InMemorySessionRegistry {
    pub(crate) fn new(scoring: ScoringConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            sequence: Arc::new(AtomicU64::new(1)),
            scoring,
        }
    }

    /// Starts a session; the returned closure result is computed while the new session
    /// is still exclusively held.
    pub(crate) fn open<T>(
        &self,
        context: SessionContext,
        now: DateTime<Utc>,
        inspect: impl FnOnce(&Session) -> T,
    ) -> Result<(SessionToken, T), SessionError> {
        let session = Session::init(context, self.scoring, now)?;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let token = SessionToken(format!(
            "sess-{sequence:06}-{:x}",
            now.timestamp_nanos_opt().unwrap_or_default()
        ));
        let inspected = inspect(&session);

        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        guard.insert(token.clone(), session);
        Ok((token, inspected))
    }

    pub(crate) fn close(&self, token: &SessionToken) -> Result<SessionSummary, SessionError> {
        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        guard
            .remove(token)
            .map(Session::teardown)
            .ok_or(SessionError::UnknownSession)
    }

    pub(crate) fn with_session<T>(
        &self,
        token: &SessionToken,
        apply: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, SessionError> {
        let mut guard = self.sessions.lock().expect("session registry mutex poisoned");
        let session = guard.get_mut(token).ok_or(SessionError::UnknownSession)?;
        Ok(apply(session))
    }

    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.sessions
            .lock()
            .expect("session registry mutex poisoned")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edupulse::session::Role;

    #[test]
    fn open_and_close_round_trip() {
        let registry = InMemorySessionRegistry::new(ScoringConfig::default());
        let context = SessionContext::new(Role::Student, "ST001").expect("valid context");
        let (token, unread) = registry
            .open(context, Utc::now(), |s| s.notifications().unread_count())
            .expect("session opens");

        assert_eq!(unread, 2);
        assert_eq!(registry.active(), 1);

        let summary = registry.close(&token).expect("session closes");
        assert_eq!(summary.role, Role::Student);
        assert_eq!(registry.active(), 0);
        assert_eq!(registry.close(&token), Err(SessionError::UnknownSession));
    }

    #[test]
    fn tokens_are_distinct() {
        let registry = InMemorySessionRegistry::new(ScoringConfig::default());
        let now = Utc::now();
        let first = SessionContext::new(Role::Teacher, "T-1").expect("valid context");
        let second = SessionContext::new(Role::Teacher, "T-1").expect("valid context");
        let (a, _) = registry.open(first, now, |_| ()).expect("session opens");
        let (b, _) = registry.open(second, now, |_| ()).expect("session opens");
        assert_ne!(a, b);
    }

    #[test]
    fn tokens_encode_the_open_sequence() {
        let registry = InMemorySessionRegistry::new(ScoringConfig::default());
        let context = SessionContext::new(Role::Teacher, "T-2").expect("valid context");
        let (token, _) = registry.open(context, Utc::now(), |_| ()).expect("session opens");
        assert!(token.0.starts_with("sess-000001-"), "token was {}", token.0);
    }

    #[test]
    fn failed_sign_in_leaves_no_session_behind() {
        let registry = InMemorySessionRegistry::new(ScoringConfig {
            default_test_score: 120.0,
            ..ScoringConfig::default()
        });
        let context = SessionContext::new(Role::Student, "ST002").expect("valid context");
        assert!(matches!(
            registry.open(context, Utc::now(), |_| ()),
            Err(SessionError::InvalidProfile(_))
        ));
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let registry = InMemorySessionRegistry::new(ScoringConfig::default());
        let token = SessionToken("sess-missing".to_string());
        assert_eq!(
            registry.with_session(&token, |s| s.notifications().len()),
            Err(SessionError::UnknownSession)
        );
    }
}
