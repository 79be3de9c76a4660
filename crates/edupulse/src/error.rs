use crate::config::ConfigError;
use crate::risk::MetricsError;
use crate::roster::ImportError;
use crate::session::SessionError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Metrics(MetricsError),
    Import(ImportError),
    Session(SessionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Metrics(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Import(ImportError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::UnknownSession) => StatusCode::UNAUTHORIZED,
            AppError::Session(SessionError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::Session(SessionError::InvalidProfile(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Session(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Metrics(err) => write!(f, "invalid student metrics: {}", err),
            AppError::Import(err) => write!(f, "import failed: {}", err),
            AppError::Session(err) => write!(f, "session error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Metrics(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Session(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<MetricsError> for AppError {
    fn from(value: MetricsError) -> Self {
        Self::Metrics(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn maps_domain_errors_to_client_statuses() {
        assert_eq!(
            AppError::from(MetricsError::ZeroTotalAssignments).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(SessionError::UnknownSession).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(SessionError::Forbidden {
                required: Role::Teacher,
                actual: Role::Student,
            })
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(SessionError::InvalidProfile(
                MetricsError::ZeroTotalAssignments
            ))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ConfigError::InvalidPort).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_body_carries_message() {
        let response = AppError::from(MetricsError::ZeroTotalAssignments).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
