//! HTTP and startup error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use emojimovie_core::db::DbError;
use emojimovie_core::{ConfigError, ServiceError, SourceError};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Handler-level failure mapped onto a status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(detail) | Self::Internal(detail) => detail,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status().as_u16(), self.detail())
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Empty => Self::NotFound(ServiceError::Empty.to_string()),
            ServiceError::Repo(err) => {
                error!(
                    "event=request module=server status=error error_code=repo_failed error={}",
                    err
                );
                Self::Internal("storage error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.detail().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failure while building server state or binding the listener.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Service(ServiceError),
    Source(SourceError),
    Io(std::io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "database init failed: {err}"),
            Self::Service(err) => write!(f, "seeding failed: {err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for StartupError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ServiceError> for StartupError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<SourceError> for StartupError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
