//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors emitted by the REST backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request was rejected with status {status}")]
    Unauthorized {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed with status {status}")]
    HttpStatus {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Classify a non-success status.
    ///
    /// 401/403 and the 422 the backend's JWT layer uses for malformed tokens mean the
    /// credential was refused; anything else is a plain server failure.
    #[must_use]
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        if is_credential_status(status) {
            Self::Unauthorized { status, message }
        } else {
            Self::HttpStatus { status, message }
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Human-readable message from the backend's `{ "error": ... }` body, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::HttpStatus { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

#[must_use]
pub fn is_credential_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::UNPROCESSABLE_ENTITY
    )
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("required fields are missing")]
    MissingFields,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("signup was rejected: {0}")]
    SignupRejected(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("login response did not include an access token")]
    MissingToken,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("invalid API base url: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_statuses_are_unauthorized() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            assert!(ApiError::from_status(status, None).is_unauthorized(), "{status}");
        }
    }

    #[test]
    fn server_errors_keep_status_and_message() {
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            Some("Not enough words in the dictionary for a quiz.".into()),
        );
        assert!(!err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err.server_message(),
            Some("Not enough words in the dictionary for a quiz.")
        );
    }
}
