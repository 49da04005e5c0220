use thiserror::Error;

/// Failures the quiz flow knows how to recover from (or not).
///
/// The variant decides the recovery path; the message is only for display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    /// The question could not be fetched. Recovered by an explicit retry.
    #[error("{0}")]
    TransientFetch(String),

    /// The answer could not be verified. Recovered by selecting again.
    #[error("{0}")]
    Verify(String),

    /// Credential missing or rejected. Fatal for the session.
    #[error("{0}")]
    Credential(String),
}

impl QuizError {
    pub const MISSING_CREDENTIAL: &'static str =
        "You must be logged in to take the quiz. Redirecting...";
    pub const REJECTED_CREDENTIAL: &'static str =
        "Your session has expired. Please log in again. Redirecting...";

    #[must_use]
    pub fn missing_credential() -> Self {
        Self::Credential(Self::MISSING_CREDENTIAL.to_string())
    }

    #[must_use]
    pub fn rejected_credential() -> Self {
        Self::Credential(Self::REJECTED_CREDENTIAL.to_string())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::TransientFetch(message) | Self::Verify(message) | Self::Credential(message) => {
                message
            }
        }
    }

    #[must_use]
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential(_))
    }
}
