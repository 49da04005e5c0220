use thiserror::Error;

use crate::model::QuestionId;

/// Fewest options a question may offer.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id is empty")]
    EmptyId,

    #[error("question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },
}

/// A single multiple-choice quiz question.
///
/// Options keep the order the backend sent them in; that order is the display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    video_url: String,
    options: Vec<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyId` for a blank id and
    /// `QuestionError::TooFewOptions` when fewer than [`MIN_OPTIONS`] options are given.
    pub fn new(
        id: QuestionId,
        video_url: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        if id.as_str().trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }

        Ok(Self {
            id,
            video_url: video_url.into(),
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn keeps_option_order_and_duplicates() {
        let question = Question::new(
            QuestionId::new("q1"),
            "/videos/q1.mp4",
            options(&["C", "A", "C"]),
        )
        .unwrap();

        assert_eq!(question.options(), ["C", "A", "C"]);
        assert!(question.has_option("A"));
        assert!(!question.has_option("B"));
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new("q1"), "", options(&["A"])).unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn rejects_blank_id() {
        let err = Question::new(QuestionId::new("  "), "", options(&["A", "B"])).unwrap_err();
        assert_eq!(err, QuestionError::EmptyId);
    }
}
