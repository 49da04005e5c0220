use chrono::{DateTime, Utc};

use crate::model::Question;
use crate::quiz::QuizError;

/// Where the session sits in the fetch / answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Loading,
    Ready,
    Verifying,
    Answered,
    Error,
    Redirecting { redirect_at: DateTime<Utc> },
}

impl QuizPhase {
    /// A collaborator call is outstanding.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Loading | Self::Verifying)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Redirecting { .. })
    }
}

/// View-facing snapshot of the quiz.
///
/// Only `QuizSession` mutates it; everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) current_question: Option<Question>,
    pub(crate) selected_answer: Option<String>,
    pub(crate) is_answered: bool,
    pub(crate) verdict_correct: bool,
    pub(crate) correct_answer: Option<String>,
    pub(crate) feedback: Option<String>,
    pub(crate) score: u32,
    pub(crate) total_questions: u32,
    pub(crate) last_error: Option<QuizError>,
    pub(crate) consecutive_failures: u32,
}

impl SessionState {
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&QuizError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// The recorded verdict for the current question was `correct`.
    #[must_use]
    pub fn answered_correctly(&self) -> bool {
        self.is_answered && self.verdict_correct
    }

    /// A question is on screen and still waiting for its answer.
    #[must_use]
    pub fn awaiting_answer(&self) -> bool {
        self.current_question.is_some() && !self.is_answered
    }

    /// Questions answered wrongly so far.
    ///
    /// Derived from the totals on every call so it can never drift from the score.
    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        let pending = u32::from(self.awaiting_answer());
        self.total_questions
            .saturating_sub(self.score)
            .saturating_sub(pending)
    }

    pub(crate) fn clear_question(&mut self) {
        self.current_question = None;
        self.clear_answer();
    }

    pub(crate) fn clear_answer(&mut self) {
        self.selected_answer = None;
        self.is_answered = false;
        self.verdict_correct = false;
        self.correct_answer = None;
        self.feedback = None;
    }
}
