/// Verdict returned by the answer verifier for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    correct: bool,
    correct_answer: Option<String>,
    feedback: String,
}

impl AnswerResult {
    #[must_use]
    pub fn new(correct: bool, correct_answer: Option<String>, feedback: impl Into<String>) -> Self {
        Self {
            correct,
            correct_answer,
            feedback: feedback.into(),
        }
    }

    /// Fill in the correct answer for `submitted` when the verifier left it out.
    ///
    /// A correct verdict without an explicit answer means the submission itself was right.
    /// The `correct` flag is authoritative; a reported answer spelled differently from the
    /// submission (casing, canonical form) is kept as-is for highlighting.
    #[must_use]
    pub fn resolve_for(self, submitted: &str) -> Self {
        let correct_answer = match (self.correct, self.correct_answer) {
            (true, None) => Some(submitted.to_string()),
            (_, reported) => reported,
        };
        Self {
            correct_answer,
            ..self
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.correct_answer.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_verdict_without_answer_uses_submission() {
        let result = AnswerResult::new(true, None, "Nice!").resolve_for("B");
        assert_eq!(result.correct_answer(), Some("B"));
        assert!(result.is_correct());
    }

    #[test]
    fn wrong_verdict_keeps_reported_answer() {
        let result = AnswerResult::new(false, Some("B".into()), "Try again next time")
            .resolve_for("A");
        assert_eq!(result.correct_answer(), Some("B"));
        assert_eq!(result.feedback(), "Try again next time");
    }

    #[test]
    fn correct_verdict_keeps_server_spelling() {
        let result = AnswerResult::new(true, Some("Hello".into()), "Correct!").resolve_for("hello");
        assert!(result.is_correct());
        assert_eq!(result.correct_answer(), Some("Hello"));
    }
}
