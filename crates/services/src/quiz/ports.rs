use asl_core::model::{AnswerResult, Credential, Question, QuestionId};
use async_trait::async_trait;

use crate::error::ApiError;

/// Hands out one quiz question per call for the user behind `credential`.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_question(&self, credential: &Credential) -> Result<Question, ApiError>;
}

/// Judges a submitted answer.
#[async_trait]
pub trait AnswerVerifier: Send + Sync {
    async fn verify_answer(
        &self,
        credential: &Credential,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<AnswerResult, ApiError>;
}
