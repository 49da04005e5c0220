use asl_core::model::{AnswerResult, Credential, Question, QuestionId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ports::{AnswerVerifier, QuestionSource};
use crate::error::ApiError;
use crate::http::{HttpApi, check_status};

const QUESTION_PATH: &str = "/api/quiz/question";
const VERIFY_PATH: &str = "/api/quiz/verify";

/// REST adapter for both quiz collaborators.
#[derive(Clone, Debug)]
pub struct HttpQuizClient {
    api: HttpApi,
}

impl HttpQuizClient {
    #[must_use]
    pub fn new(api: HttpApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QuestionSource for HttpQuizClient {
    async fn fetch_question(&self, credential: &Credential) -> Result<Question, ApiError> {
        log::debug!("GET {QUESTION_PATH}");
        let response = self.api.get(QUESTION_PATH, credential)?.send().await?;
        let payload: QuestionPayload = check_status(response).await?.json().await?;
        payload.into_question()
    }
}

#[async_trait]
impl AnswerVerifier for HttpQuizClient {
    async fn verify_answer(
        &self,
        credential: &Credential,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<AnswerResult, ApiError> {
        log::debug!("POST {VERIFY_PATH} for {question_id:?}");
        let body = VerifyRequest {
            answer,
            question_id: question_id.as_str(),
        };
        let response = self
            .api
            .post(VERIFY_PATH, Some(credential))?
            .json(&body)
            .send()
            .await?;
        let payload: VerifyPayload = check_status(response).await?.json().await?;
        Ok(payload.into_result())
    }
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question_id: String,
    #[serde(default)]
    video_url: String,
    options: Vec<String>,
}

impl QuestionPayload {
    fn into_question(self) -> Result<Question, ApiError> {
        Question::new(QuestionId::new(self.question_id), self.video_url, self.options)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    answer: &'a str,
    question_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyPayload {
    correct: bool,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    feedback: String,
}

impl VerifyPayload {
    fn into_result(self) -> AnswerResult {
        AnswerResult::new(self.correct, self.correct_answer, self.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_question_payload() {
        let payload: QuestionPayload = serde_json::from_str(
            r#"{"question_id":"q1","video_url":"/videos/q1.mp4","options":["A","B","C"]}"#,
        )
        .unwrap();
        let question = payload.into_question().unwrap();

        assert_eq!(question.id().as_str(), "q1");
        assert_eq!(question.video_url(), "/videos/q1.mp4");
        assert_eq!(question.options(), ["A", "B", "C"]);
    }

    #[test]
    fn single_option_question_is_invalid_response() {
        let payload: QuestionPayload =
            serde_json::from_str(r#"{"question_id":"q1","options":["A"]}"#).unwrap();
        assert!(matches!(
            payload.into_question(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn verify_payload_tolerates_missing_fields() {
        let payload: VerifyPayload = serde_json::from_str(r#"{"correct":true}"#).unwrap();
        let result = payload.into_result();
        assert!(result.is_correct());
        assert_eq!(result.correct_answer(), None);
        assert_eq!(result.feedback(), "");
    }

    #[test]
    fn verify_request_uses_wire_names() {
        let body = VerifyRequest {
            answer: "B",
            question_id: "q1",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "answer": "B", "question_id": "q1" })
        );
    }
}
