use std::sync::Arc;

use asl_core::model::{AnswerResult, Credential, Question};
use asl_core::quiz::{FetchTicket, QuizError, QuizPhase, QuizSession, QuizSettings, VerifyTicket};

use super::ports::{AnswerVerifier, QuestionSource};
use crate::Clock;
use crate::error::ApiError;

/// Runs the network side of a [`QuizSession`].
///
/// Callers that can hold the session across an await use the one-shot methods
/// (`enter`, `select_answer`, ...). UI code that must keep rendering while a call is in
/// flight takes a ticket from the session itself and uses `fetch` / `verify`, then hands
/// the outcome back to the session.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    questions: Arc<dyn QuestionSource>,
    verifier: Arc<dyn AnswerVerifier>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        verifier: Arc<dyn AnswerVerifier>,
    ) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            questions,
            verifier,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Fresh session for one visit to the quiz view.
    #[must_use]
    pub fn new_session(&self, credential: Option<Credential>) -> QuizSession {
        QuizSession::new(credential, self.settings, self.clock)
    }

    /// Run the fetch a ticket grants, classifying failures.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Question, QuizError> {
        self.questions
            .fetch_question(ticket.credential())
            .await
            .map_err(fetch_error)
    }

    /// Run the verification a ticket grants, classifying failures.
    pub async fn verify(&self, ticket: &VerifyTicket) -> Result<AnswerResult, QuizError> {
        self.verifier
            .verify_answer(ticket.credential(), ticket.question_id(), ticket.answer())
            .await
            .map_err(verify_error)
    }

    /// Enter the session and load the first question.
    pub async fn enter(&self, session: &mut QuizSession) -> QuizPhase {
        let ticket = session.enter();
        self.run_fetch(session, ticket).await
    }

    pub async fn next_question(&self, session: &mut QuizSession) -> QuizPhase {
        let ticket = session.next_question();
        self.run_fetch(session, ticket).await
    }

    pub async fn retry(&self, session: &mut QuizSession) -> QuizPhase {
        let ticket = session.retry();
        self.run_fetch(session, ticket).await
    }

    /// Submit `option` and record the verdict.
    pub async fn select_answer(&self, session: &mut QuizSession, option: &str) -> QuizPhase {
        let Some(ticket) = session.select(option) else {
            return session.phase();
        };
        let outcome = self.verify(&ticket).await;
        session.complete_verify(&ticket, outcome);
        session.phase()
    }

    async fn run_fetch(&self, session: &mut QuizSession, ticket: Option<FetchTicket>) -> QuizPhase {
        let Some(ticket) = ticket else {
            return session.phase();
        };
        let outcome = self.fetch(&ticket).await;
        session.complete_fetch(&ticket, outcome);
        session.phase()
    }
}

fn fetch_error(err: ApiError) -> QuizError {
    if err.is_unauthorized() {
        log::warn!("question fetch refused the credential: {err}");
        return QuizError::rejected_credential();
    }
    log::warn!("question fetch failed: {err}");
    let message = match (err.server_message(), err.status()) {
        (Some(message), _) => message.to_string(),
        (None, Some(status)) => format!(
            "Unable to fetch question ({}). Please try again.",
            status.as_u16()
        ),
        (None, None) => "Unable to fetch question. Please try again.".to_string(),
    };
    QuizError::TransientFetch(message)
}

fn verify_error(err: ApiError) -> QuizError {
    if err.is_unauthorized() {
        log::warn!("answer verification refused the credential: {err}");
        return QuizError::rejected_credential();
    }
    log::warn!("answer verification failed: {err}");
    let message = err.server_message().map_or_else(
        || "Failed to verify answer. Please try again.".to_string(),
        str::to_string,
    );
    QuizError::Verify(message)
}
