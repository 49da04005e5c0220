use chrono::{DateTime, Utc};

use crate::model::{AnswerResult, Credential, Question, QuestionId};
use crate::quiz::{QuizError, QuizPhase, QuizSettings, SessionState};
use crate::time::Clock;

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Identifies one started collaborator call.
///
/// Completions carrying any token other than the outstanding one are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Permission to fetch the next question, handed out by [`QuizSession`].
#[derive(Clone, Debug)]
pub struct FetchTicket {
    token: RequestToken,
    credential: Credential,
}

impl FetchTicket {
    #[must_use]
    pub fn token(&self) -> RequestToken {
        self.token
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// Permission to verify one selected option.
#[derive(Clone, Debug)]
pub struct VerifyTicket {
    token: RequestToken,
    credential: Credential,
    question_id: QuestionId,
    answer: String,
}

impl VerifyTicket {
    #[must_use]
    pub fn token(&self) -> RequestToken {
        self.token
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session for one visit to the quiz view.
///
/// The session never performs I/O. Each trigger (`enter`, `select`, `next_question`,
/// `retry`) either returns a ticket describing the call to make, or `None` when the
/// trigger is not allowed right now. The caller runs the call and reports back through
/// `complete_fetch` / `complete_verify`. At most one ticket is outstanding at a time.
#[derive(Debug, Clone)]
pub struct QuizSession {
    state: SessionState,
    phase: QuizPhase,
    settings: QuizSettings,
    clock: Clock,
    credential: Option<Credential>,
    pending: Option<RequestToken>,
    pending_answer: Option<String>,
    issued: u64,
}

impl QuizSession {
    #[must_use]
    pub fn new(credential: Option<Credential>, settings: QuizSettings, clock: Clock) -> Self {
        Self {
            state: SessionState::default(),
            phase: QuizPhase::Idle,
            settings,
            clock,
            credential,
            pending: None,
            pending_answer: None,
            issued: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Option currently being verified, if any.
    #[must_use]
    pub fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.state.incorrect_count()
    }

    #[must_use]
    pub fn redirect_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            QuizPhase::Redirecting { redirect_at } => Some(redirect_at),
            _ => None,
        }
    }

    /// Whether the error currently shown offers a retry control.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        if self.phase != QuizPhase::Error {
            return false;
        }
        match &self.state.last_error {
            Some(QuizError::Verify(_)) => true,
            Some(QuizError::TransientFetch(_)) => self
                .settings
                .retry
                .allows_retry_after(self.state.consecutive_failures),
            _ => false,
        }
    }

    /// Whether `option` may be submitted right now.
    #[must_use]
    pub fn can_select(&self) -> bool {
        let selectable = match self.phase {
            QuizPhase::Ready => true,
            QuizPhase::Error => matches!(self.state.last_error, Some(QuizError::Verify(_))),
            _ => false,
        };
        selectable && self.state.awaiting_answer()
    }

    //
    // ─── TRIGGERS ──────────────────────────────────────────────────────────────
    //

    /// Start the session when the view is entered.
    ///
    /// Without a credential the session goes straight to `Redirecting`.
    pub fn enter(&mut self) -> Option<FetchTicket> {
        if self.phase != QuizPhase::Idle {
            log::debug!("quiz: enter ignored in {:?}", self.phase);
            return None;
        }
        self.start_fetch()
    }

    /// Ask for the next question once the current one is answered.
    pub fn next_question(&mut self) -> Option<FetchTicket> {
        if self.phase != QuizPhase::Answered {
            log::debug!("quiz: next ignored in {:?}", self.phase);
            return None;
        }
        self.start_fetch()
    }

    /// Explicit retry from the error state.
    ///
    /// After a failed fetch this re-issues the fetch (while the retry policy allows it).
    /// After a failed verification it returns the question to `Ready` so the user can
    /// select again; no call is needed, so `None` is returned.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !self.can_retry() {
            log::debug!(
                "quiz: retry ignored in {:?} after {} failures",
                self.phase,
                self.state.consecutive_failures
            );
            return None;
        }
        match self.state.last_error {
            Some(QuizError::Verify(_)) => {
                self.state.last_error = None;
                self.phase = QuizPhase::Ready;
                None
            }
            _ => self.start_fetch(),
        }
    }

    /// Submit `option` for the question on screen.
    ///
    /// Ignored once the question is answered, while a call is in flight, or when
    /// `option` is not one of the question's options.
    pub fn select(&mut self, option: &str) -> Option<VerifyTicket> {
        if !self.can_select() {
            log::debug!("quiz: selection ignored in {:?}", self.phase);
            return None;
        }
        let question_id = match self.state.current_question.as_ref() {
            Some(question) if question.has_option(option) => question.id().clone(),
            Some(question) => {
                log::warn!("quiz: {option:?} is not an option of {:?}", question.id());
                return None;
            }
            None => return None,
        };
        let Some(credential) = self.credential.clone() else {
            self.redirect(QuizError::missing_credential());
            return None;
        };

        let token = self.issue_token();
        self.state.last_error = None;
        self.pending_answer = Some(option.to_string());
        self.phase = QuizPhase::Verifying;
        Some(VerifyTicket {
            token,
            credential,
            question_id,
            answer: option.to_string(),
        })
    }

    //
    // ─── COMPLETIONS ───────────────────────────────────────────────────────────
    //

    /// Apply the outcome of a question fetch. Returns `false` if the ticket is stale.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Question, QuizError>,
    ) -> bool {
        if self.phase != QuizPhase::Loading || !self.is_outstanding(ticket.token) {
            log::debug!("quiz: stale fetch completion {:?} dropped", ticket.token);
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(question) => {
                log::debug!("quiz: question {:?} ready", question.id());
                self.state.clear_answer();
                self.state.current_question = Some(question);
                self.state.total_questions = self.state.total_questions.saturating_add(1);
                self.state.consecutive_failures = 0;
                self.state.last_error = None;
                self.phase = QuizPhase::Ready;
            }
            Err(err) if err.is_credential() => self.redirect(err),
            Err(err) => {
                let err = match err {
                    QuizError::Verify(message) => QuizError::TransientFetch(message),
                    other => other,
                };
                self.state.consecutive_failures = self.state.consecutive_failures.saturating_add(1);
                log::debug!(
                    "quiz: fetch failed ({} in a row): {err}",
                    self.state.consecutive_failures
                );
                self.state.last_error = Some(err);
                self.phase = QuizPhase::Error;
            }
        }
        true
    }

    /// Apply the verifier's verdict. Returns `false` if the ticket is stale.
    pub fn complete_verify(
        &mut self,
        ticket: &VerifyTicket,
        outcome: Result<AnswerResult, QuizError>,
    ) -> bool {
        if self.phase != QuizPhase::Verifying || !self.is_outstanding(ticket.token) {
            log::debug!("quiz: stale verify completion {:?} dropped", ticket.token);
            return false;
        }
        self.pending = None;
        self.pending_answer = None;

        match outcome.map(|result| result.resolve_for(&ticket.answer)) {
            Ok(result) => {
                if result.is_correct() {
                    self.state.score = self.state.score.saturating_add(1);
                }
                self.state.selected_answer = Some(ticket.answer.clone());
                self.state.is_answered = true;
                self.state.verdict_correct = result.is_correct();
                self.state.correct_answer = result.correct_answer().map(str::to_string);
                self.state.feedback =
                    Some(result.feedback().to_string()).filter(|text| !text.is_empty());
                self.state.last_error = None;
                self.phase = QuizPhase::Answered;
            }
            Err(err) if err.is_credential() => self.redirect(err),
            Err(err) => {
                let err = match err {
                    QuizError::TransientFetch(message) => QuizError::Verify(message),
                    other => other,
                };
                log::debug!("quiz: verification failed: {err}");
                self.state.last_error = Some(err);
                self.phase = QuizPhase::Error;
            }
        }
        true
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn start_fetch(&mut self) -> Option<FetchTicket> {
        let Some(credential) = self.credential.clone() else {
            self.redirect(QuizError::missing_credential());
            return None;
        };

        let token = self.issue_token();
        self.state.clear_question();
        self.state.last_error = None;
        self.phase = QuizPhase::Loading;
        Some(FetchTicket { token, credential })
    }

    fn redirect(&mut self, err: QuizError) {
        let redirect_at = self.clock.deadline_after(self.settings.redirect_delay);
        log::info!("quiz: redirecting to login at {redirect_at}: {err}");
        self.pending = None;
        self.pending_answer = None;
        self.state.last_error = Some(err);
        self.phase = QuizPhase::Redirecting { redirect_at };
    }

    fn issue_token(&mut self) -> RequestToken {
        self.issued = self.issued.wrapping_add(1);
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        token
    }

    fn is_outstanding(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }
}
