use asl_core::quiz::{QuizError, QuizPhase, QuizSession};
use services::{Clock, Url, resolve_url};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    Next,
    Retry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionTone {
    Neutral,
    Pending,
    Correct,
    Incorrect,
}

impl OptionTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "quiz-option--neutral",
            Self::Pending => "quiz-option--pending",
            Self::Correct => "quiz-option--correct",
            Self::Incorrect => "quiz-option--incorrect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub label: String,
    pub tone: OptionTone,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizStatsVm {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizFeedbackVm {
    pub correct: bool,
    pub title: &'static str,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizNoticeVm {
    pub message: String,
    pub can_retry: bool,
    /// Whole seconds until the login redirect, when one is scheduled.
    pub redirect_in_secs: Option<u64>,
    pub exhausted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub heading: String,
    pub video_url: String,
    pub options: Vec<QuizOptionVm>,
    pub feedback: Option<QuizFeedbackVm>,
    pub can_advance: bool,
}

/// Render-ready snapshot of a [`QuizSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub loading: bool,
    pub verifying: bool,
    pub card: Option<QuizCardVm>,
    pub notice: Option<QuizNoticeVm>,
    pub stats: QuizStatsVm,
}

#[must_use]
pub fn map_quiz(session: &QuizSession, clock: &Clock, api_base_url: &Url) -> QuizVm {
    let state = session.state();
    let phase = session.phase();
    let can_select = session.can_select();

    let card = state.current_question().map(|question| {
        let options = question
            .options()
            .iter()
            .map(|option| QuizOptionVm {
                label: option.clone(),
                tone: option_tone(session, option),
                disabled: !can_select,
            })
            .collect();
        QuizCardVm {
            heading: format!("Question {}", state.total_questions()),
            video_url: media_url(api_base_url, question.video_url()),
            options,
            feedback: feedback(session),
            can_advance: phase == QuizPhase::Answered,
        }
    });

    QuizVm {
        loading: phase == QuizPhase::Loading,
        verifying: phase == QuizPhase::Verifying,
        card,
        notice: notice(session, clock),
        stats: QuizStatsVm {
            correct: state.score(),
            incorrect: session.incorrect_count(),
            total: state.total_questions(),
        },
    }
}

fn option_tone(session: &QuizSession, option: &str) -> OptionTone {
    let state = session.state();
    if !state.is_answered() {
        return if session.pending_answer() == Some(option) {
            OptionTone::Pending
        } else {
            OptionTone::Neutral
        };
    }
    let selected = state.selected_answer() == Some(option);
    if selected {
        if state.answered_correctly() {
            OptionTone::Correct
        } else {
            OptionTone::Incorrect
        }
    } else if !state.answered_correctly() && state.correct_answer() == Some(option) {
        OptionTone::Correct
    } else {
        OptionTone::Neutral
    }
}

fn feedback(session: &QuizSession) -> Option<QuizFeedbackVm> {
    let state = session.state();
    if !state.is_answered() {
        return None;
    }
    let correct = state.answered_correctly();
    let message = state.feedback().map(str::to_string).or_else(|| {
        (!correct)
            .then(|| state.correct_answer().map(|answer| format!("The answer was {answer}.")))
            .flatten()
    });
    Some(QuizFeedbackVm {
        correct,
        title: if correct { "Correct!" } else { "Not quite" },
        message,
    })
}

fn notice(session: &QuizSession, clock: &Clock) -> Option<QuizNoticeVm> {
    if let Some(redirect_at) = session.redirect_at() {
        let message = session
            .state()
            .last_error()
            .map_or(QuizError::MISSING_CREDENTIAL, QuizError::message);
        let remaining = clock.remaining_until(redirect_at);
        return Some(QuizNoticeVm {
            message: message.to_string(),
            can_retry: false,
            redirect_in_secs: Some(remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)),
            exhausted: false,
        });
    }
    if session.phase() != QuizPhase::Error {
        return None;
    }
    let error = session.state().last_error()?;
    let can_retry = session.can_retry();
    Some(QuizNoticeVm {
        message: error.message().to_string(),
        can_retry,
        redirect_in_secs: None,
        exhausted: !can_retry && matches!(error, QuizError::TransientFetch(_)),
    })
}

/// Question videos are served by the backend; relative links resolve against its base URL.
///
/// An empty or unresolvable link is returned unchanged.
#[must_use]
pub fn media_url(api_base_url: &Url, video_url: &str) -> String {
    resolve_url(api_base_url, video_url).map_or_else(|| video_url.to_string(), String::from)
}
