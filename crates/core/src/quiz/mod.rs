//! Client-side quiz session flow: fetch a question, take one answer, score it, advance.

mod error;
mod session;
mod settings;
mod state;

pub use error::QuizError;
pub use session::{FetchTicket, QuizSession, RequestToken, VerifyTicket};
pub use settings::{DEFAULT_REDIRECT_DELAY, QuizSettings, RetryPolicy};
pub use state::{QuizPhase, SessionState};
