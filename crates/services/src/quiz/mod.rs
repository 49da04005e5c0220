mod http_client;
mod ports;
mod workflow;

// Public API of the quiz subsystem.
pub use http_client::HttpQuizClient;
pub use ports::{AnswerVerifier, QuestionSource};
pub use workflow::QuizLoopService;
