mod answer;
mod credential;
mod ids;
mod playlist;
mod progress;
mod question;
mod user;

pub use answer::AnswerResult;
pub use credential::Credential;
pub use ids::{QuestionId, UserId, VideoId};
pub use playlist::PlaylistVideo;
pub use progress::LearningProgress;
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use user::UserProfile;
