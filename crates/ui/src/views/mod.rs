mod login;
mod progress;
mod quiz;
mod signup;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use login::LoginView;
pub use progress::ProgressView;
pub use quiz::QuizView;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};
