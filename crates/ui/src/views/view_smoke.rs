use std::sync::Arc;

use std::time::Duration;

use asl_core::quiz::{QuizError, QuizPhase, QuizSettings};
use services::StatusCode;

use super::test_harness::{
    ScriptedQuiz, ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_settings,
};
use crate::vm::QuizIntent;

async fn quiz_harness(quiz: ScriptedQuiz, credential: Option<&str>) -> ViewHarness {
    let mut harness = setup_view_harness(ViewKind::Quiz, credential, Arc::new(quiz));
    harness.rebuild();
    harness.settle().await;
    harness
}

async fn dispatch(harness: &mut ViewHarness, intent: QuizIntent) {
    let callback = harness.quiz_handles().dispatch();
    harness.dom.in_runtime(|| callback.call(intent));
    harness.settle().await;
}

fn phase(harness: &ViewHarness) -> QuizPhase {
    let session = harness.quiz_handles().session();
    harness.dom.in_runtime(|| session.peek().phase())
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let quiz = ScriptedQuiz::default();
    quiz.question("q1", &["Hello", "Thanks", "Please"]);

    let harness = quiz_harness(quiz, Some("token")).await;
    let html = harness.render();

    assert_eq!(phase(&harness), QuizPhase::Ready);
    assert!(html.contains("Question 1"), "missing heading in {html}");
    for option in ["Hello", "Thanks", "Please"] {
        assert!(html.contains(option), "missing {option} in {html}");
    }
    assert!(
        html.contains("http://127.0.0.1:9/videos/q1.mp4"),
        "missing video in {html}"
    );
    assert!(html.contains("Total Questions"), "missing stats in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_feedback_then_loads_next_question() {
    let quiz = ScriptedQuiz::default();
    quiz.question("q1", &["Hello", "Thanks"])
        .verdict(false, "Hello", "")
        .question("q2", &["Yes", "No"]);
    let mut harness = quiz_harness(quiz, Some("token")).await;

    dispatch(&mut harness, QuizIntent::Select("Thanks".into())).await;
    let html = harness.render();
    assert_eq!(phase(&harness), QuizPhase::Answered);
    assert!(html.contains("Not quite"), "missing feedback in {html}");
    assert!(html.contains("The answer was Hello."), "missing answer in {html}");
    assert!(html.contains("Next Question"), "missing next in {html}");
    assert!(html.contains("quiz-option--incorrect"), "missing tone in {html}");

    dispatch(&mut harness, QuizIntent::Next).await;
    let html = harness.render();
    assert_eq!(phase(&harness), QuizPhase::Ready);
    assert!(html.contains("Question 2"), "missing heading in {html}");
    assert!(!html.contains("Not quite"), "stale feedback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_offers_retry_after_server_error() {
    let quiz = ScriptedQuiz::default();
    quiz.question_error(StatusCode::INTERNAL_SERVER_ERROR)
        .question("q1", &["Hello", "Thanks"]);
    let mut harness = quiz_harness(quiz, Some("token")).await;

    let html = harness.render();
    assert_eq!(phase(&harness), QuizPhase::Error);
    assert!(
        html.contains("Unable to fetch question (500). Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("Try Again"), "missing retry in {html}");

    dispatch(&mut harness, QuizIntent::Retry).await;
    let html = harness.render();
    assert!(html.contains("Question 1"), "missing heading in {html}");
    assert!(!html.contains("Try Again"), "stale retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_credential_announces_redirect() {
    let harness = quiz_harness(ScriptedQuiz::default(), None).await;
    let html = harness.render();

    assert!(phase(&harness).is_terminal());
    assert!(
        html.contains(QuizError::MISSING_CREDENTIAL),
        "missing notice in {html}"
    );
    assert!(html.contains("in 3s"), "missing countdown in {html}");
    assert!(!html.contains("Try Again"), "unexpected retry in {html}");
}

async fn app_harness_with_immediate_redirect(
    quiz: ScriptedQuiz,
    credential: Option<&str>,
) -> ViewHarness {
    let settings = QuizSettings {
        redirect_delay: Duration::ZERO,
        ..QuizSettings::default()
    };
    let mut harness =
        setup_view_harness_with_settings(ViewKind::App, credential, Arc::new(quiz), settings);
    harness.rebuild();
    harness.settle().await;
    harness
}

fn assert_on_login_page(html: &str) {
    assert!(html.contains("login-form"), "expected login page in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(!html.contains("quiz-page"), "quiz still mounted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_credential_lands_on_login_page() {
    let harness = app_harness_with_immediate_redirect(ScriptedQuiz::default(), None).await;
    assert_on_login_page(&harness.render());
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_credential_lands_on_login_page() {
    let quiz = ScriptedQuiz::default();
    quiz.question_error(StatusCode::UNAUTHORIZED);

    let harness = app_harness_with_immediate_redirect(quiz, Some("expired")).await;
    assert_on_login_page(&harness.render());
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, None, Arc::new(ScriptedQuiz::default()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Email"), "missing email field in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(html.contains("Log in"), "missing submit in {html}");
    assert!(html.contains("Sign up"), "missing signup link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn signup_view_smoke_renders_form() {
    let mut harness =
        setup_view_harness(ViewKind::Signup, None, Arc::new(ScriptedQuiz::default()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("signup-form"), "missing form in {html}");
    assert!(html.contains("Name"), "missing name field in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(!html.contains("signup-error"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_asks_signed_out_user_to_log_in() {
    let mut harness =
        setup_view_harness(ViewKind::Progress, None, Arc::new(ScriptedQuiz::default()));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Please log in to see your progress."),
        "missing prompt in {html}"
    );
}
