use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use asl_core::model::{AnswerResult, Credential, Question, QuestionId};
use asl_core::quiz::QuizSettings;
use asl_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AnswerVerifier, ApiError, AuthService, HttpApi, ProgressService, QuestionSource,
    QuizLoopService, StatusCode, Url,
};

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::quiz::QuizTestHandles;
use crate::views::{LoginView, ProgressView, QuizView, SignupView};

const TEST_BASE_URL: &str = "http://127.0.0.1:9";

/// Scripted backend for the quiz calls; an empty script answers 503.
#[derive(Default)]
pub struct ScriptedQuiz {
    questions: Mutex<VecDeque<Result<Question, ApiError>>>,
    verdicts: Mutex<VecDeque<Result<AnswerResult, ApiError>>>,
}

impl ScriptedQuiz {
    pub fn question(&self, id: &str, options: &[&str]) -> &Self {
        let question = Question::new(
            QuestionId::new(id),
            format!("/videos/{id}.mp4"),
            options.iter().map(|option| (*option).to_string()).collect(),
        )
        .expect("valid question");
        self.questions.lock().unwrap().push_back(Ok(question));
        self
    }

    pub fn question_error(&self, status: StatusCode) -> &Self {
        self.questions
            .lock()
            .unwrap()
            .push_back(Err(ApiError::from_status(status, None)));
        self
    }

    pub fn verdict(&self, correct: bool, answer: &str, feedback: &str) -> &Self {
        self.verdicts.lock().unwrap().push_back(Ok(AnswerResult::new(
            correct,
            Some(answer.to_string()),
            feedback,
        )));
        self
    }
}

fn unavailable() -> ApiError {
    ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, None)
}

#[async_trait::async_trait]
impl QuestionSource for ScriptedQuiz {
    async fn fetch_question(&self, _credential: &Credential) -> Result<Question, ApiError> {
        self.questions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }
}

#[async_trait::async_trait]
impl AnswerVerifier for ScriptedQuiz {
    async fn verify_answer(
        &self,
        _credential: &Credential,
        _question_id: &QuestionId,
        _answer: &str,
    ) -> Result<AnswerResult, ApiError> {
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }
}

#[derive(Clone)]
struct TestApp {
    credential: Option<Credential>,
    quiz_loop: Arc<QuizLoopService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
}

impl UiApp for TestApp {
    fn api_base_url(&self) -> Url {
        Url::parse(TEST_BASE_URL).expect("test base url")
    }

    fn initial_credential(&self) -> Option<Credential> {
        self.credential.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// The full app router, starting on the quiz route.
    App,
    Quiz,
    Login,
    Signup,
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    if props.view == ViewKind::App {
        return rsx! { Router::<Route> {} };
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::App | ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Signup => rsx! { SignupView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned calls have settled.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn quiz_handles(&self) -> &QuizTestHandles {
        self.quiz_handles.as_ref().expect("quiz view harness")
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    view: ViewKind,
    credential: Option<&str>,
    quiz: Arc<ScriptedQuiz>,
) -> ViewHarness {
    setup_view_harness_with_settings(view, credential, quiz, QuizSettings::default())
}

pub fn setup_view_harness_with_settings(
    view: ViewKind,
    credential: Option<&str>,
    quiz: Arc<ScriptedQuiz>,
    settings: QuizSettings,
) -> ViewHarness {
    let api = HttpApi::new(TEST_BASE_URL).expect("test api");
    let quiz_loop = Arc::new(
        QuizLoopService::new(
            fixed_clock(),
            Arc::clone(&quiz) as Arc<dyn QuestionSource>,
            quiz as Arc<dyn AnswerVerifier>,
        )
        .with_settings(settings),
    );
    let app = Arc::new(TestApp {
        credential: credential.and_then(Credential::new),
        quiz_loop,
        progress: Arc::new(ProgressService::new(api.clone())),
        auth: Arc::new(AuthService::new(api)),
    });

    let quiz_handles =
        matches!(view, ViewKind::App | ViewKind::Quiz).then(QuizTestHandles::default);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness { dom, quiz_handles }
}
