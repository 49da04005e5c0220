use std::sync::{Arc, RwLock};

use asl_core::model::Credential;
use services::{AuthService, ProgressService, QuizLoopService, Url};

/// What the composition root (e.g. `crates/app`) hands to the UI.
pub trait UiApp: Send + Sync {
    fn api_base_url(&self) -> Url;
    fn initial_credential(&self) -> Option<Credential>;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn auth(&self) -> Arc<AuthService>;
}

/// The signed-in user's bearer credential, shared by every view.
///
/// Written by the login view and sign-out; views read it when they are entered.
#[derive(Clone, Default)]
pub struct CredentialSlot(Arc<RwLock<Option<Credential>>>);

impl CredentialSlot {
    #[must_use]
    pub fn new(credential: Option<Credential>) -> Self {
        Self(Arc::new(RwLock::new(credential)))
    }

    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        match self.0.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, credential: Credential) {
        self.replace(Some(credential));
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    fn replace(&self, value: Option<Credential>) {
        match self.0.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    api_base_url: Url,
    credentials: CredentialSlot,

    quiz_loop: Arc<QuizLoopService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            api_base_url: app.api_base_url(),
            credentials: CredentialSlot::new(app.initial_credential()),
            quiz_loop: app.quiz_loop(),
            progress: app.progress(),
            auth: app.auth(),
        }
    }

    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    #[must_use]
    pub fn credentials(&self) -> CredentialSlot {
        self.credentials.clone()
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
