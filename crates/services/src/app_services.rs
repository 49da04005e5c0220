use std::sync::Arc;

use url::Url;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::http::HttpApi;
use crate::progress_service::ProgressService;
use crate::quiz::{HttpQuizClient, QuizLoopService};

/// Assembles app-facing services on top of one HTTP client.
#[derive(Clone)]
pub struct AppServices {
    config: ApiConfig,
    base_url: Url,
    quiz_loop: Arc<QuizLoopService>,
    progress: Arc<ProgressService>,
    auth: Arc<AuthService>,
}

impl AppServices {
    /// Build services talking to the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the base url is invalid or the HTTP client cannot be built.
    pub fn from_config(config: ApiConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let api = HttpApi::new(&config.base_url)?;
        let base_url = api.base_url().clone();
        let quiz_client = Arc::new(HttpQuizClient::new(api.clone()));
        let quiz_loop = Arc::new(
            QuizLoopService::new(clock, quiz_client.clone(), quiz_client)
                .with_settings(config.quiz_settings()),
        );
        let progress = Arc::new(ProgressService::new(api.clone()));
        let auth = Arc::new(AuthService::new(api));

        Ok(Self {
            config,
            base_url,
            quiz_loop,
            progress,
            auth,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Parsed backend base url; relative media links resolve against it.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
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
