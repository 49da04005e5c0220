use std::env;
use std::time::Duration;

use asl_core::quiz::{DEFAULT_REDIRECT_DELAY, QuizSettings, RetryPolicy};

/// Backend location and quiz tuning, read from `ASL_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub redirect_delay: Duration,
    /// `None` disables the retry cap.
    pub max_fetch_attempts: Option<u32>,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Unparseable numbers fall back to the defaults. `ASL_MAX_FETCH_ATTEMPTS=0` means
    /// unlimited retries.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("ASL_API_BASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.base_url);
        let redirect_delay = lookup("ASL_REDIRECT_DELAY_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(defaults.redirect_delay, Duration::from_secs);
        let max_fetch_attempts = lookup("ASL_MAX_FETCH_ATTEMPTS")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .map_or(defaults.max_fetch_attempts, |value| {
                (value > 0).then_some(value)
            });

        Self {
            base_url,
            redirect_delay,
            max_fetch_attempts,
        }
    }

    #[must_use]
    pub fn quiz_settings(&self) -> QuizSettings {
        let retry = self
            .max_fetch_attempts
            .map_or_else(RetryPolicy::unbounded, RetryPolicy::bounded);
        QuizSettings {
            redirect_delay: self.redirect_delay,
            retry,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            max_fetch_attempts: Some(RetryPolicy::DEFAULT_MAX_FETCH_ATTEMPTS),
        }
    }
}
