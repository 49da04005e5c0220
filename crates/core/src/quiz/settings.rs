use std::time::Duration;

/// How long the credential error stays on screen before the login redirect.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Cap on consecutive failed question fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_fetch_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_FETCH_ATTEMPTS: u32 = 3;

    /// Allow at most `attempts` consecutive failed fetches (clamped to at least one).
    #[must_use]
    pub fn bounded(attempts: u32) -> Self {
        Self {
            max_fetch_attempts: Some(attempts.max(1)),
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_fetch_attempts: None,
        }
    }

    #[must_use]
    pub fn max_fetch_attempts(&self) -> Option<u32> {
        self.max_fetch_attempts
    }

    /// Whether another fetch may follow `failures` consecutive failures.
    #[must_use]
    pub fn allows_retry_after(&self, failures: u32) -> bool {
        self.max_fetch_attempts.is_none_or(|max| failures < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::bounded(Self::DEFAULT_MAX_FETCH_ATTEMPTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub redirect_delay: Duration,
    pub retry: RetryPolicy,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            retry: RetryPolicy::default(),
        }
    }
}
