use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

/// Bearer token presented to the backend.
///
/// Never printed: `Debug` redacts the value.
#[derive(Clone)]
pub struct Credential(Arc<SecretString>);

impl Credential {
    /// Wrap a raw token; blank tokens count as no credential at all.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Arc::new(SecretString::from(trimmed.to_string()))))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
