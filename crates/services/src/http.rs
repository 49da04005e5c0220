use asl_core::model::Credential;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use crate::error::{ApiError, AppServicesError};

/// Parse and validate a backend base url.
///
/// Only absolute `http`/`https` urls with a host are accepted.
///
/// # Errors
///
/// Returns `AppServicesError::InvalidBaseUrl` otherwise.
pub fn parse_base_url(raw: &str) -> Result<Url, AppServicesError> {
    let invalid = || AppServicesError::InvalidBaseUrl(raw.to_string());
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}

/// Resolve `reference` the way a browser resolves a link found on `base`.
///
/// Absolute and scheme-relative references replace the base; `/path` replaces its path.
#[must_use]
pub fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    base.join(reference).ok()
}

/// Shared HTTP client bound to the backend base url.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `AppServicesError` if the base url is not http(s) or the client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AppServicesError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(concat!("asl-quiz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) fn get(&self, path: &str, credential: &Credential) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .client
            .get(self.url(path)?)
            .bearer_auth(credential.expose()))
    }

    pub(crate) fn post(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder, ApiError> {
        let request = self.client.post(self.url(path)?);
        Ok(match credential {
            Some(credential) => request.bearer_auth(credential.expose()),
            None => request,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pass 2xx responses through; turn anything else into a classified `ApiError`.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty());
    log::warn!("backend answered {status}: {}", message.as_deref().unwrap_or("-"));
    Err(ApiError::from_status(status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_resolve_against_the_host() {
        let api = HttpApi::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(
            api.url("/api/quiz/question").unwrap().as_str(),
            "http://127.0.0.1:5000/api/quiz/question"
        );

        let api = HttpApi::new("https://asl.example.com/app/").unwrap();
        assert_eq!(
            api.url("/api/progress").unwrap().as_str(),
            "https://asl.example.com/api/progress"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for raw in ["ftp://example.com", "http://", "localhost:5000", ""] {
            let err = HttpApi::new(raw).unwrap_err();
            assert!(matches!(err, AppServicesError::InvalidBaseUrl(_)), "{raw}");
        }
        assert!(parse_base_url("HTTPS://Example.com").is_ok());
    }

    #[test]
    fn references_resolve_like_links() {
        let base = parse_base_url("http://host:5000/api").unwrap();
        let resolve = |reference| resolve_url(&base, reference).map(String::from);

        assert_eq!(resolve("/videos/a.mp4").as_deref(), Some("http://host:5000/videos/a.mp4"));
        assert_eq!(
            resolve("//cdn.example.com/a.mp4").as_deref(),
            Some("http://cdn.example.com/a.mp4")
        );
        assert_eq!(
            resolve("HTTPS://cdn.example.com/a.mp4").as_deref(),
            Some("https://cdn.example.com/a.mp4")
        );
        assert_eq!(resolve("  "), None);
    }
}
