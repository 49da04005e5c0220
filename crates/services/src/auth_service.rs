use asl_core::model::{Credential, UserId, UserProfile};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, AuthError};
use crate::http::{HttpApi, check_status};

const LOGIN_PATH: &str = "/api/login";
const SIGNUP_PATH: &str = "/api/signup";

/// Credential plus profile returned by a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub credential: Credential,
    pub user: UserProfile,
}

/// Exchanges email/password for a bearer credential.
#[derive(Clone, Debug)]
pub struct AuthService {
    api: HttpApi,
}

impl AuthService {
    #[must_use]
    pub fn new(api: HttpApi) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` for blank input, `AuthError::InvalidCredentials`
    /// when the backend refuses the pair, and `AuthError::Api` for transport failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        log::debug!("POST {LOGIN_PATH}");
        let response = self
            .api
            .post(LOGIN_PATH, None)?
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = match check_status(response).await {
            Ok(response) => response,
            Err(err) if err.is_unauthorized() => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err.into()),
        };
        let payload: LoginPayload = response.json().await.map_err(ApiError::from)?;
        let session = payload.into_session()?;
        log::info!("signed in as {:?}", session.user.id);
        Ok(session)
    }

    /// Register a new account. The caller logs in separately afterwards.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` for blank input, `AuthError::EmailTaken` when the
    /// email is already registered, `AuthError::SignupRejected` when the backend refuses the
    /// input, and `AuthError::Api` for transport failures.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        log::debug!("POST {SIGNUP_PATH}");
        let response = self
            .api
            .post(SIGNUP_PATH, None)?
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await
            .map_err(ApiError::from)?;
        let response = check_status(response).await.map_err(signup_failure)?;
        let payload: MessagePayload = response.json().await.map_err(ApiError::from)?;
        log::info!("registered a new account");
        Ok(payload.message)
    }
}

fn signup_failure(err: ApiError) -> AuthError {
    match err.status() {
        Some(StatusCode::CONFLICT) => AuthError::EmailTaken,
        Some(StatusCode::BAD_REQUEST) => AuthError::SignupRejected(
            err.server_message()
                .unwrap_or("the backend refused the signup")
                .to_string(),
        ),
        _ => err.into(),
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    #[serde(default)]
    access_token: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: u64,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

impl LoginPayload {
    fn into_session(self) -> Result<LoginSession, AuthError> {
        let credential = Credential::new(self.access_token).ok_or(AuthError::MissingToken)?;
        Ok(LoginSession {
            credential,
            user: UserProfile {
                id: UserId::new(self.user.id),
                email: self.user.email,
                name: self.user.name,
            },
        })
    }
}
