#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod config;
pub mod error;
mod http;
pub mod progress_service;
pub mod quiz;

pub use asl_core::Clock;
pub use reqwest::StatusCode;
pub use url::Url;

pub use app_services::AppServices;
pub use auth_service::{AuthService, LoginSession};
pub use config::ApiConfig;
pub use error::{ApiError, AppServicesError, AuthError};
pub use http::{HttpApi, parse_base_url, resolve_url};
pub use progress_service::ProgressService;
pub use quiz::{AnswerVerifier, HttpQuizClient, QuestionSource, QuizLoopService};
