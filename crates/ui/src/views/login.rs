use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
enum LoginStatus {
    Idle,
    Submitting,
    Failed(&'static str),
}

fn login_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingFields => "Please enter your email and password.",
        AuthError::InvalidCredentials => "Invalid email or password.",
        _ => "Login failed. Please try again.",
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let credentials = ctx.credentials();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let status = use_signal(|| LoginStatus::Idle);

    let submit = use_callback(move |()| {
        let auth = auth.clone();
        let credentials = credentials.clone();
        let mut status = status;
        if *status.peek() == LoginStatus::Submitting {
            return;
        }
        status.set(LoginStatus::Submitting);
        let email = email.peek().clone();
        let password = password.peek().clone();
        spawn(async move {
            match auth.login(&email, &password).await {
                Ok(session) => {
                    log::info!("signed in as {}", session.user.display_name());
                    credentials.set(session.credential);
                    status.set(LoginStatus::Idle);
                    let _ = navigator.push(Route::Quiz {});
                }
                Err(err) => {
                    log::warn!("login failed: {err}");
                    status.set(LoginStatus::Failed(login_error_message(&err)));
                }
            }
        });
    });

    let submitting = status() == LoginStatus::Submitting;

    rsx! {
        div { class: "page login-page",
            header { class: "view-header",
                h2 { class: "view-title", "Log in" }
                p { class: "view-subtitle", "Sign in to take the quiz and track your progress." }
            }
            div { class: "view-divider" }
            div { class: "login-form",
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: "{email}",
                        autocomplete: "username",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { "Password" }
                    input {
                        r#type: "password",
                        value: "{password}",
                        autocomplete: "current-password",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let LoginStatus::Failed(message) = status() {
                    p { class: "login-error", role: "alert", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| submit.call(()),
                    if submitting { "Signing in..." } else { "Log in" }
                }
                p { class: "login-signup",
                    "Need an account? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use services::{ApiError, StatusCode};

    use super::*;

    #[test]
    fn login_errors_map_to_user_messages() {
        assert_eq!(
            login_error_message(&AuthError::InvalidCredentials),
            "Invalid email or password."
        );
        assert_eq!(
            login_error_message(&AuthError::Api(ApiError::from_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                None
            ))),
            "Login failed. Please try again."
        );
    }
}
