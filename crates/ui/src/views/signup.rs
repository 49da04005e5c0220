use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
enum SignupStatus {
    Idle,
    Submitting,
    Failed(String),
}

fn signup_error_message(err: &AuthError) -> String {
    match err {
        AuthError::MissingFields => "Please fill in your name, email and password.".into(),
        AuthError::EmailTaken => "An account with this email already exists.".into(),
        AuthError::SignupRejected(message) => message.clone(),
        _ => "Sign up failed. Please try again.".into(),
    }
}

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let status = use_signal(|| SignupStatus::Idle);

    let submit = use_callback(move |()| {
        let auth = auth.clone();
        let mut status = status;
        if *status.peek() == SignupStatus::Submitting {
            return;
        }
        status.set(SignupStatus::Submitting);
        let name = name.peek().clone();
        let email = email.peek().clone();
        let password = password.peek().clone();
        spawn(async move {
            match auth.signup(&name, &email, &password).await {
                Ok(message) => {
                    log::info!("signup succeeded: {message}");
                    status.set(SignupStatus::Idle);
                    let _ = navigator.push(Route::Login {});
                }
                Err(err) => {
                    log::warn!("signup failed: {err}");
                    status.set(SignupStatus::Failed(signup_error_message(&err)));
                }
            }
        });
    });

    let submitting = status() == SignupStatus::Submitting;

    rsx! {
        div { class: "page signup-page",
            header { class: "view-header",
                h2 { class: "view-title", "Sign up" }
                p { class: "view-subtitle", "Create an account to start learning." }
            }
            div { class: "view-divider" }
            div { class: "signup-form",
                label { class: "field",
                    span { "Name" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        autocomplete: "name",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
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
                        autocomplete: "new-password",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                if let SignupStatus::Failed(message) = status() {
                    p { class: "signup-error", role: "alert", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| submit.call(()),
                    if submitting { "Creating account..." } else { "Sign up" }
                }
                p { class: "signup-login",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Log in" }
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
    fn signup_errors_map_to_user_messages() {
        assert_eq!(
            signup_error_message(&AuthError::EmailTaken),
            "An account with this email already exists."
        );
        assert_eq!(
            signup_error_message(&AuthError::SignupRejected("Name is required".into())),
            "Name is required"
        );
        assert_eq!(
            signup_error_message(&AuthError::Api(ApiError::from_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                None
            ))),
            "Sign up failed. Please try again."
        );
    }
}
