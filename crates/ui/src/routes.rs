use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{LoginView, ProgressView, QuizView, SignupView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/progress", ProgressView)] Progress {},
        #[route("/login", LoginView)] Login {},
        #[route("/signup", SignupView)] Signup {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let credentials = ctx.credentials();

    rsx! {
        nav { class: "sidebar",
            h1 { "ASL Learn" }
            ul {
                li { Link { to: Route::Quiz {}, "Quiz" } }
                li { Link { to: Route::Progress {}, "Progress" } }
                li { Link { to: Route::Login {}, "Log in" } }
                li { Link { to: Route::Signup {}, "Sign up" } }
                li {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| {
                            credentials.clear();
                            let _ = navigator.push(Route::Login {});
                        },
                        "Sign out"
                    }
                }
            }
        }
    }
}
