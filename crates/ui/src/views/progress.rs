use asl_core::model::VideoId;
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_progress;

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let credentials = ctx.credentials();
    let mut action_error = use_signal(|| None::<ViewError>);

    let mut resource = {
        let progress = progress.clone();
        let credentials = credentials.clone();
        use_resource(move || {
            let progress = progress.clone();
            let credential = credentials.get();
            async move {
                let credential = credential.ok_or(ViewError::SignedOut)?;
                let loaded = progress
                    .load(&credential)
                    .await
                    .map_err(|err| ViewError::from_api(&err))?;
                let playlist = match progress.playlist(&credential).await {
                    Ok(playlist) => playlist,
                    Err(err) if err.is_unauthorized() => return Err(ViewError::SignedOut),
                    Err(err) => {
                        log::warn!("playlist unavailable: {err}");
                        Vec::new()
                    }
                };
                Ok::<_, ViewError>(map_progress(&loaded, &playlist))
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let toggle = use_callback(move |video_id: String| {
        let progress = progress.clone();
        let Some(credential) = credentials.get() else {
            action_error.set(Some(ViewError::SignedOut));
            return;
        };
        spawn(async move {
            match progress
                .toggle_completed(&credential, &VideoId::new(video_id))
                .await
            {
                Ok(message) => {
                    log::debug!("progress toggled: {message}");
                    action_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    log::warn!("progress toggle failed: {err}");
                    action_error.set(Some(ViewError::from_api(&err)));
                }
            }
        });
    });

    rsx! {
        div { class: "page progress-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Progress" }
            }
            div { class: "view-divider" }
            if let Some(err) = action_error() {
                p { class: "progress-error", role: "alert", "{err.message()}" }
            }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::SignedOut) => rsx! {
                    p { "{ViewError::SignedOut.message()}" }
                    Link { class: "btn btn-primary", to: Route::Login {}, "Log in" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(vm) => {
                    let lessons = vm.lessons.iter().map(|lesson| {
                        let target = lesson.video_id.clone();
                        let status = if lesson.completed { "done" } else { "todo" };
                        rsx! {
                            li { key: "{lesson.video_id}", class: "progress-lesson progress-lesson--{status}",
                                span { class: "progress-lesson__title", "{lesson.title}" }
                                button {
                                    class: "btn btn-link",
                                    r#type: "button",
                                    onclick: move |_| toggle.call(target.clone()),
                                    "{lesson.toggle_label}"
                                }
                            }
                        }
                    });
                    rsx! {
                        div { class: "progress-summary",
                            div { class: "progress-bar",
                                div { class: "progress-bar__fill", style: "width: {vm.percentage}%" }
                            }
                            p { class: "progress-summary__percentage", "{vm.percentage_label}" }
                            p { class: "progress-summary__counts",
                                span { "{vm.completed_label}" }
                                " · "
                                span { "{vm.total_label}" }
                            }
                        }
                        if vm.lessons.is_empty() {
                            p { class: "progress-empty", "No lessons to show yet." }
                        } else {
                            ul { class: "progress-videos", {lessons} }
                        }
                    }
                },
            }
        }
    }
}
