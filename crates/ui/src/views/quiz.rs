use std::time::Duration;

use asl_core::quiz::FetchTicket;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{QuizCardVm, QuizIntent, QuizNoticeVm, QuizStatsVm, map_quiz};

#[cfg(test)]
use asl_core::quiz::QuizSession;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let clock = quiz_loop.clock();
    let api_base_url = ctx.api_base_url().clone();

    let session = use_signal({
        let quiz_loop = quiz_loop.clone();
        let credentials = ctx.credentials();
        move || quiz_loop.new_session(credentials.get())
    });
    let mut redirect_scheduled = use_signal(|| false);

    let run_fetch = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |ticket: FetchTicket| {
            let quiz_loop = quiz_loop.clone();
            let mut session = session;
            spawn(async move {
                let outcome = quiz_loop.fetch(&ticket).await;
                session.write().complete_fetch(&ticket, outcome);
            });
        })
    };

    use_hook(move || {
        let mut session = session;
        spawn(async move {
            let ticket = session.write().enter();
            if let Some(ticket) = ticket {
                run_fetch.call(ticket);
            }
        })
    });

    let dispatch = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut session = session;
            match intent {
                QuizIntent::Select(option) => {
                    let ticket = session.write().select(&option);
                    let Some(ticket) = ticket else {
                        return;
                    };
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let outcome = quiz_loop.verify(&ticket).await;
                        session.write().complete_verify(&ticket, outcome);
                    });
                }
                QuizIntent::Next => {
                    let ticket = session.write().next_question();
                    if let Some(ticket) = ticket {
                        run_fetch.call(ticket);
                    }
                }
                QuizIntent::Retry => {
                    let ticket = session.write().retry();
                    if let Some(ticket) = ticket {
                        run_fetch.call(ticket);
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(dispatch, session);
        }
    }

    let mut countdown_tick = use_signal(|| 0_u32);
    use_effect(move || {
        let Some(redirect_at) = session.read().redirect_at() else {
            return;
        };
        if *redirect_scheduled.peek() {
            return;
        }
        redirect_scheduled.set(true);
        log::info!(
            "quiz: redirecting to login in {:?}",
            clock.remaining_until(redirect_at)
        );
        spawn(async move {
            loop {
                let remaining = clock.remaining_until(redirect_at);
                if remaining.is_zero() {
                    break;
                }
                tokio::time::sleep(remaining.min(COUNTDOWN_TICK)).await;
                countdown_tick += 1;
            }
            let _ = navigator.push(Route::Login {});
        });
    });

    // Re-render once per countdown tick.
    let _ = countdown_tick();
    let vm = map_quiz(&session.read(), &clock, &api_base_url);

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Welcome to the Quiz" }
                p { class: "view-subtitle", "Watch the sign, then pick the word it spells." }
            }
            div { class: "view-divider" }
            if vm.loading {
                p { class: "quiz-loading", "Loading your quiz question..." }
            }
            if let Some(notice) = vm.notice.clone() {
                QuizNotice { notice, dispatch }
            }
            if let Some(card) = vm.card.clone() {
                QuizCard { card, verifying: vm.verifying, dispatch }
            }
            QuizStats { stats: vm.stats }
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm, verifying: bool, dispatch: Callback<QuizIntent>) -> Element {
    let options = card.options.iter().enumerate().map(|(index, option)| {
        let label = option.label.clone();
        let tone = option.tone.class();
        rsx! {
            button {
                key: "{index}",
                class: "btn quiz-option {tone}",
                r#type: "button",
                disabled: option.disabled,
                onclick: move |_| dispatch.call(QuizIntent::Select(label.clone())),
                "{option.label}"
            }
        }
    });

    rsx! {
        section { class: "quiz-card",
            h3 { class: "quiz-card__heading", "{card.heading}" }
            if !card.video_url.is_empty() {
                video {
                    key: "{card.video_url}",
                    class: "quiz-card__video",
                    src: "{card.video_url}",
                    controls: true,
                    autoplay: true,
                    "Your system does not support video playback."
                }
            }
            div { class: "quiz-options", {options} }
            if verifying {
                p { class: "quiz-card__status", "Checking your answer..." }
            }
            if let Some(feedback) = card.feedback.clone() {
                div {
                    class: if feedback.correct { "quiz-feedback quiz-feedback--correct" } else { "quiz-feedback quiz-feedback--incorrect" },
                    strong { "{feedback.title}" }
                    if let Some(message) = feedback.message {
                        p { "{message}" }
                    }
                }
            }
            if card.can_advance {
                button {
                    class: "btn btn-primary quiz-next",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "Next Question"
                }
            }
        }
    }
}

#[component]
fn QuizNotice(notice: QuizNoticeVm, dispatch: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-notice", role: "alert",
            p { class: "quiz-notice__message", "{notice.message}" }
            if let Some(seconds) = notice.redirect_in_secs {
                p { class: "quiz-notice__hint", "Taking you to the login page in {seconds}s." }
            }
            if notice.exhausted {
                p { class: "quiz-notice__hint", "The quiz is unavailable right now. Please come back later." }
                Link { class: "btn btn-secondary", to: Route::Progress {}, "Back to your progress" }
            }
            if notice.can_retry {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::Retry),
                    "Try Again"
                }
            }
        }
    }
}

#[component]
fn QuizStats(stats: QuizStatsVm) -> Element {
    rsx! {
        div { class: "quiz-stats",
            div { class: "quiz-stat quiz-stat--correct",
                span { class: "quiz-stat__value", "{stats.correct}" }
                span { class: "quiz-stat__label", "Correct" }
            }
            div { class: "quiz-stat quiz-stat--incorrect",
                span { class: "quiz-stat__value", "{stats.incorrect}" }
                span { class: "quiz-stat__label", "Incorrect" }
            }
            div { class: "quiz-stat",
                span { class: "quiz-stat__value", "{stats.total}" }
                span { class: "quiz-stat__label", "Total Questions" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    session: Rc<RefCell<Option<Signal<QuizSession>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, session: Signal<QuizSession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<QuizSession> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
