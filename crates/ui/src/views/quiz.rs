use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{ResultSummary, TickOutcome, TrackerDot};

use crate::app::use_auth;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, format_clock, parse_route_settings, start_quiz};

/// Immutable per-render projection of the view model, so rsx! never holds a
/// signal borrow across event handlers.
#[derive(Clone, PartialEq)]
struct QuizSnapshot {
    title: String,
    time_left: u32,
    index: usize,
    total: usize,
    text: String,
    options: Vec<String>,
    selected: Option<String>,
    marks: u32,
    negative_marks: Option<u32>,
    tracker: Vec<TrackerDot>,
    answered: usize,
    confirming: bool,
    result: Option<ResultSummary>,
}

impl QuizSnapshot {
    fn capture(vm: &QuizVm) -> Option<Self> {
        let question = vm.current_question()?;
        Some(Self {
            title: vm.title(),
            time_left: vm.time_left(),
            index: vm.current_index(),
            total: vm.total_questions(),
            text: question.text().to_string(),
            options: question.options().to_vec(),
            selected: vm.current_answer().map(str::to_string),
            marks: question.marks(),
            negative_marks: question
                .has_negative_marking()
                .then(|| question.negative_marks()),
            tracker: vm.tracker(),
            answered: vm.answered_count(),
            confirming: vm.confirming(),
            result: vm.result().copied(),
        })
    }
}

#[component]
pub fn QuizView(quiz_type: String, difficulty: String) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = use_auth();
    let navigator = use_navigator();

    use_effect(move || {
        if !auth.read().is_signed_in() {
            let _ = navigator.replace(Route::Login {});
        }
    });

    let mut vm = use_signal(|| None::<QuizVm>);
    let settings = parse_route_settings(&quiz_type, &difficulty);

    let quizzes = ctx.quizzes();
    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        let settings = settings.clone();
        let mut vm = vm;
        async move {
            // A mistyped or stale URL, not a service failure.
            let Some(settings) = settings else {
                return Err(ViewError::Unknown);
            };
            let started = start_quiz(&quizzes, settings).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    // One countdown task per started session. Writing through the signal
    // each second is what re-renders the clock.
    let mut ticking = use_signal(|| false);
    use_effect(move || {
        if vm.read().is_none() || ticking() {
            return;
        }
        ticking.set(true);
        spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let outcome = vm.write().as_mut().map(QuizVm::tick);
                match outcome {
                    Some(TickOutcome::Running(_)) => {}
                    Some(TickOutcome::Expired | TickOutcome::Stopped) | None => break,
                }
            }
        });
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        if let Some(vm) = vm.write().as_mut() {
            vm.apply(intent);
        }
    });

    let snapshot = vm.read().as_ref().and_then(QuizSnapshot::capture);

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Preparing your quiz..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "quiz-empty",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Dashboard {});
                            },
                            "Back to dashboard"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(snap) = snapshot {
                        if let Some(summary) = snap.result {
                            ResultCard { title: snap.title.clone(), summary }
                        } else {
                            QuizBoard { snap, dispatch }
                        }
                    } else {
                        p { "Preparing your quiz..." }
                    }
                },
            }
        }
    }
}

#[component]
fn QuizBoard(snap: QuizSnapshot, dispatch: EventHandler<QuizIntent>) -> Element {
    let low_time = snap.time_left < 15;
    let clock = format_clock(snap.time_left);
    let position = format!("Question {} of {}", snap.index + 1, snap.total);
    let answered = format!("{} of {} answered", snap.answered, snap.total);
    let marks_label = match snap.negative_marks {
        Some(penalty) => format!("+{} / -{penalty}", snap.marks),
        None => format!("+{}", snap.marks),
    };
    let on_first = snap.index == 0;
    let on_last = snap.index + 1 == snap.total;

    rsx! {
        header { class: "quiz-header",
            h2 { "{snap.title}" }
            span {
                class: if low_time { "quiz-clock quiz-clock--low" } else { "quiz-clock" },
                "{clock}"
            }
        }
        div { class: "quiz-body",
            aside { class: "quiz-tracker",
                for dot in snap.tracker.clone() {
                    button {
                        class: tracker_class(&dot),
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::GoTo(dot.index)),
                        "{dot.index + 1}"
                    }
                }
                p { class: "quiz-tracker__summary", "{answered}" }
                ul { class: "quiz-tracker__legend",
                    li { span { class: "dot dot--current" } "Current" }
                    li { span { class: "dot dot--answered" } "Answered" }
                    li { span { class: "dot dot--viewed" } "Viewed" }
                }
            }
            section { class: "quiz-question",
                div { class: "quiz-question__meta",
                    span { "{position}" }
                    span { class: "quiz-question__marks", "{marks_label}" }
                }
                p { class: "quiz-question__text", "{snap.text}" }
                ul { class: "quiz-options",
                    for option in snap.options.clone() {
                        li {
                            OptionButton {
                                option: option.clone(),
                                selected: snap.selected.as_deref() == Some(option.as_str()),
                                dispatch,
                            }
                        }
                    }
                }
                div { class: "quiz-nav",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: on_first,
                        onclick: move |_| dispatch.call(QuizIntent::Previous),
                        "Previous"
                    }
                    if on_last {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::RequestSubmit),
                            "Submit quiz"
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::Next),
                            "Next"
                        }
                    }
                }
            }
        }
        if snap.confirming {
            div { class: "quiz-confirm",
                div { class: "quiz-confirm__dialog", role: "dialog",
                    p { "Submit now? {answered}." }
                    div { class: "quiz-confirm__actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::CancelSubmit),
                            "Keep going"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::ConfirmSubmit),
                            "Submit"
                        }
                    }
                }
            }
        }
    }
}

fn tracker_class(dot: &TrackerDot) -> &'static str {
    if dot.current {
        "dot dot--current"
    } else if dot.answered {
        "dot dot--answered"
    } else if dot.viewed {
        "dot dot--viewed"
    } else {
        "dot"
    }
}

#[component]
fn OptionButton(option: String, selected: bool, dispatch: EventHandler<QuizIntent>) -> Element {
    let value = option.clone();
    rsx! {
        button {
            class: if selected { "quiz-option quiz-option--selected" } else { "quiz-option" },
            r#type: "button",
            onclick: move |_| dispatch.call(QuizIntent::Select(value.clone())),
            "{option}"
        }
    }
}

#[component]
fn ResultCard(title: String, summary: ResultSummary) -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "quiz-result",
            h2 { "Quiz complete" }
            p { class: "quiz-result__quiz", "{title}" }
            p { class: "quiz-result__score", "Score: {summary.score()}" }
            ul { class: "quiz-result__breakdown",
                li { "Correct: {summary.correct()}" }
                li { "Incorrect: {summary.incorrect()}" }
                li { "Unattempted: {summary.unattempted()}" }
                li { "Total questions: {summary.total_questions()}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Dashboard {});
                },
                "Back to dashboard"
            }
        }
    }
}
