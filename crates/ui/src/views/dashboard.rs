use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::Difficulty;
use services::CategorySummary;

use crate::app::use_auth;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = use_auth();
    let navigator = use_navigator();

    use_effect(move || {
        if !auth.read().is_signed_in() {
            let _ = navigator.replace(Route::Login {});
        }
    });

    let quizzes = ctx.quizzes();
    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move { quizzes.catalog().await.map_err(|_| ViewError::Unknown) }
    });
    let state = view_state_from_resource(resource);

    let mut difficulty = use_signal(|| Difficulty::Medium);
    let greeting = auth
        .read()
        .user()
        .map_or_else(String::new, |user| format!("Welcome, {}!", user.username));

    rsx! {
        div { class: "page dashboard-page",
            h2 { "Dashboard" }
            if !greeting.is_empty() {
                p { class: "dashboard__greeting", "{greeting}" }
            }

            div { class: "difficulty-picker",
                span { "Difficulty:" }
                for band in Difficulty::ALL {
                    button {
                        class: if difficulty() == band { "chip chip--active" } else { "chip" },
                        r#type: "button",
                        onclick: move |_| difficulty.set(band),
                        "{band.label()}"
                    }
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading question bank..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(catalog) => rsx! {
                    div { class: "quiz-cards",
                        QuizCard {
                            title: "Mixed".to_string(),
                            subtitle: format!("{} questions across all categories", catalog.total_questions),
                            segment: "mixed".to_string(),
                            available: catalog.offers(difficulty()),
                            difficulty: difficulty(),
                        }
                        for category in catalog.categories.clone() {
                            CategoryCard { category, difficulty: difficulty() }
                        }
                    }
                    if catalog.total_questions == 0 {
                        p { "The question bank is empty. Check back later." }
                    }
                },
            }
        }
    }
}

#[component]
fn CategoryCard(category: CategorySummary, difficulty: Difficulty) -> Element {
    let available = category.offers(difficulty);
    rsx! {
        QuizCard {
            title: category.name.clone(),
            subtitle: format!("{} questions", category.question_count),
            segment: category.name.clone(),
            available,
            difficulty,
        }
    }
}

#[component]
fn QuizCard(
    title: String,
    subtitle: String,
    segment: String,
    available: bool,
    difficulty: Difficulty,
) -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "quiz-card",
            h3 { "{title}" }
            p { "{subtitle}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !available,
                onclick: move |_| {
                    let _ = navigator.push(Route::Quiz {
                        quiz_type: segment.clone(),
                        difficulty: difficulty.label().to_string(),
                    });
                },
                if available { "Start quiz" } else { "Not available at {difficulty.label()}" }
            }
        }
    }
}
