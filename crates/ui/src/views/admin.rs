use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{Difficulty, Question, QuestionId};
use services::admin_service::group_by_category;

use crate::app::use_auth;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionFormVm, format_datetime};

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = use_auth();
    let navigator = use_navigator();

    use_effect(move || {
        let state = auth.read();
        if !state.is_signed_in() {
            let _ = navigator.replace(Route::Login {});
        } else if !state.is_admin() {
            let _ = navigator.replace(Route::Dashboard {});
        }
    });

    let admin = ctx.admin();
    let resource = use_resource(move || {
        let admin = admin.clone();
        async move { admin.list().await.map_err(|_| ViewError::Unknown) }
    });
    let state = view_state_from_resource(resource);

    let mut form = use_signal(QuestionFormVm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);
    let mut category_filter = use_signal(|| None::<String>);
    let mut pending_delete = use_signal(|| None::<QuestionId>);

    let admin_for_save = ctx.admin();
    let on_save = use_callback(move |()| {
        if busy() {
            return;
        }
        let admin = admin_for_save.clone();
        let mut resource = resource;
        spawn(async move {
            busy.set(true);
            form_error.set(None);
            let snapshot = form.read().clone();
            let draft = snapshot.to_draft();
            let result = match snapshot.editing {
                Some(id) => admin.update(&id, draft).await,
                None => admin.create(draft).await,
            };
            match result {
                Ok(()) => {
                    form.set(QuestionFormVm::default());
                    resource.restart();
                }
                Err(err) => form_error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    });

    let admin_for_delete = ctx.admin();
    let on_delete = use_callback(move |id: QuestionId| {
        let admin = admin_for_delete.clone();
        let mut resource = resource;
        spawn(async move {
            match admin.delete(&id).await {
                Ok(()) => resource.restart(),
                Err(err) => form_error.set(Some(err.to_string())),
            }
            pending_delete.set(None);
        });
    });

    let on_edit = use_callback(move |question: Question| {
        form.set(QuestionFormVm::edit(&question));
        form_error.set(None);
    });

    rsx! {
        div { class: "page admin-page",
            h2 { "Question bank" }

            QuestionForm { form, form_error, busy: busy(), on_save }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading questions..." }
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
                ViewState::Ready(questions) => rsx! {
                    CategoryFilter {
                        questions: questions.clone(),
                        selected: category_filter.read().clone(),
                        on_change: move |value| category_filter.set(value),
                    }
                    QuestionList {
                        questions,
                        filter: category_filter.read().clone(),
                        pending_delete: pending_delete.read().clone(),
                        on_edit,
                        on_delete,
                        on_request_delete: move |id| pending_delete.set(Some(id)),
                        on_cancel_delete: move |()| pending_delete.set(None),
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionForm(
    form: Signal<QuestionFormVm>,
    form_error: Signal<Option<String>>,
    busy: bool,
    on_save: EventHandler<()>,
) -> Element {
    let mut form = form;
    let snapshot = form.read().clone();
    let heading = if snapshot.is_editing() {
        "Edit question"
    } else {
        "Add a question"
    };

    rsx! {
        form {
            class: "question-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_save.call(());
            },
            h3 { "{heading}" }
            if let Some(message) = form_error.read().as_deref() {
                p { class: "form-error", "{message}" }
            }

            label { r#for: "question-text", "Question" }
            textarea {
                id: "question-text",
                value: "{snapshot.text}",
                oninput: move |evt| form.write().text = evt.value(),
            }

            for (index, option) in snapshot.options.iter().enumerate() {
                label { r#for: "question-option-{index}", "Option {index + 1}" }
                input {
                    id: "question-option-{index}",
                    value: "{option}",
                    oninput: move |evt| form.write().set_option(index, evt.value()),
                }
            }

            label { r#for: "question-correct", "Correct answer" }
            select {
                id: "question-correct",
                onchange: move |evt| form.write().correct_answer = evt.value(),
                option {
                    value: "",
                    selected: snapshot.correct_answer.is_empty(),
                    "Pick an option"
                }
                for option in snapshot.options.iter().filter(|o| !o.trim().is_empty()) {
                    option {
                        value: "{option}",
                        selected: snapshot.correct_answer == *option,
                        "{option}"
                    }
                }
            }

            label { r#for: "question-category", "Category" }
            input {
                id: "question-category",
                value: "{snapshot.category}",
                oninput: move |evt| form.write().category = evt.value(),
            }

            label { r#for: "question-difficulty", "Difficulty" }
            select {
                id: "question-difficulty",
                onchange: move |evt| {
                    if let Some(difficulty) = Difficulty::from_label(&evt.value()) {
                        form.write().difficulty = difficulty;
                    }
                },
                for band in Difficulty::ALL {
                    option {
                        value: "{band.label()}",
                        selected: snapshot.difficulty == band,
                        "{band.label()}"
                    }
                }
            }

            label { r#for: "question-marks", "Marks" }
            input {
                id: "question-marks",
                r#type: "number",
                min: "1",
                value: "{snapshot.marks}",
                oninput: move |evt| form.write().marks = evt.value(),
            }

            label { class: "question-form__flag",
                input {
                    r#type: "checkbox",
                    checked: snapshot.negative_marking,
                    onchange: move |evt| form.write().negative_marking = evt.checked(),
                }
                "Negative marking"
            }
            if snapshot.negative_marking {
                label { r#for: "question-negative-marks", "Negative marks" }
                input {
                    id: "question-negative-marks",
                    r#type: "number",
                    min: "0",
                    value: "{snapshot.negative_marks}",
                    oninput: move |evt| form.write().negative_marks = evt.value(),
                }
            }

            div { class: "question-form__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy,
                    if snapshot.is_editing() { "Save changes" } else { "Create question" }
                }
                if snapshot.is_editing() {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| form.set(QuestionFormVm::default()),
                        "Cancel edit"
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryFilter(
    questions: Vec<Question>,
    selected: Option<String>,
    on_change: EventHandler<Option<String>>,
) -> Element {
    let mut categories: Vec<String> = questions
        .iter()
        .map(|question| question.category().to_string())
        .collect();
    categories.dedup();

    rsx! {
        div { class: "category-filter",
            label { r#for: "category-filter", "Category:" }
            select {
                id: "category-filter",
                onchange: move |evt| {
                    let value = evt.value();
                    on_change.call((value != "all").then_some(value));
                },
                option { value: "all", selected: selected.is_none(), "All" }
                for category in categories {
                    option {
                        value: "{category}",
                        selected: selected.as_deref() == Some(category.as_str()),
                        "{category}"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionList(
    questions: Vec<Question>,
    filter: Option<String>,
    pending_delete: Option<QuestionId>,
    on_edit: EventHandler<Question>,
    on_delete: EventHandler<QuestionId>,
    on_request_delete: EventHandler<QuestionId>,
    on_cancel_delete: EventHandler<()>,
) -> Element {
    let groups = group_by_category(&questions, filter.as_deref());

    rsx! {
        if groups.is_empty() {
            p { "No questions yet." }
        }
        for group in groups {
            section { class: "question-group", key: "{group.name}",
                h3 { "{group.name}" }
                ul { class: "question-list",
                    for question in group.questions {
                        QuestionRow {
                            key: "{question.id()}",
                            question: question.clone(),
                            deleting: pending_delete.as_ref() == Some(question.id()),
                            on_edit,
                            on_delete,
                            on_request_delete,
                            on_cancel_delete,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionRow(
    question: Question,
    deleting: bool,
    on_edit: EventHandler<Question>,
    on_delete: EventHandler<QuestionId>,
    on_request_delete: EventHandler<QuestionId>,
    on_cancel_delete: EventHandler<()>,
) -> Element {
    let created = question.created_at().map(format_datetime);
    let marks_label = if question.has_negative_marking() {
        format!("+{} / -{}", question.marks(), question.negative_marks())
    } else {
        format!("+{}", question.marks())
    };
    let question_for_edit = question.clone();
    let id_for_request = question.id().clone();
    let id_for_delete = question.id().clone();

    rsx! {
        li { class: "question-row",
            div { class: "question-row__body",
                p { class: "question-row__text", "{question.text()}" }
                p { class: "question-row__meta",
                    span { "{question.difficulty().label()}" }
                    span { "{marks_label}" }
                    if let Some(created) = created {
                        span { "{created}" }
                    }
                }
            }
            div { class: "question-row__actions",
                if deleting {
                    span { "Delete this question?" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_delete.call(id_for_delete.clone()),
                        "Confirm"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_cancel_delete.call(()),
                        "Cancel"
                    }
                } else {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_edit.call(question_for_edit.clone()),
                        "Edit"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_request_delete.call(id_for_request.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
