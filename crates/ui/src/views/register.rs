use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{Gender, RegisterForm};

use crate::app::use_auth;
use crate::context::AppContext;
use crate::routes::Route;

fn parse_gender(value: &str) -> Gender {
    match value {
        "female" => Gender::Female,
        "other" => Gender::Other,
        _ => Gender::Male,
    }
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut auth = use_auth();
    let navigator = use_navigator();

    let mut username = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut age = use_signal(String::new);
    let mut gender = use_signal(|| Gender::Male);
    let mut password = use_signal(String::new);
    let mut password_confirm = use_signal(String::new);
    let mut company_key = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    use_effect(move || {
        if auth.read().is_signed_in() {
            let _ = navigator.replace(Route::Dashboard {});
        }
    });

    let service = ctx.auth();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let service = service.clone();
        spawn(async move {
            busy.set(true);
            error.set(None);
            let form = RegisterForm {
                username: username.read().trim().to_string(),
                name: name.read().trim().to_string(),
                email: email.read().trim().to_string(),
                age: age.read().trim().parse().unwrap_or(0),
                gender: gender(),
                password: password(),
                password_confirm: password_confirm(),
                company_key: company_key(),
            };
            match service.register(form).await {
                Ok(next) => {
                    auth.set(next);
                    let _ = navigator.push(Route::Dashboard {});
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Create an account" }
            form { class: "auth-form", onsubmit: on_submit,
                if let Some(message) = error.read().as_deref() {
                    p { class: "form-error", "{message}" }
                }
                label { r#for: "register-username", "Username" }
                input {
                    id: "register-username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                label { r#for: "register-name", "Full name" }
                input {
                    id: "register-name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "register-age", "Age" }
                input {
                    id: "register-age",
                    r#type: "number",
                    min: "1",
                    value: "{age}",
                    oninput: move |evt| age.set(evt.value()),
                }
                label { r#for: "register-gender", "Gender" }
                select {
                    id: "register-gender",
                    onchange: move |evt| gender.set(parse_gender(&evt.value())),
                    option { value: "male", "Male" }
                    option { value: "female", "Female" }
                    option { value: "other", "Other" }
                }
                label { r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                label { r#for: "register-password-confirm", "Confirm password" }
                input {
                    id: "register-password-confirm",
                    r#type: "password",
                    value: "{password_confirm}",
                    oninput: move |evt| password_confirm.set(evt.value()),
                }
                label { r#for: "register-company-key", "Company key (admins only)" }
                input {
                    id: "register-company-key",
                    value: "{company_key}",
                    oninput: move |evt| company_key.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating..." } else { "Register" }
                }
            }
            p {
                "Already registered? "
                dioxus_router::Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
