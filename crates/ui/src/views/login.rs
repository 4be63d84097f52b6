use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::app::use_auth;
use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut auth = use_auth();
    let navigator = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut admin_gate = use_signal(|| false);
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
            let email_value = email.read().trim().to_string();
            let password_value = password();
            let result = service
                .login(&email_value, &password_value, admin_gate())
                .await;
            match result {
                Ok(next) => {
                    let to_admin = admin_gate();
                    auth.set(next);
                    let _ = navigator.push(if to_admin {
                        Route::Admin {}
                    } else {
                        Route::Dashboard {}
                    });
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page auth-page",
            h2 { "Sign in" }
            form { class: "auth-form", onsubmit: on_submit,
                if let Some(message) = error.read().as_deref() {
                    p { class: "form-error", "{message}" }
                }
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                label { class: "auth-form__gate",
                    input {
                        r#type: "checkbox",
                        checked: admin_gate(),
                        onchange: move |evt| admin_gate.set(evt.checked()),
                    }
                    "Sign in to the admin panel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
            p {
                "New here? "
                dioxus_router::Link { to: Route::Register {}, "Create an account" }
            }
        }
    }
}
