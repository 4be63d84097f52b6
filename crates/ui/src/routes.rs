use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};

use crate::app::use_auth;
use crate::context::AppContext;
use crate::views::{AdminView, DashboardView, LoginView, QuizView, RegisterView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/login", LoginView)] Login {},
        #[route("/register", RegisterView)] Register {},
        #[route("/quiz/:quiz_type/:difficulty", QuizView)] Quiz { quiz_type: String, difficulty: String },
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    // The quiz page is full-screen and chrome-free; leaving it goes through
    // its own submit/result flow, not the navbar.
    let on_quiz = matches!(use_route::<Route>(), Route::Quiz { .. });

    rsx! {
        div { class: "app",
            if !on_quiz {
                Navbar {}
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    let ctx = use_context::<AppContext>();
    let mut auth = use_auth();
    let navigator = use_navigator();
    let state = auth.read().clone();

    rsx! {
        nav { class: "navbar",
            h1 { "Quiz Platform" }
            ul {
                if let Some(user) = state.user() {
                    li { Link { to: Route::Dashboard {}, "Dashboard" } }
                    if state.is_admin() {
                        li { Link { to: Route::Admin {}, "Admin" } }
                    }
                    li { class: "navbar__user", "{user.username}" }
                    li {
                        button {
                            class: "navbar__logout",
                            r#type: "button",
                            onclick: move |_| {
                                match ctx.auth().logout() {
                                    Ok(next) => auth.set(next),
                                    Err(err) => log::warn!("logout failed: {err}"),
                                }
                                let _ = navigator.push(Route::Login {});
                            },
                            "Logout"
                        }
                    }
                } else {
                    li { Link { to: Route::Login {}, "Login" } }
                    li { Link { to: Route::Register {}, "Register" } }
                }
            }
        }
    }
}
