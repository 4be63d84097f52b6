use dioxus::prelude::*;
use dioxus_router::Router;

use services::AuthState;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    // Session restore happens once, before the first route renders. Every
    // view reads and writes this one signal.
    use_context_provider(|| Signal::new(ctx.auth().initialize()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route headings render inside the page.
        document::Title { "Quiz Platform" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

/// Read the shared auth signal from any routed component.
#[must_use]
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}
