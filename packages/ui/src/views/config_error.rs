use dioxus::prelude::*;

/// Shown instead of the login page when the console cannot reach a backend
/// because none is configured.
#[component]
pub fn ConfigErrorView(message: String) -> Element {
    let env_var = store::config::BASE_URL_ENV;
    let filename = store::ConsoleConfig::filename();

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { class: "login-title", "Configuration error" }
                div { class: "form-error", "{message}" }
                p {
                    class: "view-muted",
                    "Set "
                    code { "{env_var}" }
                    " when building the console, or "
                    code { "[api] base_url" }
                    " in "
                    code { "{filename}" }
                    ", then reload."
                }
            }
        }
    }
}
