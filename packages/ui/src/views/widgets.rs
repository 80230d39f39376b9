use dioxus::prelude::*;

/// One counter tile.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "stat-card",
            div { class: "stat-label", "{label}" }
            div { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                div { class: "stat-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

#[component]
pub fn Loading() -> Element {
    rsx! {
        div { class: "view-loading", "Loading..." }
    }
}

/// Inline result of the last action: green on success, red on failure.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> Element {
    match notice {
        Some(Notice::Success(msg)) => rsx! { div { class: "form-success", "{msg}" } },
        Some(Notice::Error(msg)) => rsx! { div { class: "form-error", "{msg}" } },
        None => rsx! {},
    }
}
