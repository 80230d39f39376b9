use dashboard::TabId;
use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// What the console did this session, newest first. Entries made on a
/// dashboard tab link back to it through `on_navigate`.
#[component]
pub fn ActivityLogPanel(on_navigate: EventHandler<TabId>) -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let state = log();
    let chips: Vec<(LogLevel, usize, String)> = LogLevel::ALL
        .into_iter()
        .map(|level| {
            let active = if state.filter == Some(level) { " active" } else { "" };
            (level, state.count(level), format!("activity-log-chip {}{active}", level.class()))
        })
        .filter(|(_, count, _)| *count > 0)
        .collect();
    let entries = state.shown();
    let total = state.entries.len();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        div {
            class: "activity-log-panel",
            div {
                class: "activity-log-header",
                span { "Console activity ({total})" }
                div {
                    class: "activity-log-header-actions",
                    button {
                        onclick: move |_| log.write().clear(),
                        "Clear"
                    }
                    button {
                        onclick: move |_| log.write().visible = false,
                        "Close"
                    }
                }
            }
            if !chips.is_empty() {
                div {
                    class: "activity-log-filters",
                    for (level, count, class) in chips {
                        button {
                            key: "{level.class()}",
                            class: "{class}",
                            onclick: move |_| log.write().toggle_filter(level),
                            "{level.label()} {count}"
                        }
                    }
                }
            }
            div {
                class: "activity-log-entries",
                if entries.is_empty() {
                    div { class: "activity-log-empty", "Nothing yet" }
                }
                for entry in entries {
                    div {
                        class: "activity-log-entry {entry.level.class()}",
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { " {entry.message}" }
                        if let Some(tab) = entry.tab {
                            button {
                                class: "activity-log-tab",
                                title: "Open tab",
                                onclick: move |_| on_navigate.call(tab),
                                "{tab.spec().label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Floating button that opens the panel. Shows the error count while
/// there are errors, otherwise the total.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let errors = log().count(LogLevel::Error);
    let count = log().entries.len();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        button {
            class: if errors > 0 { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            onclick: move |_| {
                let visible = log().visible;
                log.write().visible = !visible;
            },
            title: "Console activity",
            if errors > 0 {
                "{errors}"
            } else if count > 0 {
                "{count}"
            } else {
                "Log"
            }
        }
    }
}
