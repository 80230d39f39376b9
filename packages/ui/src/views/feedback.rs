use api::{AdminBackend, FeedbackCategory, FeedbackStatus};
use dashboard::FeedbackController;
use dioxus::prelude::*;

use super::widgets::{EmptyState, Notice, NoticeBanner, StatCard};
use crate::activity_log::LogLevel;
use crate::format::date;
use crate::icons::{FaBug, FaLightbulb, FaMagnifyingGlass, FaMessage, FaStar, FaThumbsUp, FaTrashCan};
use crate::prompt::BrowserPrompt;
use crate::session::use_console;
use crate::Icon;

#[component]
fn CategoryGlyph(category: FeedbackCategory) -> Element {
    match category {
        FeedbackCategory::Bug => rsx! { Icon { icon: FaBug, width: 14, height: 14 } },
        FeedbackCategory::FeatureRequest => rsx! { Icon { icon: FaLightbulb, width: 14, height: 14 } },
        FeedbackCategory::Usability => rsx! { Icon { icon: FaThumbsUp, width: 14, height: 14 } },
        _ => rsx! { Icon { icon: FaMessage, width: 14, height: 14 } },
    }
}

#[component]
fn Stars(rating: Option<u8>) -> Element {
    let Some(rating) = rating.filter(|r| *r > 0) else {
        return rsx! { span { class: "view-muted", "-" } };
    };
    rsx! {
        span {
            class: "stars",
            title: "{rating}/5",
            for i in 1..=5u8 {
                span {
                    key: "{i}",
                    class: if i <= rating { "star filled" } else { "star" },
                    Icon { icon: FaStar, width: 12, height: 12 }
                }
            }
        }
    }
}

/// Feedback triage: category filter, summary counters and per-row status.
#[component]
pub fn FeedbackView() -> Element {
    let console = use_console();
    let mut feedback = use_signal(FeedbackController::new);
    let mut reload = use_signal(|| 0u64);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let _loader = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let (ticket, query) = feedback.write().begin_load();
        let result = backend.list_feedback(&query).await;
        if let (Err(e), true) = (&result, feedback.peek().is_current(ticket)) {
            console.load_failed("feedback", e);
        }
        feedback.write().finish_load(ticket, result);
    });

    let mut set_status = move |id: String, status: FeedbackStatus| {
        // Patched locally first; the request follows.
        let Some(change) = feedback.write().begin_status_change(&id, status) else {
            return;
        };
        spawn(async move {
            let Some(backend) = console.backend() else {
                feedback.write().rollback(&change);
                return;
            };
            match FeedbackController::send_status_change(&backend, &change).await {
                Ok(()) => console.record(LogLevel::Info, format!("Feedback marked {}", change.next.label())),
                Err(e) => {
                    feedback.write().rollback(&change);
                    console.action_failed(&e);
                    notice.set(Some(Notice::Error(e.to_string())));
                }
            }
        });
    };

    let delete = move |id: String| {
        spawn(async move {
            let (Some(backend), Some(role)) = (console.backend(), console.role()) else {
                return;
            };
            match FeedbackController::delete(&backend, &BrowserPrompt, role, &id).await {
                Ok(msg) => {
                    console.record(LogLevel::Success, msg);
                    *reload.write() += 1;
                }
                Err(e) => {
                    console.action_failed(&e);
                    if !e.is_declined() {
                        notice.set(Some(Notice::Error(e.to_string())));
                    }
                }
            }
        });
    };

    let can_delete = console.role().is_some_and(FeedbackController::can_delete);
    let state = feedback.read().clone();
    let filter = state.category.map(|c| c.as_str()).unwrap_or("");
    let average = format!("{:.1}", state.average_rating());
    let empty_message = match (state.loading, state.error.as_ref()) {
        (true, _) => "Loading feedback...".to_string(),
        (false, Some(error)) => error.clone(),
        (false, None) => "No feedback found".to_string(),
    };

    rsx! {
        div {
            class: "view-header",
            div {
                h1 { class: "view-title", "User Feedback" }
                p { class: "view-muted", "Manage bug reports and feature requests" }
            }
            div {
                class: "filter-bar",
                select {
                    class: "form-input",
                    value: "{filter}",
                    onchange: move |e| {
                        feedback.write().category = FeedbackCategory::parse(&e.value());
                        *reload.write() += 1;
                    },
                    option { value: "", "All Categories" }
                    for category in FeedbackCategory::FILTERABLE {
                        option { key: "{category.as_str()}", value: "{category.as_str()}", "{category.label()}" }
                    }
                }
                button {
                    class: "btn btn-primary",
                    title: "Refresh",
                    onclick: move |_| *reload.write() += 1,
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                }
            }
        }

        div {
            class: "stat-grid",
            StatCard { label: "Total Feedback", value: state.rows.len().to_string() }
            StatCard { label: "Pending Review", value: state.pending_count().to_string() }
            StatCard { label: "Avg Rating", value: average }
        }

        NoticeBanner { notice: notice() }

        if state.rows.is_empty() {
            EmptyState { message: empty_message }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Date / User" }
                        th { "Type" }
                        th { "Message" }
                        th { "Rating" }
                        th { "Status" }
                        th { "" }
                    }
                }
                tbody {
                    for item in state.rows.clone() {
                        tr {
                            key: "{item.id}",
                            td {
                                div { class: "cell-primary", "{item.user_name}" }
                                div { class: "cell-secondary", "{item.user_email}" }
                                div { class: "cell-secondary", "{date(&item.created_at)}" }
                            }
                            td {
                                span {
                                    class: "category",
                                    CategoryGlyph { category: item.category }
                                    " {item.category.label()}"
                                }
                            }
                            td { class: "cell-message", "{item.message}" }
                            td { Stars { rating: item.rating } }
                            td {
                                select {
                                    class: "status-select {item.status.as_str()}",
                                    value: "{item.status.as_str()}",
                                    onchange: {
                                        let id = item.id.clone();
                                        move |e: FormEvent| {
                                            if let Some(status) = FeedbackStatus::parse(&e.value()) {
                                                set_status(id.clone(), status);
                                            }
                                        }
                                    },
                                    for status in FeedbackStatus::ALL {
                                        option { key: "{status.as_str()}", value: "{status.as_str()}", "{status.label()}" }
                                    }
                                }
                            }
                            td {
                                class: "cell-actions",
                                if can_delete {
                                    button {
                                        class: "btn btn-small btn-danger",
                                        title: "Delete",
                                        onclick: {
                                            let id = item.id.clone();
                                            move |_| {
                                                delete(id.clone());
                                            }
                                        },
                                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
