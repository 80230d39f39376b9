use api::AdminBackend;
use dashboard::LogsController;
use dioxus::prelude::*;

use super::widgets::EmptyState;
use crate::format::date_time;
use crate::icons::FaArrowsRotate;
use crate::session::use_console;
use crate::Icon;

#[component]
pub fn LogsView() -> Element {
    let console = use_console();
    let mut logs = use_signal(LogsController::new);
    let mut reload = use_signal(|| 0u64);

    let _loader = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let (ticket, query) = logs.write().begin_load();
        let result = backend.list_logs(&query).await;
        if let (Err(e), true) = (&result, logs.peek().is_current(ticket)) {
            console.load_failed("activity logs", e);
        }
        logs.write().finish_load(ticket, result);
    });

    let state = logs.read().clone();

    rsx! {
        div {
            class: "view-header",
            h1 { class: "view-title", "Activity Logs" }
            button {
                class: "btn",
                disabled: state.loading,
                onclick: move |_| *reload.write() += 1,
                Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                " Refresh"
            }
        }

        if state.rows.is_empty() {
            if state.loading {
                EmptyState { message: "Loading logs..." }
            } else {
                EmptyState { message: "No admin activity recorded" }
            }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "When" }
                        th { "Admin" }
                        th { "Action" }
                        th { "Target" }
                        th { "Details" }
                    }
                }
                tbody {
                    for entry in state.rows.clone() {
                        tr {
                            key: "{entry.id}",
                            td { "{date_time(&entry.timestamp)}" }
                            td { "{entry.admin_email}" }
                            td { span { class: "badge", "{entry.action_label()}" } }
                            td { {entry.target_user_email.clone().unwrap_or_else(|| "-".to_string())} }
                            td { class: "cell-secondary", {entry.details.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
        }
    }
}
