use api::{AdminBackend, SubscriptionType, UserSummary};
use dashboard::UsersController;
use dioxus::prelude::*;

use super::user_detail::UserDetailModal;
use super::widgets::{EmptyState, Notice, NoticeBanner};
use crate::activity_log::LogLevel;
use crate::format::{count, date, optional_date};
use crate::prompt::BrowserPrompt;
use crate::session::use_console;

/// Users table with search and subscription filters.
#[component]
pub fn UsersView() -> Element {
    let console = use_console();
    let mut users = use_signal(UsersController::new);
    let mut reload = use_signal(|| 0u64);
    let mut selected = use_signal(|| Option::<UserSummary>::None);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let _loader = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let (ticket, query) = users.write().begin_load();
        let result = backend.list_users(&query).await;
        if let (Err(e), true) = (&result, users.peek().is_current(ticket)) {
            console.load_failed("users", e);
        }
        users.write().finish_load(ticket, result);
    });

    let mut refresh = move || *reload.write() += 1;

    let delete = move |id: String| {
        spawn(async move {
            let Some(backend) = console.backend() else {
                return;
            };
            match UsersController::delete_user(&backend, &BrowserPrompt, &id).await {
                Ok(msg) => {
                    console.record(LogLevel::Success, msg.clone());
                    notice.set(Some(Notice::Success(msg)));
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

    let is_super_admin = console.role().is_some_and(|r| r.is_super_admin());
    let state = users.read();
    let rows = state.rows.clone();
    let search = state.search.clone();
    let filter = state.subscription.map(|s| s.as_str()).unwrap_or("");
    let loading = state.loading;
    drop(state);

    rsx! {
        h1 { class: "view-title", "Users" }

        div {
            class: "filter-bar",
            input {
                class: "form-input",
                r#type: "search",
                placeholder: "Search by name or email",
                value: "{search}",
                oninput: move |e| users.write().search = e.value(),
                onkeydown: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter {
                        refresh();
                    }
                },
            }
            select {
                class: "form-input",
                value: "{filter}",
                onchange: move |e| {
                    users.write().subscription = SubscriptionType::parse(&e.value());
                    refresh();
                },
                option { value: "", "All subscriptions" }
                option { value: "free", "Free" }
                option { value: "premium", "Premium" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| refresh(),
                "Search"
            }
            button {
                class: "btn",
                onclick: move |_| {
                    users.write().reset();
                    refresh();
                },
                "Reset"
            }
        }

        NoticeBanner { notice: notice() }

        if rows.is_empty() {
            if loading {
                EmptyState { message: "Loading users..." }
            } else {
                EmptyState { message: "No users found" }
            }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "User" }
                        th { "Subscription" }
                        th { "Transactions" }
                        th { "Goals" }
                        th { "Joined" }
                        th { "Last active" }
                        th { "" }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            key: "{row.id}",
                            td {
                                div { class: "cell-primary", "{row.name}" }
                                div { class: "cell-secondary", "{row.email}" }
                            }
                            td {
                                span {
                                    class: "badge {row.subscription_type.as_str()}",
                                    "{row.subscription_type.label()}"
                                }
                                if let Some(expires) = row.subscription_expires_at.as_ref() {
                                    div { class: "cell-secondary", "until {date(expires)}" }
                                }
                            }
                            td { "{count(row.total_transactions)}" }
                            td { "{count(row.total_goals)}" }
                            td { "{date(&row.created_at)}" }
                            td { "{optional_date(row.last_active.as_ref())}" }
                            td {
                                class: "cell-actions",
                                button {
                                    class: "btn btn-small",
                                    onclick: {
                                        let row = row.clone();
                                        move |_| {
                                            notice.set(None);
                                            selected.set(Some(row.clone()));
                                        }
                                    },
                                    "Manage"
                                }
                                if is_super_admin {
                                    button {
                                        class: "btn btn-small btn-danger",
                                        onclick: {
                                            let id = row.id.clone();
                                            move |_| {
                                                delete(id.clone());
                                            }
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(row) = selected() {
            UserDetailModal {
                key: "{row.id}",
                row,
                on_close: move |_| selected.set(None),
                on_changed: move |msg: String| {
                    notice.set(Some(Notice::Success(msg)));
                    refresh();
                },
            }
        }
    }
}
