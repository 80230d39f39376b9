use api::{AdminBackend, SubscriptionType, UserSummary};
use chrono::Utc;
use dashboard::users::{EXTEND_PRESETS, UPGRADE_PRESETS};
use dashboard::{SubscriptionChange, UserDetailController};
use dioxus::prelude::*;

use super::modal_overlay::ModalOverlay;
use super::widgets::StatCard;
use crate::activity_log::LogLevel;
use crate::format::{count, date, optional_date};
use crate::prompt::BrowserPrompt;
use crate::session::use_console;

/// Subscription management for one user. Opens with the table row and
/// fills in the rest once the full record arrives.
#[component]
pub fn UserDetailModal(row: UserSummary, on_close: EventHandler<()>, on_changed: EventHandler<String>) -> Element {
    let console = use_console();
    let mut detail = use_signal(move || UserDetailController::open(&row));

    let _full = use_resource(move || async move {
        let Some(backend) = console.backend() else {
            return;
        };
        let id = detail.peek().user.id.clone();
        let result = backend.get_user(&id).await;
        if let Err(e) = &result {
            console.load_failed("user details", e);
        }
        detail.write().apply_detail(result);
    });

    let apply = move |change: SubscriptionChange| {
        spawn(async move {
            let Some(backend) = console.backend() else {
                return;
            };
            let user = detail.peek().user.clone();
            {
                let mut state = detail.write();
                state.busy = true;
                state.error = None;
            }
            let result = UserDetailController::apply(&backend, &BrowserPrompt, &user, change, Utc::now()).await;
            detail.write().busy = false;
            match result {
                Ok(msg) => {
                    console.record(LogLevel::Success, format!("{}: {msg}", user.email));
                    on_changed.call(msg);
                    on_close.call(());
                }
                Err(e) => {
                    console.action_failed(&e);
                    if !e.is_declined() {
                        detail.write().error = Some(e.to_string());
                    }
                }
            }
        });
    };

    let state = detail.read().clone();
    let user = state.user.clone();
    let now = Utc::now();
    let days_left = user.days_remaining(now);
    let today = now.date_naive().format("%Y-%m-%d").to_string();
    let busy = state.busy;

    rsx! {
        ModalOverlay {
            title: "{user.name}",
            wide: true,
            on_close: move |_| on_close.call(()),

            div { class: "view-muted", "{user.email}" }

            div {
                class: "stat-grid compact",
                StatCard { label: "Transactions", value: count(user.total_transactions) }
                StatCard { label: "Goals", value: count(user.total_goals) }
                if state.full {
                    StatCard { label: "Budgets", value: count(user.total_budgets) }
                    StatCard { label: "Chat Sessions", value: count(user.total_chat_sessions) }
                }
                StatCard { label: "Currency", value: user.default_currency.to_uppercase() }
                StatCard { label: "Joined", value: date(&user.created_at) }
                StatCard { label: "Last Active", value: optional_date(user.last_active.as_ref()) }
                if state.full && !user.language.is_empty() {
                    StatCard { label: "Language", value: user.language.to_uppercase() }
                }
            }

            h4 { class: "view-section-title", "Subscription" }

            div {
                class: "subscription-status",
                span {
                    class: "badge {user.subscription_type.as_str()}",
                    "{user.subscription_type.label()}"
                }
                if let Some(expires) = user.subscription_expires_at.as_ref() {
                    span { class: "view-muted", " expires {date(expires)}" }
                }
                if let Some(days) = days_left {
                    if days >= 0 {
                        span { class: "view-muted", " ({days} days left)" }
                    } else {
                        span { class: "form-error-inline", " (expired)" }
                    }
                }
            }

            if let Some(msg) = state.error.clone() {
                div { class: "form-error", "{msg}" }
            }

            {match user.subscription_type {
                SubscriptionType::Free => rsx! {
                    label { class: "form-label", "Upgrade to Premium" }
                    div {
                        class: "preset-row",
                        for preset in UPGRADE_PRESETS.iter() {
                            button {
                                key: "{preset.days}",
                                class: "btn btn-primary",
                                disabled: busy,
                                onclick: {
                                    let days = preset.days;
                                    move |_| {
                                        apply(SubscriptionChange::Upgrade { days });
                                    }
                                },
                                "{preset.label}"
                            }
                        }
                    }

                    label { class: "form-label", r#for: "premium-until", "Or set a custom premium period" }
                    div {
                        class: "preset-row",
                        input {
                            id: "premium-until",
                            class: "form-input",
                            r#type: "date",
                            min: "{today}",
                            value: "{state.expiry_input}",
                            oninput: move |e| detail.write().expiry_input = e.value(),
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: busy,
                            onclick: move |_| {
                                let until = detail.peek().expiry_date();
                                apply(SubscriptionChange::SetExpiry(until));
                            },
                            "Upgrade to Premium"
                        }
                    }
                },
                SubscriptionType::Premium => rsx! {
                    label { class: "form-label", "Extend Premium" }
                    div {
                        class: "preset-row",
                        for preset in EXTEND_PRESETS.iter() {
                            button {
                                key: "{preset.days}",
                                class: "btn",
                                disabled: busy,
                                onclick: {
                                    let days = preset.days;
                                    move |_| {
                                        apply(SubscriptionChange::Extend { days });
                                    }
                                },
                                "{preset.label}"
                            }
                        }
                    }

                    label { class: "form-label", r#for: "expiry-date", "Set expiry date" }
                    div {
                        class: "preset-row",
                        input {
                            id: "expiry-date",
                            class: "form-input",
                            r#type: "date",
                            min: "{today}",
                            value: "{state.expiry_input}",
                            oninput: move |e| detail.write().expiry_input = e.value(),
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: busy,
                            onclick: move |_| {
                                let expiry = detail.peek().expiry_date();
                                apply(SubscriptionChange::SetExpiry(expiry));
                            },
                            "Set Expiry"
                        }
                    }

                    div {
                        class: "danger-zone",
                        button {
                            class: "btn btn-danger",
                            disabled: busy,
                            onclick: move |_| {
                                apply(SubscriptionChange::Downgrade);
                            },
                            "Downgrade to Free"
                        }
                    }
                },
            }}
        }
    }
}
