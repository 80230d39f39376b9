use api::{AdminBackend, BroadcastTarget, NotificationType};
use dashboard::broadcast::{MESSAGE_MAX, TITLE_MAX};
use dashboard::BroadcastController;
use dioxus::prelude::*;

use super::widgets::{Notice, NoticeBanner, StatCard};
use crate::activity_log::LogLevel;
use crate::format::count;
use crate::prompt::BrowserPrompt;
use crate::session::use_console;

/// Notification composer with the audience counts for each target.
#[component]
pub fn BroadcastView() -> Element {
    let console = use_console();
    let mut composer = use_signal(BroadcastController::new);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut reload = use_signal(|| 0u64);

    let _stats = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let result = backend.broadcast_stats().await;
        if let Err(e) = &result {
            console.load_failed("broadcast stats", e);
        }
        composer.write().apply_stats(result);
    });

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        if composer.peek().sending {
            return;
        }
        spawn(async move {
            let Some(backend) = console.backend() else {
                return;
            };
            let form = composer.peek().form.clone();
            notice.set(None);
            composer.write().sending = true;
            let result = BroadcastController::send(&backend, &BrowserPrompt, &form).await;
            composer.write().sending = false;
            match result {
                Ok(sent) => {
                    console.record(LogLevel::Success, format!("Broadcast sent: {}", sent.summary()));
                    notice.set(Some(Notice::Success(sent.message.clone())));
                    composer.write().finish_send(sent);
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

    let state = composer.read().clone();
    let form = state.form.clone();
    let title_len = form.title.chars().count();
    let message_len = form.message.chars().count();
    let send_label = match (state.sending, state.reach()) {
        (true, _) => "Sending...".to_string(),
        (false, Some(reach)) => format!("Send to {} ({})", form.target_users.audience(), count(reach)),
        (false, None) => "Send Notification".to_string(),
    };

    rsx! {
        h1 { class: "view-title", "Broadcast Notification" }

        if let Some(stats) = state.stats.clone() {
            div {
                class: "stat-grid",
                StatCard {
                    label: "Total Users",
                    value: count(stats.total_users),
                    hint: format!("{} with push", count(stats.users_with_push_enabled)),
                }
                StatCard {
                    label: "Free Users",
                    value: count(stats.free_users),
                    hint: format!("{} with push", count(stats.free_with_push)),
                }
                StatCard {
                    label: "Premium Users",
                    value: count(stats.premium_users),
                    hint: format!("{} with push", count(stats.premium_with_push)),
                }
            }
        }

        form {
            class: "panel",
            onsubmit: send,

            label { class: "form-label", "Target audience" }
            div {
                class: "choice-row",
                for target in BroadcastTarget::ALL {
                    button {
                        key: "{target.as_str()}",
                        r#type: "button",
                        class: if form.target_users == target { "choice active" } else { "choice" },
                        onclick: move |_| composer.write().set_target(target),
                        div { class: "choice-label", "{target.label()}" }
                        if let Some(stats) = state.stats.as_ref() {
                            div { class: "choice-hint", "{count(target.reach(stats))} users" }
                        }
                    }
                }
            }

            label { class: "form-label", "Notification type" }
            select {
                class: "form-input",
                value: "{form.notification_type.as_str()}",
                onchange: move |e| {
                    if let Some(kind) = NotificationType::parse(&e.value()) {
                        composer.write().set_kind(kind);
                    }
                },
                for kind in NotificationType::ALL {
                    option { key: "{kind.as_str()}", value: "{kind.as_str()}", "{kind.label()}" }
                }
            }

            label { class: "form-label", "Title" }
            input {
                class: "form-input",
                maxlength: "{TITLE_MAX}",
                placeholder: "Notification title",
                value: "{form.title}",
                oninput: move |e| composer.write().set_title(&e.value()),
            }
            div { class: "char-count", "{title_len}/{TITLE_MAX}" }

            label { class: "form-label", "Message" }
            textarea {
                class: "form-input",
                rows: "5",
                maxlength: "{MESSAGE_MAX}",
                placeholder: "What would you like to tell your users?",
                value: "{form.message}",
                oninput: move |e| composer.write().set_message(&e.value()),
            }
            div { class: "char-count", "{message_len}/{MESSAGE_MAX}" }

            NoticeBanner { notice: notice() }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: state.sending,
                "{send_label}"
            }
        }

        if let Some(last) = state.last_result.as_ref() {
            div {
                class: "panel",
                h2 { class: "view-section-title", "Last broadcast" }
                div {
                    class: "stat-grid compact",
                    StatCard { label: "Total Users", value: count(last.total_users) }
                    StatCard { label: "Notifications Sent", value: count(last.notifications_sent) }
                    StatCard { label: "Push Sent", value: count(last.fcm_sent) }
                    StatCard { label: "Push Failed", value: count(last.fcm_failed) }
                }
            }
        }
    }
}
