use dashboard::profile::EMAIL_CHANGED;
use dashboard::{ProfileController, ProfileOutcome};
use dioxus::prelude::*;

use super::widgets::{Notice, NoticeBanner};
use crate::activity_log::LogLevel;
use crate::session::use_console;

/// Profile and password forms for the signed-in admin.
///
/// Changing the email ends the session: the stored token was issued for
/// the old address.
#[component]
pub fn SettingsView() -> Element {
    let console = use_console();
    let mut settings = use_signal(move || {
        console
            .admin()
            .map(|admin| ProfileController::for_admin(&admin))
            .unwrap_or_default()
    });
    let mut profile_notice = use_signal(|| Option::<Notice>::None);
    let mut password_notice = use_signal(|| Option::<Notice>::None);

    let save_profile = move |evt: FormEvent| {
        evt.prevent_default();
        if settings.peek().saving_profile {
            return;
        }
        spawn(async move {
            let (Some(backend), Some(me)) = (console.backend(), console.admin()) else {
                return;
            };
            let form = settings.peek().profile.clone();
            profile_notice.set(None);
            settings.write().saving_profile = true;
            let result = ProfileController::update_profile(&backend, &me, &form).await;
            settings.write().saving_profile = false;
            match result {
                Ok(ProfileOutcome::EmailChanged) => {
                    console.record(LogLevel::Success, EMAIL_CHANGED);
                    console.logout().await;
                }
                Ok(ProfileOutcome::Updated(admin)) => {
                    console.update_admin(admin).await;
                    console.record(LogLevel::Success, "Profile updated");
                    profile_notice.set(Some(Notice::Success("Profile updated successfully".into())));
                }
                Err(e) => {
                    console.action_failed(&e);
                    profile_notice.set(Some(Notice::Error(e.to_string())));
                }
            }
        });
    };

    let save_password = move |evt: FormEvent| {
        evt.prevent_default();
        if settings.peek().saving_password {
            return;
        }
        spawn(async move {
            let Some(backend) = console.backend() else {
                return;
            };
            let form = settings.peek().password.clone();
            password_notice.set(None);
            settings.write().saving_password = true;
            let result = ProfileController::change_password(&backend, &form).await;
            settings.write().saving_password = false;
            match result {
                Ok(msg) => {
                    settings.write().clear_password();
                    console.record(LogLevel::Success, msg.clone());
                    password_notice.set(Some(Notice::Success(msg)));
                }
                Err(e) => {
                    console.action_failed(&e);
                    password_notice.set(Some(Notice::Error(e.to_string())));
                }
            }
        });
    };

    let state = settings.read().clone();
    let role = console.role().map(|r| r.label()).unwrap_or_default();

    rsx! {
        h1 { class: "view-title", "Settings" }

        form {
            class: "panel",
            onsubmit: save_profile,
            h2 { class: "view-section-title", "Profile" }
            p { class: "view-muted", "Role: {role}" }

            label { class: "form-label", "Name" }
            input {
                class: "form-input",
                value: "{state.profile.name}",
                oninput: move |e| settings.write().profile.name = e.value(),
            }

            label { class: "form-label", "Email" }
            input {
                class: "form-input",
                r#type: "email",
                value: "{state.profile.email}",
                oninput: move |e| settings.write().profile.email = e.value(),
            }
            p { class: "view-muted", "Changing your email signs you out." }

            NoticeBanner { notice: profile_notice() }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: state.saving_profile,
                if state.saving_profile { "Saving..." } else { "Update Profile" }
            }
        }

        form {
            class: "panel",
            onsubmit: save_password,
            h2 { class: "view-section-title", "Change Password" }

            label { class: "form-label", "Current password" }
            input {
                class: "form-input",
                r#type: "password",
                autocomplete: "current-password",
                value: "{state.password.current_password}",
                oninput: move |e| settings.write().password.current_password = e.value(),
            }

            label { class: "form-label", "New password" }
            input {
                class: "form-input",
                r#type: "password",
                autocomplete: "new-password",
                value: "{state.password.new_password}",
                oninput: move |e| settings.write().password.new_password = e.value(),
            }

            label { class: "form-label", "Confirm new password" }
            input {
                class: "form-input",
                r#type: "password",
                autocomplete: "new-password",
                value: "{state.password.confirm_password}",
                oninput: move |e| settings.write().password.confirm_password = e.value(),
            }

            NoticeBanner { notice: password_notice() }

            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: state.saving_password,
                if state.saving_password { "Changing..." } else { "Change Password" }
            }
        }
    }
}
