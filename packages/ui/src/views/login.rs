use dioxus::prelude::*;

use crate::activity_log::LogLevel;
use crate::session::use_console;

/// Email + password sign-in. Shown whenever there is no session.
#[component]
pub fn LoginView() -> Element {
    let console = use_console();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let backend = console.anonymous();
            let mut controller = console.session.peek().clone();
            let result = controller.login(&backend, &email(), &password()).await;
            submitting.set(false);
            match result {
                Ok(session) => {
                    console.record(LogLevel::Success, format!("Signed in as {}", session.admin.email));
                    let mut signal = console.session;
                    signal.set(controller);
                }
                Err(e) => {
                    password.set(String::new());
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "login-page",
            form {
                class: "login-card",
                onsubmit: submit,
                h1 { class: "login-title", "Flow Finance" }
                p { class: "view-muted", "Sign in to the admin console" }

                if let Some(msg) = error() {
                    div { class: "form-error", "{msg}" }
                }

                label { class: "form-label", r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    class: "form-input",
                    r#type: "email",
                    required: true,
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }

                label { class: "form-label", r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    class: "form-input",
                    r#type: "password",
                    required: true,
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
