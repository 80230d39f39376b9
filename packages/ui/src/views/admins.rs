use api::{AdminAccount, AdminBackend, AdminRole};
use dashboard::AdminsController;
use dioxus::prelude::*;

use super::modal_overlay::ModalOverlay;
use super::widgets::{EmptyState, Notice, NoticeBanner};
use crate::activity_log::LogLevel;
use crate::format::optional_date;
use crate::prompt::BrowserPrompt;
use crate::session::use_console;

#[component]
pub fn AdminsView() -> Element {
    let console = use_console();
    let mut admins = use_signal(AdminsController::new);
    let mut reload = use_signal(|| 0u64);
    let mut notice = use_signal(|| Option::<Notice>::None);

    let _loader = use_resource(move || async move {
        reload();
        let Some(backend) = console.backend() else {
            return;
        };
        let ticket = admins.write().begin_load();
        let result = backend.list_admins().await;
        if let (Err(e), true) = (&result, admins.peek().is_current(ticket)) {
            console.load_failed("admins", e);
        }
        admins.write().finish_load(ticket, result);
    });

    let delete = move |target: AdminAccount| {
        spawn(async move {
            let (Some(backend), Some(me)) = (console.backend(), console.admin()) else {
                return;
            };
            match AdminsController::delete_admin(&backend, &BrowserPrompt, &me, &target).await {
                Ok(msg) => {
                    console.record(LogLevel::Success, format!("{msg}: {}", target.email));
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

    let me = console.admin();
    let state = admins.read();
    let rows = state.rows.clone();
    let loading = state.loading;
    let form_open = state.form.is_some();
    drop(state);

    rsx! {
        div {
            class: "view-header",
            h1 { class: "view-title", "Admins" }
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    notice.set(None);
                    admins.write().open_create();
                },
                "New Admin"
            }
        }

        NoticeBanner { notice: notice() }

        if rows.is_empty() {
            if loading {
                EmptyState { message: "Loading admins..." }
            } else {
                EmptyState { message: "No admins found" }
            }
        } else {
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Admin" }
                        th { "Role" }
                        th { "Created" }
                        th { "Last login" }
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
                                span { class: "badge role-{row.role.as_str()}", "{row.role.label()}" }
                            }
                            td { "{optional_date(row.created_at.as_ref())}" }
                            td { "{optional_date(row.last_login.as_ref())}" }
                            td {
                                class: "cell-actions",
                                if me.as_ref().is_some_and(|me| AdminsController::can_delete(me, &row)) {
                                    button {
                                        class: "btn btn-small btn-danger",
                                        onclick: {
                                            let row = row.clone();
                                            move |_| {
                                                delete(row.clone());
                                            }
                                        },
                                        "Delete"
                                    }
                                } else {
                                    span { class: "view-muted", "You" }
                                }
                            }
                        }
                    }
                }
            }
        }

        if form_open {
            CreateAdminModal {
                admins,
                on_created: move |account: AdminAccount| {
                    admins.write().close_create();
                    notice.set(Some(Notice::Success(format!("Admin {} created", account.email))));
                    *reload.write() += 1;
                },
            }
        }
    }
}

/// The create-admin form, editing `admins.form` in place.
#[component]
fn CreateAdminModal(mut admins: Signal<AdminsController>, on_created: EventHandler<AdminAccount>) -> Element {
    let console = use_console();
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(draft) = admins.peek().form.clone() else {
            return;
        };
        spawn(async move {
            let Some(backend) = console.backend() else {
                return;
            };
            error.set(None);
            saving.set(true);
            let result = AdminsController::create_admin(&backend, &draft).await;
            saving.set(false);
            match result {
                Ok(account) => {
                    console.record(
                        LogLevel::Success,
                        format!("Created {} admin {}", account.role.label(), account.email),
                    );
                    on_created.call(account);
                }
                Err(e) => {
                    console.action_failed(&e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let draft = admins.read().form.clone().unwrap_or_default();

    rsx! {
        ModalOverlay {
            title: "Create Admin",
            on_close: move |_| admins.write().close_create(),

            form {
                class: "modal-form",
                onsubmit: submit,

                if let Some(msg) = error() {
                    div { class: "form-error", "{msg}" }
                }

                label { class: "form-label", "Name" }
                input {
                    class: "form-input",
                    value: "{draft.name}",
                    oninput: move |e| {
                        if let Some(form) = admins.write().form.as_mut() {
                            form.name = e.value();
                        }
                    },
                }

                label { class: "form-label", "Email" }
                input {
                    class: "form-input",
                    r#type: "email",
                    value: "{draft.email}",
                    oninput: move |e| {
                        if let Some(form) = admins.write().form.as_mut() {
                            form.email = e.value();
                        }
                    },
                }

                label { class: "form-label", "Password" }
                input {
                    class: "form-input",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{draft.password}",
                    oninput: move |e| {
                        if let Some(form) = admins.write().form.as_mut() {
                            form.password = e.value();
                        }
                    },
                }

                label { class: "form-label", "Role" }
                select {
                    class: "form-input",
                    value: "{draft.role.as_str()}",
                    onchange: move |e| {
                        if let (Some(role), Some(form)) = (AdminRole::parse(&e.value()), admins.write().form.as_mut()) {
                            form.role = role;
                        }
                    },
                    for role in AdminRole::ALL {
                        option { key: "{role.as_str()}", value: "{role.as_str()}", "{role.label()}" }
                    }
                }
                p { class: "view-muted", "{draft.role.description()}" }

                div {
                    class: "modal-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| admins.write().close_create(),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Creating..." } else { "Create Admin" }
                    }
                }
            }
        }
    }
}
