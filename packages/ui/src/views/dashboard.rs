use dashboard::tabs::resolve;
use dashboard::TabId;
use dioxus::prelude::*;

use super::{AdminsView, AiUsageView, BroadcastView, FeedbackView, LogsView, OverviewView, SettingsView, UsersView};
use crate::activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
use crate::session::use_console;
use crate::sidebar::Sidebar;

/// Sidebar plus the active tab. `tab` is what the route asked for; the
/// admin's role decides what is actually shown.
#[component]
pub fn DashboardShell(tab: TabId, on_navigate: EventHandler<TabId>) -> Element {
    let console = use_console();
    let admin = console.admin();
    let shown = admin.as_ref().map(|admin| resolve(admin.role, tab));

    // Later activity entries link back to the tab on screen.
    let mut log = console.log;
    use_effect(use_reactive(&shown, move |shown| {
        log.write().set_tab(shown);
    }));

    let (Some(admin), Some(active)) = (admin, shown) else {
        return rsx! {};
    };
    if active != tab {
        tracing::warn!(requested = tab.slug(), role = admin.role.as_str(), "tab not available for role");
    }

    rsx! {
        div {
            class: "console-shell",
            Sidebar {
                admin,
                active,
                on_select: move |id| on_navigate.call(id),
                on_logout: move |_| {
                    spawn(async move {
                        console.logout().await;
                    });
                },
            }
            main {
                class: "console-main",
                {match active {
                    TabId::Overview => rsx! { OverviewView {} },
                    TabId::Users => rsx! { UsersView {} },
                    TabId::Broadcast => rsx! { BroadcastView {} },
                    TabId::AiUsage => rsx! { AiUsageView {} },
                    TabId::Feedback => rsx! { FeedbackView {} },
                    TabId::Admins => rsx! { AdminsView {} },
                    TabId::Settings => rsx! { SettingsView {} },
                    TabId::Logs => rsx! { LogsView {} },
                }}
            }
            ActivityLogPanel { on_navigate: move |id| on_navigate.call(id) }
            ActivityLogToggle {}
        }
    }
}
