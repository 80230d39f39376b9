//! Dioxus views for the admin console, shared by every platform package.
//!
//! [`Console`] wraps the platform's router: it loads the backend settings
//! and restores the stored session once. Each route then renders a
//! [`ConsoleScreen`], which shows either the login page or the dashboard.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod activity_log;
pub use activity_log::{use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

pub mod format;

mod prompt;
pub use prompt::BrowserPrompt;

mod session;
pub use session::{use_console, ConsoleContext, ConsoleSetup, SessionProvider};

mod sidebar;
pub use sidebar::Sidebar;

pub mod views;

pub use dashboard::TabId;

pub const CONSOLE_CSS: Asset = asset!("/assets/console.css");
const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Loads the backend settings and restores the session once, above the
/// router. Every route renders a [`ConsoleScreen`] inside it.
#[component]
pub fn Console(children: Element) -> Element {
    let setup = use_hook(ConsoleSetup::load);

    rsx! {
        document::Stylesheet { href: CONSOLE_CSS }
        document::Stylesheet { href: VIEWS_CSS }

        {match setup {
            Ok(setup) => rsx! {
                SessionProvider { setup, {children} }
            },
            Err(message) => rsx! { views::ConfigErrorView { message } },
        }}
    }
}

/// The login page, or the dashboard on `tab`. `on_navigate` is called when
/// the sidebar asks for another tab.
#[component]
pub fn ConsoleScreen(tab: TabId, on_navigate: EventHandler<TabId>) -> Element {
    let console = use_console();

    if console.is_authenticated() {
        rsx! { views::DashboardShell { tab, on_navigate } }
    } else {
        rsx! { views::LoginView {} }
    }
}
