use dioxus::prelude::*;
use dioxus::router::Navigator;

use ui::{ConsoleScreen, TabId};

use crate::Route;

fn navigate_to(nav: Navigator, tab: TabId) {
    nav.push(Route::Tab {
        tab: tab.slug().to_string(),
    });
}

/// `/` opens the overview.
#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        ConsoleScreen {
            tab: TabId::Overview,
            on_navigate: move |tab| navigate_to(nav, tab),
        }
    }
}

/// `/:tab`. Unknown segments fall back to the overview.
#[component]
pub fn Tab(tab: String) -> Element {
    let nav = use_navigator();
    let requested = TabId::from_slug(&tab).unwrap_or_else(|| {
        tracing::warn!(tab = %tab, "unknown tab in url");
        TabId::Overview
    });

    rsx! {
        ConsoleScreen {
            tab: requested,
            on_navigate: move |tab| navigate_to(nav, tab),
        }
    }
}
