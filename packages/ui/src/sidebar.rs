use api::AdminInfo;
use dashboard::tabs::{visible_tabs, TabIcon, TabId};
use dioxus::prelude::*;

use crate::icons::{
    FaBolt, FaChartLine, FaClockRotateLeft, FaComments, FaGear, FaPaperPlane, FaRightFromBracket,
    FaShieldHalved, FaUsers,
};
use crate::Icon;

const SIDEBAR_CSS: Asset = asset!("/assets/styling/sidebar.css");

#[component]
fn TabGlyph(icon: TabIcon) -> Element {
    match icon {
        TabIcon::Chart => rsx! { Icon { icon: FaChartLine, width: 14, height: 14 } },
        TabIcon::Users => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
        TabIcon::Send => rsx! { Icon { icon: FaPaperPlane, width: 14, height: 14 } },
        TabIcon::Bolt => rsx! { Icon { icon: FaBolt, width: 14, height: 14 } },
        TabIcon::Comments => rsx! { Icon { icon: FaComments, width: 14, height: 14 } },
        TabIcon::Shield => rsx! { Icon { icon: FaShieldHalved, width: 14, height: 14 } },
        TabIcon::Gear => rsx! { Icon { icon: FaGear, width: 14, height: 14 } },
        TabIcon::Activity => rsx! { Icon { icon: FaClockRotateLeft, width: 14, height: 14 } },
    }
}

/// Navigation for the signed-in admin: only the tabs their role may open.
#[component]
pub fn Sidebar(
    admin: AdminInfo,
    active: TabId,
    on_select: EventHandler<TabId>,
    on_logout: EventHandler<()>,
) -> Element {
    let tabs = visible_tabs(admin.role);

    rsx! {
        document::Stylesheet { href: SIDEBAR_CSS }

        nav {
            class: "sidebar",

            div {
                class: "sidebar-brand",
                span { class: "sidebar-brand-name", "Flow Finance" }
                span { class: "sidebar-brand-sub", "Admin" }
            }

            div {
                class: "sidebar-tabs",
                for tab in tabs {
                    button {
                        key: "{tab.id.slug()}",
                        class: if tab.id == active { "sidebar-tab active" } else { "sidebar-tab" },
                        onclick: {
                            let id = tab.id;
                            move |_| on_select.call(id)
                        },
                        TabGlyph { icon: tab.icon }
                        span { "{tab.label}" }
                    }
                }
            }

            div {
                class: "sidebar-user",
                div { class: "sidebar-user-avatar", "{admin.initial()}" }
                div {
                    class: "sidebar-user-info",
                    span { class: "sidebar-user-name", "{admin.name}" }
                    span { class: "sidebar-user-role", "{admin.role.label()}" }
                }
                button {
                    class: "sidebar-logout",
                    title: "Sign out",
                    onclick: move |_| on_logout.call(()),
                    Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                }
            }
        }
    }
}
