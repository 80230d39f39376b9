//! # Tab registry
//!
//! The dashboard's sections are data, not branches: each is a [`TabSpec`]
//! in [`REGISTRY`] with the capability an admin needs to open it. Navigation
//! lists [`visible_tabs`] for the signed-in role and every tab switch goes
//! through [`resolve`], which sends a role that may not open the requested
//! tab back to the overview.

use api::AdminRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Overview,
    Users,
    Broadcast,
    AiUsage,
    Feedback,
    Admins,
    Settings,
    Logs,
}

impl TabId {
    /// URL segment, also the id the backend-facing views were known by.
    pub fn slug(&self) -> &'static str {
        match self {
            TabId::Overview => "overview",
            TabId::Users => "users",
            TabId::Broadcast => "broadcast",
            TabId::AiUsage => "ai-usage",
            TabId::Feedback => "feedback",
            TabId::Admins => "admins",
            TabId::Settings => "settings",
            TabId::Logs => "logs",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        REGISTRY.iter().map(|t| t.id).find(|id| id.slug() == slug)
    }

    pub fn spec(&self) -> &'static TabSpec {
        // Every TabId has exactly one registry entry.
        match REGISTRY.iter().find(|t| t.id == *self) {
            Some(spec) => spec,
            None => &REGISTRY[0],
        }
    }
}

/// Who may open a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AnyAdmin,
    SuperAdminOnly,
}

impl Capability {
    pub fn allows(&self, role: AdminRole) -> bool {
        match self {
            Capability::AnyAdmin => true,
            Capability::SuperAdminOnly => role.is_super_admin(),
        }
    }
}

/// Navigation glyph; the UI maps each to an icon component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIcon {
    Chart,
    Users,
    Send,
    Bolt,
    Comments,
    Shield,
    Gear,
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    pub id: TabId,
    pub label: &'static str,
    pub icon: TabIcon,
    pub capability: Capability,
}

pub const REGISTRY: [TabSpec; 8] = [
    TabSpec { id: TabId::Overview, label: "Overview", icon: TabIcon::Chart, capability: Capability::AnyAdmin },
    TabSpec { id: TabId::Users, label: "Users", icon: TabIcon::Users, capability: Capability::AnyAdmin },
    TabSpec { id: TabId::Broadcast, label: "Broadcast", icon: TabIcon::Send, capability: Capability::AnyAdmin },
    TabSpec { id: TabId::AiUsage, label: "AI Usage & Costs", icon: TabIcon::Bolt, capability: Capability::AnyAdmin },
    TabSpec { id: TabId::Feedback, label: "Feedback", icon: TabIcon::Comments, capability: Capability::AnyAdmin },
    TabSpec { id: TabId::Admins, label: "Admins", icon: TabIcon::Shield, capability: Capability::SuperAdminOnly },
    TabSpec { id: TabId::Settings, label: "Settings", icon: TabIcon::Gear, capability: Capability::SuperAdminOnly },
    TabSpec { id: TabId::Logs, label: "Activity Logs", icon: TabIcon::Activity, capability: Capability::SuperAdminOnly },
];

/// Tabs `role` may open, in navigation order.
pub fn visible_tabs(role: AdminRole) -> Vec<&'static TabSpec> {
    REGISTRY.iter().filter(|t| t.capability.allows(role)).collect()
}

/// The tab actually shown when `role` asks for `requested`.
pub fn resolve(role: AdminRole, requested: TabId) -> TabId {
    if requested.spec().capability.allows(role) {
        requested
    } else {
        tracing::debug!(tab = requested.slug(), role = role.as_str(), "tab not permitted, showing overview");
        TabId::Overview
    }
}
