//! Broadcast notification payloads.

use serde::{Deserialize, Serialize};

use super::stats::BroadcastStats;

/// Audience of a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastTarget {
    #[default]
    All,
    Free,
    Premium,
}

impl BroadcastTarget {
    pub const ALL: [BroadcastTarget; 3] =
        [BroadcastTarget::All, BroadcastTarget::Free, BroadcastTarget::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            BroadcastTarget::All => "all",
            BroadcastTarget::Free => "free",
            BroadcastTarget::Premium => "premium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BroadcastTarget::All => "All Users",
            BroadcastTarget::Free => "Free Users",
            BroadcastTarget::Premium => "Premium Users",
        }
    }

    /// Phrase used in the "will be sent to ..." hint.
    pub fn audience(&self) -> &'static str {
        match self {
            BroadcastTarget::All => "all users",
            BroadcastTarget::Free => "all free users",
            BroadcastTarget::Premium => "all premium users",
        }
    }

    /// How many users this target reaches according to `stats`.
    pub fn reach(&self, stats: &BroadcastStats) -> u64 {
        match self {
            BroadcastTarget::All => stats.total_users,
            BroadcastTarget::Free => stats.free_users,
            BroadcastTarget::Premium => stats.premium_users,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[default]
    SystemBroadcast,
    AdminAnnouncement,
}

impl NotificationType {
    pub const ALL: [NotificationType; 2] =
        [NotificationType::SystemBroadcast, NotificationType::AdminAnnouncement];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::SystemBroadcast => "system_broadcast",
            NotificationType::AdminAnnouncement => "admin_announcement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::SystemBroadcast => "System Broadcast",
            NotificationType::AdminAnnouncement => "Admin Announcement",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

/// Body of `POST /api/admin/broadcast-notification`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BroadcastRequest {
    pub title: String,
    pub message: String,
    pub target_users: BroadcastTarget,
    pub notification_type: NotificationType,
}

/// Fan-out summary returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    #[serde(default)]
    pub message: String,
    pub total_users: u64,
    pub notifications_sent: u64,
    #[serde(default)]
    pub fcm_sent: u64,
    #[serde(default)]
    pub fcm_failed: u64,
}

impl BroadcastResult {
    pub fn summary(&self) -> String {
        format!(
            "Broadcast sent successfully!\nTotal Users: {}\nNotifications Sent: {}\nPush Notifications: {} sent, {} failed",
            self.total_users, self.notifications_sent, self.fcm_sent, self.fcm_failed
        )
    }
}
