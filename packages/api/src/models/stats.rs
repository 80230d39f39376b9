//! Dashboard counters.

use serde::{Deserialize, Serialize};

/// `GET /api/admin/stats/users`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_users: u64,
    pub free_users: u64,
    pub premium_users: u64,
    pub new_users_last_30_days: u64,
    pub active_users_last_7_days: u64,
    pub total_transactions: u64,
    pub total_goals: u64,
}

/// `GET /api/admin/stats/system`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub free_users: u64,
    #[serde(default)]
    pub premium_users: u64,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub total_goals: u64,
    #[serde(default)]
    pub total_budgets: u64,
    #[serde(default)]
    pub total_chat_sessions: u64,
    #[serde(default)]
    pub total_notifications: u64,
    pub new_users_today: u64,
    pub new_users_this_week: u64,
    pub new_users_this_month: u64,
    pub active_users_today: u64,
    pub active_users_this_week: u64,
}

/// `GET /api/admin/broadcast-stats`: audience sizes per target group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastStats {
    pub total_users: u64,
    pub free_users: u64,
    pub premium_users: u64,
    pub users_with_push_enabled: u64,
    pub free_with_push: u64,
    pub premium_with_push: u64,
}
