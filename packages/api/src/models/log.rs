//! Audit trail entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::usage::humanize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminActionLog {
    pub id: String,
    pub admin_id: String,
    pub admin_email: String,
    pub action: String,
    #[serde(default)]
    pub target_user_id: Option<String>,
    #[serde(default)]
    pub target_user_email: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl AdminActionLog {
    /// `"update_subscription"` → `"Update Subscription"`.
    pub fn action_label(&self) -> String {
        humanize(&self.action)
    }
}
