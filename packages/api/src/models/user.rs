//! End-user accounts as seen by the admin console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    #[default]
    Free,
    Premium,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Free => "free",
            SubscriptionType::Premium => "premium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionType::Free => "Free",
            SubscriptionType::Premium => "Premium",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "free" => Some(SubscriptionType::Free),
            "premium" => Some(SubscriptionType::Premium),
            _ => None,
        }
    }
}

/// A row of the users table (`GET /api/admin/users`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subscription_type: SubscriptionType,
    #[serde(default, with = "timestamp::option")]
    pub subscription_expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub total_goals: u64,
    #[serde(default, with = "timestamp::option")]
    pub last_active: Option<DateTime<Utc>>,
}

/// Full record for the user detail modal (`GET /api/admin/users/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subscription_type: SubscriptionType,
    #[serde(default, with = "timestamp::option")]
    pub subscription_expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default)]
    pub language: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub total_goals: u64,
    #[serde(default)]
    pub total_budgets: u64,
    #[serde(default)]
    pub total_chat_sessions: u64,
    #[serde(default, with = "timestamp::option")]
    pub last_active: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "usd".to_string()
}

impl UserDetail {
    /// Whole days until the subscription expires, rounded up. `None` when
    /// no expiry is set.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        let expires = self.subscription_expires_at?;
        let secs = (expires - now).num_seconds();
        Some((secs + 86_399).div_euclid(86_400))
    }
}

impl From<UserSummary> for UserDetail {
    /// Seed the detail modal from a table row while the full record loads.
    fn from(user: UserSummary) -> Self {
        UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            subscription_type: user.subscription_type,
            subscription_expires_at: user.subscription_expires_at,
            default_currency: user.default_currency,
            language: String::new(),
            created_at: user.created_at,
            total_transactions: user.total_transactions,
            total_goals: user.total_goals,
            total_budgets: 0,
            total_chat_sessions: 0,
            last_active: user.last_active,
        }
    }
}

/// Body of `PUT /api/admin/users/{id}/subscription`.
///
/// `subscription_expires_at` is always serialised, as `null` on downgrade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionUpdate {
    pub subscription_type: SubscriptionType,
    #[serde(with = "timestamp::option")]
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_summary_defaults() {
        let raw = r#"{
            "id": "u1",
            "name": "Ana",
            "email": "ana@example.com",
            "created_at": "2024-06-01T08:30:00"
        }"#;
        let user: UserSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(user.subscription_type, SubscriptionType::Free);
        assert_eq!(user.default_currency, "usd");
        assert_eq!(user.total_transactions, 0);
        assert!(user.subscription_expires_at.is_none());
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut detail = UserDetail::from(UserSummary {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subscription_type: SubscriptionType::Premium,
            subscription_expires_at: Some(Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()),
            default_currency: "usd".into(),
            created_at: now,
            total_transactions: 0,
            total_goals: 0,
            last_active: None,
        });
        assert_eq!(detail.days_remaining(now), Some(2));

        detail.subscription_expires_at = None;
        assert_eq!(detail.days_remaining(now), None);
    }

    #[test]
    fn test_downgrade_serialises_null_expiry() {
        let body = SubscriptionUpdate {
            subscription_type: SubscriptionType::Free,
            subscription_expires_at: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["subscription_type"], "free");
        assert!(json["subscription_expires_at"].is_null());
    }
}
