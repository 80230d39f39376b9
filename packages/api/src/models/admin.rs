//! # Admin accounts and sessions
//!
//! Two representations of an administrator travel through the console:
//!
//! - [`AdminInfo`]: the compact record returned next to the access token at
//!   login and persisted with the session (`id`, `name`, `email`, `role`).
//! - [`AdminAccount`]: a row of the admin management table, which also
//!   carries `created_at` and `last_login`.
//!
//! [`Session`] pairs the bearer token with its [`AdminInfo`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Permission tier of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Moderator,
    #[default]
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub const ALL: [AdminRole; 3] = [AdminRole::Moderator, AdminRole::Admin, AdminRole::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Moderator => "moderator",
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRole::Moderator => "Moderator",
            AdminRole::Admin => "Admin",
            AdminRole::SuperAdmin => "Super Admin",
        }
    }

    /// Short description shown in the role picker.
    pub fn description(&self) -> &'static str {
        match self {
            AdminRole::Moderator => "Basic access",
            AdminRole::Admin => "Full access",
            AdminRole::SuperAdmin => "All privileges",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, AdminRole::SuperAdmin)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The admin record stored with a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
}

impl AdminInfo {
    /// First letter of the name, upper-cased, for avatar badges.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// An authenticated session: bearer token plus the admin it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub admin: AdminInfo,
}

/// A row of the admin management table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<AdminAccount> for AdminInfo {
    fn from(account: AdminAccount) -> Self {
        AdminInfo {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        }
    }
}

/// Body of `POST /api/admin/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/admin/admins`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Body of `PUT /api/admin/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

/// Body of `PUT /api/admin/change-password`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Generic `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
