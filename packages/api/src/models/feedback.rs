//! User feedback triage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Bug,
    FeatureRequest,
    Usability,
    General,
    #[serde(other)]
    Other,
}

impl FeedbackCategory {
    pub const FILTERABLE: [FeedbackCategory; 4] = [
        FeedbackCategory::Bug,
        FeedbackCategory::FeatureRequest,
        FeedbackCategory::Usability,
        FeedbackCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::Bug => "bug",
            FeedbackCategory::FeatureRequest => "feature_request",
            FeedbackCategory::Usability => "usability",
            FeedbackCategory::General => "general",
            FeedbackCategory::Other => "other",
        }
    }

    /// Plural label used in the category filter.
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackCategory::Bug => "Bugs",
            FeedbackCategory::FeatureRequest => "Feature Requests",
            FeedbackCategory::Usability => "Usability",
            FeedbackCategory::General => "General",
            FeedbackCategory::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::FILTERABLE.into_iter().find(|c| c.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 3] =
        [FeedbackStatus::Pending, FeedbackStatus::Reviewed, FeedbackStatus::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Reviewed => "reviewed",
            FeedbackStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::Reviewed => "Reviewed",
            FeedbackStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: String,
    pub user_id: String,
    #[serde(default = "unknown")]
    pub user_name: String,
    #[serde(default = "unknown")]
    pub user_email: String,
    pub category: FeedbackCategory,
    pub message: String,
    /// 1 to 5 stars, when the user left a rating.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn unknown() -> String {
    "Unknown".to_string()
}
