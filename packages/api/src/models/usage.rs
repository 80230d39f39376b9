//! # AI usage accounting
//!
//! Every AI request the backend makes on behalf of a user is recorded as a
//! [`UsageRecord`] (feature, provider, model, token counts, estimated cost).
//! The admin endpoints expose three aggregate views of those records:
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`UsageStats`] | `/ai-usage/stats`: global totals |
//! | [`UserUsage`] | `/ai-usage/users`: one row per user |
//! | [`FeatureBreakdown`] | `/ai-usage/stats/budgets`, `/ai-usage/stats/transactions`: per-feature totals plus a `total` entry |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    WeeklyInsight,
    MonthlyInsight,
    Chat,
    Translation,
    BudgetSuggestion,
    BudgetAutoCreate,
    TransactionTextExtraction,
    TransactionImageExtraction,
    TransactionAudioTranscription,
    #[serde(other)]
    Other,
}

impl FeatureType {
    /// Feature types an admin can filter the per-user detail by.
    pub const FILTERABLE: [FeatureType; 9] = [
        FeatureType::WeeklyInsight,
        FeatureType::MonthlyInsight,
        FeatureType::Chat,
        FeatureType::Translation,
        FeatureType::BudgetSuggestion,
        FeatureType::BudgetAutoCreate,
        FeatureType::TransactionTextExtraction,
        FeatureType::TransactionImageExtraction,
        FeatureType::TransactionAudioTranscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::WeeklyInsight => "weekly_insight",
            FeatureType::MonthlyInsight => "monthly_insight",
            FeatureType::Chat => "chat",
            FeatureType::Translation => "translation",
            FeatureType::BudgetSuggestion => "budget_suggestion",
            FeatureType::BudgetAutoCreate => "budget_auto_create",
            FeatureType::TransactionTextExtraction => "transaction_text_extraction",
            FeatureType::TransactionImageExtraction => "transaction_image_extraction",
            FeatureType::TransactionAudioTranscription => "transaction_audio_transcription",
            FeatureType::Other => "other",
        }
    }

    pub fn label(&self) -> String {
        humanize(self.as_str())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::FILTERABLE.into_iter().find(|f| f.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Openai,
    Gemini,
    #[serde(other)]
    Other,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Openai => "OPENAI",
            Provider::Gemini => "GEMINI",
            Provider::Other => "OTHER",
        }
    }
}

/// One AI request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: String,
    pub user_id: String,
    pub feature_type: FeatureType,
    pub provider: Provider,
    #[serde(default)]
    pub model_name: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub estimated_cost_usd: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Per-user aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUsage {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    #[serde(default)]
    pub weekly_insights_count: u64,
    #[serde(default)]
    pub monthly_insights_count: u64,
    #[serde(default)]
    pub chat_requests_count: u64,
    #[serde(default)]
    pub translation_count: u64,
    #[serde(default)]
    pub openai_cost: f64,
    #[serde(default)]
    pub gemini_cost: f64,
}

/// Global usage totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_users: u64,
    pub total_requests: u64,
    pub total_tokens: u64,
    pub total_cost_usd: f64,
    pub openai_total_cost: f64,
    pub gemini_total_cost: f64,
    #[serde(default)]
    pub weekly_insights_requests: u64,
    #[serde(default)]
    pub monthly_insights_requests: u64,
    #[serde(default)]
    pub chat_requests: u64,
    #[serde(default)]
    pub translation_requests: u64,
}

/// Totals for one feature inside a [`FeatureBreakdown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureUsage {
    pub requests: u64,
    pub tokens: u64,
    pub cost: f64,
    pub unique_users: u64,
}

/// Map of feature name to totals, with the grand total under `"total"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureBreakdown(pub BTreeMap<String, FeatureUsage>);

impl FeatureBreakdown {
    const TOTAL_KEY: &'static str = "total";

    /// Per-feature entries, excluding the grand total.
    pub fn features(&self) -> impl Iterator<Item = (&str, &FeatureUsage)> {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != Self::TOTAL_KEY)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn total(&self) -> FeatureUsage {
        self.0.get(Self::TOTAL_KEY).cloned().unwrap_or_default()
    }
}

/// `"budget_auto_create"` → `"Budget Auto Create"`.
pub fn humanize(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dollar amount with a fixed number of decimals, e.g. `$0.0123`.
pub fn format_cost(value: f64, decimals: usize) -> String {
    format!("${value:.decimals$}")
}
