//! # AI usage analytics
//!
//! Four aggregate views load together and render only when all four have
//! answered:
//!
//! | Data | Endpoint | Filtered by |
//! |------|----------|-------------|
//! | global totals | `/ai-usage/stats` | date range |
//! | per-user table | `/ai-usage/users` | sort key |
//! | budget features | `/ai-usage/stats/budgets` | date range |
//! | transaction extraction | `/ai-usage/stats/transactions` | date range |
//!
//! Selecting a user opens the per-request detail, re-fetched whenever its
//! feature filter changes. Detail responses for a user or filter that is no
//! longer selected are dropped.

use api::{
    AdminBackend, ApiError, DateRange, FeatureBreakdown, FeatureType, UsageDetailQuery, UsageRecord, UsageSort,
    UsageStats, UserUsage, UserUsageQuery,
};
use chrono::NaiveDate;

use crate::generation::{Generation, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub struct AiUsageData {
    pub stats: UsageStats,
    pub users: Vec<UserUsage>,
    pub budgets: FeatureBreakdown,
    pub transactions: FeatureBreakdown,
}

/// Collapsible panels of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Users,
    Budget,
    Transaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub overview: bool,
    pub users: bool,
    pub budget: bool,
    pub transaction: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            overview: true,
            users: true,
            budget: false,
            transaction: false,
        }
    }
}

impl Sections {
    pub fn is_open(&self, section: Section) -> bool {
        match section {
            Section::Overview => self.overview,
            Section::Users => self.users,
            Section::Budget => self.budget,
            Section::Transaction => self.transaction,
        }
    }

    pub fn toggle(&mut self, section: Section) {
        let open = match section {
            Section::Overview => &mut self.overview,
            Section::Users => &mut self.users,
            Section::Budget => &mut self.budget,
            Section::Transaction => &mut self.transaction,
        };
        *open = !*open;
    }
}

/// Per-user request log shown in the detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageDetail {
    pub user: UserUsage,
    pub feature: Option<FeatureType>,
    pub records: Vec<UsageRecord>,
    generation: Generation,
}

impl UsageDetail {
    pub fn query(&self) -> UsageDetailQuery {
        UsageDetailQuery {
            feature_type: self.feature,
            ..Default::default()
        }
    }

    pub fn begin_load(&mut self) -> (Ticket, String, UsageDetailQuery) {
        (self.generation.next(), self.user.user_id.clone(), self.query())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<UsageRecord>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(e) => {
                tracing::error!(user = %self.user.user_id, "failed to load usage detail: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let (ticket, user_id, query) = self.begin_load();
        let result = backend.user_usage_detail(&user_id, &query).await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiUsageController {
    pub range: DateRange,
    pub sort: UsageSort,
    pub data: Option<AiUsageData>,
    pub sections: Sections,
    pub detail: Option<UsageDetail>,
    generation: Generation,
}

/// `YYYY-MM-DD` from a date input; blank or malformed means unset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl AiUsageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, raw: &str) {
        self.range.start = parse_date(raw);
    }

    pub fn set_end(&mut self, raw: &str) {
        self.range.end = parse_date(raw);
    }

    pub fn clear_range(&mut self) {
        self.range = DateRange::default();
    }

    /// All four views in parallel; all or nothing.
    pub async fn fetch<B: AdminBackend>(backend: &B, range: DateRange, sort: UsageSort) -> Result<AiUsageData, ApiError> {
        let users_query = UserUsageQuery {
            sort_by: sort,
            ..Default::default()
        };
        let (stats, users, budgets, transactions) = futures::try_join!(
            backend.usage_stats(&range),
            backend.usage_by_user(&users_query),
            backend.budget_usage(&range),
            backend.transaction_usage(&range),
        )?;
        Ok(AiUsageData {
            stats,
            users,
            budgets,
            transactions,
        })
    }

    pub fn begin_load(&mut self) -> (Ticket, DateRange, UsageSort) {
        (self.generation.next(), self.range, self.sort)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<AiUsageData, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                true
            }
            Err(e) => {
                tracing::error!("failed to load AI usage: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let (ticket, range, sort) = self.begin_load();
        let result = Self::fetch(backend, range, sort).await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }

    pub fn select_user(&mut self, user: UserUsage) {
        self.detail = Some(UsageDetail {
            user,
            feature: None,
            records: Vec::new(),
            generation: Generation::default(),
        });
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn set_feature(&mut self, feature: Option<FeatureType>) {
        if let Some(detail) = self.detail.as_mut() {
            detail.feature = feature;
        }
    }
}
