//! Query-string parameters for list and statistics endpoints.
//!
//! Each type renders itself with `to_query()` into `(key, value)` pairs.
//! Unset filters are omitted entirely rather than sent empty.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{FeatureType, FeedbackCategory, SubscriptionType};

pub type QueryPairs = Vec<(&'static str, String)>;

/// Filters for `GET /api/admin/users`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub search: Option<String>,
    pub subscription_type: Option<SubscriptionType>,
    pub limit: u32,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            search: None,
            subscription_type: None,
            limit: 100,
        }
    }
}

impl UserQuery {
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sub) = self.subscription_type {
            pairs.push(("subscription_type", sub.as_str().to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Paging for `GET /api/admin/logs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
    pub limit: u32,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

impl LogQuery {
    pub fn to_query(&self) -> QueryPairs {
        vec![("limit", self.limit.to_string())]
    }
}

/// Filters for `GET /api/admin/feedback`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackQuery {
    pub category: Option<FeedbackCategory>,
}

impl FeedbackQuery {
    pub fn to_query(&self) -> QueryPairs {
        self.category
            .map(|c| vec![("category", c.as_str().to_string())])
            .unwrap_or_default()
    }
}

/// Inclusive calendar range for the AI usage statistics endpoints.
///
/// `start` is sent as the start of that day and `end` as its last
/// millisecond, both in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        self.end.map(end_of_day)
    }

    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_instant() {
            pairs.push(("start_date", start.to_rfc3339()));
        }
        if let Some(end) = self.end_instant() {
            pairs.push(("end_date", end.to_rfc3339()));
        }
        pairs
    }
}

/// Last millisecond of `date` in UTC.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Sort order for `GET /api/admin/ai-usage/users`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UsageSort {
    #[default]
    TotalCost,
    TotalTokens,
    TotalRequests,
}

impl UsageSort {
    pub const ALL: [UsageSort; 3] = [UsageSort::TotalCost, UsageSort::TotalTokens, UsageSort::TotalRequests];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageSort::TotalCost => "total_cost",
            UsageSort::TotalTokens => "total_tokens",
            UsageSort::TotalRequests => "total_requests",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UsageSort::TotalCost => "Sort by Total Cost",
            UsageSort::TotalTokens => "Sort by Total Tokens",
            UsageSort::TotalRequests => "Sort by Total Requests",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// Query for `GET /api/admin/ai-usage/users`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUsageQuery {
    pub sort_by: UsageSort,
    pub limit: u32,
}

impl Default for UserUsageQuery {
    fn default() -> Self {
        Self {
            sort_by: UsageSort::default(),
            limit: 50,
        }
    }
}

impl UserUsageQuery {
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("sort_by", self.sort_by.as_str().to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Query for `GET /api/admin/ai-usage/user/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageDetailQuery {
    pub feature_type: Option<FeatureType>,
    pub limit: u32,
}

impl Default for UsageDetailQuery {
    fn default() -> Self {
        Self {
            feature_type: None,
            limit: 100,
        }
    }
}

impl UsageDetailQuery {
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        if let Some(feature) = self.feature_type {
            pairs.push(("feature_type", feature.as_str().to_string()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_query_omits_blank_filters() {
        let query = UserQuery {
            search: Some("   ".to_string()),
            subscription_type: None,
            ..Default::default()
        };
        assert_eq!(query.to_query(), vec![("limit", "100".to_string())]);

        let query = UserQuery {
            search: Some(" ana ".to_string()),
            subscription_type: Some(SubscriptionType::Premium),
            limit: 100,
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("search", "ana".to_string()),
                ("subscription_type", "premium".to_string()),
                ("limit", "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1),
            end: NaiveDate::from_ymd_opt(2025, 1, 31),
        };
        let pairs = range.to_query();
        assert_eq!(pairs[0], ("start_date", "2025-01-01T00:00:00+00:00".to_string()));
        assert_eq!(pairs[1], ("end_date", "2025-01-31T23:59:59.999+00:00".to_string()));
        assert!(DateRange::default().to_query().is_empty());
    }
}
