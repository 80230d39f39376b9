//! User management: the filtered users table and the user detail modal.

use api::{
    AdminBackend, ApiError, SubscriptionType, SubscriptionUpdate, UserDetail, UserQuery, UserSummary,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::generation::{Generation, Ticket};
use crate::prompt::{require, Prompt};
use crate::ActionError;

pub const CONFIRM_DELETE_USER: &str =
    "Are you sure you want to delete this user? This action cannot be undone.";
pub const CONFIRM_DOWNGRADE: &str =
    "Are you sure you want to downgrade this user to Free? This will remove their premium benefits immediately.";

/// Users table state: the two filters and the last loaded rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersController {
    pub search: String,
    pub subscription: Option<SubscriptionType>,
    pub rows: Vec<UserSummary>,
    pub loading: bool,
    generation: Generation,
}

impl UsersController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> UserQuery {
        UserQuery {
            search: Some(self.search.clone()),
            subscription_type: self.subscription,
            ..Default::default()
        }
    }

    /// Clear both filters. The caller reloads afterwards.
    pub fn reset(&mut self) {
        self.search.clear();
        self.subscription = None;
    }

    pub fn begin_load(&mut self) -> (Ticket, UserQuery) {
        self.loading = true;
        (self.generation.next(), self.query())
    }

    /// Whether `ticket` belongs to the most recent load. Errors from older
    /// loads are not worth reporting.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    /// Apply a response. Returns `false` when it was superseded or failed,
    /// in which case the previous rows stay.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<UserSummary>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("dropping superseded users response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                true
            }
            Err(e) => {
                tracing::error!("failed to load users: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let (ticket, query) = self.begin_load();
        let result = backend.list_users(&query).await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }

    /// Delete a user after confirmation. The caller reloads on success.
    pub async fn delete_user<B: AdminBackend, P: Prompt>(
        backend: &B,
        prompt: &P,
        id: &str,
    ) -> Result<String, ActionError> {
        require(prompt, CONFIRM_DELETE_USER)?;
        backend
            .delete_user(id)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to delete user"))?;
        tracing::info!(user = id, "user deleted");
        Ok("User deleted successfully".to_string())
    }
}

/// A subscription action offered by the user detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange {
    /// Free user: premium for `days` from now.
    Upgrade { days: i64 },
    /// Premium user: push the expiry out by `days`, from the current expiry
    /// or from now when none is set.
    Extend { days: i64 },
    /// Premium until the end of `date` (UTC). Also how a free user is
    /// upgraded for a custom period. `date` may not be before today.
    SetExpiry(Option<NaiveDate>),
    Downgrade,
}

pub struct Preset {
    pub label: &'static str,
    pub days: i64,
}

pub const UPGRADE_PRESETS: [Preset; 4] = [
    Preset { label: "1 Month", days: 30 },
    Preset { label: "3 Months", days: 90 },
    Preset { label: "6 Months", days: 180 },
    Preset { label: "1 Year", days: 365 },
];

pub const EXTEND_PRESETS: [Preset; 4] = [
    Preset { label: "+1 Month", days: 30 },
    Preset { label: "+3 Months", days: 90 },
    Preset { label: "+6 Months", days: 180 },
    Preset { label: "+1 Year", days: 365 },
];

impl SubscriptionChange {
    /// The request body for this change, evaluated at `now`.
    pub fn plan(&self, user: &UserDetail, now: DateTime<Utc>) -> Result<SubscriptionUpdate, ActionError> {
        let premium_until = |at: DateTime<Utc>| SubscriptionUpdate {
            subscription_type: SubscriptionType::Premium,
            subscription_expires_at: Some(at),
        };
        match *self {
            SubscriptionChange::Upgrade { days } => Ok(premium_until(now + Duration::days(days))),
            SubscriptionChange::Extend { days } => {
                let from = user.subscription_expires_at.unwrap_or(now);
                Ok(premium_until(from + Duration::days(days)))
            }
            SubscriptionChange::SetExpiry(Some(date)) if date < now.date_naive() => {
                Err(ActionError::invalid("Expiry date cannot be in the past"))
            }
            SubscriptionChange::SetExpiry(Some(date)) => Ok(premium_until(api::params::end_of_day(date))),
            SubscriptionChange::SetExpiry(None) => Err(ActionError::invalid("Please select an expiry date")),
            SubscriptionChange::Downgrade => Ok(SubscriptionUpdate {
                subscription_type: SubscriptionType::Free,
                subscription_expires_at: None,
            }),
        }
    }
}

/// The user detail modal. Opens on a table row and upgrades itself to the
/// full record once `GET /users/{id}` answers.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetailController {
    pub user: UserDetail,
    pub full: bool,
    /// `YYYY-MM-DD` from the date input, empty when unset.
    pub expiry_input: String,
    pub error: Option<String>,
    pub busy: bool,
}

impl UserDetailController {
    pub fn open(row: &UserSummary) -> Self {
        let expiry_input = row
            .subscription_expires_at
            .map(|at| at.date_naive().format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Self {
            user: UserDetail::from(row.clone()),
            full: false,
            expiry_input,
            error: None,
            busy: false,
        }
    }

    pub fn apply_detail(&mut self, result: Result<UserDetail, ApiError>) {
        match result {
            Ok(detail) if detail.id == self.user.id => {
                self.user = detail;
                self.full = true;
            }
            Ok(_) => tracing::debug!("dropping detail for a different user"),
            Err(e) => tracing::warn!(user = %self.user.id, "failed to load user detail: {e}"),
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) {
        let result = backend.get_user(&self.user.id).await;
        self.apply_detail(result);
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.expiry_input.trim(), "%Y-%m-%d").ok()
    }

    /// Run `change` against `user`, confirming a downgrade first. The caller
    /// reloads the users table and closes the modal on success.
    pub async fn apply<B: AdminBackend, P: Prompt>(
        backend: &B,
        prompt: &P,
        user: &UserDetail,
        change: SubscriptionChange,
        now: DateTime<Utc>,
    ) -> Result<String, ActionError> {
        let update = change.plan(user, now)?;
        if change == SubscriptionChange::Downgrade {
            require(prompt, CONFIRM_DOWNGRADE)?;
        }
        backend
            .update_subscription(&user.id, &update)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to update subscription"))?;
        tracing::info!(
            user = %user.id,
            subscription = update.subscription_type.as_str(),
            expires = ?update.subscription_expires_at,
            "subscription updated"
        );
        Ok("Subscription updated successfully!".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use chrono::TimeZone;

    fn backend() -> MockBackend {
        let backend = MockBackend::new();
        *backend.users.borrow_mut() = vec![
            user("u1", "Ana", SubscriptionType::Premium),
            user("u2", "Bruno", SubscriptionType::Free),
            user("u3", "Anabel", SubscriptionType::Free),
        ];
        backend
    }

    #[tokio::test]
    async fn test_filters_go_into_the_query() {
        let backend = backend();
        let mut users = UsersController::new();
        users.search = "ana".to_string();
        users.subscription = Some(SubscriptionType::Premium);
        users.load(&backend).await.unwrap();

        assert_eq!(
            backend.lines(),
            vec!["GET /api/admin/users?search=ana&subscription_type=premium&limit=100"]
        );
        let ids: Vec<&str> = users.rows.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1"]);
    }

    #[tokio::test]
    async fn test_reset_clears_filters() {
        let backend = backend();
        let mut users = UsersController::new();
        users.search = "ana".to_string();
        users.subscription = Some(SubscriptionType::Free);
        users.load(&backend).await.unwrap();
        assert_eq!(users.rows.len(), 1);

        users.reset();
        users.load(&backend).await.unwrap();
        assert_eq!(users.rows.len(), 3);
        assert_eq!(backend.lines()[1], "GET /api/admin/users?limit=100");
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let mut users = UsersController::new();
        let (stale, _) = users.begin_load();
        let (current, _) = users.begin_load();

        assert!(users.finish_load(current, Ok(vec![user("u2", "Bruno", SubscriptionType::Free)])));
        assert!(!users.finish_load(stale, Ok(vec![user("u1", "Ana", SubscriptionType::Premium)])));
        assert_eq!(users.rows[0].id, "u2");
    }

    #[test]
    fn test_superseded_failure_is_not_current() {
        let mut users = UsersController::new();
        let (stale, _) = users.begin_load();
        let (current, _) = users.begin_load();

        assert!(!users.is_current(stale));
        assert!(users.is_current(current));
        assert!(!users.finish_load(stale, Err(ApiError::Network("offline".into()))));
        assert!(users.loading);
        assert!(users.finish_load(current, Ok(vec![user("u2", "Bruno", SubscriptionType::Free)])));
        assert!(!users.loading);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_rows() {
        let backend = backend();
        let mut users = UsersController::new();
        users.load(&backend).await.unwrap();

        backend.fail("list_users", ApiError::Network("offline".into()));
        assert!(users.load(&backend).await.is_err());
        assert_eq!(users.rows.len(), 3);
        assert!(!users.loading);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[false]);

        let err = UsersController::delete_user(&backend, &prompt, "u2").await.unwrap_err();
        assert!(err.is_declined());
        assert_eq!(prompt.questions(), vec![CONFIRM_DELETE_USER]);
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_then_reload() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut users = UsersController::new();

        UsersController::delete_user(&backend, &prompt, "u2").await.unwrap();
        users.load(&backend).await.unwrap();

        assert_eq!(
            backend.lines(),
            vec!["DELETE /api/admin/users/u2", "GET /api/admin/users?limit=100"]
        );
        assert!(users.rows.iter().all(|u| u.id != "u2"));
    }

    #[test]
    fn test_subscription_plans() {
        let now = fixed_now();
        let mut detail = UserDetail::from(user("u1", "Ana", SubscriptionType::Premium));

        let upgrade = SubscriptionChange::Upgrade { days: 30 }.plan(&detail, now).unwrap();
        assert_eq!(upgrade.subscription_expires_at, Some(now + Duration::days(30)));

        // No expiry set: extend counts from now
        let extend = SubscriptionChange::Extend { days: 90 }.plan(&detail, now).unwrap();
        assert_eq!(extend.subscription_expires_at, Some(now + Duration::days(90)));

        let current = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        detail.subscription_expires_at = Some(current);
        let extend = SubscriptionChange::Extend { days: 365 }.plan(&detail, now).unwrap();
        assert_eq!(extend.subscription_expires_at, Some(current + Duration::days(365)));

        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let explicit = SubscriptionChange::SetExpiry(Some(date)).plan(&detail, now).unwrap();
        assert_eq!(
            explicit.subscription_expires_at.unwrap().to_rfc3339(),
            "2025-12-31T23:59:59.999+00:00"
        );

        let missing = SubscriptionChange::SetExpiry(None).plan(&detail, now).unwrap_err();
        assert_eq!(missing.to_string(), "Please select an expiry date");
    }

    #[test]
    fn test_expiry_before_today_is_rejected() {
        let now = fixed_now();
        let detail = UserDetail::from(user("u2", "Bruno", SubscriptionType::Free));

        let yesterday = now.date_naive().pred_opt().unwrap();
        let err = SubscriptionChange::SetExpiry(Some(yesterday)).plan(&detail, now).unwrap_err();
        assert_eq!(err.to_string(), "Expiry date cannot be in the past");

        // Today still counts: premium until midnight
        let today = SubscriptionChange::SetExpiry(Some(now.date_naive())).plan(&detail, now).unwrap();
        assert_eq!(today.subscription_type, SubscriptionType::Premium);
        assert!(today.subscription_expires_at.unwrap() > now);
    }

    #[tokio::test]
    async fn test_free_user_upgrades_to_custom_date() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[]);
        let detail = UserDetail::from(user("u2", "Bruno", SubscriptionType::Free));
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();

        UserDetailController::apply(&backend, &prompt, &detail, SubscriptionChange::SetExpiry(Some(date)), fixed_now())
            .await
            .unwrap();

        let calls = backend.recorded();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/api/admin/users/u2/subscription");
        let body = calls[0].body.clone().unwrap();
        assert_eq!(body["subscription_type"], "premium");
        assert!(body["subscription_expires_at"].as_str().unwrap().starts_with("2025-04-15T23:59:59"));
        assert!(prompt.questions().is_empty());
    }

    #[tokio::test]
    async fn test_downgrade_requires_confirmation() {
        let backend = backend();
        let detail = UserDetail::from(backend.users.borrow()[0].clone());

        let declined = ScriptedPrompt::answering(&[false]);
        let err = UserDetailController::apply(&backend, &declined, &detail, SubscriptionChange::Downgrade, fixed_now())
            .await
            .unwrap_err();
        assert!(err.is_declined());
        assert!(backend.recorded().is_empty());

        let confirmed = ScriptedPrompt::answering(&[true]);
        UserDetailController::apply(&backend, &confirmed, &detail, SubscriptionChange::Downgrade, fixed_now())
            .await
            .unwrap();
        let call = &backend.recorded()[0];
        assert_eq!(call.path, "/api/admin/users/u1/subscription");
        let body = call.body.as_ref().unwrap();
        assert_eq!(body["subscription_type"], "free");
        assert!(body["subscription_expires_at"].is_null());
        assert_eq!(backend.users.borrow()[0].subscription_type, SubscriptionType::Free);
    }

    #[tokio::test]
    async fn test_failed_update_surfaces_message() {
        let backend = backend();
        backend.fail("update_subscription", ApiError::Status { status: 500, detail: None });
        let detail = UserDetail::from(backend.users.borrow()[1].clone());
        let prompt = ScriptedPrompt::default();

        let err = UserDetailController::apply(&backend, &prompt, &detail, SubscriptionChange::Upgrade { days: 30 }, fixed_now())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update subscription");
        assert!(prompt.questions().is_empty());
    }

    #[tokio::test]
    async fn test_detail_modal_loads_full_record() {
        let backend = backend();
        let row = backend.users.borrow()[0].clone();
        let mut modal = UserDetailController::open(&row);
        assert!(!modal.full);

        modal.load(&backend).await;
        assert!(modal.full);
        assert_eq!(modal.user.language, "en");
        assert_eq!(backend.lines(), vec!["GET /api/admin/users/u1"]);
    }
}
