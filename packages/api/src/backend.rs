//! # AdminBackend: the abstract admin API
//!
//! Every view-controller talks to the backend through [`AdminBackend`], so the
//! same logic runs against the real [`ApiClient`] in the browser and against
//! an in-memory mock in tests.
//!
//! | Area | Methods |
//! |------|---------|
//! | Session | [`login`](AdminBackend::login), [`get_me`](AdminBackend::get_me), [`update_me`](AdminBackend::update_me), [`change_password`](AdminBackend::change_password) |
//! | Users | [`list_users`](AdminBackend::list_users), [`get_user`](AdminBackend::get_user), [`delete_user`](AdminBackend::delete_user), [`update_subscription`](AdminBackend::update_subscription) |
//! | Admins | [`list_admins`](AdminBackend::list_admins), [`create_admin`](AdminBackend::create_admin), [`delete_admin`](AdminBackend::delete_admin) |
//! | Stats | [`user_stats`](AdminBackend::user_stats), [`system_stats`](AdminBackend::system_stats), [`broadcast_stats`](AdminBackend::broadcast_stats) |
//! | Audit | [`list_logs`](AdminBackend::list_logs) |
//! | Broadcast | [`send_broadcast`](AdminBackend::send_broadcast) |
//! | AI usage | [`usage_stats`](AdminBackend::usage_stats), [`usage_by_user`](AdminBackend::usage_by_user), [`budget_usage`](AdminBackend::budget_usage), [`transaction_usage`](AdminBackend::transaction_usage), [`user_usage_detail`](AdminBackend::user_usage_detail) |
//! | Feedback | [`list_feedback`](AdminBackend::list_feedback), [`set_feedback_status`](AdminBackend::set_feedback_status), [`delete_feedback`](AdminBackend::delete_feedback) |
//!
//! [`login`](AdminBackend::login) is the only anonymous call. All other
//! methods require the implementation to hold a bearer token.

use std::future::Future;

use crate::client::{ApiClient, Call};
use crate::error::ApiError;
use crate::models::*;
use crate::params::{DateRange, FeedbackQuery, LogQuery, UsageDetailQuery, UserQuery, UserUsageQuery};

const PREFIX: &str = "/api/admin";

pub type ApiResult<T> = Result<T, ApiError>;

/// Async interface to `/api/admin/*`.
pub trait AdminBackend {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = ApiResult<Session>>;
    fn get_me(&self) -> impl Future<Output = ApiResult<AdminInfo>>;
    fn update_me(&self, update: &ProfileUpdate) -> impl Future<Output = ApiResult<AdminInfo>>;
    fn change_password(
        &self,
        change: &PasswordChange,
    ) -> impl Future<Output = ApiResult<MessageResponse>>;

    fn list_users(&self, query: &UserQuery) -> impl Future<Output = ApiResult<Vec<UserSummary>>>;
    fn get_user(&self, id: &str) -> impl Future<Output = ApiResult<UserDetail>>;
    fn delete_user(&self, id: &str) -> impl Future<Output = ApiResult<MessageResponse>>;
    fn update_subscription(
        &self,
        id: &str,
        update: &SubscriptionUpdate,
    ) -> impl Future<Output = ApiResult<MessageResponse>>;

    fn list_admins(&self) -> impl Future<Output = ApiResult<Vec<AdminAccount>>>;
    fn create_admin(&self, admin: &NewAdmin) -> impl Future<Output = ApiResult<AdminAccount>>;
    fn delete_admin(&self, id: &str) -> impl Future<Output = ApiResult<MessageResponse>>;

    fn user_stats(&self) -> impl Future<Output = ApiResult<UserStats>>;
    fn system_stats(&self) -> impl Future<Output = ApiResult<SystemStats>>;
    fn broadcast_stats(&self) -> impl Future<Output = ApiResult<BroadcastStats>>;

    fn list_logs(&self, query: &LogQuery) -> impl Future<Output = ApiResult<Vec<AdminActionLog>>>;

    fn send_broadcast(
        &self,
        request: &BroadcastRequest,
    ) -> impl Future<Output = ApiResult<BroadcastResult>>;

    fn usage_stats(&self, range: &DateRange) -> impl Future<Output = ApiResult<UsageStats>>;
    fn usage_by_user(
        &self,
        query: &UserUsageQuery,
    ) -> impl Future<Output = ApiResult<Vec<UserUsage>>>;
    fn budget_usage(&self, range: &DateRange) -> impl Future<Output = ApiResult<FeatureBreakdown>>;
    fn transaction_usage(
        &self,
        range: &DateRange,
    ) -> impl Future<Output = ApiResult<FeatureBreakdown>>;
    fn user_usage_detail(
        &self,
        user_id: &str,
        query: &UsageDetailQuery,
    ) -> impl Future<Output = ApiResult<Vec<UsageRecord>>>;

    fn list_feedback(
        &self,
        query: &FeedbackQuery,
    ) -> impl Future<Output = ApiResult<Vec<FeedbackItem>>>;
    fn set_feedback_status(
        &self,
        id: &str,
        status: FeedbackStatus,
    ) -> impl Future<Output = ApiResult<MessageResponse>>;
    fn delete_feedback(&self, id: &str) -> impl Future<Output = ApiResult<MessageResponse>>;
}

fn path(rest: &str) -> String {
    format!("{PREFIX}{rest}")
}

impl ApiClient {
    pub fn login_call(credentials: &Credentials) -> ApiResult<Call> {
        Ok(Call::post(path("/login")).anonymous().json(credentials)?)
    }

    pub fn users_call(query: &UserQuery) -> Call {
        Call::get(path("/users")).query(query.to_query())
    }

    pub fn subscription_call(id: &str, update: &SubscriptionUpdate) -> ApiResult<Call> {
        Call::put(path(&format!("/users/{id}/subscription"))).json(update)
    }

    pub fn feedback_status_call(id: &str, status: FeedbackStatus) -> Call {
        Call::put(path(&format!("/feedback/{id}/status")))
            .query(vec![("status_update", status.as_str().to_string())])
    }
}

impl AdminBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.send(Self::login_call(credentials)?).await
    }

    async fn get_me(&self) -> ApiResult<AdminInfo> {
        self.send(Call::get(path("/me"))).await
    }

    async fn update_me(&self, update: &ProfileUpdate) -> ApiResult<AdminInfo> {
        self.send(Call::put(path("/me")).json(update)?).await
    }

    async fn change_password(&self, change: &PasswordChange) -> ApiResult<MessageResponse> {
        self.send(Call::put(path("/change-password")).json(change)?).await
    }

    async fn list_users(&self, query: &UserQuery) -> ApiResult<Vec<UserSummary>> {
        self.send(Self::users_call(query)).await
    }

    async fn get_user(&self, id: &str) -> ApiResult<UserDetail> {
        self.send(Call::get(path(&format!("/users/{id}")))).await
    }

    async fn delete_user(&self, id: &str) -> ApiResult<MessageResponse> {
        self.send(Call::delete(path(&format!("/users/{id}")))).await
    }

    async fn update_subscription(
        &self,
        id: &str,
        update: &SubscriptionUpdate,
    ) -> ApiResult<MessageResponse> {
        self.send(Self::subscription_call(id, update)?).await
    }

    async fn list_admins(&self) -> ApiResult<Vec<AdminAccount>> {
        self.send(Call::get(path("/admins"))).await
    }

    async fn create_admin(&self, admin: &NewAdmin) -> ApiResult<AdminAccount> {
        self.send(Call::post(path("/admins")).json(admin)?).await
    }

    async fn delete_admin(&self, id: &str) -> ApiResult<MessageResponse> {
        self.send(Call::delete(path(&format!("/admins/{id}")))).await
    }

    async fn user_stats(&self) -> ApiResult<UserStats> {
        self.send(Call::get(path("/stats/users"))).await
    }

    async fn system_stats(&self) -> ApiResult<SystemStats> {
        self.send(Call::get(path("/stats/system"))).await
    }

    async fn broadcast_stats(&self) -> ApiResult<BroadcastStats> {
        self.send(Call::get(path("/broadcast-stats"))).await
    }

    async fn list_logs(&self, query: &LogQuery) -> ApiResult<Vec<AdminActionLog>> {
        self.send(Call::get(path("/logs")).query(query.to_query())).await
    }

    async fn send_broadcast(&self, request: &BroadcastRequest) -> ApiResult<BroadcastResult> {
        self.send(Call::post(path("/broadcast-notification")).json(request)?).await
    }

    async fn usage_stats(&self, range: &DateRange) -> ApiResult<UsageStats> {
        self.send(Call::get(path("/ai-usage/stats")).query(range.to_query())).await
    }

    async fn usage_by_user(&self, query: &UserUsageQuery) -> ApiResult<Vec<UserUsage>> {
        self.send(Call::get(path("/ai-usage/users")).query(query.to_query())).await
    }

    async fn budget_usage(&self, range: &DateRange) -> ApiResult<FeatureBreakdown> {
        self.send(Call::get(path("/ai-usage/stats/budgets")).query(range.to_query())).await
    }

    async fn transaction_usage(&self, range: &DateRange) -> ApiResult<FeatureBreakdown> {
        self.send(Call::get(path("/ai-usage/stats/transactions")).query(range.to_query()))
            .await
    }

    async fn user_usage_detail(
        &self,
        user_id: &str,
        query: &UsageDetailQuery,
    ) -> ApiResult<Vec<UsageRecord>> {
        self.send(Call::get(path(&format!("/ai-usage/user/{user_id}"))).query(query.to_query()))
            .await
    }

    async fn list_feedback(&self, query: &FeedbackQuery) -> ApiResult<Vec<FeedbackItem>> {
        self.send(Call::get(path("/feedback")).query(query.to_query())).await
    }

    async fn set_feedback_status(
        &self,
        id: &str,
        status: FeedbackStatus,
    ) -> ApiResult<MessageResponse> {
        self.send(Self::feedback_status_call(id, status)).await
    }

    async fn delete_feedback(&self, id: &str) -> ApiResult<MessageResponse> {
        self.send(Call::delete(path(&format!("/feedback/{id}")))).await
    }
}
