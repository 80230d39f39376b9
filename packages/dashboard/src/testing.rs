//! In-memory backend and scripted prompt shared by the controller tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use api::*;
use chrono::{TimeZone, Utc};

use crate::Prompt;

/// Stateful fake of the admin API.
///
/// Every method records the [`Call`] the real client would have sent, then
/// serves data from the in-memory tables. Deletes and updates mutate those
/// tables, so a reload after a mutation observes its effect.
#[derive(Default)]
pub struct MockBackend {
    pub calls: RefCell<Vec<Call>>,
    pub failures: RefCell<HashMap<&'static str, ApiError>>,
    pub password: RefCell<String>,
    pub me: RefCell<Option<AdminInfo>>,
    pub users: RefCell<Vec<UserSummary>>,
    pub admins: RefCell<Vec<AdminAccount>>,
    pub logs: RefCell<Vec<AdminActionLog>>,
    pub feedback: RefCell<Vec<FeedbackItem>>,
    pub user_stats: RefCell<UserStats>,
    pub system_stats: RefCell<SystemStats>,
    pub broadcast_stats: RefCell<BroadcastStats>,
    pub usage_stats: RefCell<UsageStats>,
    pub user_usage: RefCell<Vec<UserUsage>>,
    pub usage_records: RefCell<Vec<UsageRecord>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin(admin: AdminInfo, password: &str) -> Self {
        let backend = Self::new();
        *backend.me.borrow_mut() = Some(admin);
        *backend.password.borrow_mut() = password.to_string();
        backend
    }

    pub fn fail(&self, operation: &'static str, error: ApiError) {
        self.failures.borrow_mut().insert(operation, error);
    }

    pub fn recorded(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// `"METHOD /path?k=v&..."` per recorded call.
    pub fn lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| {
                let query: Vec<String> = call.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
                if query.is_empty() {
                    format!("{} {}", call.method, call.path)
                } else {
                    format!("{} {}?{}", call.method, call.path, query.join("&"))
                }
            })
            .collect()
    }

    fn record(&self, operation: &'static str, call: Call) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn ack() -> MessageResponse {
        MessageResponse {
            message: "ok".to_string(),
        }
    }
}

fn p(rest: &str) -> String {
    format!("/api/admin{rest}")
}

fn body<T: serde::Serialize>(call: Call, value: &T) -> Call {
    call.json(value).expect("request body serialises")
}

impl AdminBackend for MockBackend {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.record("login", body(Call::post(p("/login")).anonymous(), credentials))?;
        let me = self.me.borrow().clone();
        match me {
            Some(admin) if admin.email == credentials.email && *self.password.borrow() == credentials.password => {
                Ok(Session {
                    access_token: format!("token-{}", admin.id),
                    token_type: Some("bearer".to_string()),
                    admin,
                })
            }
            _ => Err(ApiError::Unauthorized),
        }
    }

    async fn get_me(&self) -> ApiResult<AdminInfo> {
        self.record("get_me", Call::get(p("/me")))?;
        self.me.borrow().clone().ok_or(ApiError::Unauthorized)
    }

    async fn update_me(&self, update: &ProfileUpdate) -> ApiResult<AdminInfo> {
        self.record("update_me", body(Call::put(p("/me")), update))?;
        let mut me = self.me.borrow_mut();
        let admin = me.as_mut().ok_or(ApiError::Unauthorized)?;
        admin.name = update.name.clone();
        admin.email = update.email.clone();
        Ok(admin.clone())
    }

    async fn change_password(&self, change: &PasswordChange) -> ApiResult<MessageResponse> {
        self.record("change_password", body(Call::put(p("/change-password")), change))?;
        if *self.password.borrow() != change.current_password {
            return Err(ApiError::Status {
                status: 400,
                detail: Some("Current password is incorrect".to_string()),
            });
        }
        *self.password.borrow_mut() = change.new_password.clone();
        Ok(Self::ack())
    }

    async fn list_users(&self, query: &UserQuery) -> ApiResult<Vec<UserSummary>> {
        self.record("list_users", Call::get(p("/users")).query(query.to_query()))?;
        let search = query.search.as_deref().map(str::trim).unwrap_or("").to_lowercase();
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|u| query.subscription_type.map_or(true, |s| u.subscription_type == s))
            .filter(|u| {
                search.is_empty()
                    || u.name.to_lowercase().contains(&search)
                    || u.email.to_lowercase().contains(&search)
            })
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: &str) -> ApiResult<UserDetail> {
        self.record("get_user", Call::get(p(&format!("/users/{id}"))))?;
        let user = self.users.borrow().iter().find(|u| u.id == id).cloned();
        let mut detail = UserDetail::from(user.ok_or(ApiError::Status {
            status: 404,
            detail: Some("User not found".to_string()),
        })?);
        detail.language = "en".to_string();
        detail.total_budgets = 3;
        Ok(detail)
    }

    async fn delete_user(&self, id: &str) -> ApiResult<MessageResponse> {
        self.record("delete_user", Call::delete(p(&format!("/users/{id}"))))?;
        self.users.borrow_mut().retain(|u| u.id != id);
        Ok(Self::ack())
    }

    async fn update_subscription(&self, id: &str, update: &SubscriptionUpdate) -> ApiResult<MessageResponse> {
        self.record(
            "update_subscription",
            body(Call::put(p(&format!("/users/{id}/subscription"))), update),
        )?;
        if let Some(user) = self.users.borrow_mut().iter_mut().find(|u| u.id == id) {
            user.subscription_type = update.subscription_type;
            user.subscription_expires_at = update.subscription_expires_at;
        }
        Ok(Self::ack())
    }

    async fn list_admins(&self) -> ApiResult<Vec<AdminAccount>> {
        self.record("list_admins", Call::get(p("/admins")))?;
        Ok(self.admins.borrow().clone())
    }

    async fn create_admin(&self, admin: &NewAdmin) -> ApiResult<AdminAccount> {
        self.record("create_admin", body(Call::post(p("/admins")), admin))?;
        let account = AdminAccount {
            id: format!("admin-{}", self.admins.borrow().len() + 1),
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role,
            created_at: Some(fixed_now()),
            last_login: None,
        };
        self.admins.borrow_mut().push(account.clone());
        Ok(account)
    }

    async fn delete_admin(&self, id: &str) -> ApiResult<MessageResponse> {
        self.record("delete_admin", Call::delete(p(&format!("/admins/{id}"))))?;
        self.admins.borrow_mut().retain(|a| a.id != id);
        Ok(Self::ack())
    }

    async fn user_stats(&self) -> ApiResult<UserStats> {
        self.record("user_stats", Call::get(p("/stats/users")))?;
        Ok(self.user_stats.borrow().clone())
    }

    async fn system_stats(&self) -> ApiResult<SystemStats> {
        self.record("system_stats", Call::get(p("/stats/system")))?;
        Ok(self.system_stats.borrow().clone())
    }

    async fn broadcast_stats(&self) -> ApiResult<BroadcastStats> {
        self.record("broadcast_stats", Call::get(p("/broadcast-stats")))?;
        Ok(self.broadcast_stats.borrow().clone())
    }

    async fn list_logs(&self, query: &LogQuery) -> ApiResult<Vec<AdminActionLog>> {
        self.record("list_logs", Call::get(p("/logs")).query(query.to_query()))?;
        Ok(self.logs.borrow().iter().take(query.limit as usize).cloned().collect())
    }

    async fn send_broadcast(&self, request: &BroadcastRequest) -> ApiResult<BroadcastResult> {
        self.record("send_broadcast", body(Call::post(p("/broadcast-notification")), request))?;
        let total = request.target_users.reach(&self.broadcast_stats.borrow());
        Ok(BroadcastResult {
            message: "Broadcast sent".to_string(),
            total_users: total,
            notifications_sent: total,
            fcm_sent: total,
            fcm_failed: 0,
        })
    }

    async fn usage_stats(&self, range: &DateRange) -> ApiResult<UsageStats> {
        self.record("usage_stats", Call::get(p("/ai-usage/stats")).query(range.to_query()))?;
        Ok(self.usage_stats.borrow().clone())
    }

    async fn usage_by_user(&self, query: &UserUsageQuery) -> ApiResult<Vec<UserUsage>> {
        self.record("usage_by_user", Call::get(p("/ai-usage/users")).query(query.to_query()))?;
        Ok(self.user_usage.borrow().clone())
    }

    async fn budget_usage(&self, range: &DateRange) -> ApiResult<FeatureBreakdown> {
        self.record("budget_usage", Call::get(p("/ai-usage/stats/budgets")).query(range.to_query()))?;
        Ok(FeatureBreakdown::default())
    }

    async fn transaction_usage(&self, range: &DateRange) -> ApiResult<FeatureBreakdown> {
        self.record(
            "transaction_usage",
            Call::get(p("/ai-usage/stats/transactions")).query(range.to_query()),
        )?;
        Ok(FeatureBreakdown::default())
    }

    async fn user_usage_detail(&self, user_id: &str, query: &UsageDetailQuery) -> ApiResult<Vec<UsageRecord>> {
        self.record(
            "user_usage_detail",
            Call::get(p(&format!("/ai-usage/user/{user_id}"))).query(query.to_query()),
        )?;
        Ok(self
            .usage_records
            .borrow()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| query.feature_type.map_or(true, |f| r.feature_type == f))
            .cloned()
            .collect())
    }

    async fn list_feedback(&self, query: &FeedbackQuery) -> ApiResult<Vec<FeedbackItem>> {
        self.record("list_feedback", Call::get(p("/feedback")).query(query.to_query()))?;
        Ok(self
            .feedback
            .borrow()
            .iter()
            .filter(|f| query.category.map_or(true, |c| f.category == c))
            .cloned()
            .collect())
    }

    async fn set_feedback_status(&self, id: &str, status: FeedbackStatus) -> ApiResult<MessageResponse> {
        self.record("set_feedback_status", ApiClient::feedback_status_call(id, status))?;
        if let Some(item) = self.feedback.borrow_mut().iter_mut().find(|f| f.id == id) {
            item.status = status;
        }
        Ok(Self::ack())
    }

    async fn delete_feedback(&self, id: &str) -> ApiResult<MessageResponse> {
        self.record("delete_feedback", Call::delete(p(&format!("/feedback/{id}"))))?;
        self.feedback.borrow_mut().retain(|f| f.id != id);
        Ok(Self::ack())
    }
}

/// Answers confirmations from a queue and remembers every question.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::default(),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

pub fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn admin_info(id: &str, role: AdminRole) -> AdminInfo {
    AdminInfo {
        id: id.to_string(),
        name: format!("Admin {id}"),
        email: format!("{id}@example.com"),
        role,
    }
}

pub fn admin_account(id: &str, role: AdminRole) -> AdminAccount {
    let info = admin_info(id, role);
    AdminAccount {
        id: info.id,
        name: info.name,
        email: info.email,
        role,
        created_at: Some(fixed_now()),
        last_login: None,
    }
}

pub fn session(role: AdminRole) -> Session {
    Session {
        access_token: "tok".to_string(),
        token_type: None,
        admin: admin_info("a1", role),
    }
}

pub fn user(id: &str, name: &str, subscription: SubscriptionType) -> UserSummary {
    UserSummary {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        subscription_type: subscription,
        subscription_expires_at: None,
        default_currency: "usd".to_string(),
        created_at: fixed_now(),
        total_transactions: 0,
        total_goals: 0,
        last_active: None,
    }
}

pub fn feedback(id: &str, category: FeedbackCategory, rating: Option<u8>) -> FeedbackItem {
    FeedbackItem {
        id: id.to_string(),
        user_id: "u1".to_string(),
        user_name: "Ana".to_string(),
        user_email: "ana@example.com".to_string(),
        category,
        message: format!("feedback {id}"),
        rating,
        status: FeedbackStatus::Pending,
        created_at: fixed_now(),
    }
}
