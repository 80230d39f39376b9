//! # Broadcast composer
//!
//! A push/in-app notification to every user, or to one subscription tier.
//! [`BroadcastController::stats`] sizes the audience for each target,
//! [`BroadcastController::send`] validates, confirms and posts the form.

use api::{AdminBackend, ApiError, BroadcastRequest, BroadcastResult, BroadcastStats, BroadcastTarget, NotificationType};

use crate::prompt::{require, Prompt};
use crate::ActionError;

pub const TITLE_MAX: usize = 100;
pub const MESSAGE_MAX: usize = 500;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastController {
    pub form: BroadcastRequest,
    pub stats: Option<BroadcastStats>,
    pub last_result: Option<BroadcastResult>,
    pub sending: bool,
}

fn clip(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

impl BroadcastController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: &str) {
        self.form.title = clip(title, TITLE_MAX);
    }

    pub fn set_message(&mut self, message: &str) {
        self.form.message = clip(message, MESSAGE_MAX);
    }

    pub fn set_target(&mut self, target: BroadcastTarget) {
        self.form.target_users = target;
    }

    pub fn set_kind(&mut self, kind: NotificationType) {
        self.form.notification_type = kind;
    }

    /// How many users the current target reaches, once stats are loaded.
    pub fn reach(&self) -> Option<u64> {
        self.stats.as_ref().map(|s| self.form.target_users.reach(s))
    }

    pub fn apply_stats(&mut self, result: Result<BroadcastStats, ApiError>) {
        match result {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => tracing::error!("failed to load broadcast stats: {e}"),
        }
    }

    pub async fn load_stats<B: AdminBackend>(&mut self, backend: &B) {
        let result = backend.broadcast_stats().await;
        self.apply_stats(result);
    }

    pub fn validate(form: &BroadcastRequest) -> Result<(), ActionError> {
        if form.title.trim().is_empty() || form.message.trim().is_empty() {
            return Err(ActionError::invalid("Please fill in both title and message"));
        }
        Ok(())
    }

    pub fn confirmation(form: &BroadcastRequest) -> String {
        format!("Send notification to {} users?", form.target_users.as_str())
    }

    /// Validate, confirm and post `form`. Exactly one request on success.
    pub async fn send<B: AdminBackend, P: Prompt>(
        backend: &B,
        prompt: &P,
        form: &BroadcastRequest,
    ) -> Result<BroadcastResult, ActionError> {
        Self::validate(form)?;
        require(prompt, &Self::confirmation(form))?;
        let result = backend
            .send_broadcast(form)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to send broadcast"))?;
        tracing::info!(
            target_users = form.target_users.as_str(),
            sent = result.notifications_sent,
            fcm_failed = result.fcm_failed,
            "broadcast sent"
        );
        Ok(result)
    }

    /// Record a successful send and start over with a blank form. The
    /// caller reloads the audience stats afterwards.
    pub fn finish_send(&mut self, result: BroadcastResult) {
        self.form = BroadcastRequest::default();
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn backend() -> MockBackend {
        let backend = MockBackend::new();
        *backend.broadcast_stats.borrow_mut() = BroadcastStats {
            total_users: 10,
            free_users: 7,
            premium_users: 3,
            users_with_push_enabled: 6,
            free_with_push: 4,
            premium_with_push: 2,
        };
        backend
    }

    #[tokio::test]
    async fn test_blank_title_makes_no_call() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut composer = BroadcastController::new();
        composer.set_title("   ");
        composer.set_message("Maintenance tonight");

        let err = BroadcastController::send(&backend, &prompt, &composer.form).await.unwrap_err();
        assert_eq!(err.to_string(), "Please fill in both title and message");
        assert!(backend.recorded().is_empty());
        assert!(prompt.questions().is_empty());
    }

    #[tokio::test]
    async fn test_send_posts_once_and_resets() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[true]);
        let mut composer = BroadcastController::new();
        composer.load_stats(&backend).await;
        composer.set_title("Hello");
        composer.set_message("New features are live");
        composer.set_target(BroadcastTarget::Premium);
        composer.set_kind(NotificationType::AdminAnnouncement);
        assert_eq!(composer.reach(), Some(3));

        let result = BroadcastController::send(&backend, &prompt, &composer.form).await.unwrap();
        composer.finish_send(result);

        assert_eq!(prompt.questions(), vec!["Send notification to premium users?"]);
        let posts: Vec<_> = backend.recorded().into_iter().filter(|c| c.method.as_str() == "POST").collect();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "/api/admin/broadcast-notification");
        assert_eq!(
            posts[0].body.clone().unwrap(),
            serde_json::json!({
                "title": "Hello",
                "message": "New features are live",
                "target_users": "premium",
                "notification_type": "admin_announcement"
            })
        );
        assert_eq!(composer.form, BroadcastRequest::default());
        assert_eq!(composer.form.target_users, BroadcastTarget::All);
        assert_eq!(composer.form.notification_type, NotificationType::SystemBroadcast);
        assert_eq!(composer.last_result.as_ref().unwrap().notifications_sent, 3);
    }

    #[test]
    fn test_fields_are_clipped() {
        let mut composer = BroadcastController::new();
        composer.set_title(&"x".repeat(150));
        composer.set_message(&"y".repeat(600));
        assert_eq!(composer.form.title.chars().count(), TITLE_MAX);
        assert_eq!(composer.form.message.chars().count(), MESSAGE_MAX);
    }
}
