//! # Feedback triage
//!
//! The feedback list filters by category and summarises what it shows:
//! how many items are still pending and the average star rating over the
//! items that have one.
//!
//! Status changes are the one optimistic mutation in the console. The row
//! is patched before the request goes out ([`FeedbackController::begin_status_change`])
//! and restored from the returned [`StatusChange`] if the request fails
//! ([`FeedbackController::rollback`]).

use api::{AdminBackend, AdminRole, ApiError, FeedbackCategory, FeedbackItem, FeedbackQuery, FeedbackStatus};

use crate::generation::{Generation, Ticket};
use crate::prompt::{require, Prompt};
use crate::ActionError;

pub const CONFIRM_DELETE_FEEDBACK: &str = "Are you sure you want to delete this feedback?";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackController {
    pub category: Option<FeedbackCategory>,
    pub rows: Vec<FeedbackItem>,
    pub loading: bool,
    /// Set when the last load failed and nothing could be shown.
    pub error: Option<String>,
    generation: Generation,
}

/// A status patch already applied locally, with what to restore on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub previous: FeedbackStatus,
    pub next: FeedbackStatus,
}

impl FeedbackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> FeedbackQuery {
        FeedbackQuery {
            category: self.category,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.rows.iter().filter(|f| f.status == FeedbackStatus::Pending).count()
    }

    /// Mean of the ratings present, `0.0` when nothing is rated.
    pub fn average_rating(&self) -> f64 {
        let rated: Vec<u8> = self.rows.iter().filter_map(|f| f.rating).filter(|r| *r > 0).collect();
        if rated.is_empty() {
            return 0.0;
        }
        rated.iter().map(|r| f64::from(*r)).sum::<f64>() / rated.len() as f64
    }

    pub fn begin_load(&mut self) -> (Ticket, FeedbackQuery) {
        self.loading = true;
        (self.generation.next(), self.query())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<FeedbackItem>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::error!("failed to load feedback: {e}");
                if self.rows.is_empty() {
                    self.error = Some("Failed to load feedback data".to_string());
                }
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let (ticket, query) = self.begin_load();
        let result = backend.list_feedback(&query).await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }

    /// Patch the row locally. `None` when the row is gone or already has
    /// `status`, in which case no request should be sent.
    pub fn begin_status_change(&mut self, id: &str, status: FeedbackStatus) -> Option<StatusChange> {
        let row = self.rows.iter_mut().find(|f| f.id == id)?;
        if row.status == status {
            return None;
        }
        let change = StatusChange {
            id: id.to_string(),
            previous: row.status,
            next: status,
        };
        row.status = status;
        Some(change)
    }

    /// Undo a failed patch, unless the row has moved on since.
    pub fn rollback(&mut self, change: &StatusChange) {
        if let Some(row) = self.rows.iter_mut().find(|f| f.id == change.id && f.status == change.next) {
            row.status = change.previous;
        }
    }

    pub async fn send_status_change<B: AdminBackend>(backend: &B, change: &StatusChange) -> Result<(), ActionError> {
        backend
            .set_feedback_status(&change.id, change.next)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to update status"))?;
        tracing::info!(feedback = %change.id, status = change.next.as_str(), "feedback status updated");
        Ok(())
    }

    /// Patch, send, and roll back on failure.
    pub async fn set_status<B: AdminBackend>(
        &mut self,
        backend: &B,
        id: &str,
        status: FeedbackStatus,
    ) -> Result<(), ActionError> {
        let Some(change) = self.begin_status_change(id, status) else {
            return Ok(());
        };
        let result = Self::send_status_change(backend, &change).await;
        if result.is_err() {
            self.rollback(&change);
        }
        result
    }

    /// Delete after confirmation. The caller reloads on success.
    /// Whether `role` may delete feedback. Only super admins can.
    pub fn can_delete(role: AdminRole) -> bool {
        role.is_super_admin()
    }

    pub async fn delete<B: AdminBackend, P: Prompt>(
        backend: &B,
        prompt: &P,
        role: AdminRole,
        id: &str,
    ) -> Result<String, ActionError> {
        if !Self::can_delete(role) {
            return Err(ActionError::invalid("Only super admins can delete feedback"));
        }
        require(prompt, CONFIRM_DELETE_FEEDBACK)?;
        backend
            .delete_feedback(id)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to delete feedback"))?;
        tracing::info!(feedback = id, "feedback deleted");
        Ok("Feedback deleted".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn backend() -> MockBackend {
        let backend = MockBackend::new();
        *backend.feedback.borrow_mut() = vec![
            feedback("f1", FeedbackCategory::Bug, Some(2)),
            feedback("f2", FeedbackCategory::General, None),
            feedback("f3", FeedbackCategory::Bug, Some(5)),
        ];
        backend
    }

    #[tokio::test]
    async fn test_category_filter_and_summary() {
        let backend = backend();
        let mut list = FeedbackController::new();
        list.load(&backend).await.unwrap();
        assert_eq!(list.pending_count(), 3);
        assert!((list.average_rating() - 3.5).abs() < f64::EPSILON);

        list.category = Some(FeedbackCategory::General);
        list.load(&backend).await.unwrap();
        assert_eq!(list.rows.len(), 1);
        assert_eq!(list.average_rating(), 0.0);
        assert_eq!(
            backend.lines(),
            vec!["GET /api/admin/feedback", "GET /api/admin/feedback?category=general"]
        );
    }

    #[tokio::test]
    async fn test_status_change_is_optimistic() {
        let backend = backend();
        let mut list = FeedbackController::new();
        list.load(&backend).await.unwrap();

        let change = list.begin_status_change("f1", FeedbackStatus::Reviewed).unwrap();
        // Row is patched before any request is made
        assert_eq!(list.rows[0].status, FeedbackStatus::Reviewed);
        assert_eq!(backend.recorded().len(), 1);

        FeedbackController::send_status_change(&backend, &change).await.unwrap();
        assert_eq!(
            backend.lines()[1],
            "PUT /api/admin/feedback/f1/status?status_update=reviewed"
        );
        assert_eq!(backend.recorded().len(), 2);
        assert_eq!(list.pending_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_status_change_rolls_back() {
        let backend = backend();
        let mut list = FeedbackController::new();
        list.load(&backend).await.unwrap();
        backend.fail("set_feedback_status", ApiError::Network("offline".into()));

        let err = list.set_status(&backend, "f2", FeedbackStatus::Resolved).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update status");
        assert_eq!(list.rows[1].status, FeedbackStatus::Pending);
    }

    #[tokio::test]
    async fn test_unchanged_status_sends_nothing() {
        let backend = backend();
        let mut list = FeedbackController::new();
        list.load(&backend).await.unwrap();

        list.set_status(&backend, "f1", FeedbackStatus::Pending).await.unwrap();
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[false, true]);
        let mut list = FeedbackController::new();

        assert!(FeedbackController::delete(&backend, &prompt, AdminRole::SuperAdmin, "f2")
            .await
            .unwrap_err()
            .is_declined());
        FeedbackController::delete(&backend, &prompt, AdminRole::SuperAdmin, "f2").await.unwrap();
        list.load(&backend).await.unwrap();

        assert_eq!(prompt.questions(), vec![CONFIRM_DELETE_FEEDBACK, CONFIRM_DELETE_FEEDBACK]);
        assert_eq!(list.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_only_super_admins_delete() {
        let backend = backend();
        let prompt = ScriptedPrompt::answering(&[true]);

        assert!(!FeedbackController::can_delete(AdminRole::Admin));
        assert!(!FeedbackController::can_delete(AdminRole::Moderator));
        assert!(FeedbackController::can_delete(AdminRole::SuperAdmin));

        for role in [AdminRole::Admin, AdminRole::Moderator] {
            let err = FeedbackController::delete(&backend, &prompt, role, "f1").await.unwrap_err();
            assert_eq!(err.to_string(), "Only super admins can delete feedback");
        }
        assert!(prompt.questions().is_empty());
        assert!(backend.recorded().is_empty());
    }
}
