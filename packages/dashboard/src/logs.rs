use api::{AdminActionLog, AdminBackend, ApiError, LogQuery};

use crate::generation::{Generation, Ticket};

/// The audit trail table (super admins only).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogsController {
    pub rows: Vec<AdminActionLog>,
    pub loading: bool,
    generation: Generation,
}

impl LogsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> (Ticket, LogQuery) {
        self.loading = true;
        (self.generation.next(), LogQuery::default())
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<AdminActionLog>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                true
            }
            Err(e) => {
                tracing::error!("failed to load activity logs: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let (ticket, query) = self.begin_load();
        let result = backend.list_logs(&query).await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[tokio::test]
    async fn test_loads_latest_fifty() {
        let backend = MockBackend::new();
        *backend.logs.borrow_mut() = (0..60)
            .map(|i| AdminActionLog {
                id: format!("l{i}"),
                admin_id: "a1".into(),
                admin_email: "a1@example.com".into(),
                action: "delete_user".into(),
                target_user_id: None,
                target_user_email: None,
                details: None,
                timestamp: fixed_now(),
            })
            .collect();

        let mut logs = LogsController::new();
        logs.load(&backend).await.unwrap();
        assert_eq!(backend.lines(), vec!["GET /api/admin/logs?limit=50"]);
        assert_eq!(logs.rows.len(), 50);
        assert_eq!(logs.rows[0].action_label(), "Delete User");
    }

    #[test]
    fn test_refresh_supersedes_failed_request() {
        let mut logs = LogsController::new();
        let (first, _) = logs.begin_load();
        let (refresh, _) = logs.begin_load();

        assert!(!logs.is_current(first));
        assert!(!logs.finish_load(first, Err(ApiError::Status { status: 502, detail: None })));
        assert!(logs.loading);
        assert!(logs.finish_load(refresh, Ok(vec![])));
        assert!(!logs.loading);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_an_error() {
        let backend = MockBackend::new();
        let mut logs = LogsController::new();
        assert!(logs.load(&backend).await.is_ok());
        assert!(logs.rows.is_empty());
    }
}
