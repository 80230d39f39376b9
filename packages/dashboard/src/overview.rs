use api::{AdminBackend, ApiError, SystemStats, UserStats};

use crate::generation::{Generation, Ticket};

/// Both counter sets the overview renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewData {
    pub users: UserStats,
    pub system: SystemStats,
}

/// Dashboard landing page. Renders nothing until both stats calls succeed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewController {
    pub data: Option<OverviewData>,
    generation: Generation,
}

impl OverviewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both stats endpoints in parallel; all or nothing.
    pub async fn fetch<B: AdminBackend>(backend: &B) -> Result<OverviewData, ApiError> {
        let (users, system) = futures::try_join!(backend.user_stats(), backend.system_stats())?;
        Ok(OverviewData { users, system })
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.generation.next()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<OverviewData, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                true
            }
            Err(e) => {
                tracing::error!("failed to load overview stats: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let ticket = self.begin_load();
        let result = Self::fetch(backend).await;
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
    async fn test_loads_both_stats() {
        let backend = MockBackend::new();
        backend.user_stats.borrow_mut().total_users = 42;
        backend.system_stats.borrow_mut().active_users_today = 5;

        let mut overview = OverviewController::new();
        overview.load(&backend).await.unwrap();

        let data = overview.data.unwrap();
        assert_eq!(data.users.total_users, 42);
        assert_eq!(data.system.active_users_today, 5);
        let mut lines = backend.lines();
        lines.sort();
        assert_eq!(lines, vec!["GET /api/admin/stats/system", "GET /api/admin/stats/users"]);
    }

    #[tokio::test]
    async fn test_one_failure_renders_nothing() {
        let backend = MockBackend::new();
        backend.fail("system_stats", ApiError::Status { status: 500, detail: None });

        let mut overview = OverviewController::new();
        assert!(overview.load(&backend).await.is_err());
        assert!(overview.data.is_none());
    }
}
