//! Admin account management (super admins only).

use api::{AdminAccount, AdminBackend, AdminInfo, ApiError, NewAdmin};

use crate::generation::{Generation, Ticket};
use crate::prompt::{require, Prompt};
use crate::ActionError;

pub const CONFIRM_DELETE_ADMIN: &str =
    "Are you sure you want to delete this admin? This action cannot be undone.";
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminsController {
    pub rows: Vec<AdminAccount>,
    pub loading: bool,
    /// The create-admin modal, when open.
    pub form: Option<NewAdmin>,
    generation: Generation,
}

impl AdminsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self) {
        self.form = Some(NewAdmin::default());
    }

    pub fn close_create(&mut self) {
        self.form = None;
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.generation.next()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<AdminAccount>, ApiError>) -> bool {
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
                tracing::error!("failed to load admins: {e}");
                false
            }
        }
    }

    pub async fn load<B: AdminBackend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let ticket = self.begin_load();
        let result = backend.list_admins().await;
        let error = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        error.map_or(Ok(()), Err)
    }

    /// Whether `me` is offered a delete action on `row`.
    pub fn can_delete(me: &AdminInfo, row: &AdminAccount) -> bool {
        me.id != row.id
    }

    pub fn validate(form: &NewAdmin) -> Result<(), ActionError> {
        if form.name.trim().is_empty() || form.email.trim().is_empty() || form.password.trim().is_empty() {
            return Err(ActionError::invalid("Please fill in all fields"));
        }
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ActionError::invalid("Password must be at least 8 characters"));
        }
        Ok(())
    }

    /// Validate and submit the create-admin form. The caller closes the
    /// modal and reloads on success.
    pub async fn create_admin<B: AdminBackend>(backend: &B, form: &NewAdmin) -> Result<AdminAccount, ActionError> {
        Self::validate(form)?;
        let account = backend
            .create_admin(form)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to create admin"))?;
        tracing::info!(admin = %account.email, role = account.role.as_str(), "admin created");
        Ok(account)
    }

    pub async fn delete_admin<B: AdminBackend, P: Prompt>(
        backend: &B,
        prompt: &P,
        me: &AdminInfo,
        target: &AdminAccount,
    ) -> Result<String, ActionError> {
        if !Self::can_delete(me, target) {
            return Err(ActionError::invalid("You cannot delete your own account"));
        }
        require(prompt, CONFIRM_DELETE_ADMIN)?;
        backend
            .delete_admin(&target.id)
            .await
            .map_err(|e| ActionError::failed(e, "Failed to delete admin"))?;
        tracing::info!(admin = %target.email, "admin deleted");
        Ok("Admin deleted successfully".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use api::AdminRole;

    fn form(name: &str, email: &str, password: &str) -> NewAdmin {
        NewAdmin {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: AdminRole::default(),
        }
    }

    #[tokio::test]
    async fn test_validation_blocks_request() {
        let backend = MockBackend::new();

        let err = AdminsController::create_admin(&backend, &form("", "x@example.com", "longenough"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");

        let err = AdminsController::create_admin(&backend, &form("Eve", "eve@example.com", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_reload() {
        let backend = MockBackend::new();
        let mut admins = AdminsController::new();
        admins.open_create();
        let new_admin = form("Eve", "eve@example.com", "longenough");
        assert_eq!(admins.form.as_ref().unwrap().role, AdminRole::Admin);

        AdminsController::create_admin(&backend, &new_admin).await.unwrap();
        admins.close_create();
        admins.load(&backend).await.unwrap();

        assert_eq!(admins.rows.len(), 1);
        assert_eq!(admins.rows[0].email, "eve@example.com");
        let body = backend.recorded()[0].body.clone().unwrap();
        assert_eq!(body["role"], "admin");
    }

    #[tokio::test]
    async fn test_cannot_delete_self() {
        let backend = MockBackend::new();
        let me = admin_info("a1", AdminRole::SuperAdmin);
        let prompt = ScriptedPrompt::answering(&[true]);

        let own = admin_account("a1", AdminRole::SuperAdmin);
        assert!(!AdminsController::can_delete(&me, &own));
        assert!(AdminsController::delete_admin(&backend, &prompt, &me, &own).await.is_err());
        assert!(prompt.questions().is_empty());
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_delete_other_admin() {
        let backend = MockBackend::new();
        *backend.admins.borrow_mut() = vec![admin_account("a1", AdminRole::SuperAdmin), admin_account("a2", AdminRole::Moderator)];
        let me = admin_info("a1", AdminRole::SuperAdmin);
        let prompt = ScriptedPrompt::answering(&[true]);
        let target = admin_account("a2", AdminRole::Moderator);

        AdminsController::delete_admin(&backend, &prompt, &me, &target).await.unwrap();
        assert_eq!(prompt.questions(), vec![CONFIRM_DELETE_ADMIN]);
        assert_eq!(backend.lines(), vec!["DELETE /api/admin/admins/a2"]);
        assert_eq!(backend.admins.borrow().len(), 1);
    }
}
