//! # Session controller
//!
//! Owns the signed-in [`Session`] and keeps it in step with a
//! [`SessionStore`]. The console moves through three states:
//!
//! ```text
//! unauthenticated --login--> authenticated --logout / expire--> unauthenticated
//!        ^                                                            |
//!        +--------------------------- restore ------------------------+
//! ```
//!
//! Storage failures never block the UI. A session that cannot be written
//! is kept in memory for the current page, and one that cannot be read back
//! counts as signed out.

use api::{AdminBackend, AdminInfo, ApiClient, ApiError, Credentials, Session};
use store::SessionStore;

use crate::ActionError;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

#[derive(Clone, Debug)]
pub struct SessionController<S> {
    store: S,
    session: Option<Session>,
}

impl<S: SessionStore> SessionController<S> {
    pub fn new(store: S) -> Self {
        Self { store, session: None }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn admin(&self) -> Option<&AdminInfo> {
        self.session.as_ref().map(|s| &s.admin)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// An authenticated copy of `client` for the current session.
    pub fn client(&self, client: &ApiClient) -> Option<ApiClient> {
        self.session.as_ref().map(|s| client.with_token(&s.access_token))
    }

    /// Pick up a session persisted by an earlier page load.
    pub async fn restore(&mut self) -> Option<&Session> {
        match self.store.load().await {
            Ok(session) => self.session = session,
            Err(e) => {
                tracing::warn!("discarding unreadable session: {e}");
                self.session = None;
                if let Err(e) = self.store.clear().await {
                    tracing::warn!("failed to clear session storage: {e}");
                }
            }
        }
        self.session.as_ref()
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login<B: AdminBackend>(
        &mut self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> Result<Session, ActionError> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let session = backend.login(&credentials).await.map_err(|e| {
            tracing::warn!(email = %credentials.email, "login failed: {e}");
            ActionError::Failed {
                message: INVALID_CREDENTIALS.to_string(),
                source: e,
            }
        })?;
        if let Err(e) = self.store.save(&session).await {
            tracing::warn!("session not persisted: {e}");
        }
        tracing::info!(admin = %session.admin.email, role = session.admin.role.as_str(), "signed in");
        self.session = Some(session.clone());
        Ok(session)
    }

    pub async fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(admin = %session.admin.email, "signed out");
        }
        if let Err(e) = self.store.clear().await {
            tracing::warn!("failed to clear session storage: {e}");
        }
    }

    /// End the session after the backend rejected its token.
    pub async fn expire(&mut self) {
        tracing::warn!("session expired");
        self.logout().await;
    }

    /// Route a failed call: `401` ends the session, anything else is left
    /// to the caller. Returns whether the session was ended.
    pub async fn observe(&mut self, error: &ApiError) -> bool {
        if error.is_unauthorized() && self.session.is_some() {
            self.expire().await;
            true
        } else {
            false
        }
    }

    /// Replace the signed-in admin's record after a profile update.
    pub async fn update_admin(&mut self, admin: AdminInfo) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.admin = admin;
        if let Err(e) = self.store.save(session).await {
            tracing::warn!("updated profile not persisted: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use api::AdminRole;
    use store::MemoryStore;

    fn backend() -> MockBackend {
        MockBackend::with_admin(admin_info("a1", AdminRole::Admin), "correct-horse")
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let store = MemoryStore::new();
        let mut controller = SessionController::new(store.clone());

        let session = controller.login(&backend(), "a1@example.com", "correct-horse").await.unwrap();
        assert_eq!(session.admin.id, "a1");
        assert!(controller.is_authenticated());
        assert_eq!(store.raw("admin_token").as_deref(), Some("token-a1"));
        assert!(store.raw("admin_info").unwrap().contains("a1@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_login_stores_nothing() {
        let store = MemoryStore::new();
        let mut controller = SessionController::new(store.clone());

        let err = controller.login(&backend(), "a1@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
        assert!(!controller.is_authenticated());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_restore_and_clear() {
        let store = MemoryStore::new();
        store.save(&session(AdminRole::SuperAdmin)).await.unwrap();

        let mut controller = SessionController::new(store.clone());
        let restored = controller.restore().await.cloned().unwrap();
        assert!(restored.admin.role.is_super_admin());

        store.clear().await.unwrap();
        let mut fresh = SessionController::new(store);
        assert!(fresh.restore().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_storage_counts_as_signed_out() {
        let store = MemoryStore::new();
        store.set_raw("admin_token", "tok");
        store.set_raw("admin_info", "{broken");

        let mut controller = SessionController::new(store.clone());
        assert!(controller.restore().await.is_none());
        assert!(store.raw("admin_token").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_expires_session() {
        let store = MemoryStore::new();
        let mut controller = SessionController::new(store.clone());
        controller.login(&backend(), "a1@example.com", "correct-horse").await.unwrap();

        let other = ApiError::Status { status: 500, detail: None };
        assert!(!controller.observe(&other).await);
        assert!(controller.is_authenticated());

        assert!(controller.observe(&ApiError::Unauthorized).await);
        assert!(!controller.is_authenticated());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_admin_repersists() {
        let store = MemoryStore::new();
        let mut controller = SessionController::new(store.clone());
        controller.login(&backend(), "a1@example.com", "correct-horse").await.unwrap();

        let mut admin = controller.admin().cloned().unwrap();
        admin.name = "Renamed".to_string();
        controller.update_admin(admin).await;

        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded.admin.name, "Renamed");
        assert_eq!(reloaded.access_token, "token-a1");
    }
}
