//! # Browser `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the web platform.
//! The token and the admin record are plain `localStorage` items, so a
//! session survives reloads and is shared between tabs of the same origin.
//!
//! The `Storage` handle is looked up on every call; `web_sys::Storage` is not
//! `Send` and the lookup is a property read.

use api::Session;
use web_sys::Storage;

use crate::keys::{self, SessionKeys};
use crate::{SessionStore, StoreError};

#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    keys: SessionKeys,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: SessionKeys) -> Self {
        Self { keys }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }

    fn get(storage: &Storage, key: &str) -> Result<Option<String>, StoreError> {
        storage.get_item(key).map_err(|e| StoreError::Io(format!("{e:?}")))
    }
}

impl SessionStore for LocalStorageStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        let storage = self.storage()?;
        keys::decode(
            Self::get(&storage, &self.keys.token)?,
            Self::get(&storage, &self.keys.admin)?,
        )
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let (token, admin) = keys::encode(session)?;
        let storage = self.storage()?;
        storage
            .set_item(&self.keys.token, &token)
            .and_then(|_| storage.set_item(&self.keys.admin, &admin))
            .map_err(|e| StoreError::Io(format!("{e:?}")))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let storage = self.storage()?;
        storage
            .remove_item(&self.keys.token)
            .and_then(|_| storage.remove_item(&self.keys.admin))
            .map_err(|e| StoreError::Io(format!("{e:?}")))
    }
}
