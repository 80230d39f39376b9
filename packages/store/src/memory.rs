use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use api::Session;

use crate::keys::{self, SessionKeys};
use crate::{SessionStore, StoreError};

/// In-memory SessionStore for tests and targets without persistent storage.
///
/// Clones share the same entries, so a test can hold one handle while the
/// code under test writes through another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    keys: SessionKeys,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: SessionKeys) -> Self {
        Self {
            keys,
            entries: Arc::default(),
        }
    }

    /// Raw entry, as a browser devtools panel would show it.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    pub fn set_raw(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        let entries = self.entries();
        keys::decode(
            entries.get(&self.keys.token).cloned(),
            entries.get(&self.keys.admin).cloned(),
        )
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let (token, admin) = keys::encode(session)?;
        let mut entries = self.entries();
        entries.insert(self.keys.token.clone(), token);
        entries.insert(self.keys.admin.clone(), admin);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries();
        entries.remove(&self.keys.token);
        entries.remove(&self.keys.admin);
        Ok(())
    }
}
