//! # Filesystem-backed session store
//!
//! [`FileStore`] persists the session on native targets, one file per key:
//!
//! ```text
//! <base_dir>/
//! ├── admin_token     # bearer token
//! └── admin_info      # AdminInfo JSON
//! ```
//!
//! [`FileStore::default_location`] resolves `<data_dir>/flowfinance-admin`
//! through [`dirs::data_dir()`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use api::Session;

use crate::keys::{self, SessionKeys};
use crate::{SessionStore, StoreError};

const APP_DIR: &str = "flowfinance-admin";

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
    keys: SessionKeys,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self::with_keys(base, SessionKeys::default())
    }

    pub fn with_keys(base: PathBuf, keys: SessionKeys) -> Self {
        Self { base, keys }
    }

    /// Store under the platform data directory.
    pub fn default_location(keys: SessionKeys) -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| StoreError::Unavailable("no platform data directory".to_string()))?
            .join(APP_DIR);
        Ok(Self::with_keys(base, keys))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.base.join(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.base.join(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl SessionStore for FileStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        keys::decode(self.read(&self.keys.token)?, self.read(&self.keys.admin)?)
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let (token, admin) = keys::encode(session)?;
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.base.join(&self.keys.token), token)?;
        std::fs::write(self.base.join(&self.keys.admin), admin)?;
        tracing::debug!(path = %self.base.display(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.remove(&self.keys.token)?;
        self.remove(&self.keys.admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AdminInfo, AdminRole};

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("flowfinance_admin_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        assert_eq!(store.load().await, Ok(None));

        let session = Session {
            access_token: "tok".into(),
            token_type: None,
            admin: AdminInfo {
                id: "a1".into(),
                name: "Mod".into(),
                email: "mod@example.com".into(),
                role: AdminRole::Moderator,
            },
        };
        store.save(&session).await.unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load().await, Ok(Some(session)));

        reopened.clear().await.unwrap();
        assert_eq!(store.load().await, Ok(None));
        // Clearing twice is fine
        reopened.clear().await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
