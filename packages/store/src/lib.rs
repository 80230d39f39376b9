//! # Store crate: session persistence and console configuration
//!
//! The console keeps exactly one piece of client-side state between page
//! loads: the authenticated [`Session`] (bearer token plus admin record). It
//! is written as two string entries, the token under `admin_token` and the
//! admin record as JSON under `admin_info`, through the [`SessionStore`] trait.
//!
//! | Backend | Platform | Storage |
//! |---------|----------|---------|
//! | [`MemoryStore`] | any | `HashMap` behind `Arc<Mutex<_>>`, used by tests |
//! | [`FileStore`] | native | one file per key under the platform data dir |
//! | [`LocalStorageStore`] | `wasm32` + `web` feature | browser `localStorage` |
//!
//! [`PlatformStore`] names the backend the running target should use.
//!
//! [`config`] holds [`ConsoleConfig`], the `console.toml` settings file.

pub mod config;
mod error;
mod keys;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ConfigError, ConsoleConfig};
pub use error::StoreError;
pub use keys::SessionKeys;

use api::Session;
use std::future::Future;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = FileStore;

/// The running target's store, using `keys` for its entries.
pub fn platform_store(keys: SessionKeys) -> Result<PlatformStore, StoreError> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Ok(LocalStorageStore::with_keys(keys))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Ok(MemoryStore::with_keys(keys))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        FileStore::default_location(keys)
    }
}

/// Async persistence for the signed-in session.
pub trait SessionStore {
    /// The persisted session, or `None` when nobody is signed in.
    ///
    /// A token without an admin record (or the reverse) counts as signed out.
    fn load(&self) -> impl Future<Output = Result<Option<Session>, StoreError>>;
    fn save(&self, session: &Session) -> impl Future<Output = Result<(), StoreError>>;
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>>;
}
