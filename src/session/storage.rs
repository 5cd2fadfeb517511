use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value as JsonValue;

use crate::error::Error;

/// Durable key holding the session token.
pub const TOKEN_KEY: &str = "token";
/// Durable key holding the serialized user profile.
pub const USER_KEY: &str = "user";
/// Session-scoped key holding the path to restore after login.
pub const INTENDED_PATH_KEY: &str = "intendedPath";

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Host-provided string key/value storage.
///
/// Methods take `&self`; implementations use interior mutability. In a
/// browser this is `localStorage` or `sessionStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| "memory store lock poisoned".into())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Client-side session state: a durable store for the token and profile and
/// a session-scoped store for the intended destination.
#[derive(Debug, Clone)]
pub struct SessionStorage<D, S> {
    durable: D,
    scoped: S,
}

impl<D: KeyValueStore, S: KeyValueStore> SessionStorage<D, S> {
    pub fn new(durable: D, scoped: S) -> Self {
        Self { durable, scoped }
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn scoped(&self) -> &S {
        &self.scoped
    }

    /// The persisted session token. An empty value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the durable store cannot be read.
    pub fn token(&self) -> Result<Option<String>, Error> {
        let token = self.durable.get(TOKEN_KEY).map_err(store_error)?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    pub(crate) fn set_token(&self, token: &str) -> Result<(), Error> {
        self.durable.set(TOKEN_KEY, token).map_err(store_error)
    }

    /// The cached user profile, if one was stored at login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] on read failure, or [`Error::Serialization`]
    /// if the stored value is not JSON.
    pub fn user_profile(&self) -> Result<Option<JsonValue>, Error> {
        match self.durable.get(USER_KEY).map_err(store_error)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn set_user_profile(&self, profile: &JsonValue) -> Result<(), Error> {
        let raw = serde_json::to_string(profile)?;
        self.durable.set(USER_KEY, &raw).map_err(store_error)
    }

    /// Peeks at the saved destination without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the session-scoped store cannot be read.
    pub fn intended_path(&self) -> Result<Option<String>, Error> {
        self.scoped.get(INTENDED_PATH_KEY).map_err(store_error)
    }

    pub(crate) fn set_intended_path(&self, path: &str) -> Result<(), Error> {
        self.scoped.set(INTENDED_PATH_KEY, path).map_err(store_error)
    }

    /// Reads and removes the saved destination.
    pub(crate) fn take_intended_path(&self) -> Result<Option<String>, Error> {
        let path = self.intended_path()?;
        if path.is_some() {
            self.scoped.remove(INTENDED_PATH_KEY).map_err(store_error)?;
        }
        Ok(path.filter(|p| !p.is_empty()))
    }

    /// Removes token and profile. Safe to call when neither is present.
    pub(crate) fn clear_credentials(&self) -> Result<(), Error> {
        self.durable.remove(TOKEN_KEY).map_err(store_error)?;
        self.durable.remove(USER_KEY).map_err(store_error)
    }
}

fn store_error(e: StoreError) -> Error {
    Error::Store(e.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn storage() -> SessionStorage<MemoryStore, MemoryStore> {
        SessionStorage::new(MemoryStore::new(), MemoryStore::new())
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert_eq!(a.get("k").unwrap(), None);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let storage = storage();
        storage.durable().set(TOKEN_KEY, "").unwrap();
        assert_eq!(storage.token().unwrap(), None);

        storage.set_token("abc").unwrap();
        assert_eq!(storage.token().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn intended_path_is_consumed_once() {
        let storage = storage();
        storage.set_intended_path("/packages?page=2").unwrap();

        assert_eq!(
            storage.take_intended_path().unwrap().as_deref(),
            Some("/packages?page=2")
        );
        assert_eq!(storage.take_intended_path().unwrap(), None);
    }

    #[test]
    fn profile_is_stored_as_json() {
        let storage = storage();
        storage
            .set_user_profile(&json!({"name": "Sari", "role": "agent"}))
            .unwrap();

        assert_eq!(
            storage.durable().get(USER_KEY).unwrap().as_deref(),
            Some(r#"{"name":"Sari","role":"agent"}"#)
        );
        assert_eq!(storage.user_profile().unwrap().unwrap()["role"], "agent");
    }

    #[test]
    fn clear_credentials_is_idempotent() {
        let storage = storage();
        storage.set_token("abc").unwrap();
        storage.set_user_profile(&json!({"name": "Sari"})).unwrap();
        storage.set_intended_path("/loyalty").unwrap();

        storage.clear_credentials().unwrap();
        storage.clear_credentials().unwrap();

        assert_eq!(storage.token().unwrap(), None);
        assert_eq!(storage.user_profile().unwrap(), None);
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/loyalty"));
    }
}
