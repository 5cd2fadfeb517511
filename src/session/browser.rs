use super::storage::{KeyValueStore, StoreError};

/// `localStorage` / `sessionStorage` backed store for browser hosts.
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    /// The window's durable `localStorage`.
    ///
    /// # Errors
    ///
    /// Fails outside a window context or when storage access is denied.
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or("no window available")?;
        let storage = window
            .local_storage()
            .map_err(|_| "localStorage access denied")?
            .ok_or("localStorage unavailable")?;
        Ok(Self { storage })
    }

    /// The tab-scoped `sessionStorage`.
    ///
    /// # Errors
    ///
    /// Fails outside a window context or when storage access is denied.
    pub fn session() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or("no window available")?;
        let storage = window
            .session_storage()
            .map_err(|_| "sessionStorage access denied")?
            .ok_or("sessionStorage unavailable")?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|_| format!("failed to read '{key}'").into())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| format!("failed to write '{key}'").into())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|_| format!("failed to remove '{key}'").into())
    }
}
