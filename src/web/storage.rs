//! `window.localStorage` as a [`KeyValueStore`].

use crate::util::storage::{KeyValueStore, StorageError};

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// # Errors
    ///
    /// Returns an error if the page has no window or storage is disabled.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
