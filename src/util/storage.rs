//! Typed access to the persisted key-value store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps everything in `localStorage`; the CLI keeps the same keys
//! in a JSON file. Callers never see key strings: each persisted type names
//! its own key and encoding through [`Stored`], so the names stay stable
//! across reloads and cannot drift between call sites.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: a missing or unparseable value is simply absent. Writes
//! are best-effort and only logged on failure, matching how the pages treat
//! storage quota or privacy-mode errors.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;

use crate::state::prefs::{Language, Theme};
use crate::state::session::{PendingRegistration, Session};

pub const SESSION_KEY: &str = "blood_connect_user";
pub const PENDING_REGISTRATION_KEY: &str = "blood_connect_temp_reg";
pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "blood_lang";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// RAW STORE
// =============================================================================

/// String-keyed store with `localStorage` semantics.
///
/// Methods take `&self`: the backing store is shared by every component on the
/// page, and all access happens on one thread.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the key could not be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store. Used by tests and as a last resort when no durable
/// store is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a raw value, bypassing any encoding.
    #[must_use]
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// TYPED VALUES
// =============================================================================

/// A value persisted under a fixed key.
pub trait Stored: Sized {
    const KEY: &'static str;

    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    fn encode(&self) -> Result<String, StorageError>;

    fn decode(raw: &str) -> Option<Self>;
}

impl Stored for Session {
    const KEY: &'static str = SESSION_KEY;

    fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl Stored for PendingRegistration {
    const KEY: &'static str = PENDING_REGISTRATION_KEY;

    fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl Stored for Theme {
    const KEY: &'static str = THEME_KEY;

    fn encode(&self) -> Result<String, StorageError> {
        Ok(self.as_str().to_owned())
    }

    fn decode(raw: &str) -> Option<Self> {
        Theme::parse(raw)
    }
}

impl Stored for Language {
    const KEY: &'static str = LANGUAGE_KEY;

    fn encode(&self) -> Result<String, StorageError> {
        Ok(self.code().to_owned())
    }

    fn decode(raw: &str) -> Option<Self> {
        Language::from_code(raw)
    }
}

// =============================================================================
// TYPED HANDLE
// =============================================================================

/// Cheaply cloneable typed view over a shared [`KeyValueStore`].
#[derive(Clone)]
pub struct Storage {
    inner: Rc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn new(inner: Rc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// Storage backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    /// Load a value; absent and corrupt entries are both `None`.
    pub fn load<T: Stored>(&self) -> Option<T> {
        let raw = self.inner.get(T::KEY)?;
        let value = T::decode(&raw);
        if value.is_none() {
            tracing::debug!(key = T::KEY, "ignoring unreadable stored value");
        }
        value
    }

    pub fn save<T: Stored>(&self, value: &T) {
        let result = value.encode().and_then(|raw| self.inner.set(T::KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(key = T::KEY, error = %e, "failed to persist value");
        }
    }

    pub fn remove<T: Stored>(&self) {
        if let Err(e) = self.inner.remove(T::KEY) {
            tracing::warn!(key = T::KEY, error = %e, "failed to remove stored value");
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
