//! Durable credential storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store reads the stored credential once at startup and only
//! writes it afterwards. Browser builds use `localStorage`; tests and non-browser
//! hosts use [`MemoryStorage`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::{Arc, Mutex, PoisonError};

/// `localStorage` key holding the serialized credential.
pub const CREDENTIAL_KEY: &str = "token";

/// Failures reported by a [`CredentialStorage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Key-value slot for the single persisted credential.
///
/// An empty slot is a normal state, reported as `Ok(None)`.
pub trait CredentialStorage {
    /// Read the stored credential, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored credential.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend refuses the write.
    fn save(&self, raw: &str) -> Result<(), StorageError>;

    /// Remove the stored credential. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend refuses the removal.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Browser `localStorage` backend. Unavailable outside hydrated builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StorageError::Unavailable),
        Err(e) => Err(StorageError::Rejected(format!("{e:?}"))),
    }
}

impl CredentialStorage for BrowserStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(CREDENTIAL_KEY)
                .map_err(|e| StorageError::Rejected(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    fn save(&self, raw: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(CREDENTIAL_KEY, raw)
                .map_err(|e| StorageError::Rejected(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .remove_item(CREDENTIAL_KEY)
                .map_err(|e| StorageError::Rejected(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }
}

/// In-process backend. Clones share the same slot, so two stores built from
/// clones of one `MemoryStorage` behave like two page loads of one browser.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Storage pre-populated with `raw`.
    pub fn with_credential(raw: impl Into<String>) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(raw.into()))) }
    }

    /// Current slot contents, bypassing the trait.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.peek())
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
