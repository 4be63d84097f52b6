use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors surfaced by token store adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("token store io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The client's only persisted state: one raw auth token string.
///
/// The desktop analogue of the browser's localStorage `token` key. `load`
/// returns `None` when nothing is stored; `clear` is the logout/expiry path
/// and succeeds even when nothing was stored.
pub trait TokenRepository: Send + Sync {
    /// Read the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be written.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing store cannot be updated.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenRepository for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        store.save("replacement").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("replacement"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_on_empty_store_is_fine() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
