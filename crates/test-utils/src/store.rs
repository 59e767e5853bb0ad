use std::sync::{Mutex, PoisonError};

use zkw_core::base::PrivateKey;
use zkw_sdk::{KeyStoreError, SecureKeyStore};

/// Key store held in memory.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<PrivateKey>>,
}

impl MemoryKeyStore {
    /// Store already holding `key`.
    #[must_use]
    pub const fn with_key(key: PrivateKey) -> Self {
        Self {
            key: Mutex::new(Some(key)),
        }
    }
}

impl SecureKeyStore for MemoryKeyStore {
    fn get(&self) -> Option<PrivateKey> {
        self.key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, key: &PrivateKey) -> Result<(), KeyStoreError> {
        *self.key.lock().unwrap_or_else(PoisonError::into_inner) = Some(key.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), KeyStoreError> {
        *self.key.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
