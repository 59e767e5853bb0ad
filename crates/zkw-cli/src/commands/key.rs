use std::path::{Path, PathBuf};

use tracing::info;
use zkw_sdk::{FileKeyStore, SecureKeyStore as _};

use super::secret::{SecretSource, read_private_key};

/// Validate a private key and write it to the key store.
pub async fn key_import(store: PathBuf, source: SecretSource) -> eyre::Result<()> {
    let key = read_private_key(source).await?;
    FileKeyStore::new(store).set(&key)?;
    Ok(())
}

/// Report whether the key store holds a valid key.
pub fn key_status(store: &Path) {
    let store = FileKeyStore::new(store.to_path_buf());
    if store.get().is_some() {
        info!(file = ?store.path(), "Private key present");
    } else {
        info!(file = ?store.path(), "No private key stored");
    }
}

/// Remove the stored key.
pub fn key_clear(store: PathBuf) -> eyre::Result<()> {
    let store = FileKeyStore::new(store);
    store.clear()?;
    info!(file = ?store.path(), "Private key cleared");
    Ok(())
}
