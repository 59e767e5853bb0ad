//! Private key storage.

use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret as _, SecretString};
use tracing::{info, warn};
use zeroize::Zeroize as _;
use zkw_core::base::PrivateKey;
use zkw_core::parse_private_key;

/// Errors writing or removing a stored key.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    /// The backing file could not be written or removed.
    #[error("key store I/O failed for {path}: {source}")]
    Io {
        /// Backing file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Holds at most one private key.
pub trait SecureKeyStore: Send + Sync {
    /// The stored key, or `None` if absent or unreadable.
    fn get(&self) -> Option<PrivateKey>;

    /// Replace the stored key.
    ///
    /// # Errors
    /// If the key cannot be persisted.
    fn set(&self, key: &PrivateKey) -> Result<(), KeyStoreError>;

    /// Remove the stored key. Clearing an empty store succeeds.
    ///
    /// # Errors
    /// If the key cannot be removed.
    fn clear(&self) -> Result<(), KeyStoreError>;
}

/// Stores the key as decimal text in a file readable only by its owner.
///
/// The file is not encrypted.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Store backed by `path`. The file is created on first [`SecureKeyStore::set`].
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> KeyStoreError {
        KeyStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Write `contents` to `path`, owner-only on Unix (`0o600`).
fn write_sensitive_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;

        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

impl SecureKeyStore for FileKeyStore {
    fn get(&self) -> Option<PrivateKey> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => SecretString::new(text.into_boxed_str()),
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(file = ?self.path, error = %e, "Failed to read key store");
                return None;
            }
        };

        let text = text.expose_secret().trim();
        if text.is_empty() {
            return None;
        }
        parse_private_key(text)
            .inspect_err(|e| warn!(file = ?self.path, error = %e, "Stored key is invalid"))
            .ok()
    }

    fn set(&self, key: &PrivateKey) -> Result<(), KeyStoreError> {
        let mut text = format!("{}\n", key.to_decimal());
        let written = write_sensitive_file(&self.path, &text);
        text.zeroize();
        written.map_err(|e| self.io_error(e))?;
        info!(file = ?self.path, "Private key stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), KeyStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(file = ?self.path, "Private key removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
