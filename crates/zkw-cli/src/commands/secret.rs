//! Reading private key text without echoing it.

use std::path::{Path, PathBuf};

use eyre::Context as _;
use secrecy::{ExposeSecret as _, SecretString};
use zkw_core::base::PrivateKey;
use zkw_core::parse_private_key;

/// Where secret input is read from.
#[derive(Debug)]
pub enum SecretSource {
    /// Interactive prompt without echo.
    Prompt,
    /// First line of a file, trimmed.
    File(PathBuf),
    /// All of stdin, trimmed.
    Stdin,
}

async fn prompt_secret(prompt: &'static str) -> eyre::Result<SecretString> {
    tokio::task::spawn_blocking(move || {
        rpassword::prompt_password(prompt)
            .map(|s| SecretString::new(s.into_boxed_str()))
            .context("Failed to read secret input")
    })
    .await?
}

async fn read_secret_file(path: &Path) -> eyre::Result<SecretString> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(SecretString::new(text.trim().to_owned().into_boxed_str()))
}

async fn read_secret_stdin() -> eyre::Result<SecretString> {
    tokio::task::spawn_blocking(|| -> eyre::Result<SecretString> {
        use std::io::Read as _;

        use zeroize::Zeroize as _;

        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        let secret = SecretString::new(buf.trim().to_owned().into_boxed_str());
        buf.zeroize();
        Ok(secret)
    })
    .await?
}

/// Read and validate a private key.
pub async fn read_private_key(source: SecretSource) -> eyre::Result<PrivateKey> {
    let secret = match source {
        SecretSource::Prompt => prompt_secret("Private key: ").await?,
        SecretSource::File(path) => read_secret_file(&path).await?,
        SecretSource::Stdin => read_secret_stdin().await?,
    };
    parse_private_key(secret.expose_secret()).context("Invalid private key")
}
