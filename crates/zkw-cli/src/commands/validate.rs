use tracing::info;
use zkw_core::{parse_amount, parse_recipient_address};

use super::secret::{SecretSource, read_private_key};

/// Check a recipient address.
pub fn validate_address(address: &str) -> eyre::Result<()> {
    let address = parse_recipient_address(address)?;
    info!(%address, "Valid recipient address");
    Ok(())
}

/// Check an amount and log it in base units.
pub fn validate_amount(amount: &str) -> eyre::Result<()> {
    let amount = parse_amount(amount)?;
    info!(units = %amount.to_units_string(), "Valid amount");
    Ok(())
}

/// Check a private key without storing it.
pub async fn validate_key(source: SecretSource) -> eyre::Result<()> {
    read_private_key(source).await?;
    info!("Valid private key");
    Ok(())
}
