//! Wallet and confirmation-polling configuration.

use std::time::Duration;

use thiserror::Error;
use zkw_core::base::RecipientAddress;
use zkw_core::{ValidationError, parse_recipient_address};

/// Number of confirmation checks after a successful submission.
pub const CONFIRMATION_ATTEMPTS: u32 = 3;
/// Delay before each confirmation check.
pub const CONFIRMATION_DELAY_MS: u64 = 2000;
/// Event identifier bound into every proof.
pub const DEFAULT_EVENT_ID: u64 = 5;
/// Smart-account factory contract.
pub const DEFAULT_FACTORY_ADDRESS: &str = "0x76C9b5c8Bc736e58F5b54BA721571c77059CAa68";

/// Errors in wallet configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Confirmation attempts must be at least 1.")]
    ZeroConfirmationAttempts,
    #[error("Invalid factory address: {0}")]
    InvalidFactoryAddress(#[source] ValidationError),
}

/// Bounded retry budget for confirmation polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Number of checks (minimum 1)
    pub max_attempts: u32,
    /// Fixed delay before each check, including the first
    pub delay: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: CONFIRMATION_ATTEMPTS,
            delay: Duration::from_millis(CONFIRMATION_DELAY_MS),
        }
    }
}

impl ConfirmationPolicy {
    /// Validates the policy.
    ///
    /// # Errors
    /// If `max_attempts` is zero.
    pub const fn validate(self) -> Result<ValidatedConfirmationPolicy, ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroConfirmationAttempts);
        }
        Ok(ValidatedConfirmationPolicy { inner: self })
    }
}

/// Validated confirmation policy, the only form the poller accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedConfirmationPolicy {
    inner: ConfirmationPolicy,
}

impl std::ops::Deref for ValidatedConfirmationPolicy {
    type Target = ConfirmationPolicy;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Wallet configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Event identifier used to derive the smart-account address
    pub event_id: u64,
    /// Smart-account factory contract, 40 hex characters with optional `0x`
    pub factory_address: String,
    /// Confirmation polling budget
    pub confirmation: ConfirmationPolicy,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            event_id: DEFAULT_EVENT_ID,
            factory_address: DEFAULT_FACTORY_ADDRESS.to_owned(),
            confirmation: ConfirmationPolicy::default(),
        }
    }
}

impl WalletConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// If the factory address does not parse or the confirmation policy is invalid.
    pub fn validate(self) -> Result<ValidatedWalletConfig, ConfigError> {
        let factory = parse_recipient_address(&self.factory_address)
            .map_err(ConfigError::InvalidFactoryAddress)?;
        let confirmation = self.confirmation.validate()?;
        Ok(ValidatedWalletConfig {
            inner: self,
            factory,
            confirmation,
        })
    }
}

/// Validated wallet configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWalletConfig {
    inner: WalletConfig,
    factory: RecipientAddress,
    confirmation: ValidatedConfirmationPolicy,
}

impl ValidatedWalletConfig {
    /// Parsed factory address.
    #[must_use]
    pub const fn factory(&self) -> &RecipientAddress {
        &self.factory
    }

    /// Validated confirmation policy.
    #[must_use]
    pub const fn confirmation(&self) -> ValidatedConfirmationPolicy {
        self.confirmation
    }
}

impl std::ops::Deref for ValidatedWalletConfig {
    type Target = WalletConfig;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = WalletConfig::default().validate().expect("defaults are valid");
        assert_eq!(config.event_id, 5);
        assert_eq!(
            config.factory().to_string(),
            "0x76c9b5c8bc736e58f5b54ba721571c77059caa68"
        );
        assert_eq!(config.confirmation().max_attempts, 3);
        assert_eq!(config.confirmation().delay, Duration::from_secs(2));
    }

    #[test]
    fn zero_attempts_rejected() {
        let policy = ConfirmationPolicy {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(policy.validate(), Err(ConfigError::ZeroConfirmationAttempts));
    }

    #[test]
    fn bad_factory_rejected() {
        let config = WalletConfig {
            factory_address: "0x1234".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFactoryAddress(_))
        ));
    }
}
