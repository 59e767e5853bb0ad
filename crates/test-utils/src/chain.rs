use std::sync::{Mutex, PoisonError};

use zkw_core::base::{Amount, PrivateKey, RecipientAddress};
use zkw_core::parse_recipient_address;
use zkw_core::schema::auth_input::AuthMaterial;
use zkw_core::schema::operation::{TransactionLog, TxHash, UserOperation};
use zkw_sdk::{ChainClient, ChainError};

use crate::{ACCOUNT_ADDRESS, auth_material};

/// Everything the stub chain client was asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainCalls {
    /// Recipients and amounts of built operations.
    pub built: Vec<(RecipientAddress, Amount)>,
    /// Operations for which auth material was requested.
    pub auth_requests: Vec<UserOperation>,
    /// Submitted operations with their proof JSON.
    pub submitted: Vec<(UserOperation, String)>,
    /// Number of confirmation checks.
    pub confirmation_checks: u32,
}

/// Scripted [`ChainClient`].
///
/// By default every call succeeds and the first confirmation check reports inclusion.
#[derive(Debug)]
pub struct StubChainClient {
    material: AuthMaterial,
    build_error: Option<ChainError>,
    submit_error: Option<ChainError>,
    confirm_on_check: Option<u32>,
    failing_checks: bool,
    calls: Mutex<ChainCalls>,
}

impl Default for StubChainClient {
    fn default() -> Self {
        Self {
            material: auth_material(),
            build_error: None,
            submit_error: None,
            confirm_on_check: Some(1),
            failing_checks: false,
            calls: Mutex::new(ChainCalls::default()),
        }
    }
}

impl StubChainClient {
    /// Client with default behavior.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive `material` for every operation.
    #[must_use]
    pub fn with_auth_material(mut self, material: AuthMaterial) -> Self {
        self.material = material;
        self
    }

    /// Fail operation building with `error`.
    #[must_use]
    pub fn failing_build(mut self, error: ChainError) -> Self {
        self.build_error = Some(error);
        self
    }

    /// Reject submissions with `error`.
    #[must_use]
    pub fn rejecting_submission(mut self, error: ChainError) -> Self {
        self.submit_error = Some(error);
        self
    }

    /// Report inclusion from the given 1-based check on, or never.
    #[must_use]
    pub const fn confirming_on(mut self, check: Option<u32>) -> Self {
        self.confirm_on_check = check;
        self
    }

    /// Make every confirmation check fail.
    #[must_use]
    pub const fn with_failing_checks(mut self) -> Self {
        self.failing_checks = true;
        self
    }

    /// Snapshot of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> ChainCalls {
        self.record(|calls| calls.clone())
    }

    fn record<T>(&self, f: impl FnOnce(&mut ChainCalls) -> T) -> T {
        f(&mut self.calls.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ChainClient for StubChainClient {
    fn build_user_operation(
        &self,
        _key: &PrivateKey,
        recipient: &RecipientAddress,
        amount: &Amount,
    ) -> impl Future<Output = Result<UserOperation, ChainError>> + Send {
        self.record(|calls| calls.built.push((*recipient, amount.clone())));
        let result = self.build_error.clone().map_or_else(
            || {
                Ok(UserOperation::new(format!(
                    "op:{recipient}:{}",
                    amount.to_units_string()
                )))
            },
            Err,
        );
        std::future::ready(result)
    }

    fn auth_material(
        &self,
        _key: &PrivateKey,
        operation: &UserOperation,
    ) -> impl Future<Output = Result<AuthMaterial, ChainError>> + Send {
        self.record(|calls| calls.auth_requests.push(operation.clone()));
        std::future::ready(Ok(self.material.clone()))
    }

    fn submit(
        &self,
        operation: UserOperation,
        proof_json: String,
    ) -> impl Future<Output = Result<TxHash, ChainError>> + Send {
        let hash = TxHash::new(format!("0xhash-{}", operation.as_str().len()));
        self.record(|calls| calls.submitted.push((operation, proof_json)));
        let result = self.submit_error.clone().map_or(Ok(hash), Err);
        std::future::ready(result)
    }

    fn is_confirmed(
        &self,
        _hash: &TxHash,
    ) -> impl Future<Output = Result<bool, ChainError>> + Send {
        let check = self.record(|calls| {
            calls.confirmation_checks = calls.confirmation_checks.saturating_add(1);
            calls.confirmation_checks
        });
        let result = if self.failing_checks {
            Err(ChainError::Transport("node unreachable".to_owned()))
        } else {
            Ok(self.confirm_on_check.is_some_and(|on| check >= on))
        };
        std::future::ready(result)
    }

    fn balance(
        &self,
        _account: &RecipientAddress,
    ) -> impl Future<Output = Result<String, ChainError>> + Send {
        std::future::ready(Ok("1000000000000000000".to_owned()))
    }

    fn history(
        &self,
        _account: &RecipientAddress,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<TransactionLog>, ChainError>> + Send {
        let logs = (offset..offset.saturating_add(limit))
            .map(|i| TransactionLog {
                to: crate::RECIPIENT.to_owned(),
                amount: "10000000000000000".to_owned(),
                time: u64::from(i),
            })
            .collect();
        std::future::ready(Ok(logs))
    }

    fn predicted_address(
        &self,
        _key: &PrivateKey,
        _event_id: u64,
        _factory: &RecipientAddress,
    ) -> impl Future<Output = Result<RecipientAddress, ChainError>> + Send {
        std::future::ready(
            parse_recipient_address(ACCOUNT_ADDRESS)
                .map_err(|e| ChainError::Malformed(e.to_string())),
        )
    }
}
