//! Wallet facade: validation and key loading before any attempt starts.

use std::sync::Arc;

use test_utils::{
    ACCOUNT_ADDRESS, AMOUNT, MemoryKeyStore, RECIPIENT, StubChainClient, StubProver, stub_bridge,
    test_key, test_key_text,
};
use tokio::sync::broadcast::error::TryRecvError;
use zkw_core::ValidationError;
use zkw_sdk::{FileKeyStore, SecureKeyStore, Wallet, WalletConfig, WalletError};

type TestWallet<S> = Wallet<S, StubChainClient, Arc<StubProver>>;

fn wallet<S: SecureKeyStore>(store: S) -> (Arc<StubChainClient>, Arc<StubProver>, TestWallet<S>) {
    let client = Arc::new(StubChainClient::new());
    let prover = Arc::new(StubProver::succeeding());
    let config = WalletConfig::default().validate().expect("defaults are valid");
    let wallet = Wallet::new(store, Arc::clone(&client), stub_bridge(&prover), config);
    (client, prover, wallet)
}

#[test]
fn import_validates_before_storing() {
    let (_, _, wallet) = wallet(MemoryKeyStore::default());

    assert!(matches!(
        wallet.import_key("12345"),
        Err(WalletError::Validation(ValidationError::PrivateKeyTooShort))
    ));
    assert!(!wallet.has_key());

    wallet.import_key(&test_key_text()).expect("valid key");
    assert!(wallet.has_key());

    wallet.clear().expect("cleared");
    assert!(!wallet.has_key());
}

#[tokio::test]
async fn send_without_key_fails_before_start() {
    let (client, _, wallet) = wallet(MemoryKeyStore::default());
    let mut phases = wallet.subscribe();

    let err = wallet
        .send(RECIPIENT, AMOUNT)
        .await
        .expect_err("no key stored");

    assert!(matches!(err, WalletError::KeyNotFound));
    assert_eq!(phases.try_recv(), Err(TryRecvError::Empty));
    assert!(client.calls().built.is_empty());
}

#[tokio::test]
async fn invalid_input_never_reaches_the_submitter() {
    let (client, prover, wallet) = wallet(MemoryKeyStore::with_key(test_key()));
    let mut phases = wallet.subscribe();

    let cases = [
        ("0x1234", AMOUNT, ValidationError::AddressLength),
        (RECIPIENT, "0", ValidationError::AmountNotPositive),
        (RECIPIENT, "-1", ValidationError::AmountNotPositive),
        (RECIPIENT, "0.0000000000000000001", ValidationError::TooManyDecimals),
    ];
    for (recipient, amount, expected) in cases {
        match wallet.send(recipient, amount).await {
            Err(WalletError::Validation(actual)) => assert_eq!(actual, expected),
            other => panic!("{recipient} / {amount}: unexpected {other:?}"),
        }
    }

    assert_eq!(phases.try_recv(), Err(TryRecvError::Empty));
    assert!(client.calls().built.is_empty());
    assert_eq!(prover.witness_calls(), 0);
}

#[tokio::test]
async fn send_with_stored_key_completes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (client, _, wallet) = wallet(FileKeyStore::new(dir.path().join("key")));
    wallet.import_key(&test_key_text()).expect("stored");

    let hash = wallet.send(RECIPIENT, AMOUNT).await.expect("completed");

    assert!(!hash.as_str().is_empty());
    assert_eq!(client.calls().submitted.len(), 1);
}

#[tokio::test]
async fn read_only_queries_use_predicted_account() {
    let (_, _, wallet) = wallet(MemoryKeyStore::with_key(test_key()));

    let address = wallet.account_address().await.expect("address");
    assert_eq!(address.to_string(), ACCOUNT_ADDRESS);

    assert_eq!(
        wallet.balance().await.expect("balance"),
        "1000000000000000000"
    );

    let history = wallet.history(10, 2).await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history.first().map(|log| log.time), Some(10));
}

#[tokio::test]
async fn read_only_queries_need_a_key() {
    let (_, _, wallet) = wallet(MemoryKeyStore::default());
    assert!(matches!(
        wallet.balance().await,
        Err(WalletError::KeyNotFound)
    ));
}
