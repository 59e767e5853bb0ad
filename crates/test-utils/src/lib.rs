//! Shared test utilities for the workspace.

use std::sync::Arc;

use num_bigint::BigUint;
use zkw_core::base::{PrivateKey, RecipientAddress};
use zkw_core::schema::auth_input::AuthMaterial;
use zkw_core::{parse_private_key, parse_recipient_address};
use zkw_prover::{
    BufferCapacities, CircuitSource, NativeProverBridge, ProverArtifacts, ProvingKeySource,
};

mod chain;
mod prover;
mod store;

pub use chain::{ChainCalls, StubChainClient};
pub use prover::StubProver;
pub use store::MemoryKeyStore;

/// A well-formed Groth16 proof as the native prover emits it.
pub const PROOF_JSON: &str = r#"{"pi_a":["4460911373962483271530325830962932186212040282938446493584585325838424546453","18316419325426549458154212428446545453713574993587919815335606458212455733282","1"],"pi_b":[["11034281209624212441066713577939154669016823212458018627829316312049306713830","1707788958812402604452839002025463700287834698862227633934155373418883290212"],["8390524599961286312372547722567539624839006591213433106484549698025389306018","21281815002493232862633380213582282386612733960640930478598925567396040512012"],["1","0"]],"pi_c":["3862547891364637891526373815489321867427261637236155148154453123442212283046","6006024960009498224938221548633398823437524186287853453325433325148223410234","1"],"protocol":"groth16"}"#;

/// Public signals matching [`PROOF_JSON`].
pub const PUBLIC_SIGNALS_JSON: &str = r#"["1","5","9174538124859127406834829427163620412233745109536493838411294876108421137420"]"#;

/// Recipient used by the end-to-end scenarios.
pub const RECIPIENT: &str = "0000000000000000000000000000000000000abc";

/// Amount used by the end-to-end scenarios.
pub const AMOUNT: &str = "0.01";

/// Smart-account address the stub chain client predicts for every key.
pub const ACCOUNT_ADDRESS: &str = "0x1111111111111111111111111111111111111111";

/// Builds a `Vec<String>` of public signals from literals.
#[macro_export]
macro_rules! signals {
    ($($v:expr),* $(,)?) => {
        vec![$( ::std::string::String::from($v) ),*]
    };
}

/// Decimal text of the test key, `5 * 10^75`.
#[must_use]
pub fn test_key_text() -> String {
    format!("5{}", "0".repeat(75))
}

/// The test key.
#[must_use]
pub fn test_key() -> PrivateKey {
    parse_private_key(&test_key_text()).expect("test key is valid")
}

/// The test recipient.
#[must_use]
pub fn recipient() -> RecipientAddress {
    parse_recipient_address(RECIPIENT).expect("test recipient is valid")
}

/// Auth material the stub chain client derives for every operation.
#[must_use]
pub fn auth_material() -> AuthMaterial {
    AuthMaterial {
        event_id: BigUint::from(5_u32),
        message_hash: BigUint::parse_bytes(
            b"9174538124859127406834829427163620412233745109536493838411294876108421137420",
            10,
        )
        .expect("decimal literal"),
        signature_r8x: BigUint::parse_bytes(
            b"17777552123799933955779906779655732241715742912184938656739573121738514868268",
            10,
        )
        .expect("decimal literal"),
        signature_r8y: BigUint::parse_bytes(
            b"2626589144620713026669568689430873010625803728049924121243784502389097019475",
            10,
        )
        .expect("decimal literal"),
        signature_s: BigUint::parse_bytes(
            b"1672434286585617232232212441536374312340506519658916232417339823545209843187",
            10,
        )
        .expect("decimal literal"),
    }
}

/// In-memory circuit and named proving key.
#[must_use]
pub fn artifacts() -> ProverArtifacts {
    ProverArtifacts {
        circuit: CircuitSource::Bytes(b"stub-circuit".as_slice().into()),
        proving_key: ProvingKeySource::Name("auth.zkey".to_owned()),
    }
}

/// Buffer capacities small enough for tests.
#[must_use]
pub const fn small_capacities() -> BufferCapacities {
    BufferCapacities {
        witness: 1024,
        proof: 4096,
        public_signals: 1024,
        error: 256,
    }
}

/// A bridge over a shared stub so the test can inspect it afterwards.
#[must_use]
pub fn stub_bridge(prover: &Arc<StubProver>) -> NativeProverBridge<Arc<StubProver>> {
    NativeProverBridge::with_capacities(Arc::clone(prover), artifacts(), small_capacities())
}
