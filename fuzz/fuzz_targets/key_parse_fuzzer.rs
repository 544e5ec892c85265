//! Fuzz target for key parsing and key wire decoding
//!
//! # Strategy
//!
//! - Arbitrary suite codes, including unknown and unassigned
//! - Arbitrary private key bytes for HPKE and signature parsing
//! - Arbitrary wire bytes for every key and ciphertext decoder
//!
//! # Invariants
//!
//! - Parsing never panics; failures are `MalformedKey`
//! - A parsed key reproduces its own bytes and signs/decrypts consistently
//! - Wire decode of a successfully decoded value re-encodes to the consumed bytes

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mls_suite::{
    CipherSuite, CryptoError, HpkeCiphertext, HpkePrivateKey, HpkePublicKey, SignaturePrivateKey,
    SignaturePublicKey,
};
use tls_codec::{Deserialize, Serialize};

#[derive(Debug, Arbitrary)]
struct ParseScenario {
    suite: u16,
    private_key: Vec<u8>,
    wire: Vec<u8>,
}

fn check_wire<T: Deserialize + Serialize>(wire: &[u8]) {
    let mut reader = wire;
    if let Ok(value) = T::tls_deserialize(&mut reader) {
        let consumed = wire.len() - reader.len();
        let encoded = value.tls_serialize_detached().expect("decoded value must re-encode");
        assert_eq!(encoded.as_slice(), &wire[..consumed], "re-encoding must match input");
    }
}

fuzz_target!(|scenario: ParseScenario| {
    check_wire::<HpkeCiphertext>(&scenario.wire);
    check_wire::<HpkePublicKey>(&scenario.wire);
    check_wire::<HpkePrivateKey>(&scenario.wire);
    check_wire::<SignaturePublicKey>(&scenario.wire);
    check_wire::<SignaturePrivateKey>(&scenario.wire);

    let Ok(suite) = CipherSuite::try_from(scenario.suite) else {
        return;
    };

    // INVARIANT 1: HPKE parse either succeeds consistently or reports MalformedKey
    match HpkePrivateKey::parse(&suite, &scenario.private_key) {
        Ok(sk) => {
            assert_eq!(sk.data(), scenario.private_key.as_slice());
            let ct = sk.public_key().encrypt(&suite, b"", b"round trip").expect("own key encrypts");
            assert_eq!(sk.decrypt(&suite, b"", &ct).expect("own key decrypts"), b"round trip");
        },
        Err(err) => assert!(matches!(err, CryptoError::MalformedKey { .. }), "{err}"),
    }

    // INVARIANT 2: Signature parse either succeeds consistently or reports MalformedKey
    match SignaturePrivateKey::parse(&suite, &scenario.private_key) {
        Ok(sk) => {
            let signature = sk.sign(&suite, b"round trip").expect("own key signs");
            assert!(sk.public_key().verify(&suite, b"round trip", &signature));
        },
        Err(err) => assert!(matches!(err, CryptoError::MalformedKey { .. }), "{err}"),
    }
});
