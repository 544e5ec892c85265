//! Fuzz target for HPKE decryption under adversarial ciphertexts
//!
//! # Strategy
//!
//! - Keys derived from fuzzer-chosen seeds in every supported suite
//! - Valid ciphertexts mutated at fuzzer-chosen positions
//! - Entirely arbitrary `kem_output` / `ciphertext` pairs
//!
//! # Invariants
//!
//! - Decryption never panics
//! - Every failure is `DecryptionFailed`, with no further detail
//! - Unmodified ciphertexts always decrypt to the original plaintext

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mls_suite::{CipherSuite, CryptoError, HpkeCiphertext, HpkePrivateKey, SUPPORTED_SUITES};

#[derive(Debug, Arbitrary)]
struct DecryptScenario {
    suite_index: u8,
    seed: Vec<u8>,
    aad: Vec<u8>,
    plaintext: Vec<u8>,
    mutation: Mutation,
}

#[derive(Debug, Arbitrary)]
enum Mutation {
    None,
    FlipKemOutput { index: u16, mask: u8 },
    FlipCiphertext { index: u16, mask: u8 },
    Truncate { keep: u16 },
    ChangeAad { aad: Vec<u8> },
    Replace { kem_output: Vec<u8>, ciphertext: Vec<u8> },
}

fn flip(bytes: &mut [u8], index: u16, mask: u8) -> bool {
    if bytes.is_empty() || mask == 0 {
        return false;
    }
    let i = usize::from(index) % bytes.len();
    bytes[i] ^= mask;
    true
}

fuzz_target!(|scenario: DecryptScenario| {
    let id = SUPPORTED_SUITES[usize::from(scenario.suite_index) % SUPPORTED_SUITES.len()];
    let suite = CipherSuite::new(id).expect("supported suite");

    let Ok(sk) = HpkePrivateKey::derive(&suite, &scenario.seed) else {
        assert!(scenario.seed.is_empty(), "only an empty seed is rejected");
        return;
    };

    let mut ct = sk
        .public_key()
        .encrypt(&suite, &scenario.aad, &scenario.plaintext)
        .expect("encrypting to a derived key succeeds");
    let mut aad = scenario.aad.clone();

    let modified = match scenario.mutation {
        Mutation::None => false,
        Mutation::FlipKemOutput { index, mask } => flip(&mut ct.kem_output, index, mask),
        Mutation::FlipCiphertext { index, mask } => flip(&mut ct.ciphertext, index, mask),
        Mutation::Truncate { keep } => {
            let keep = usize::from(keep);
            let before = ct.ciphertext.len();
            ct.ciphertext.truncate(keep);
            ct.ciphertext.len() != before
        },
        Mutation::ChangeAad { aad: other } => {
            let changed = other != aad;
            aad = other;
            changed
        },
        Mutation::Replace { kem_output, ciphertext } => {
            let replacement = HpkeCiphertext { kem_output, ciphertext };
            let changed = replacement != ct;
            ct = replacement;
            changed
        },
    };

    // INVARIANT 1: Decryption never panics and failures carry no detail
    match sk.decrypt(&suite, &aad, &ct) {
        Ok(plaintext) => {
            // INVARIANT 2: Untouched ciphertexts round-trip
            assert!(!modified, "modified ciphertext must not authenticate");
            assert_eq!(plaintext, scenario.plaintext);
        },
        Err(err) => {
            assert_eq!(err, CryptoError::DecryptionFailed);
            assert!(modified, "unmodified ciphertext must decrypt");
        },
    }
});
