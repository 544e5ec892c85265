//! Property-based tests for HPKE and signature keys
//!
//! 1. **Round-trip**: decrypt(encrypt(m, aad), aad) == m in every suite
//! 2. **Binding**: a different aad or a flipped ciphertext bit fails
//! 3. **Authenticity**: verify(sign(m)) holds, a different message or a
//!    flipped signature bit does not
//! 4. **Derivation**: same seed yields the same key pair, parse recovers it,
//!    and HPKE and signature keys from one seed share no secret bytes
//! 5. **Freshness**: independent generations never collide
//! 6. **Robustness**: arbitrary key bytes never panic, only error

use mls_suite::{
    CipherSuite, CryptoError, HpkeCiphertext, HpkePrivateKey, HpkePublicKey, SUPPORTED_SUITES,
    SignaturePrivateKey, SignaturePublicKey,
};
use proptest::prelude::*;

fn supported_suite() -> impl Strategy<Value = CipherSuite> {
    prop::sample::select(SUPPORTED_SUITES.to_vec()).prop_map(|id| {
        let Ok(suite) = CipherSuite::new(id) else {
            unreachable!("supported suite {id} must resolve")
        };
        suite
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_hpke_roundtrip(
        suite in supported_suite(),
        aad in prop::collection::vec(any::<u8>(), 0..64),
        plaintext in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let sk = HpkePrivateKey::generate(&suite);

        let ct = sk.public_key().encrypt(&suite, &aad, &plaintext).unwrap();
        let pt = sk.decrypt(&suite, &aad, &ct).unwrap();

        prop_assert_eq!(pt, plaintext);
    }

    #[test]
    fn prop_hpke_aad_is_bound(
        suite in supported_suite(),
        aad in prop::collection::vec(any::<u8>(), 0..32),
        other_aad in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        prop_assume!(aad != other_aad);
        let sk = HpkePrivateKey::generate(&suite);

        let ct = sk.public_key().encrypt(&suite, &aad, b"group secrets").unwrap();

        prop_assert_eq!(sk.decrypt(&suite, &other_aad, &ct), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn prop_hpke_bit_flip_fails(
        suite in supported_suite(),
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
        in_kem_output in any::<bool>(),
    ) {
        let sk = HpkePrivateKey::generate(&suite);
        let mut ct = sk.public_key().encrypt(&suite, b"", &plaintext).unwrap();

        let target = if in_kem_output { &mut ct.kem_output } else { &mut ct.ciphertext };
        let i = index.index(target.len());
        target[i] ^= 1 << bit;

        prop_assert_eq!(sk.decrypt(&suite, b"", &ct), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn prop_hpke_derive_parse_consistent(
        suite in supported_suite(),
        seed in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let derived = HpkePrivateKey::derive(&suite, &seed).unwrap();
        let again = HpkePrivateKey::derive(&suite, &seed).unwrap();
        let parsed = HpkePrivateKey::parse(&suite, derived.data()).unwrap();

        prop_assert_eq!(&derived, &again);
        prop_assert_eq!(parsed.public_key(), derived.public_key());
    }

    #[test]
    fn prop_signature_roundtrip(
        suite in supported_suite(),
        message in prop::collection::vec(any::<u8>(), 0..512),
        other in prop::collection::vec(any::<u8>(), 0..512),
    ) {
        let sk = SignaturePrivateKey::generate(&suite);
        let signature = sk.sign(&suite, &message).unwrap();

        prop_assert!(sk.public_key().verify(&suite, &message, &signature));
        if other != message {
            prop_assert!(!sk.public_key().verify(&suite, &other, &signature));
        }
    }

    #[test]
    fn prop_signature_bit_flip_fails(
        suite in supported_suite(),
        message in prop::collection::vec(any::<u8>(), 0..256),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let sk = SignaturePrivateKey::generate(&suite);
        let mut signature = sk.sign(&suite, &message).unwrap();

        let i = index.index(signature.len());
        signature[i] ^= 1 << bit;

        prop_assert!(!sk.public_key().verify(&suite, &message, &signature));
    }

    #[test]
    fn prop_generate_is_fresh(suite in supported_suite()) {
        let hpke_a = HpkePrivateKey::generate(&suite);
        let hpke_b = HpkePrivateKey::generate(&suite);
        let signing_a = SignaturePrivateKey::generate(&suite);
        let signing_b = SignaturePrivateKey::generate(&suite);

        prop_assert_ne!(hpke_a.data(), hpke_b.data());
        prop_assert_ne!(hpke_a.public_key(), hpke_b.public_key());
        prop_assert_ne!(signing_a.data(), signing_b.data());
        prop_assert_ne!(signing_a.public_key(), signing_b.public_key());
    }

    #[test]
    fn prop_seed_separates_hpke_and_signature_keys(
        suite in supported_suite(),
        seed in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let hpke = HpkePrivateKey::derive(&suite, &seed).unwrap();
        let signing = SignaturePrivateKey::derive(&suite, &seed).unwrap();

        prop_assert_ne!(hpke.data(), signing.data());
    }

    #[test]
    fn prop_signature_derive_parse_consistent(
        suite in supported_suite(),
        seed in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let derived = SignaturePrivateKey::derive(&suite, &seed).unwrap();
        let parsed = SignaturePrivateKey::parse(&suite, derived.data()).unwrap();

        prop_assert_eq!(&parsed, &derived);

        let signature = parsed.sign(&suite, b"message").unwrap();
        prop_assert!(derived.public_key().verify(&suite, b"message", &signature));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_arbitrary_private_bytes_never_panic(
        suite in supported_suite(),
        data in prop::collection::vec(any::<u8>(), 0..140),
    ) {
        if let Err(err) = HpkePrivateKey::parse(&suite, &data) {
            let is_malformed = matches!(err, CryptoError::MalformedKey { .. });
            prop_assert!(is_malformed);
        }
        if let Err(err) = SignaturePrivateKey::parse(&suite, &data) {
            let is_malformed = matches!(err, CryptoError::MalformedKey { .. });
            prop_assert!(is_malformed);
        }
    }

    #[test]
    fn prop_arbitrary_public_bytes_never_panic(
        suite in supported_suite(),
        key in prop::collection::vec(any::<u8>(), 0..140),
        signature in prop::collection::vec(any::<u8>(), 0..140),
    ) {
        let _ = HpkePublicKey::new(key.clone()).encrypt(&suite, b"", b"pt");
        // Random bytes are never a valid signature over this message.
        prop_assert!(!SignaturePublicKey::new(key).verify(&suite, b"message", &signature));
    }

    #[test]
    fn prop_arbitrary_ciphertext_is_decryption_failure(
        suite in supported_suite(),
        kem_output in prop::collection::vec(any::<u8>(), 0..140),
        ciphertext in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let sk = HpkePrivateKey::generate(&suite);
        let ct = HpkeCiphertext { kem_output, ciphertext };

        prop_assert_eq!(sk.decrypt(&suite, b"", &ct), Err(CryptoError::DecryptionFailed));
    }
}
