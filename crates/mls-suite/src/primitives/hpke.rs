//! HPKE engine: one generic implementation over the `hpke` crate's
//! (AEAD, KDF, KEM) type parameters, used through [`HpkeEngine`] trait
//! objects so a suite can pick its triple at runtime.

use std::marker::PhantomData;

use hpke::{
    Deserializable, HpkeError, Kem, OpModeR, OpModeS, Serializable, aead::Aead as AeadTrait,
    kdf::Kdf as KdfTrait, single_shot_open, single_shot_seal,
};
use rand::rngs::OsRng;

use crate::{
    error::CryptoError,
    handle::{KemSecret, Owned},
};

/// Raw private/public key bytes produced by a KEM.
pub type KeyPairBytes = (Vec<u8>, Vec<u8>);

/// KEM + KDF + AEAD operations for one suite.
///
/// All key arguments are raw encodings; library key objects exist only for the
/// duration of a call.
pub trait HpkeEngine: Send + Sync {
    /// Generate a fresh key pair from the OS RNG.
    fn generate(&self) -> KeyPairBytes;

    /// RFC 9180 `DeriveKeyPair`.
    fn derive(&self, ikm: &[u8]) -> KeyPairBytes;

    /// Validate a private key encoding and compute its public key.
    fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Check that `public_key` decodes as a point for this KEM.
    fn validate_public(&self, public_key: &[u8]) -> Result<(), CryptoError>;

    /// Single-shot base-mode seal. Returns `(enc, ciphertext)`.
    fn seal(
        &self,
        public_key: &[u8],
        info: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError>;

    /// Single-shot base-mode open.
    ///
    /// Every failure is reported as [`CryptoError::DecryptionFailed`].
    fn open(
        &self,
        private_key: &[u8],
        enc: &[u8],
        info: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// [`HpkeEngine`] for a fixed `hpke` (AEAD, KDF, KEM) triple.
pub struct Hpke<A, F, K> {
    _suite: PhantomData<fn() -> (A, F, K)>,
}

impl<A, F, K> Hpke<A, F, K> {
    /// Engine for this triple. Stateless; usable in `static` items.
    pub const fn new() -> Self {
        Self { _suite: PhantomData }
    }
}

impl<A, F, K> Default for Hpke<A, F, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, F, K> Hpke<A, F, K>
where
    K: Kem,
{
    fn decode_private(private_key: &[u8]) -> Result<Owned<KemSecret<K>>, HpkeError> {
        K::PrivateKey::from_bytes(private_key).map(|sk| Owned::new(KemSecret(sk)))
    }
}

impl<A, F, K> HpkeEngine for Hpke<A, F, K>
where
    A: AeadTrait,
    F: KdfTrait,
    K: Kem,
{
    fn generate(&self) -> KeyPairBytes {
        let (sk, pk) = K::gen_keypair(&mut OsRng);
        let sk = Owned::new(KemSecret::<K>(sk));
        (sk.0.to_bytes().to_vec(), pk.to_bytes().to_vec())
    }

    fn derive(&self, ikm: &[u8]) -> KeyPairBytes {
        let (sk, pk) = K::derive_keypair(ikm);
        let sk = Owned::new(KemSecret::<K>(sk));
        (sk.0.to_bytes().to_vec(), pk.to_bytes().to_vec())
    }

    fn public_key(&self, private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let sk = Self::decode_private(private_key)
            .map_err(|e| CryptoError::malformed_key(format!("hpke private key: {e}")))?;
        Ok(K::sk_to_pk(&sk.0).to_bytes().to_vec())
    }

    fn validate_public(&self, public_key: &[u8]) -> Result<(), CryptoError> {
        K::PublicKey::from_bytes(public_key)
            .map(|_| ())
            .map_err(|e| CryptoError::malformed_key(format!("hpke public key: {e}")))
    }

    fn seal(
        &self,
        public_key: &[u8],
        info: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        let pk = K::PublicKey::from_bytes(public_key)
            .map_err(|e| CryptoError::malformed_key(format!("hpke public key: {e}")))?;

        let (enc, ciphertext) =
            single_shot_seal::<A, F, K, _>(&OpModeS::Base, &pk, info, plaintext, aad, &mut OsRng)
                .map_err(|e| CryptoError::library("hpke seal", &e))?;

        Ok((enc.to_bytes().to_vec(), ciphertext))
    }

    fn open(
        &self,
        private_key: &[u8],
        enc: &[u8],
        info: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        // Collapse every failure: callers must not learn which step rejected.
        let opened = Self::decode_private(private_key).and_then(|sk| {
            let enc = K::EncappedKey::from_bytes(enc)?;
            single_shot_open::<A, F, K>(&OpModeR::Base, &sk.0, &enc, info, ciphertext, aad)
        });

        opened.map_err(|_| CryptoError::DecryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use hpke::{aead::AesGcm128, kdf::HkdfSha256, kem::X25519HkdfSha256};

    use super::*;

    type X25519Engine = Hpke<AesGcm128, HkdfSha256, X25519HkdfSha256>;

    #[test]
    fn seal_open_roundtrip() {
        let engine = X25519Engine::new();
        let (sk, pk) = engine.generate();

        let (enc, ct) = engine.seal(&pk, b"", b"aad", b"payload").unwrap();
        let pt = engine.open(&sk, &enc, b"", b"aad", &ct).unwrap();

        assert_eq!(pt, b"payload");
    }

    #[test]
    fn derive_is_deterministic() {
        let engine = X25519Engine::new();
        assert_eq!(engine.derive(b"seed material"), engine.derive(b"seed material"));
        assert_ne!(engine.derive(b"seed material"), engine.derive(b"other material"));
    }

    #[test]
    fn public_key_matches_generated_pair() {
        let engine = X25519Engine::new();
        let (sk, pk) = engine.generate();
        assert_eq!(engine.public_key(&sk).unwrap(), pk);
    }

    #[test]
    fn wrong_length_private_key_is_malformed() {
        let engine = X25519Engine::new();
        assert!(matches!(engine.public_key(&[0u8; 31]), Err(CryptoError::MalformedKey { .. })));
    }

    #[test]
    fn garbage_enc_is_decryption_failure() {
        let engine = X25519Engine::new();
        let (sk, _) = engine.generate();
        let result = engine.open(&sk, &[1, 2, 3], b"", b"", b"ciphertext");
        assert_eq!(result, Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn invalid_private_key_is_decryption_failure() {
        let engine = X25519Engine::new();
        let (_, pk) = engine.generate();
        let (enc, ct) = engine.seal(&pk, b"", b"", b"pt").unwrap();
        assert_eq!(engine.open(&[0u8; 5], &enc, b"", b"", &ct), Err(CryptoError::DecryptionFailed));
    }
}
