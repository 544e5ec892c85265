//! Signature schemes bound to cipher suites.
//!
//! Encodings follow the MLS conventions:
//!
//! | Scheme | Private key | Public key | Signature |
//! |---|---|---|---|
//! | Ed25519 | 32-byte seed | 32-byte point | 64 bytes |
//! | ECDSA P-256 / SHA-256 | 32-byte scalar | uncompressed SEC1 (65) | DER |
//! | ECDSA P-521 / SHA-512 | 66-byte scalar | uncompressed SEC1 (133) | DER |
//!
//! Seeds are mapped to private keys by HKDF under [`SIGNATURE_KEY_LABEL`] and
//! the scheme code point. The KEM's `DeriveKeyPair` uses different labels, so
//! one seed never yields the same scalar for an HPKE key and a signature key.

use p256::{
    ecdsa::signature::{Signer, Verifier},
    elliptic_curve::sec1::ToEncodedPoint,
};
use rand::rngs::OsRng;

use super::{digest::Digest, hpke::KeyPairBytes};
use crate::{constants::SIGNATURE_KEY_LABEL, error::CryptoError, handle::Owned};

/// Signature algorithm of a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// Ed25519 (RFC 8032)
    Ed25519,
    /// ECDSA over P-256 with SHA-256
    EcdsaP256Sha256,
    /// ECDSA over P-521 with SHA-512
    EcdsaP521Sha512,
}

impl SignatureScheme {
    /// TLS `SignatureScheme` code point.
    pub const fn code(self) -> u16 {
        match self {
            Self::Ed25519 => 0x0807,
            Self::EcdsaP256Sha256 => 0x0403,
            Self::EcdsaP521Sha512 => 0x0603,
        }
    }

    /// Length of an encoded private key.
    pub const fn private_key_len(self) -> usize {
        match self {
            Self::Ed25519 | Self::EcdsaP256Sha256 => 32,
            Self::EcdsaP521Sha512 => 66,
        }
    }

    /// Generate a fresh key pair from the OS RNG.
    pub fn generate(self) -> KeyPairBytes {
        match self {
            Self::Ed25519 => {
                let sk = Owned::new(ed25519_dalek::SigningKey::generate(&mut OsRng));
                (sk.to_bytes().to_vec(), sk.verifying_key().to_bytes().to_vec())
            },
            Self::EcdsaP256Sha256 => {
                let sk = p256::SecretKey::random(&mut OsRng);
                let public = sk.public_key().to_encoded_point(false).as_bytes().to_vec();
                (sk.to_bytes().to_vec(), public)
            },
            Self::EcdsaP521Sha512 => {
                let sk = p521::SecretKey::random(&mut OsRng);
                let public = sk.public_key().to_encoded_point(false).as_bytes().to_vec();
                (sk.to_bytes().to_vec(), public)
            },
        }
    }

    /// Deterministically map `seed` to a key pair.
    ///
    /// Candidates are `HKDF-Expand(HKDF-Extract(code, seed), label || code ||
    /// counter)`. ECDSA candidates outside `[1, n)` are rejected and the next
    /// counter is tried.
    pub fn derive(self, seed: &[u8]) -> Result<KeyPairBytes, CryptoError> {
        let digest = self.derive_digest();
        let code = self.code().to_be_bytes();
        let prk = Owned::new(digest.extract(&code, seed));

        let mut info = Vec::with_capacity(SIGNATURE_KEY_LABEL.len() + code.len() + 1);
        info.extend_from_slice(SIGNATURE_KEY_LABEL);
        info.extend_from_slice(&code);
        info.push(0);
        let counter_at = info.len() - 1;

        for counter in 0..=u8::MAX {
            info[counter_at] = counter;
            let mut candidate =
                Owned::new(digest.hmac_expand(&prk, &info, self.private_key_len())?);
            if matches!(self, Self::EcdsaP521Sha512) {
                // 521-bit scalar in 66 bytes: only the low bit of the top byte is used.
                candidate[0] &= 0x01;
            }

            if let Ok(public_key) = self.public_key(&candidate) {
                return Ok((candidate.to_vec(), public_key));
            }
            tracing::trace!(scheme = ?self, counter, "derived scalar rejected");
        }

        Err(CryptoError::invalid_seed("no valid scalar within 256 candidates"))
    }

    const fn derive_digest(self) -> Digest {
        match self {
            Self::Ed25519 | Self::EcdsaP256Sha256 => Digest::Sha256,
            Self::EcdsaP521Sha512 => Digest::Sha512,
        }
    }

    /// Validate a private key encoding and compute its public key.
    pub fn public_key(self, private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if private_key.len() != self.private_key_len() {
            return Err(CryptoError::malformed_key(format!(
                "{self:?} private key must be {} bytes, got {}",
                self.private_key_len(),
                private_key.len()
            )));
        }

        match self {
            Self::Ed25519 => {
                let sk = ed25519_signing_key(private_key)?;
                Ok(sk.verifying_key().to_bytes().to_vec())
            },
            Self::EcdsaP256Sha256 => {
                let sk = p256::SecretKey::from_slice(private_key)
                    .map_err(|_| CryptoError::malformed_key("invalid P-256 scalar"))?;
                Ok(sk.public_key().to_encoded_point(false).as_bytes().to_vec())
            },
            Self::EcdsaP521Sha512 => {
                let sk = p521::SecretKey::from_slice(private_key)
                    .map_err(|_| CryptoError::malformed_key("invalid P-521 scalar"))?;
                Ok(sk.public_key().to_encoded_point(false).as_bytes().to_vec())
            },
        }
    }

    /// Sign `message`.
    pub fn sign(self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Ed25519 => {
                let sk = ed25519_signing_key(private_key)?;
                let signature: ed25519_dalek::Signature =
                    sk.try_sign(message).map_err(|e| CryptoError::library("ed25519 sign", &e))?;
                Ok(signature.to_bytes().to_vec())
            },
            Self::EcdsaP256Sha256 => {
                let sk = Owned::new(
                    p256::ecdsa::SigningKey::from_slice(private_key)
                        .map_err(|_| CryptoError::malformed_key("invalid P-256 scalar"))?,
                );
                let signature: p256::ecdsa::Signature =
                    sk.try_sign(message).map_err(|e| CryptoError::library("ecdsa sign", &e))?;
                Ok(signature.to_der().as_bytes().to_vec())
            },
            Self::EcdsaP521Sha512 => {
                let sk = Owned::new(
                    p521::ecdsa::SigningKey::from_slice(private_key)
                        .map_err(|_| CryptoError::malformed_key("invalid P-521 scalar"))?,
                );
                let signature: p521::ecdsa::Signature =
                    sk.try_sign(message).map_err(|e| CryptoError::library("ecdsa sign", &e))?;
                Ok(signature.to_der().as_bytes().to_vec())
            },
        }
    }

    /// Verify `signature` over `message`.
    ///
    /// Malformed keys and malformed signatures verify as `false`.
    pub fn verify(self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match self {
            Self::Ed25519 => {
                let Ok(key_bytes) = <[u8; 32]>::try_from(public_key) else {
                    return false;
                };
                let Ok(key) = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) else {
                    return false;
                };
                let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
                    return false;
                };
                key.verify(message, &signature).is_ok()
            },
            Self::EcdsaP256Sha256 => {
                let Ok(key) = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key) else {
                    return false;
                };
                let Ok(signature) = p256::ecdsa::Signature::from_der(signature) else {
                    return false;
                };
                key.verify(message, &signature).is_ok()
            },
            Self::EcdsaP521Sha512 => {
                let Ok(key) = p521::ecdsa::VerifyingKey::from_sec1_bytes(public_key) else {
                    return false;
                };
                let Ok(signature) = p521::ecdsa::Signature::from_der(signature) else {
                    return false;
                };
                key.verify(message, &signature).is_ok()
            },
        }
    }
}

fn ed25519_signing_key(
    private_key: &[u8],
) -> Result<Owned<ed25519_dalek::SigningKey>, CryptoError> {
    let seed = Owned::new(
        <[u8; 32]>::try_from(private_key)
            .map_err(|_| CryptoError::malformed_key("Ed25519 private key must be 32 bytes"))?,
    );
    Ok(Owned::new(ed25519_dalek::SigningKey::from_bytes(&seed)))
}
