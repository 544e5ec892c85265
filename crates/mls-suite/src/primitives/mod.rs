//! Primitive bundles: the concrete algorithms behind each cipher suite.
//!
//! A [`PrimitiveBundle`] is the fixed (KEM, KDF, AEAD, hash, signature) tuple
//! registered for one suite id. Bundles are `static` items, so resolving an id
//! never allocates and every [`crate::CipherSuite`] with the same id shares the
//! same bundle.
//!
//! # Components
//!
//! - [`hpke`]: HPKE engine over the `hpke` crate's type-level suites
//! - [`digest`]: hash, HMAC and HKDF for the suite hash
//! - [`signature`]: Ed25519 and ECDSA signing and verification

pub mod digest;
pub mod hpke;
pub mod signature;

use std::fmt;

use ::hpke::{
    aead::{AesGcm128, AesGcm256, ChaCha20Poly1305},
    kdf::{HkdfSha256, HkdfSha512},
    kem::{DhP256HkdfSha256, DhP521HkdfSha512, X25519HkdfSha256},
};

pub use self::{
    digest::Digest,
    hpke::{Hpke, HpkeEngine, KeyPairBytes},
    signature::SignatureScheme,
};
use crate::{error::CryptoError, suite::CipherSuiteId};

/// HPKE key encapsulation mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KemAlgorithm {
    /// DHKEM(X25519, HKDF-SHA256)
    DhKemX25519Sha256,
    /// DHKEM(P-256, HKDF-SHA256)
    DhKemP256Sha256,
    /// DHKEM(P-521, HKDF-SHA512)
    DhKemP521Sha512,
}

impl KemAlgorithm {
    /// IANA HPKE KEM identifier.
    pub const fn code(self) -> u16 {
        match self {
            Self::DhKemP256Sha256 => 0x0010,
            Self::DhKemP521Sha512 => 0x0012,
            Self::DhKemX25519Sha256 => 0x0020,
        }
    }
}

/// HPKE key derivation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfAlgorithm {
    /// HKDF-SHA256
    HkdfSha256,
    /// HKDF-SHA512
    HkdfSha512,
}

impl KdfAlgorithm {
    /// IANA HPKE KDF identifier.
    pub const fn code(self) -> u16 {
        match self {
            Self::HkdfSha256 => 0x0001,
            Self::HkdfSha512 => 0x0003,
        }
    }
}

/// HPKE AEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadAlgorithm {
    /// AES-128-GCM
    Aes128Gcm,
    /// AES-256-GCM
    Aes256Gcm,
    /// ChaCha20-Poly1305
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    /// IANA HPKE AEAD identifier.
    pub const fn code(self) -> u16 {
        match self {
            Self::Aes128Gcm => 0x0001,
            Self::Aes256Gcm => 0x0002,
            Self::ChaCha20Poly1305 => 0x0003,
        }
    }

    /// Key length in bytes (`Nk`).
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes256Gcm | Self::ChaCha20Poly1305 => 32,
        }
    }

    /// Nonce length in bytes (`Nn`).
    pub const fn nonce_len(self) -> usize {
        12
    }
}

/// The algorithm tuple registered for a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Algorithms {
    /// Key encapsulation
    pub kem: KemAlgorithm,
    /// HPKE key derivation
    pub kdf: KdfAlgorithm,
    /// Authenticated encryption
    pub aead: AeadAlgorithm,
    /// Hash used by the suite KDF and `expand_with_label`
    pub hash: Digest,
    /// Signature scheme
    pub signature: SignatureScheme,
}

/// Resolved primitives for one cipher suite.
pub struct PrimitiveBundle {
    algorithms: Algorithms,
    hpke: &'static dyn HpkeEngine,
}

impl PrimitiveBundle {
    /// Registered algorithm tuple.
    pub fn algorithms(&self) -> Algorithms {
        self.algorithms
    }

    /// HPKE engine.
    pub fn hpke(&self) -> &'static dyn HpkeEngine {
        self.hpke
    }

    /// Digest engine.
    pub fn digest(&self) -> Digest {
        self.algorithms.hash
    }

    /// Signature engine.
    pub fn signature(&self) -> SignatureScheme {
        self.algorithms.signature
    }
}

impl fmt::Debug for PrimitiveBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveBundle").field("algorithms", &self.algorithms).finish()
    }
}

static HPKE_X25519_AES128GCM_SHA256: Hpke<AesGcm128, HkdfSha256, X25519HkdfSha256> = Hpke::new();
static HPKE_P256_AES128GCM_SHA256: Hpke<AesGcm128, HkdfSha256, DhP256HkdfSha256> = Hpke::new();
static HPKE_X25519_CHACHA20POLY1305_SHA256: Hpke<ChaCha20Poly1305, HkdfSha256, X25519HkdfSha256> =
    Hpke::new();
static HPKE_P521_AES256GCM_SHA512: Hpke<AesGcm256, HkdfSha512, DhP521HkdfSha512> = Hpke::new();

static X25519_AES128GCM_SHA256_ED25519: PrimitiveBundle = PrimitiveBundle {
    algorithms: Algorithms {
        kem: KemAlgorithm::DhKemX25519Sha256,
        kdf: KdfAlgorithm::HkdfSha256,
        aead: AeadAlgorithm::Aes128Gcm,
        hash: Digest::Sha256,
        signature: SignatureScheme::Ed25519,
    },
    hpke: &HPKE_X25519_AES128GCM_SHA256,
};

static P256_AES128GCM_SHA256_P256: PrimitiveBundle = PrimitiveBundle {
    algorithms: Algorithms {
        kem: KemAlgorithm::DhKemP256Sha256,
        kdf: KdfAlgorithm::HkdfSha256,
        aead: AeadAlgorithm::Aes128Gcm,
        hash: Digest::Sha256,
        signature: SignatureScheme::EcdsaP256Sha256,
    },
    hpke: &HPKE_P256_AES128GCM_SHA256,
};

static X25519_CHACHA20POLY1305_SHA256_ED25519: PrimitiveBundle = PrimitiveBundle {
    algorithms: Algorithms {
        kem: KemAlgorithm::DhKemX25519Sha256,
        kdf: KdfAlgorithm::HkdfSha256,
        aead: AeadAlgorithm::ChaCha20Poly1305,
        hash: Digest::Sha256,
        signature: SignatureScheme::Ed25519,
    },
    hpke: &HPKE_X25519_CHACHA20POLY1305_SHA256,
};

static P521_AES256GCM_SHA512_P521: PrimitiveBundle = PrimitiveBundle {
    algorithms: Algorithms {
        kem: KemAlgorithm::DhKemP521Sha512,
        kdf: KdfAlgorithm::HkdfSha512,
        aead: AeadAlgorithm::Aes256Gcm,
        hash: Digest::Sha512,
        signature: SignatureScheme::EcdsaP521Sha512,
    },
    hpke: &HPKE_P521_AES256GCM_SHA512,
};

/// Look up the primitive bundle registered for `id`.
///
/// Pure: the same id always yields the same `'static` bundle.
pub fn resolve(id: CipherSuiteId) -> Result<&'static PrimitiveBundle, CryptoError> {
    match id {
        CipherSuiteId::X25519Aes128GcmSha256Ed25519 => Ok(&X25519_AES128GCM_SHA256_ED25519),
        CipherSuiteId::P256Aes128GcmSha256P256 => Ok(&P256_AES128GCM_SHA256_P256),
        CipherSuiteId::X25519ChaCha20Poly1305Sha256Ed25519 => {
            Ok(&X25519_CHACHA20POLY1305_SHA256_ED25519)
        },
        CipherSuiteId::P521Aes256GcmSha512P521 => Ok(&P521_AES256GCM_SHA512_P521),
        CipherSuiteId::Unknown
        | CipherSuiteId::X448Aes256GcmSha512Ed448
        | CipherSuiteId::X448ChaCha20Poly1305Sha512Ed448
        | CipherSuiteId::Unassigned(_) => {
            tracing::debug!(suite = %id, "no primitive bundle registered");
            Err(CryptoError::UnsupportedSuite { suite: id.code() })
        },
    }
}
