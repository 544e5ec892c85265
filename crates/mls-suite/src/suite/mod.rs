//! Cipher suite facade.
//!
//! [`CipherSuite`] is the handle higher MLS layers hold after negotiation. It
//! can only be built for a supported id, so every operation on it (and on the
//! key types in [`crate::keys`]) works against a valid primitive bundle.
//!
//! ```
//! use mls_suite::{CipherSuite, CipherSuiteId};
//!
//! let suite = CipherSuite::new(CipherSuiteId::X25519Aes128GcmSha256Ed25519)?;
//! let secret = vec![0u8; suite.secret_size()];
//! let key = suite.expand_with_label(&secret, "key", b"", 16)?;
//! assert_eq!(key.len(), 16);
//! # Ok::<(), mls_suite::CryptoError>(())
//! ```

mod id;

use std::{
    fmt,
    hash::{Hash, Hasher},
    io::{Read, Write},
};

use tls_codec::{Deserialize, Serialize, Size};

pub use self::id::CipherSuiteId;
use crate::{
    codec::{LengthPrefix, write_opaque},
    constants::{MAX_LABEL_LEN, MLS_LABEL_PREFIX},
    error::CryptoError,
    primitives::{self, Algorithms, PrimitiveBundle},
};

/// Suites with a registered primitive bundle, in preference order.
///
/// 0x0004 and 0x0006 are absent: there is no X448 KEM in `hpke` to back them.
pub const SUPPORTED_SUITES: [CipherSuiteId; 4] = [
    CipherSuiteId::X25519Aes128GcmSha256Ed25519,
    CipherSuiteId::P256Aes128GcmSha256P256,
    CipherSuiteId::X25519ChaCha20Poly1305Sha256Ed25519,
    CipherSuiteId::P521Aes256GcmSha512P521,
];

/// Every suite this build can instantiate.
pub fn supported_suites() -> &'static [CipherSuiteId] {
    &SUPPORTED_SUITES
}

/// A negotiated cipher suite bound to its primitives.
///
/// Cheap to copy; all copies share one static bundle. Two suites are equal
/// exactly when their ids are equal.
#[derive(Clone, Copy)]
pub struct CipherSuite {
    id: CipherSuiteId,
    primitives: &'static PrimitiveBundle,
}

impl CipherSuite {
    /// Bind `id` to its primitive bundle.
    ///
    /// # Errors
    ///
    /// - `CryptoError::UnsupportedSuite` if `id` is `Unknown` or has no
    ///   registered bundle
    pub fn new(id: CipherSuiteId) -> Result<Self, CryptoError> {
        let primitives = primitives::resolve(id)?;
        Ok(Self { id, primitives })
    }

    /// Suite identifier.
    pub fn id(&self) -> CipherSuiteId {
        self.id
    }

    /// Algorithm tuple of this suite.
    pub fn algorithms(&self) -> Algorithms {
        self.primitives.algorithms()
    }

    pub(crate) fn primitives(&self) -> &'static PrimitiveBundle {
        self.primitives
    }

    /// Length of secrets in the key schedule (`Nh`, the hash output length).
    pub fn secret_size(&self) -> usize {
        self.primitives.digest().output_len()
    }

    /// Hash `data` with the suite hash.
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        self.primitives.digest().hash(data)
    }

    /// HMAC with the suite hash.
    pub fn hmac(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.primitives.digest().hmac(key, &[data])
    }

    /// HKDF-Extract with the suite hash.
    pub fn hkdf_extract(&self, salt: &[u8], ikm: &[u8]) -> Vec<u8> {
        self.primitives.digest().extract(salt, ikm)
    }

    /// `ExpandWithLabel(secret, label, context, length)`.
    ///
    /// Expands `secret` with HKDF-Expand under the TLS-encoded `KdfLabel`
    /// `{ uint16 length; opaque label<V> = "mls10 " + label; opaque context<V> }`.
    /// Deterministic for fixed inputs.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidLength` if `length` exceeds `255 * Nh`, or the
    ///   prefixed label or the context overflow their length prefixes
    pub fn expand_with_label(
        &self,
        secret: &[u8],
        label: &str,
        context: &[u8],
        length: usize,
    ) -> Result<Vec<u8>, CryptoError> {
        let digest = self.primitives.digest();
        let max = digest.max_expand_len().min(usize::from(u16::MAX));
        if length > max {
            return Err(CryptoError::InvalidLength { requested: length, max });
        }

        let info = kdf_label(label, context, length)?;
        digest.hmac_expand(secret, &info, length)
    }

    /// `DeriveSecret(secret, label)`: [`Self::expand_with_label`] to `Nh` bytes.
    pub fn derive_secret(
        &self,
        secret: &[u8],
        label: &str,
        context: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.expand_with_label(secret, label, context, self.secret_size())
    }
}

/// TLS encoding of `KdfLabel`. `length` must already fit in a `u16`.
fn kdf_label(label: &str, context: &[u8], length: usize) -> Result<Vec<u8>, CryptoError> {
    let full_len = MLS_LABEL_PREFIX.len() + label.len();
    if full_len > MAX_LABEL_LEN {
        return Err(CryptoError::InvalidLength { requested: full_len, max: MAX_LABEL_LEN });
    }
    let max_context = LengthPrefix::U32.max_len();
    if context.len() > max_context {
        return Err(CryptoError::InvalidLength { requested: context.len(), max: max_context });
    }
    let length = u16::try_from(length).map_err(|_| CryptoError::InvalidLength {
        requested: length,
        max: usize::from(u16::MAX),
    })?;

    let mut full_label = Vec::with_capacity(full_len);
    full_label.extend_from_slice(MLS_LABEL_PREFIX);
    full_label.extend_from_slice(label.as_bytes());

    let mut info = Vec::with_capacity(
        2 + LengthPrefix::U8.encoded_len(full_len) + LengthPrefix::U32.encoded_len(context.len()),
    );
    info.extend_from_slice(&length.to_be_bytes());
    write_opaque(LengthPrefix::U8, &full_label, &mut info)
        .and_then(|_| write_opaque(LengthPrefix::U32, context, &mut info))
        .map_err(|e| CryptoError::library("kdf label encoding", &e))?;

    Ok(info)
}

impl TryFrom<CipherSuiteId> for CipherSuite {
    type Error = CryptoError;

    fn try_from(id: CipherSuiteId) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<u16> for CipherSuite {
    type Error = CryptoError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::new(CipherSuiteId::from(code))
    }
}

impl PartialEq for CipherSuite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CipherSuite {}

impl Hash for CipherSuite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CipherSuite").field(&self.id).finish()
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl Size for CipherSuite {
    fn tls_serialized_len(&self) -> usize {
        self.id.tls_serialized_len()
    }
}

impl Serialize for CipherSuite {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, tls_codec::Error> {
        self.id.tls_serialize(writer)
    }
}

impl Deserialize for CipherSuite {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, tls_codec::Error> {
        let id = CipherSuiteId::tls_deserialize(bytes)?;
        Ok(Self::new(id)?)
    }
}
