//! Signature key pairs.

use std::{
    fmt,
    io::{Read, Write},
};

use tls_codec::{Deserialize, Error, Serialize, Size};
use zeroize::Zeroize;

use crate::{
    codec::{LengthPrefix, read_opaque, write_opaque},
    error::CryptoError,
    suite::CipherSuite,
    util::constant_time_eq,
};

/// Encoded signature public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SignaturePublicKey {
    /// Public key encoding of the suite's signature scheme
    pub data: Vec<u8>,
}

impl SignaturePublicKey {
    /// Wrap an encoded public key.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Check `signature` over `message`.
    ///
    /// Returns `false` for a wrong signature and also for a malformed key or
    /// signature encoding; verification never errors.
    pub fn verify(&self, suite: &CipherSuite, message: &[u8], signature: &[u8]) -> bool {
        let valid = suite.primitives().signature().verify(&self.data, message, signature);
        if !valid {
            tracing::trace!(suite = %suite.id(), "signature rejected");
        }
        valid
    }
}

/// Signature private key with its public key.
#[derive(Clone)]
pub struct SignaturePrivateKey {
    data: Vec<u8>,
    public_key: SignaturePublicKey,
}

impl SignaturePrivateKey {
    /// Generate a fresh key pair.
    pub fn generate(suite: &CipherSuite) -> Self {
        let (data, public) = suite.primitives().signature().generate();
        tracing::trace!(suite = %suite.id(), "generated signature key pair");
        Self { data, public_key: SignaturePublicKey::new(public) }
    }

    /// Deterministically derive a key pair from `seed`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidSeed` if `seed` is empty or maps to no valid key
    pub fn derive(suite: &CipherSuite, seed: &[u8]) -> Result<Self, CryptoError> {
        if seed.is_empty() {
            return Err(CryptoError::invalid_seed("seed must not be empty"));
        }

        let (data, public) = suite.primitives().signature().derive(seed)?;
        tracing::trace!(suite = %suite.id(), "derived signature key pair");
        Ok(Self { data, public_key: SignaturePublicKey::new(public) })
    }

    /// Parse an encoded private key and recompute its public key.
    ///
    /// # Errors
    ///
    /// - `CryptoError::MalformedKey` if `data` is not a valid private key for
    ///   `suite`
    pub fn parse(suite: &CipherSuite, data: &[u8]) -> Result<Self, CryptoError> {
        let public = suite.primitives().signature().public_key(data)?;
        Ok(Self { data: data.to_vec(), public_key: SignaturePublicKey::new(public) })
    }

    /// Sign `message`.
    pub fn sign(&self, suite: &CipherSuite, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        suite.primitives().signature().sign(&self.data, message)
    }

    /// Encoded private key.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Matching public key.
    pub fn public_key(&self) -> &SignaturePublicKey {
        &self.public_key
    }
}

impl Drop for SignaturePrivateKey {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl PartialEq for SignaturePrivateKey {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.data, &other.data) && self.public_key == other.public_key
    }
}

impl Eq for SignaturePrivateKey {}

impl fmt::Debug for SignaturePrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignaturePrivateKey")
            .field("data", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl Size for SignaturePublicKey {
    fn tls_serialized_len(&self) -> usize {
        LengthPrefix::U16.encoded_len(self.data.len())
    }
}

impl Serialize for SignaturePublicKey {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        write_opaque(LengthPrefix::U16, &self.data, writer)
    }
}

impl Deserialize for SignaturePublicKey {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        read_opaque(LengthPrefix::U16, bytes).map(Self::new)
    }
}

impl Size for SignaturePrivateKey {
    fn tls_serialized_len(&self) -> usize {
        LengthPrefix::U16.encoded_len(self.data.len()) + self.public_key.tls_serialized_len()
    }
}

impl Serialize for SignaturePrivateKey {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        let written = write_opaque(LengthPrefix::U16, &self.data, writer)?;
        Ok(written + self.public_key.tls_serialize(writer)?)
    }
}

/// Structural decode only, like the HPKE private key.
impl Deserialize for SignaturePrivateKey {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        let data = read_opaque(LengthPrefix::U16, bytes)?;
        let public_key = SignaturePublicKey::tls_deserialize(bytes)?;
        Ok(Self { data, public_key })
    }
}
