//! HPKE key pairs and ciphertexts.
//!
//! Encryption is single-shot HPKE (RFC 9180) in base mode with an empty
//! `info`. Every call draws a fresh ephemeral key, so encrypting the same
//! plaintext twice yields different ciphertexts.

use std::{
    fmt,
    io::{Read, Write},
};

use tls_codec::{Deserialize, Error, Serialize, Size};
use zeroize::Zeroize;

use crate::{
    codec::{LengthPrefix, read_opaque, write_opaque},
    constants::HPKE_INFO,
    error::CryptoError,
    suite::CipherSuite,
    util::constant_time_eq,
};

/// Output of [`HpkePublicKey::encrypt`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HpkeCiphertext {
    /// Encapsulated ephemeral key (`enc`)
    pub kem_output: Vec<u8>,
    /// AEAD ciphertext including tag
    pub ciphertext: Vec<u8>,
}

/// Encoded HPKE public key.
///
/// Not validated on construction; [`HpkePublicKey::encrypt`] rejects bytes
/// that are not a point of the suite's KEM.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HpkePublicKey {
    /// KEM public key encoding
    pub data: Vec<u8>,
}

impl HpkePublicKey {
    /// Wrap an encoded public key.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Check that the bytes are a valid public key for `suite` without
    /// encrypting.
    pub fn validate(&self, suite: &CipherSuite) -> Result<(), CryptoError> {
        suite.primitives().hpke().validate_public(&self.data)
    }

    /// Encrypt `plaintext` to this key, binding `aad`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::MalformedKey` if the key is not valid for `suite`
    /// - `CryptoError::Library` if sealing fails
    pub fn encrypt(
        &self,
        suite: &CipherSuite,
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<HpkeCiphertext, CryptoError> {
        let (kem_output, ciphertext) =
            suite.primitives().hpke().seal(&self.data, HPKE_INFO, aad, plaintext)?;

        tracing::trace!(
            suite = %suite.id(),
            aad_len = aad.len(),
            ciphertext_len = ciphertext.len(),
            "hpke sealed"
        );

        Ok(HpkeCiphertext { kem_output, ciphertext })
    }
}

/// HPKE private key with its public key.
///
/// Private bytes are zeroized on drop, compared in constant time and never
/// printed.
#[derive(Clone)]
pub struct HpkePrivateKey {
    data: Vec<u8>,
    public_key: HpkePublicKey,
}

impl HpkePrivateKey {
    /// Generate a fresh key pair.
    pub fn generate(suite: &CipherSuite) -> Self {
        let (data, public) = suite.primitives().hpke().generate();
        tracing::trace!(suite = %suite.id(), "generated hpke key pair");
        Self { data, public_key: HpkePublicKey::new(public) }
    }

    /// Deterministically derive a key pair from `seed` (RFC 9180
    /// `DeriveKeyPair`).
    ///
    /// # Errors
    ///
    /// - `CryptoError::InvalidSeed` if `seed` is empty
    pub fn derive(suite: &CipherSuite, seed: &[u8]) -> Result<Self, CryptoError> {
        if seed.is_empty() {
            return Err(CryptoError::invalid_seed("seed must not be empty"));
        }

        let (data, public) = suite.primitives().hpke().derive(seed);
        tracing::trace!(suite = %suite.id(), "derived hpke key pair");
        Ok(Self { data, public_key: HpkePublicKey::new(public) })
    }

    /// Parse an encoded private key and recompute its public key.
    ///
    /// # Errors
    ///
    /// - `CryptoError::MalformedKey` if `data` is not a valid private key for
    ///   `suite`
    pub fn parse(suite: &CipherSuite, data: &[u8]) -> Result<Self, CryptoError> {
        let public = suite.primitives().hpke().public_key(data)?;
        Ok(Self { data: data.to_vec(), public_key: HpkePublicKey::new(public) })
    }

    /// Decrypt `ciphertext`, checking `aad`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::DecryptionFailed` for any failure: wrong key, wrong
    ///   `aad`, tampered or truncated input
    pub fn decrypt(
        &self,
        suite: &CipherSuite,
        aad: &[u8],
        ciphertext: &HpkeCiphertext,
    ) -> Result<Vec<u8>, CryptoError> {
        let result = suite.primitives().hpke().open(
            &self.data,
            &ciphertext.kem_output,
            HPKE_INFO,
            aad,
            &ciphertext.ciphertext,
        );

        if result.is_err() {
            tracing::debug!(suite = %suite.id(), "hpke open failed");
        }
        result
    }

    /// Encoded private key.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Matching public key.
    pub fn public_key(&self) -> &HpkePublicKey {
        &self.public_key
    }
}

impl Drop for HpkePrivateKey {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl PartialEq for HpkePrivateKey {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.data, &other.data) && self.public_key == other.public_key
    }
}

impl Eq for HpkePrivateKey {}

impl fmt::Debug for HpkePrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HpkePrivateKey")
            .field("data", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

// Wire encodings

impl Size for HpkeCiphertext {
    fn tls_serialized_len(&self) -> usize {
        LengthPrefix::U16.encoded_len(self.kem_output.len())
            + LengthPrefix::U32.encoded_len(self.ciphertext.len())
    }
}

impl Serialize for HpkeCiphertext {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        let written = write_opaque(LengthPrefix::U16, &self.kem_output, writer)?;
        Ok(written + write_opaque(LengthPrefix::U32, &self.ciphertext, writer)?)
    }
}

impl Deserialize for HpkeCiphertext {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        let kem_output = read_opaque(LengthPrefix::U16, bytes)?;
        let ciphertext = read_opaque(LengthPrefix::U32, bytes)?;
        Ok(Self { kem_output, ciphertext })
    }
}

impl Size for HpkePublicKey {
    fn tls_serialized_len(&self) -> usize {
        LengthPrefix::U16.encoded_len(self.data.len())
    }
}

impl Serialize for HpkePublicKey {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        write_opaque(LengthPrefix::U16, &self.data, writer)
    }
}

impl Deserialize for HpkePublicKey {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        read_opaque(LengthPrefix::U16, bytes).map(Self::new)
    }
}

impl Size for HpkePrivateKey {
    fn tls_serialized_len(&self) -> usize {
        LengthPrefix::U16.encoded_len(self.data.len()) + self.public_key.tls_serialized_len()
    }
}

impl Serialize for HpkePrivateKey {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        let written = write_opaque(LengthPrefix::U16, &self.data, writer)?;
        Ok(written + self.public_key.tls_serialize(writer)?)
    }
}

/// Structural decode only: the encoding carries no suite, so the pair is not
/// checked for consistency. Use [`HpkePrivateKey::parse`] on `data()` to
/// validate against a suite.
impl Deserialize for HpkePrivateKey {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        let data = read_opaque(LengthPrefix::U16, bytes)?;
        let public_key = HpkePublicKey::tls_deserialize(bytes)?;
        Ok(Self { data, public_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::{CipherSuiteId, SUPPORTED_SUITES};

    fn suite(id: CipherSuiteId) -> CipherSuite {
        CipherSuite::new(id).unwrap()
    }

    #[test]
    fn encrypt_decrypt_every_suite() {
        for id in SUPPORTED_SUITES {
            let s = suite(id);
            let sk = HpkePrivateKey::generate(&s);

            let ct = sk.public_key().encrypt(&s, b"aad", b"plaintext").unwrap();

            assert_eq!(sk.decrypt(&s, b"aad", &ct).unwrap(), b"plaintext", "{id}");
        }
    }

    #[test]
    fn wrong_aad_fails() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        let sk = HpkePrivateKey::generate(&s);
        let ct = sk.public_key().encrypt(&s, b"aad", b"plaintext").unwrap();

        assert_eq!(sk.decrypt(&s, b"other", &ct), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let s = suite(CipherSuiteId::P256Aes128GcmSha256P256);
        let sk = HpkePrivateKey::generate(&s);
        let mut ct = sk.public_key().encrypt(&s, b"", b"plaintext").unwrap();
        ct.ciphertext[0] ^= 0x01;

        assert_eq!(sk.decrypt(&s, b"", &ct), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn encrypt_to_malformed_key_fails() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        let pk = HpkePublicKey::new(vec![0x01, 0x02, 0x03]);

        assert!(matches!(pk.encrypt(&s, b"", b"pt"), Err(CryptoError::MalformedKey { .. })));
        assert!(matches!(pk.validate(&s), Err(CryptoError::MalformedKey { .. })));
    }

    #[test]
    fn generated_public_key_validates() {
        for id in SUPPORTED_SUITES {
            let s = suite(id);
            assert!(HpkePrivateKey::generate(&s).public_key().validate(&s).is_ok(), "{id}");
        }
    }

    #[test]
    fn empty_seed_is_invalid() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        assert!(matches!(HpkePrivateKey::derive(&s, &[]), Err(CryptoError::InvalidSeed { .. })));
    }

    #[test]
    fn derive_is_deterministic() {
        for id in SUPPORTED_SUITES {
            let s = suite(id);
            let a = HpkePrivateKey::derive(&s, b"seed").unwrap();
            let b = HpkePrivateKey::derive(&s, b"seed").unwrap();
            assert_eq!(a, b, "{id}");
        }
    }

    #[test]
    fn parse_recovers_public_key() {
        for id in SUPPORTED_SUITES {
            let s = suite(id);
            let sk = HpkePrivateKey::generate(&s);
            let parsed = HpkePrivateKey::parse(&s, sk.data()).unwrap();
            assert_eq!(parsed, sk, "{id}");
        }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        assert!(matches!(
            HpkePrivateKey::parse(&s, &[0x11; 31]),
            Err(CryptoError::MalformedKey { .. })
        ));
    }

    #[test]
    fn debug_redacts_private_bytes() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        let sk = HpkePrivateKey::derive(&s, b"seed").unwrap();

        let rendered = format!("{sk:?}");

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&format!("{:?}", sk.data())));
    }

    #[test]
    fn ciphertext_wire_layout() {
        let ct = HpkeCiphertext { kem_output: vec![0xAA], ciphertext: vec![0xBB, 0xCC] };

        let bytes = ct.tls_serialize_detached().unwrap();

        assert_eq!(bytes, vec![0x00, 0x01, 0xAA, 0x00, 0x00, 0x00, 0x02, 0xBB, 0xCC]);
        assert_eq!(bytes.len(), ct.tls_serialized_len());
        assert_eq!(HpkeCiphertext::tls_deserialize(&mut bytes.as_slice()).unwrap(), ct);
    }

    #[test]
    fn private_key_wire_carries_public_key() {
        let s = suite(CipherSuiteId::X25519Aes128GcmSha256Ed25519);
        let sk = HpkePrivateKey::generate(&s);

        let bytes = sk.tls_serialize_detached().unwrap();
        let decoded = HpkePrivateKey::tls_deserialize(&mut bytes.as_slice()).unwrap();

        assert_eq!(bytes.len(), 2 + 32 + 2 + 32);
        assert_eq!(decoded, sk);
    }
}
