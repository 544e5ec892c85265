//! MLS cipher suite identifiers (RFC 9420 section 17.1).

use std::{
    fmt,
    hash::{Hash, Hasher},
    io::{Read, Write},
};

use tls_codec::{Deserialize, Error, Serialize, Size};

/// 16-bit cipher suite identifier.
///
/// Every code point round-trips: codes without a registered name are kept as
/// [`CipherSuiteId::Unassigned`]. Equality and hashing go through
/// [`CipherSuiteId::code`], so `Unassigned(1)` equals the named suite 1.
#[derive(Debug, Clone, Copy, Default)]
pub enum CipherSuiteId {
    /// Reserved code 0x0000; never usable
    #[default]
    Unknown,
    /// MLS_128_DHKEMX25519_AES128GCM_SHA256_Ed25519
    X25519Aes128GcmSha256Ed25519,
    /// MLS_128_DHKEMP256_AES128GCM_SHA256_P256
    P256Aes128GcmSha256P256,
    /// MLS_128_DHKEMX25519_CHACHA20POLY1305_SHA256_Ed25519
    X25519ChaCha20Poly1305Sha256Ed25519,
    /// MLS_256_DHKEMX448_AES256GCM_SHA512_Ed448
    X448Aes256GcmSha512Ed448,
    /// MLS_256_DHKEMP521_AES256GCM_SHA512_P521
    P521Aes256GcmSha512P521,
    /// MLS_256_DHKEMX448_CHACHA20POLY1305_SHA512_Ed448
    X448ChaCha20Poly1305Sha512Ed448,
    /// Any other code point
    Unassigned(u16),
}

impl CipherSuiteId {
    /// Raw 16-bit code.
    pub const fn code(self) -> u16 {
        match self {
            Self::Unknown => 0x0000,
            Self::X25519Aes128GcmSha256Ed25519 => 0x0001,
            Self::P256Aes128GcmSha256P256 => 0x0002,
            Self::X25519ChaCha20Poly1305Sha256Ed25519 => 0x0003,
            Self::X448Aes256GcmSha512Ed448 => 0x0004,
            Self::P521Aes256GcmSha512P521 => 0x0005,
            Self::X448ChaCha20Poly1305Sha512Ed448 => 0x0006,
            Self::Unassigned(code) => code,
        }
    }

    /// Registered MLS name, if the code has one.
    pub const fn name(self) -> Option<&'static str> {
        match Self::from_code(self.code()) {
            Self::Unknown => Some("unknown"),
            Self::X25519Aes128GcmSha256Ed25519 => {
                Some("MLS_128_DHKEMX25519_AES128GCM_SHA256_Ed25519")
            },
            Self::P256Aes128GcmSha256P256 => Some("MLS_128_DHKEMP256_AES128GCM_SHA256_P256"),
            Self::X25519ChaCha20Poly1305Sha256Ed25519 => {
                Some("MLS_128_DHKEMX25519_CHACHA20POLY1305_SHA256_Ed25519")
            },
            Self::X448Aes256GcmSha512Ed448 => Some("MLS_256_DHKEMX448_AES256GCM_SHA512_Ed448"),
            Self::P521Aes256GcmSha512P521 => Some("MLS_256_DHKEMP521_AES256GCM_SHA512_P521"),
            Self::X448ChaCha20Poly1305Sha512Ed448 => {
                Some("MLS_256_DHKEMX448_CHACHA20POLY1305_SHA512_Ed448")
            },
            Self::Unassigned(_) => None,
        }
    }

    const fn from_code(code: u16) -> Self {
        match code {
            0x0000 => Self::Unknown,
            0x0001 => Self::X25519Aes128GcmSha256Ed25519,
            0x0002 => Self::P256Aes128GcmSha256P256,
            0x0003 => Self::X25519ChaCha20Poly1305Sha256Ed25519,
            0x0004 => Self::X448Aes256GcmSha512Ed448,
            0x0005 => Self::P521Aes256GcmSha512P521,
            0x0006 => Self::X448ChaCha20Poly1305Sha512Ed448,
            other => Self::Unassigned(other),
        }
    }
}

impl From<u16> for CipherSuiteId {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl From<CipherSuiteId> for u16 {
    fn from(id: CipherSuiteId) -> Self {
        id.code()
    }
}

impl PartialEq for CipherSuiteId {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for CipherSuiteId {}

impl Hash for CipherSuiteId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl fmt::Display for CipherSuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unassigned({:#06x})", self.code()),
        }
    }
}

impl Size for CipherSuiteId {
    fn tls_serialized_len(&self) -> usize {
        2
    }
}

impl Serialize for CipherSuiteId {
    fn tls_serialize<W: Write>(&self, writer: &mut W) -> Result<usize, Error> {
        self.code().tls_serialize(writer)
    }
}

impl Deserialize for CipherSuiteId {
    fn tls_deserialize<R: Read>(bytes: &mut R) -> Result<Self, Error> {
        u16::tls_deserialize(bytes).map(Self::from)
    }
}
