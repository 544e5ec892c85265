//! Hash, HMAC and HKDF for the suite's KDF hash.

use hkdf::Hkdf;
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Digest as _, Sha256, Sha512};

use crate::{
    constants::MAX_EXPAND_BLOCKS,
    error::CryptoError,
    handle::Owned,
};

/// Hash function bound to a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digest {
    /// SHA-256
    Sha256,
    /// SHA-512
    Sha512,
}

impl Digest {
    /// Output length in bytes (`Nh`).
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Largest output `hmac_expand` can produce.
    pub const fn max_expand_len(self) -> usize {
        MAX_EXPAND_BLOCKS * self.output_len()
    }

    /// Hash `data`.
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// HMAC over the concatenation of `parts`.
    pub fn hmac(self, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Sha256 => mac::<Hmac<Sha256>>(key, parts),
            Self::Sha512 => mac::<Hmac<Sha512>>(key, parts),
        }
    }

    /// HKDF-Expand (RFC 5869 section 2.3) with `prk` as the HMAC key.
    ///
    /// Unlike `Hkdf::from_prk`, a `prk` shorter than `Nh` is accepted: the
    /// protocol expands secrets of arbitrary length.
    pub fn hmac_expand(self, prk: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>, CryptoError> {
        if len > self.max_expand_len() {
            return Err(CryptoError::InvalidLength { requested: len, max: self.max_expand_len() });
        }

        let mut okm = Vec::with_capacity(len);
        let mut block = Owned::new(Vec::new());
        let mut counter = 1u8;

        while okm.len() < len {
            // Reassigning releases (and zeroizes) the previous block.
            block = Owned::new(self.hmac(prk, &[block.as_slice(), info, std::slice::from_ref(&counter)])?);

            let take = (len - okm.len()).min(block.len());
            okm.extend_from_slice(&block[..take]);
            counter = counter.wrapping_add(1);
        }

        debug_assert_eq!(okm.len(), len);
        Ok(okm)
    }

    /// HKDF-Extract (RFC 5869 section 2.2).
    pub fn extract(self, salt: &[u8], ikm: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Hkdf::<Sha256>::extract(Some(salt), ikm).0.to_vec(),
            Self::Sha512 => Hkdf::<Sha512>::extract(Some(salt), ikm).0.to_vec(),
        }
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, CryptoError> {
    let mut mac = <M as KeyInit>::new_from_slice(key)
        .map_err(|e| CryptoError::library("hmac key setup", &e))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}
