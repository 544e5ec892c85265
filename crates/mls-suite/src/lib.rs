//! MLS cipher suites
//!
//! Maps a negotiated MLS cipher suite identifier to the concrete primitives
//! it names and manages the key material those primitives operate on.
//!
//! # Layers
//!
//! ```text
//! CipherSuiteId (u16 on the wire)
//!        │
//!        ▼
//! CipherSuite ──► PrimitiveBundle (static: KEM, KDF, AEAD, hash, signature)
//!        │
//!        ├──► expand_with_label / derive_secret   (key schedule input)
//!        ├──► HpkePublicKey / HpkePrivateKey       (encrypt / decrypt)
//!        └──► SignaturePublicKey / SignaturePrivateKey (sign / verify)
//! ```
//!
//! Supported suites: 0x0001, 0x0002, 0x0003 and 0x0005. The X448/Ed448 suites
//! (0x0004, 0x0006) are recognised identifiers but have no implementation:
//! the `hpke` backend provides no X448 KEM and no released Ed448 signer works
//! with the `rand_core` 0.6 / `signature` 2 stack used here.
//!
//! # Key Handling
//!
//! Key values store encoded bytes only. Library key objects are created per
//! operation inside an [`handle::Owned`] guard and released when the operation
//! ends, on every exit path. Private key bytes are zeroized on drop and never
//! appear in `Debug` output.
//!
//! # Errors
//!
//! Every fallible operation returns [`CryptoError`]. Decryption failures carry
//! no detail. Signature verification returns `bool`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codec;
pub mod constants;
pub mod error;
pub mod handle;
pub mod keys;
pub mod primitives;
pub mod suite;
pub mod util;

pub use error::CryptoError;
pub use keys::{
    HpkeCiphertext, HpkePrivateKey, HpkePublicKey, SignaturePrivateKey, SignaturePublicKey,
};
pub use primitives::{AeadAlgorithm, Algorithms, KdfAlgorithm, KemAlgorithm};
pub use suite::{CipherSuite, CipherSuiteId, SUPPORTED_SUITES, supported_suites};
pub use util::{constant_time_eq, random_bytes};
