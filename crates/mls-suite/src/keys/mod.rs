//! Key material bound to a cipher suite.
//!
//! Keys are plain encoded bytes. Operations take the [`crate::CipherSuite`]
//! they were created under and rebuild library key objects per call.
//!
//! ```
//! use mls_suite::{CipherSuite, CipherSuiteId, HpkePrivateKey, SignaturePrivateKey};
//!
//! let suite = CipherSuite::new(CipherSuiteId::X25519Aes128GcmSha256Ed25519)?;
//!
//! let hpke = HpkePrivateKey::generate(&suite);
//! let ct = hpke.public_key().encrypt(&suite, b"aad", b"welcome")?;
//! assert_eq!(hpke.decrypt(&suite, b"aad", &ct)?, b"welcome");
//!
//! let identity = SignaturePrivateKey::derive(&suite, b"leaf seed")?;
//! let signature = identity.sign(&suite, b"commit")?;
//! assert!(identity.public_key().verify(&suite, b"commit", &signature));
//! # Ok::<(), mls_suite::CryptoError>(())
//! ```

pub mod hpke;
pub mod signature;

pub use self::{
    hpke::{HpkeCiphertext, HpkePrivateKey, HpkePublicKey},
    signature::{SignaturePrivateKey, SignaturePublicKey},
};
