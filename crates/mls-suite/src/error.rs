//! Error types for the cipher suite layer.
//!
//! Every fallible operation returns [`CryptoError`]. Failures reported by the
//! primitive libraries are translated at the call site, either into one of the
//! specific variants or into [`CryptoError::Library`] via
//! [`CryptoError::library`].
//!
//! Signature verification is the one deliberate exception: a signature that
//! does not verify is an expected outcome and is reported as `false`, not as an
//! error.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors produced by cipher suite resolution and key operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Suite id is `unknown` or has no registered implementation
    #[error("unsupported cipher suite {suite:#06x}")]
    UnsupportedSuite {
        /// Raw 16-bit suite code that was requested
        suite: u16,
    },

    /// Bytes cannot represent a valid key for the suite
    #[error("malformed key: {reason}")]
    MalformedKey {
        /// What was wrong with the key bytes
        reason: String,
    },

    /// Seed cannot be mapped to a valid private key
    #[error("invalid seed: {reason}")]
    InvalidSeed {
        /// Why the seed was rejected
        reason: String,
    },

    /// HPKE decryption failed.
    ///
    /// Carries no detail so that a bad encapsulation and a bad AEAD tag are
    /// indistinguishable to the caller.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Requested derivation output does not fit the KDF or its length prefix
    #[error("invalid length: requested {requested}, maximum is {max}")]
    InvalidLength {
        /// Requested length in bytes
        requested: usize,
        /// Largest length the operation accepts
        max: usize,
    },

    /// Failure inside a primitive library
    #[error("{operation} failed: {description}")]
    Library {
        /// Operation that invoked the library
        operation: &'static str,
        /// Every error in the library's source chain, outermost first
        description: String,
    },
}

impl CryptoError {
    /// Translate a primitive-library error into [`CryptoError::Library`].
    ///
    /// The whole `source()` chain is drained into a single description, so no
    /// part of the library's failure state is left behind for a later call to
    /// observe.
    pub fn library<E>(operation: &'static str, err: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }

        tracing::debug!(operation, %description, "primitive library failure");

        Self::Library { operation, description }
    }

    /// Shorthand for [`CryptoError::MalformedKey`].
    pub(crate) fn malformed_key(reason: impl Into<String>) -> Self {
        Self::MalformedKey { reason: reason.into() }
    }

    /// Shorthand for [`CryptoError::InvalidSeed`].
    pub(crate) fn invalid_seed(reason: impl Into<String>) -> Self {
        Self::InvalidSeed { reason: reason.into() }
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Always false: construction failures are properties of the input, and
    /// retrying a failed decryption or signature is a protocol-layer decision.
    pub fn is_transient(&self) -> bool {
        false
    }
}

/// Convert `CryptoError` to `tls_codec::Error` when a codec impl needs to
/// reject a structurally valid but cryptographically unusable value.
impl From<CryptoError> for tls_codec::Error {
    fn from(err: CryptoError) -> Self {
        Self::DecodingError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn library_error_drains_whole_chain() {
        let err = Layer {
            message: "seal",
            source: Some(Box::new(Layer {
                message: "encap",
                source: Some(Box::new(Layer { message: "invalid point", source: None })),
            })),
        };

        let translated = CryptoError::library("hpke seal", &err);

        assert_eq!(
            translated,
            CryptoError::Library {
                operation: "hpke seal",
                description: "seal: encap: invalid point".to_string(),
            }
        );
    }

    #[test]
    fn library_error_without_source() {
        let err = Layer { message: "rng failure", source: None };

        let translated = CryptoError::library("random", &err);

        assert_eq!(translated.to_string(), "random failed: rng failure");
    }

    #[test]
    fn no_error_is_transient() {
        assert!(!CryptoError::UnsupportedSuite { suite: 0 }.is_transient());
        assert!(!CryptoError::malformed_key("short").is_transient());
        assert!(!CryptoError::invalid_seed("empty").is_transient());
        assert!(!CryptoError::DecryptionFailed.is_transient());
        assert!(!CryptoError::InvalidLength { requested: 10, max: 5 }.is_transient());
    }

    #[test]
    fn decryption_failure_has_no_detail() {
        assert_eq!(CryptoError::DecryptionFailed.to_string(), "decryption failed");
    }

    #[test]
    fn unsupported_suite_formats_code() {
        let err = CryptoError::UnsupportedSuite { suite: 0x0004 };
        assert_eq!(err.to_string(), "unsupported cipher suite 0x0004");
    }
}
