//! Protocol constants for labeled derivation and HPKE.

/// Prefix prepended to every label passed to `expand_with_label`.
///
/// Binds derived secrets to this protocol version so that the same secret
/// expanded under another protocol (or version) yields unrelated output.
pub const MLS_LABEL_PREFIX: &[u8] = b"mls10 ";

/// Label for deriving signature private keys from a seed.
///
/// Distinct from the RFC 9180 `dkp_prk`/`sk` labels, so a seed shared with an
/// HPKE key derivation yields an unrelated scalar.
pub const SIGNATURE_KEY_LABEL: &[u8] = b"mls10 signature key";

/// HPKE `info` string used for single-shot encryption to a public key.
pub const HPKE_INFO: &[u8] = b"";

/// Maximum length of the prefixed label (one-byte length prefix).
pub const MAX_LABEL_LEN: usize = u8::MAX as usize;

/// Maximum number of HKDF-Expand blocks (RFC 5869).
pub const MAX_EXPAND_BLOCKS: usize = 255;
