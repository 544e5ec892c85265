//! Randomness and comparison helpers shared by the key types.

use rand::{RngCore, rngs::OsRng};
use subtle::ConstantTimeEq;

/// `len` fresh bytes from the OS RNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compare two byte strings in time independent of their contents.
///
/// Lengths are not secret: inputs of different length compare unequal
/// immediately.
pub fn constant_time_eq(lhs: &[u8], rhs: &[u8]) -> bool {
    lhs.ct_eq(rhs).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_has_requested_length() {
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(48).len(), 48);
    }

    #[test]
    fn random_bytes_are_not_repeated() {
        assert_ne!(random_bytes(32), random_bytes(32));
    }

    #[test]
    fn constant_time_eq_semantics() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret!"));
        assert!(constant_time_eq(b"", b""));
    }
}
