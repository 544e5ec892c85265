//! Scoped ownership of library-allocated key objects.
//!
//! Primitive libraries hand back key objects (signing keys, KEM private keys)
//! and secret scratch buffers that must be scrubbed when the operation that
//! created them is finished. Each such handle type has exactly one
//! [`Release`] routine, and [`Owned`] guarantees it runs exactly once: on
//! normal return, on early `?` return and during unwinding.
//!
//! Handles never outlive the operation that created them. Key values in
//! [`crate::keys`] store plain bytes and rebuild a handle per call.

use std::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Type-specific release routine for a handle.
pub trait Release: Sized {
    /// Destroy the handle, scrubbing any secret state it holds.
    fn release(self);
}

/// Exclusive owner of a single handle.
///
/// Not `Clone`: a handle can be moved to a new owner or destroyed, never
/// duplicated.
pub struct Owned<T: Release> {
    handle: Option<T>,
}

impl<T: Release> Owned<T> {
    /// Take ownership of `handle`.
    pub fn new(handle: T) -> Self {
        Self { handle: Some(handle) }
    }

    /// Release the handle now instead of at end of scope.
    pub fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.release();
        }
    }
}

impl<T: Release> Deref for Owned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Only `release` and `drop` empty the slot, and both consume `self`.
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("handle accessed after release"),
        }
    }
}

impl<T: Release> DerefMut for Owned<T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.handle {
            Some(handle) => handle,
            None => unreachable!("handle accessed after release"),
        }
    }
}

impl<T: Release> Drop for Owned<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.release();
        }
    }
}

impl Release for Vec<u8> {
    fn release(mut self) {
        self.zeroize();
    }
}

impl<const N: usize> Release for [u8; N] {
    fn release(mut self) {
        self.zeroize();
    }
}

// Library key objects scrub themselves in their own destructors; releasing
// them means running that destructor now.

impl Release for ed25519_dalek::SigningKey {
    fn release(self) {
        drop(self);
    }
}

impl Release for p256::ecdsa::SigningKey {
    fn release(self) {
        drop(self);
    }
}

impl Release for p521::ecdsa::SigningKey {
    fn release(self) {
        drop(self);
    }
}

/// A KEM private key decoded by the `hpke` crate.
pub struct KemSecret<K: hpke::Kem>(
    /// Decoded private key
    pub K::PrivateKey,
);

impl<K: hpke::Kem> Release for KemSecret<K> {
    fn release(self) {
        drop(self.0);
    }
}
