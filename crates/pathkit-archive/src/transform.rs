//! Reversible byte transforms applied to serialized archives

use std::fmt;
use std::sync::Arc;

/// An encrypt/decrypt pair wrapped around archive bytes.
///
/// `decrypt(encrypt(b)) == b` must hold for every `b`. Decryption is given
/// arbitrary bytes while the codec probes for a format, so it must not
/// panic on input it did not produce.
pub trait ByteTransform: Send + Sync + fmt::Debug {
    fn encrypt(&self, bytes: Vec<u8>) -> Vec<u8>;

    fn decrypt(&self, bytes: Vec<u8>) -> Vec<u8>;

    /// True when both directions return their input unchanged.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Passes bytes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ByteTransform for Identity {
    fn encrypt(&self, bytes: Vec<u8>) -> Vec<u8> {
        bytes
    }

    fn decrypt(&self, bytes: Vec<u8>) -> Vec<u8> {
        bytes
    }

    fn is_identity(&self) -> bool {
        true
    }
}

type ByteFn = dyn Fn(Vec<u8>) -> Vec<u8> + Send + Sync;

/// A transform built from a pair of closures.
#[derive(Clone)]
pub struct FnTransform {
    encrypt: Arc<ByteFn>,
    decrypt: Arc<ByteFn>,
}

impl FnTransform {
    pub fn new<E, D>(encrypt: E, decrypt: D) -> Self
    where
        E: Fn(Vec<u8>) -> Vec<u8> + Send + Sync + 'static,
        D: Fn(Vec<u8>) -> Vec<u8> + Send + Sync + 'static,
    {
        Self {
            encrypt: Arc::new(encrypt),
            decrypt: Arc::new(decrypt),
        }
    }
}

impl fmt::Debug for FnTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").finish_non_exhaustive()
    }
}

impl ByteTransform for FnTransform {
    fn encrypt(&self, bytes: Vec<u8>) -> Vec<u8> {
        (self.encrypt)(bytes)
    }

    fn decrypt(&self, bytes: Vec<u8>) -> Vec<u8> {
        (self.decrypt)(bytes)
    }
}
