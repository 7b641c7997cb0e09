//! Capacity-checked byte buffers for signature and digest material

use crate::error::{Error, Result};
use crate::limits::{MAX_HASH_SIZE, MAX_SIGNATURE_SIZE};

/// Owned bytes that can never exceed `CAP`
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BoundedBuffer<const CAP: usize> {
    bytes: Vec<u8>,
}

/// Raw signature bytes
pub type SignatureBuffer = BoundedBuffer<MAX_SIGNATURE_SIZE>;

/// Message digest bytes
pub type HashBuffer = BoundedBuffer<MAX_HASH_SIZE>;

impl<const CAP: usize> BoundedBuffer<CAP> {
    /// Empty buffer
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Take ownership of `bytes`, failing if they exceed the capacity
    pub fn try_from_vec(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > CAP {
            return Err(Error::CapacityExceeded {
                size: bytes.len(),
                max: CAP,
            });
        }
        Ok(Self { bytes })
    }

    /// Copy `bytes`, failing if they exceed the capacity
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > CAP {
            return Err(Error::CapacityExceeded {
                size: bytes.len(),
                max: CAP,
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl<const CAP: usize> AsRef<[u8]> for BoundedBuffer<CAP> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

// Lengths only; contents may be secret-derived.
impl<const CAP: usize> std::fmt::Debug for BoundedBuffer<CAP> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("len", &self.bytes.len())
            .field("capacity", &CAP)
            .finish()
    }
}
