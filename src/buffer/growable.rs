//! GrowableBuffer - append-only output accumulator
//!
//! Capacity only ever grows, and always to a power of two at least double the
//! previous capacity, so appends are amortized O(1).

use super::{next_pow2, try_alloc};
use crate::{CrushError, Result};

/// Append-only byte buffer with duplicative growth
#[derive(Debug)]
pub struct GrowableBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl GrowableBuffer {
    /// Create a buffer able to hold `capacity_hint` bytes without growing
    pub fn with_capacity(capacity_hint: usize) -> Result<Self> {
        let data = try_alloc(capacity_hint)?;
        Ok(Self {
            data,
            capacity: capacity_hint,
        })
    }

    /// Number of valid bytes
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Bytes allocated under the growth policy
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The valid bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append `bytes`, doubling capacity (to the next power of two) when they do not fit
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(CrushError::OutOfMemory { requested: usize::MAX })?;

        if needed > self.capacity {
            let doubled = self.capacity.saturating_mul(2);
            let new_capacity = next_pow2(doubled.max(needed))?;
            self.data
                .try_reserve_exact(new_capacity - self.data.len())
                .map_err(|_| CrushError::OutOfMemory {
                    requested: new_capacity,
                })?;
            self.capacity = new_capacity;
        }

        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Copy the contents into an exact-size vector and release this buffer
    ///
    /// The returned vector has one extra zero byte allocated directly after its
    /// last element. It is not part of the vector's length; it only makes
    /// `as_ptr()` usable as a NUL-terminated string.
    pub fn into_output(self) -> Result<Vec<u8>> {
        let len = self.len();
        let mut out = try_alloc(len + 1)?;
        out.extend_from_slice(self.as_slice());
        out.push(0);
        out.truncate(len);
        Ok(out)
    }
}
