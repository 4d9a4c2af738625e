//! Output accumulation and chunk staging buffers
//!
//! [`GrowableBuffer`] collects engine output in memory with power-of-two
//! growth. [`ScratchBuffer`] is a fixed chunk-sized staging area that is wiped
//! before its storage is returned to the allocator.

mod growable;
mod scratch;

pub use growable::GrowableBuffer;
pub use scratch::{Scratch, ScratchBuffer};

use crate::{CrushError, Result};

/// Round `n` up to the next power of two (`0` and `1` both map to `1`)
///
/// Fails with [`CrushError::OutOfMemory`] when the result does not fit in `usize`.
pub fn next_pow2(n: usize) -> Result<usize> {
    n.checked_next_power_of_two()
        .ok_or(CrushError::OutOfMemory { requested: n })
}

/// Worst-case deflated size of `len` input bytes, including the zlib wrapper
pub const fn compress_bound(len: usize) -> usize {
    len + (len >> 12) + (len >> 14) + (len >> 25) + 13
}

/// Initial output capacity when compressing `input_len` bytes with `chunk_size` chunks
pub fn compress_capacity_hint(input_len: usize, chunk_size: usize) -> Result<usize> {
    next_pow2(compress_bound(input_len).max(chunk_size))
}

/// Initial output capacity when inflating `input_len` compressed bytes
pub fn decompress_capacity_hint(input_len: usize) -> Result<usize> {
    let doubled = input_len
        .checked_mul(2)
        .ok_or(CrushError::OutOfMemory { requested: input_len })?;
    next_pow2(doubled)
}

pub(crate) fn try_alloc(requested: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(requested)
        .map_err(|_| CrushError::OutOfMemory { requested })?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_pow2() {
        assert_eq!(next_pow2(0).unwrap(), 1);
        assert_eq!(next_pow2(1).unwrap(), 1);
        assert_eq!(next_pow2(3).unwrap(), 4);
        assert_eq!(next_pow2(4096).unwrap(), 4096);
        assert_eq!(next_pow2(4097).unwrap(), 8192);
        assert!(matches!(
            next_pow2(usize::MAX),
            Err(CrushError::OutOfMemory { .. })
        ));
    }

    #[test]
    fn test_compress_bound() {
        assert_eq!(compress_bound(0), 13);
        assert_eq!(compress_bound(10), 23);
        assert!(compress_bound(1 << 20) > 1 << 20);
    }

    #[test]
    fn test_capacity_hints() {
        // Small inputs are dominated by the chunk size
        assert_eq!(compress_capacity_hint(10, 64 * 1024).unwrap(), 64 * 1024);
        // Large inputs by the bound
        assert_eq!(
            compress_capacity_hint(100_000, 1024).unwrap(),
            next_pow2(compress_bound(100_000)).unwrap()
        );
        assert_eq!(decompress_capacity_hint(100).unwrap(), 256);
        assert!(decompress_capacity_hint(usize::MAX).is_err());
    }

    #[test]
    fn test_try_alloc_reports_oom() {
        assert!(matches!(
            try_alloc(usize::MAX),
            Err(CrushError::OutOfMemory { requested }) if requested == usize::MAX
        ));
        let data = try_alloc(16).unwrap();
        assert!(data.capacity() >= 16);
        assert!(data.is_empty());
    }
}
