//! Fixed-size chunk staging buffers
//!
//! Scratch buffers hold slices of caller plaintext on their way into or out of
//! the engine, so they are wiped before the allocation is released.

use super::try_alloc;
use crate::{CrushError, Result};
use std::ops::{Deref, DerefMut};
use zeroize::Zeroize;

/// A chunk-sized byte buffer that is zeroed on drop
#[derive(Debug)]
pub struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocate a zero-filled buffer of exactly `size` bytes
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(CrushError::InvalidArguments("chunk size must be non-zero"));
        }
        let mut data = try_alloc(size)?;
        data.resize(size, 0);
        Ok(Self { data })
    }

    /// Overwrite the whole buffer with zeroes
    pub fn wipe(&mut self) {
        self.data.as_mut_slice().zeroize();
    }
}

impl Deref for ScratchBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

/// The input and output staging buffers of one streaming operation
#[derive(Debug)]
pub struct Scratch {
    /// Chunk registered as engine input
    pub input: ScratchBuffer,
    /// Chunk the engine writes output into
    pub output: ScratchBuffer,
}

impl Scratch {
    /// Allocate both buffers at `chunk_size` bytes each
    pub fn new(chunk_size: usize) -> Result<Self> {
        let input = ScratchBuffer::new(chunk_size)?;
        let output = ScratchBuffer::new(chunk_size)?;
        Ok(Self { input, output })
    }

    /// Size of each buffer in bytes
    pub fn chunk_size(&self) -> usize {
        self.input.len()
    }
}
