//! Configuration shared by the memory and file drivers

use crate::{CrushError, Format, Result, DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_BUFFER_SIZE_KIB};

/// Options for a single compression or decompression operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Chunk size in KiB for both scratch buffers; `0` selects the 256 KiB default
    pub chunk_size_kib: u32,
    /// Compression level `0..=9`; anything else is treated as 6. Ignored when decompressing
    pub level: i32,
    /// Wire format
    pub format: Format,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size_kib: 0,
            level: DEFAULT_LEVEL,
            format: Format::Raw,
        }
    }
}

impl StreamOptions {
    /// Create options optimized for large files
    pub fn large_file() -> Self {
        Self {
            chunk_size_kib: 1024, // 1MB chunks
            ..Self::default()
        }
    }

    /// Create options optimized for memory-constrained environments
    pub fn low_memory() -> Self {
        Self {
            chunk_size_kib: 16, // 16KB chunks
            ..Self::default()
        }
    }

    /// Set the chunk size in KiB
    pub fn with_chunk_size_kib(mut self, kib: u32) -> Self {
        self.chunk_size_kib = kib;
        self
    }

    /// Set the compression level
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Set the wire format
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Resolve the chunk size in bytes
    ///
    /// Fails with [`CrushError::BufferSizeTooLarge`] when the requested size is
    /// at or above [`MAX_BUFFER_SIZE_KIB`].
    pub fn chunk_size(&self) -> Result<usize> {
        if self.chunk_size_kib >= MAX_BUFFER_SIZE_KIB {
            return Err(CrushError::BufferSizeTooLarge {
                requested_kib: self.chunk_size_kib,
                max_kib: MAX_BUFFER_SIZE_KIB,
            });
        }
        match self.chunk_size_kib {
            0 => Ok(DEFAULT_CHUNK_SIZE),
            kib => Ok(kib as usize * 1024),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunk_size() {
        let options = StreamOptions::default();
        assert_eq!(options.chunk_size().unwrap(), DEFAULT_CHUNK_SIZE);
        assert_eq!(options.level, 6);
        assert_eq!(options.format, Format::Raw);
    }

    #[test]
    fn test_chunk_size_limit() {
        let below = StreamOptions::default().with_chunk_size_kib(MAX_BUFFER_SIZE_KIB - 1);
        assert_eq!(
            below.chunk_size().unwrap(),
            (MAX_BUFFER_SIZE_KIB as usize - 1) * 1024
        );

        for kib in [MAX_BUFFER_SIZE_KIB, MAX_BUFFER_SIZE_KIB + 1, u32::MAX] {
            let err = StreamOptions::default()
                .with_chunk_size_kib(kib)
                .chunk_size()
                .unwrap_err();
            assert_eq!(err.code(), 1001);
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            StreamOptions::large_file().chunk_size().unwrap(),
            1024 * 1024
        );
        assert_eq!(StreamOptions::low_memory().chunk_size().unwrap(), 16 * 1024);
    }

    #[test]
    fn test_builder() {
        let options = StreamOptions::default()
            .with_chunk_size_kib(4)
            .with_level(9)
            .with_format(Format::Zlib);
        assert_eq!(options.chunk_size().unwrap(), 4096);
        assert_eq!(options.level, 9);
        assert_eq!(options.format, Format::Zlib);
    }
}
