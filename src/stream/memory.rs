//! Memory stream driver
//!
//! Compresses or decompresses an in-memory byte slice into a freshly allocated
//! vector. On failure nothing is returned; every intermediate buffer is wiped
//! or released when it goes out of scope.

use super::{drive, ChunkSink, ChunkSource, StreamOptions};
use crate::buffer::{compress_capacity_hint, decompress_capacity_hint, GrowableBuffer, Scratch};
use crate::engine::EngineHandle;
use crate::{CrushError, Direction, Result};

/// Feeds consecutive chunks of a borrowed slice
#[derive(Debug)]
struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ChunkSource for SliceSource<'_> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }
}

impl ChunkSink for GrowableBuffer {
    fn accept(&mut self, bytes: &[u8]) -> Result<()> {
        self.append(bytes)
    }
}

/// Run `data` through the engine in `direction`
pub fn run(data: &[u8], direction: Direction, options: &StreamOptions) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(CrushError::InvalidArguments("input data must not be empty"));
    }
    let chunk_size = options.chunk_size()?;

    let scratch = Scratch::new(chunk_size)?;
    let capacity_hint = match direction {
        Direction::Compress => compress_capacity_hint(data.len(), chunk_size)?,
        Direction::Decompress => decompress_capacity_hint(data.len())?,
    };
    let mut output = GrowableBuffer::with_capacity(capacity_hint)?;
    let mut handle = EngineHandle::open(direction, options.level, options.format, scratch)?;

    let stats = drive(&mut handle, &mut SliceSource::new(data), &mut output)?;
    handle.close();

    log::debug!(
        "{:?}: {} -> {} bytes in {} chunks ({} byte buffer)",
        direction,
        stats.bytes_in,
        stats.bytes_out,
        stats.chunks,
        output.capacity()
    );

    output.into_output()
}

/// Compress `data` with `options`
pub fn compress_bytes(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    run(data, Direction::Compress, options)
}

/// Decompress `data` with `options`
pub fn decompress_bytes(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    run(data, Direction::Decompress, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Format};

    fn options(kib: u32) -> StreamOptions {
        StreamOptions::default().with_chunk_size_kib(kib)
    }

    #[test]
    fn test_slice_source_clamps_final_chunk() {
        let data = [1u8, 2, 3, 4, 5];
        let mut source = SliceSource::new(&data);
        let mut buf = [0u8; 2];

        assert_eq!(source.fill(&mut buf).unwrap(), 2);
        assert_eq!(source.fill(&mut buf).unwrap(), 2);
        assert!(!source.is_exhausted());
        assert_eq!(source.fill(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], 5);
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_ten_a_round_trip() {
        let data = b"AAAAAAAAAA";
        let compressed = compress_bytes(data, &options(0)).unwrap();
        assert!(compressed.len() < data.len());
        let restored = decompress_bytes(&compressed, &options(0)).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_output_larger_than_capacity_hint() {
        // 64 KiB of zeroes inflate far beyond twice their compressed size
        let data = vec![0u8; 64 * 1024];
        let compressed = compress_bytes(&data, &options(1)).unwrap();
        assert!(compressed.len() * 2 < data.len());
        let restored = decompress_bytes(&compressed, &options(1)).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = compress_bytes(&[], &options(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        let err = decompress_bytes(&[], &options(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_empty_input_checked_before_chunk_size() {
        let err = compress_bytes(&[], &options(u32::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_zlib_round_trip() {
        let data = b"zlib wrapped, zlib wrapped, zlib wrapped, zlib wrapped";
        let opts = options(1).with_format(Format::Zlib);
        let compressed = compress_bytes(data, &opts).unwrap();
        assert_eq!(compressed[0], 0x78);
        assert_eq!(decompress_bytes(&compressed, &opts).unwrap(), data);

        // The wrapper is not valid raw DEFLATE
        assert!(decompress_bytes(&compressed, &options(1)).is_err());
    }
}
