//! zcrush - chunked streaming DEFLATE for byte buffers and files
//!
//! This crate compresses and decompresses data with a DEFLATE engine (flate2)
//! by pushing bounded chunks of input through it and draining bounded chunks
//! of output. Memory operations collect the output in a growable buffer; file
//! operations write each produced chunk straight to disk, so they never hold
//! more than two chunks of data at a time.
//!
//! # Features
//!
//! - In-memory compression and decompression of byte slices
//! - File-to-file streaming with O(chunk size) memory
//! - Configurable chunk size (in KiB) and compression level (`0..=9`)
//! - Raw DEFLATE output by default, optional zlib wrapper
//! - Scratch buffers are wiped before they are freed
//! - No partial output on failure: results are only handed out on success
//!
//! # Example - In-memory
//!
//! ```no_run
//! // Compress with the default 256 KiB chunks at level 6
//! let data = b"Why do we all have to wear these ridiculous ties?!";
//! let compressed = zcrush::compress(data, 0, 6)?;
//! let restored = zcrush::decompress(&compressed, 0)?;
//! assert_eq!(&restored[..], &data[..]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Files
//!
//! ```no_run
//! use zcrush::{compress_file_with, StreamOptions};
//!
//! let stats = compress_file_with("data.bin", "data.bin.deflate", &StreamOptions::large_file())?;
//! println!("{} -> {} bytes", stats.bytes_in, stats.bytes_out);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod buffer;
pub mod common;
pub mod engine;
pub mod error;
pub mod stream;

// Re-export commonly used types
pub use common::{
    clamp_level, CrushError, Direction, EngineFault, ErrorKind, FileAction, Format, Result,
    StreamStats, DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL, MAX_BUFFER_SIZE_KIB, MAX_LEVEL, MIN_LEVEL,
    VERSION,
};
pub use engine::{EngineHandle, Step, StreamState};
pub use stream::StreamOptions;

use std::path::Path;

// Convenience functions

/// Compress a byte slice
///
/// # Arguments
/// * `data` - The data to compress; must not be empty
/// * `chunk_size_kib` - Chunk size in KiB, `0` for the 256 KiB default
/// * `level` - Compression level `0..=9`; out-of-range values use `6`
///
/// # Returns
/// The compressed bytes, or the first error encountered
pub fn compress(data: &[u8], chunk_size_kib: u32, level: i32) -> Result<Vec<u8>> {
    let options = StreamOptions::default()
        .with_chunk_size_kib(chunk_size_kib)
        .with_level(level);
    compress_with(data, &options)
}

/// Compress a byte slice with explicit options
pub fn compress_with(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    stream::memory::compress_bytes(data, options)
}

/// Decompress a byte slice
///
/// # Arguments
/// * `data` - The compressed data; must not be empty
/// * `chunk_size_kib` - Chunk size in KiB, `0` for the 256 KiB default
///
/// # Returns
/// The decompressed bytes, or the first error encountered
pub fn decompress(data: &[u8], chunk_size_kib: u32) -> Result<Vec<u8>> {
    let options = StreamOptions::default().with_chunk_size_kib(chunk_size_kib);
    decompress_with(data, &options)
}

/// Decompress a byte slice with explicit options
pub fn decompress_with(data: &[u8], options: &StreamOptions) -> Result<Vec<u8>> {
    stream::memory::decompress_bytes(data, options)
}

/// Compress the file at `input` into `output`
///
/// The paths must differ. `level` outside `0..=9` is treated as `6`.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    chunk_size_kib: u32,
    level: i32,
) -> Result<StreamStats> {
    let options = StreamOptions::default()
        .with_chunk_size_kib(chunk_size_kib)
        .with_level(level);
    compress_file_with(input, output, &options)
}

/// Compress a file with explicit options
pub fn compress_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &StreamOptions,
) -> Result<StreamStats> {
    stream::file::compress_file(input.as_ref(), output.as_ref(), options)
}

/// Decompress the file at `input` into `output`
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    chunk_size_kib: u32,
) -> Result<StreamStats> {
    let options = StreamOptions::default().with_chunk_size_kib(chunk_size_kib);
    decompress_file_with(input, output, &options)
}

/// Decompress a file with explicit options
pub fn decompress_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &StreamOptions,
) -> Result<StreamStats> {
    stream::file::decompress_file(input.as_ref(), output.as_ref(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        // Test that common types are accessible
        let _ = Direction::Compress;
        let _ = Format::Raw;
        let _ = StreamOptions::default();
        assert!(!VERSION.is_empty());

        // Test that functions are accessible
        let compressed = compress(b"test", 0, 6).unwrap();
        assert_eq!(decompress(&compressed, 0).unwrap(), b"test");
    }
}
