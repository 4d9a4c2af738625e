//! Common types and constants for zcrush
//!
//! This module defines the constants, enums, and the error type shared by the
//! buffer, engine, and stream modules.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default chunk size in bytes used when a chunk size of `0` KiB is requested (256 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Upper (exclusive) bound on the chunk size, in KiB (256 MiB)
pub const MAX_BUFFER_SIZE_KIB: u32 = 1024 * 256;

/// Default compression level, also used in place of out-of-range levels
pub const DEFAULT_LEVEL: i32 = 6;

/// Lowest accepted compression level (store only)
pub const MIN_LEVEL: i32 = 0;

/// Highest accepted compression level
pub const MAX_LEVEL: i32 = 9;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Direction a codec stream runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Deflate input bytes
    Compress,
    /// Inflate a previously deflated stream
    Decompress,
}

/// Wire format produced and consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Bare DEFLATE stream without header or trailer
    #[default]
    Raw,
    /// DEFLATE wrapped in the engine's standard zlib header and Adler-32 trailer
    Zlib,
}

impl Format {
    /// Whether the engine should emit/expect the zlib header
    pub fn zlib_header(&self) -> bool {
        matches!(self, Format::Zlib)
    }
}

/// Coerce a compression level into `0..=9`, falling back to [`DEFAULT_LEVEL`]
pub fn clamp_level(level: i32) -> u32 {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        level as u32
    } else {
        DEFAULT_LEVEL as u32
    }
}

/// Statistics for a completed streaming operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    /// Bytes read from the input
    pub bytes_in: u64,
    /// Bytes written to the output
    pub bytes_out: u64,
    /// Number of input chunks fed to the engine
    pub chunks: usize,
}

impl StreamStats {
    /// Output size relative to input size, `0.0` for empty input
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}

/// What a failed file operation was doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Opening the input for reading
    OpenInput,
    /// Creating or truncating the output
    OpenOutput,
    /// Reading a chunk
    Read,
    /// Writing a produced chunk
    Write,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileAction::OpenInput => "open input",
            FileAction::OpenOutput => "open output",
            FileAction::Read => "read",
            FileAction::Write => "write",
        };
        f.write_str(s)
    }
}

/// Reason the codec engine rejected or stopped a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFault {
    /// Input is not a valid stream in the selected format
    CorruptData,
    /// The stream asks for a preset dictionary, which is not supported
    NeedDictionary,
    /// Input ended before the engine reached the end of the stream
    Truncated,
    /// The handle was driven out of order (stepped while finished, fed while busy, ...)
    Protocol,
}

impl EngineFault {
    /// zlib-style numeric code for this fault
    pub fn code(&self) -> i32 {
        match self {
            EngineFault::CorruptData | EngineFault::NeedDictionary => -3,
            EngineFault::Protocol => -2,
            EngineFault::Truncated => -5,
        }
    }
}

/// Fieldless classification of [`CrushError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty input, empty path, identical input/output paths
    InvalidArguments,
    /// Chunk size at or above [`MAX_BUFFER_SIZE_KIB`]
    BufferSizeTooLarge,
    /// Open, read, or write failure on a file
    FileAccessFailed,
    /// An allocation could not be satisfied
    OutOfMemory,
    /// The codec engine failed
    Engine,
}

/// Error type for zcrush operations
#[derive(Debug, Error)]
pub enum CrushError {
    /// Null-equivalent, empty, or otherwise unusable arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(&'static str),

    /// Requested chunk size exceeds the configured maximum
    #[error("Buffer size too large: {requested_kib} KiB (must be below {max_kib} KiB)")]
    BufferSizeTooLarge {
        /// Requested chunk size in KiB
        requested_kib: u32,
        /// Exclusive upper bound in KiB
        max_kib: u32,
    },

    /// A file could not be opened, read, or written
    #[error("File access failed ({action} '{}'): {source}", .path.display())]
    FileAccessFailed {
        /// What was being attempted
        action: FileAction,
        /// File the action targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Allocation failure
    #[error("Out of memory: could not allocate {requested} bytes")]
    OutOfMemory {
        /// Size of the failed request in bytes
        requested: usize,
    },

    /// Codec engine error
    #[error("Engine error ({}): {message}", .fault.code())]
    Engine {
        /// Classified fault
        fault: EngineFault,
        /// Engine-provided detail
        message: String,
    },
}

impl CrushError {
    /// Stable numeric error code
    pub fn code(&self) -> i32 {
        match self {
            CrushError::InvalidArguments(_) => 1000,
            CrushError::BufferSizeTooLarge { .. } => 1001,
            CrushError::FileAccessFailed { .. } => 1002,
            CrushError::OutOfMemory { .. } => 2000,
            CrushError::Engine { fault, .. } => fault.code(),
        }
    }

    /// Fieldless kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CrushError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            CrushError::BufferSizeTooLarge { .. } => ErrorKind::BufferSizeTooLarge,
            CrushError::FileAccessFailed { .. } => ErrorKind::FileAccessFailed,
            CrushError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            CrushError::Engine { .. } => ErrorKind::Engine,
        }
    }

    pub(crate) fn engine(fault: EngineFault, message: impl Into<String>) -> Self {
        CrushError::Engine {
            fault,
            message: message.into(),
        }
    }

    pub(crate) fn file(action: FileAction, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CrushError::FileAccessFailed {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for zcrush operations
pub type Result<T> = std::result::Result<T, CrushError>;
