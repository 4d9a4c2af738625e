//! Codec engine adapter
//!
//! A thin, direction-agnostic wrapper around flate2's push/pull `Compress` and
//! `Decompress` streams. Both directions expose the same operations:
//! open, register input, step, take output, close.

mod handle;
mod state;

pub use handle::EngineHandle;
pub use state::{Step, StreamState};
