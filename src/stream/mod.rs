//! Chunked streaming drivers
//!
//! Both transports run the same loop: load a chunk from a [`ChunkSource`] into
//! the engine whenever the previous one has been consumed, step the engine with
//! the finish hint set once the source is exhausted, and hand every full (or
//! final) output chunk to a [`ChunkSink`]. The memory driver pairs a slice with
//! a [`GrowableBuffer`](crate::buffer::GrowableBuffer); the file driver pairs two
//! file handles.

pub mod file;
pub mod memory;
mod options;

pub use options::StreamOptions;

use crate::engine::{EngineHandle, Step};
use crate::{Result, StreamStats};

/// Where input chunks come from
pub(crate) trait ChunkSource {
    /// Fill `buf` with up to `buf.len()` bytes and return how many were written
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Whether no further bytes will ever be produced
    fn is_exhausted(&self) -> bool;
}

/// Where produced output chunks go
pub(crate) trait ChunkSink {
    /// Accept one produced chunk in full
    fn accept(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Run `handle` until the engine reports end of stream
pub(crate) fn drive<S, K>(
    handle: &mut EngineHandle,
    source: &mut S,
    sink: &mut K,
) -> Result<StreamStats>
where
    S: ChunkSource,
    K: ChunkSink,
{
    let mut stats = StreamStats::default();

    loop {
        if handle.input_consumed() && !source.is_exhausted() {
            let n = handle.fill_input(|buf| source.fill(buf))?;
            if n > 0 {
                stats.bytes_in += n as u64;
                stats.chunks += 1;
            }
        }

        let step = handle.step(source.is_exhausted())?;

        if step.has_output() {
            let produced = handle.take_output();
            sink.accept(produced)?;
            stats.bytes_out += produced.len() as u64;
        }

        if step == Step::StreamComplete {
            return Ok(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Scratch;
    use crate::{CrushError, Direction, Format};

    /// Yields the data one byte per fill to exercise short chunks
    struct Trickle<'a> {
        data: &'a [u8],
    }

    impl ChunkSource for Trickle<'_> {
        fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
            match self.data.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }

        fn is_exhausted(&self) -> bool {
            self.data.is_empty()
        }
    }

    impl ChunkSink for Vec<u8> {
        fn accept(&mut self, bytes: &[u8]) -> Result<()> {
            self.extend_from_slice(bytes);
            Ok(())
        }
    }

    struct Rejecting;

    impl ChunkSink for Rejecting {
        fn accept(&mut self, _bytes: &[u8]) -> Result<()> {
            Err(CrushError::OutOfMemory { requested: 1 })
        }
    }

    fn open(direction: Direction, chunk: usize) -> EngineHandle {
        let scratch = Scratch::new(chunk).unwrap();
        EngineHandle::open(direction, 6, Format::Zlib, scratch).unwrap()
    }

    #[test]
    fn test_drive_with_short_chunks() {
        let data = b"short chunks still make a complete stream, short chunks!";

        let mut compressed = Vec::new();
        let stats = drive(
            &mut open(Direction::Compress, 8),
            &mut Trickle { data },
            &mut compressed,
        )
        .unwrap();
        assert_eq!(stats.bytes_in, data.len() as u64);
        assert_eq!(stats.chunks, data.len());
        assert_eq!(stats.bytes_out, compressed.len() as u64);

        let mut restored = Vec::new();
        drive(
            &mut open(Direction::Decompress, 8),
            &mut Trickle { data: &compressed },
            &mut restored,
        )
        .unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_sink_error_aborts() {
        let err = drive(
            &mut open(Direction::Compress, 64),
            &mut Trickle { data: b"abc" },
            &mut Rejecting,
        )
        .unwrap_err();
        assert_eq!(err.code(), 2000);
    }
}
