//! File stream driver
//!
//! Streams one file into another through the two scratch buffers only, so
//! memory use stays at two chunks no matter how large the files are. Every
//! produced chunk is written straight to the destination.

use super::{drive, ChunkSink, ChunkSource, StreamOptions};
use crate::buffer::Scratch;
use crate::engine::EngineHandle;
use crate::{CrushError, Direction, FileAction, Result, StreamStats};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads chunks from `reader` until it reports end of file
struct ReaderSource<'p, R> {
    reader: R,
    path: &'p Path,
    eof: bool,
}

impl<R: Read> ChunkSource for ReaderSource<'_, R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CrushError::file(FileAction::Read, self.path, e)),
            }
        }
        if filled < buf.len() {
            self.eof = true;
        }
        Ok(filled)
    }

    fn is_exhausted(&self) -> bool {
        self.eof
    }
}

/// Writes every produced chunk to `writer` in full
struct WriterSink<'p, W> {
    writer: W,
    path: &'p Path,
}

impl<W: Write> WriterSink<'_, W> {
    fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| CrushError::file(FileAction::Write, self.path, e))
    }
}

impl<W: Write> ChunkSink for WriterSink<'_, W> {
    fn accept(&mut self, bytes: &[u8]) -> Result<()> {
        // write_all turns a short write into WriteZero
        self.writer
            .write_all(bytes)
            .map_err(|e| CrushError::file(FileAction::Write, self.path, e))
    }
}

fn validate_paths(input: &Path, output: &Path) -> Result<()> {
    if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
        return Err(CrushError::InvalidArguments("file paths must not be empty"));
    }
    if input == output {
        return Err(CrushError::InvalidArguments(
            "input and output paths must differ",
        ));
    }
    if let (Ok(a), Ok(b)) = (input.canonicalize(), output.canonicalize()) {
        if a == b {
            return Err(CrushError::InvalidArguments(
                "input and output refer to the same file",
            ));
        }
    }
    Ok(())
}

/// Drive the engine from `reader` to `writer`, labelling I/O errors with the given paths
fn pump<R: Read, W: Write>(
    reader: R,
    input_path: &Path,
    writer: W,
    output_path: &Path,
    handle: &mut EngineHandle,
) -> Result<StreamStats> {
    let mut source = ReaderSource {
        reader,
        path: input_path,
        eof: false,
    };
    let mut sink = WriterSink {
        writer,
        path: output_path,
    };
    let stats = drive(handle, &mut source, &mut sink)?;
    sink.finish()?;
    Ok(stats)
}

/// Stream the file at `input` into `output` in `direction`
///
/// The output file is created (or truncated) only after the input has been
/// opened and the buffers and engine are ready.
pub fn run(
    input: &Path,
    output: &Path,
    direction: Direction,
    options: &StreamOptions,
) -> Result<StreamStats> {
    validate_paths(input, output)?;
    let chunk_size = options.chunk_size()?;

    let reader = File::open(input).map_err(|e| CrushError::file(FileAction::OpenInput, input, e))?;
    let scratch = Scratch::new(chunk_size)?;
    let mut handle = EngineHandle::open(direction, options.level, options.format, scratch)?;
    let writer =
        File::create(output).map_err(|e| CrushError::file(FileAction::OpenOutput, output, e))?;

    let stats = pump(reader, input, writer, output, &mut handle)?;
    handle.close();

    log::debug!(
        "{:?} '{}' -> '{}': {} -> {} bytes in {} chunks",
        direction,
        input.display(),
        output.display(),
        stats.bytes_in,
        stats.bytes_out,
        stats.chunks
    );
    Ok(stats)
}

/// Compress the file at `input` into `output`
pub fn compress_file(input: &Path, output: &Path, options: &StreamOptions) -> Result<StreamStats> {
    run(input, output, Direction::Compress, options)
}

/// Decompress the file at `input` into `output`
pub fn decompress_file(
    input: &Path,
    output: &Path,
    options: &StreamOptions,
) -> Result<StreamStats> {
    run(input, output, Direction::Decompress, options)
}
