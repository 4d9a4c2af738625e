//! EngineHandle - push/pull session around the DEFLATE engine
//!
//! The handle owns the operation's scratch buffers. Callers load a chunk into
//! the input scratch, step the engine, and take output whenever a step reports
//! that the output chunk is full or the stream has ended.

use super::state::{Step, StreamState};
use crate::buffer::Scratch;
use crate::{clamp_level, CrushError, Direction, EngineFault, Format, Result};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

#[derive(Debug)]
enum Engine {
    Deflate(Compress),
    Inflate(Decompress),
}

impl Engine {
    fn totals(&self) -> (u64, u64) {
        match self {
            Engine::Deflate(c) => (c.total_in(), c.total_out()),
            Engine::Inflate(d) => (d.total_in(), d.total_out()),
        }
    }

    fn run(&mut self, input: &[u8], output: &mut [u8], finish: bool) -> Result<Status> {
        match self {
            Engine::Deflate(c) => {
                let flush = if finish {
                    FlushCompress::Finish
                } else {
                    FlushCompress::None
                };
                c.compress(input, output, flush)
                    .map_err(|e| CrushError::engine(EngineFault::Protocol, e.to_string()))
            }
            // Inflate never gets a finish flush: the engine would then demand
            // that the whole remaining output fit into one chunk.
            Engine::Inflate(d) => d
                .decompress(input, output, FlushDecompress::None)
                .map_err(|e| {
                    let fault = if e.needs_dictionary().is_some() {
                        EngineFault::NeedDictionary
                    } else {
                        EngineFault::CorruptData
                    };
                    CrushError::engine(fault, e.to_string())
                }),
        }
    }
}

/// One open engine session
#[derive(Debug)]
pub struct EngineHandle {
    engine: Option<Engine>,
    direction: Direction,
    state: StreamState,
    scratch: Scratch,
    input_pos: usize,
    input_len: usize,
    output_len: usize,
}

impl EngineHandle {
    /// Open a session in `direction`, staging chunks through `scratch`
    ///
    /// `level` only applies to compression; values outside `0..=9` become 6.
    pub fn open(
        direction: Direction,
        level: i32,
        format: Format,
        scratch: Scratch,
    ) -> Result<Self> {
        if scratch.chunk_size() == 0 {
            return Err(CrushError::engine(
                EngineFault::Protocol,
                "scratch buffers must not be empty",
            ));
        }

        let engine = match direction {
            Direction::Compress => {
                let level = clamp_level(level);
                Engine::Deflate(Compress::new(
                    Compression::new(level),
                    format.zlib_header(),
                ))
            }
            Direction::Decompress => Engine::Inflate(Decompress::new(format.zlib_header())),
        };

        log::debug!(
            "opened {:?} engine ({:?}, {} byte chunks)",
            direction,
            format,
            scratch.chunk_size()
        );

        Ok(Self {
            engine: Some(engine),
            direction,
            state: StreamState::Open,
            scratch,
            input_pos: 0,
            input_len: 0,
            output_len: 0,
        })
    }

    /// Direction of this session
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Size of the input and output chunks
    pub fn chunk_size(&self) -> usize {
        self.scratch.chunk_size()
    }

    /// Whether the engine has consumed every byte of the registered input chunk
    pub fn input_consumed(&self) -> bool {
        self.input_pos == self.input_len
    }

    /// Copy `chunk` into the input scratch and register it as the next input
    pub fn set_input(&mut self, chunk: &[u8]) -> Result<()> {
        let capacity = self.scratch.input.len();
        let len = chunk.len();
        if len > capacity {
            return Err(self.fail(
                EngineFault::Protocol,
                format!("input chunk of {len} bytes exceeds {capacity} byte scratch"),
            ));
        }
        self.fill_input(|buf| {
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        })
        .map(|_| ())
    }

    /// Let `fill` write into the input scratch and register the bytes it reports
    pub fn fill_input<F>(&mut self, fill: F) -> Result<usize>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        if self.state.is_terminal() {
            return Err(CrushError::engine(
                EngineFault::Protocol,
                format!("cannot register input on a {} stream", self.state),
            ));
        }
        if !self.input_consumed() {
            return Err(self.fail(
                EngineFault::Protocol,
                "previous input chunk has not been consumed",
            ));
        }

        let capacity = self.scratch.input.len();
        let n = fill(&mut self.scratch.input[..])?;
        if n > capacity {
            return Err(self.fail(
                EngineFault::Protocol,
                format!("input chunk of {n} bytes exceeds {capacity} byte scratch"),
            ));
        }

        self.input_pos = 0;
        self.input_len = n;
        if self.state == StreamState::Open {
            self.state = StreamState::Streaming;
        }
        Ok(n)
    }

    /// Advance the engine over the registered input into the output chunk
    ///
    /// `finish` tells the engine that no further input will be registered.
    pub fn step(&mut self, finish: bool) -> Result<Step> {
        if !self.state.is_active() {
            let reason = if self.state == StreamState::Draining {
                "output chunk must be taken before stepping again".to_string()
            } else {
                format!("cannot step a {} stream", self.state)
            };
            return Err(self.fail(EngineFault::Protocol, reason));
        }

        let Some(engine) = self.engine.as_mut() else {
            self.state = StreamState::Failed;
            return Err(CrushError::engine(
                EngineFault::Protocol,
                "engine already released",
            ));
        };

        let input = &self.scratch.input[self.input_pos..self.input_len];
        let output = &mut self.scratch.output[self.output_len..];
        let (in_before, out_before) = engine.totals();
        let status = engine.run(input, output, finish);
        let (in_after, out_after) = engine.totals();

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                self.state = StreamState::Failed;
                return Err(e);
            }
        };

        let consumed = (in_after - in_before) as usize;
        let produced = (out_after - out_before) as usize;
        self.input_pos += consumed;
        self.output_len += produced;

        if status == Status::StreamEnd {
            self.state = StreamState::Finished;
            return Ok(Step::StreamComplete);
        }
        if self.output_len == self.scratch.output.len() {
            self.state = StreamState::Draining;
            return Ok(Step::ChunkComplete);
        }
        if consumed == 0 && produced == 0 {
            let err = match self.direction {
                Direction::Decompress if finish && self.input_consumed() => self.fail(
                    EngineFault::Truncated,
                    "compressed stream ended before its end marker",
                ),
                _ => self.fail(EngineFault::Protocol, "engine made no progress"),
            };
            return Err(err);
        }

        self.state = StreamState::Streaming;
        Ok(Step::Continue)
    }

    /// Take the bytes produced since the last take and reset the output chunk
    pub fn take_output(&mut self) -> &[u8] {
        let produced = std::mem::take(&mut self.output_len);
        if self.state == StreamState::Draining {
            self.state = StreamState::Streaming;
        }
        log::trace!("took {} output bytes", produced);
        &self.scratch.output[..produced]
    }

    /// Release engine resources and wipe both scratch buffers
    ///
    /// Safe to call more than once; dropping the handle calls it too.
    pub fn close(&mut self) {
        if let Some(engine) = self.engine.take() {
            let (total_in, total_out) = engine.totals();
            log::debug!(
                "closed {:?} engine in {} state ({} bytes in, {} bytes out)",
                self.direction,
                self.state,
                total_in,
                total_out
            );
        }
        self.scratch.input.wipe();
        self.scratch.output.wipe();
        self.input_pos = 0;
        self.input_len = 0;
        self.output_len = 0;
        self.state = StreamState::Closed;
    }

    fn fail(&mut self, fault: EngineFault, message: impl Into<String>) -> CrushError {
        if self.state != StreamState::Closed {
            self.state = StreamState::Failed;
        }
        CrushError::engine(fault, message)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.close();
    }
}
