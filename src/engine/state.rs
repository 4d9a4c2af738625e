//! Stream state tracking for the engine handle

use std::fmt;

/// Lifecycle of an [`EngineHandle`](super::EngineHandle)
///
/// ```text
/// Open -> Streaming <-> Draining -> Finished -> Closed
///   \________\______________\_____> Failed ---> Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Engine session created, no input registered yet
    Open,
    /// Input registered, output chunk has room
    Streaming,
    /// Output chunk is full and must be taken before the next step
    Draining,
    /// Engine reported end of stream
    Finished,
    /// Engine or protocol error; only closing is allowed
    Failed,
    /// Engine resources released
    Closed,
}

impl StreamState {
    /// Whether the handle may still be stepped
    pub fn is_active(&self) -> bool {
        matches!(self, StreamState::Open | StreamState::Streaming)
    }

    /// Whether the stream has ended, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamState::Finished | StreamState::Failed | StreamState::Closed
        )
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamState::Open => "open",
            StreamState::Streaming => "streaming",
            StreamState::Draining => "draining",
            StreamState::Finished => "finished",
            StreamState::Failed => "failed",
            StreamState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Outcome of a single [`EngineHandle::step`](super::EngineHandle::step)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Progress was made; the output chunk still has room
    Continue,
    /// The output chunk is full and must be taken
    ChunkComplete,
    /// End of stream; the final output must be taken
    StreamComplete,
}

impl Step {
    /// Whether the produced output should be taken after this step
    pub fn has_output(&self) -> bool {
        matches!(self, Step::ChunkComplete | Step::StreamComplete)
    }
}
