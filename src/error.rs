//! Engine error types.
//!
//! Malformed input is a caller contract violation: the engine fails fast
//! with a descriptive error instead of repairing the input (auto-sorting
//! would mask a bug in the host's object-model construction).

use thiserror::Error;

/// Errors raised while validating an event sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Events must already be sorted by start time
    #[error(
        "events not sorted by time: event {index} starts at {time_ms} ms, before previous event at {prev_ms} ms"
    )]
    UnsortedEvents {
        index: usize,
        prev_ms: f64,
        time_ms: f64,
    },

    /// Lane-aware scope requires lane data on every playable event
    #[error("lane-aware scope: playable event {index} at {time_ms} ms carries no lane")]
    MissingLane { index: usize, time_ms: f64 },
}
