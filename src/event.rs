//! Timed chart events and the sorted sequence view.
//!
//! The host parses the chart file and hands the engine an already-sorted
//! list of [`TimedEvent`]s. The engine only reads: [`EventSequence`] is an
//! immutable view exposing neighbor queries and the scope predicate used by
//! lane-aware rules.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// 2D playfield position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Event kind tag with kind-specific payload
///
/// Represented as a tagged variant rather than trait objects so rule
/// drivers branch on the tag explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Single tap object
    Circle,
    /// Held path object; `tick_times` are intermediate feedback points (ms)
    Slider { tick_times: Vec<f64> },
    /// Spin object; occupies the whole playfield, no meaningful position
    Spinner,
    /// Lane hold object
    Hold,
    /// Timing/control line (carries ambient volume)
    Line,
    /// Break section
    Break,
}

impl EventKind {
    /// True for objects the player interacts with (not lines or breaks)
    pub fn is_playable(&self) -> bool {
        !matches!(self, EventKind::Line | EventKind::Break)
    }

    /// True for objects with a meaningful playfield position
    pub fn has_position(&self) -> bool {
        matches!(self, EventKind::Circle | EventKind::Slider { .. } | EventKind::Hold)
    }

    pub fn is_slider(&self) -> bool {
        matches!(self, EventKind::Slider { .. })
    }
}

/// One chart event: object, timing line, or break
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Start time in milliseconds
    pub time: f64,
    /// End time in milliseconds, for events with duration
    pub end_time: Option<f64>,
    /// Playfield position, absent for spinners/lines/breaks
    pub position: Option<Position>,
    /// Per-event feedback volume override (0-100)
    pub volume: Option<f64>,
    /// Kind tag with kind-specific payload
    pub kind: EventKind,
    /// Column for lane-based modes
    pub lane: Option<u32>,
}

impl TimedEvent {
    /// End time, falling back to the start time for instant events
    pub fn effective_end(&self) -> f64 {
        self.end_time.unwrap_or(self.time)
    }
}

/// Scope equivalence two events must share to be compared for concurrency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeMode {
    /// All events share one scope
    Ignored,
    /// Events must share a lane (column)
    Lane,
}

/// Immutable, time-sorted view over a chart's events
///
/// Construction validates the caller contract once; every rule driver then
/// iterates the same validated slice. Concurrent readers are safe since the
/// sequence is never mutated after construction.
#[derive(Debug, Clone)]
pub struct EventSequence {
    events: Vec<TimedEvent>,
    scope: ScopeMode,
}

impl EventSequence {
    /// Validate and wrap a time-sorted event list
    ///
    /// # Errors
    /// `UnsortedEvents` if start times ever decrease; `MissingLane` if the
    /// scope is [`ScopeMode::Lane`] and a playable event has no lane.
    pub fn new(events: Vec<TimedEvent>, scope: ScopeMode) -> Result<Self, EngineError> {
        for (index, pair) in events.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(EngineError::UnsortedEvents {
                    index: index + 1,
                    prev_ms: pair[0].time,
                    time_ms: pair[1].time,
                });
            }
        }

        if scope == ScopeMode::Lane {
            for (index, event) in events.iter().enumerate() {
                if event.kind.is_playable() && event.lane.is_none() {
                    return Err(EngineError::MissingLane {
                        index,
                        time_ms: event.time,
                    });
                }
            }
        }

        Ok(Self { events, scope })
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn scope(&self) -> ScopeMode {
        self.scope
    }

    /// Previous and next events around index `idx`
    ///
    /// Callers must only pass indices obtained by iterating this sequence.
    pub fn neighbors(&self, idx: usize) -> (Option<&TimedEvent>, Option<&TimedEvent>) {
        let prev = idx.checked_sub(1).and_then(|i| self.events.get(i));
        let next = self.events.get(idx + 1);
        (prev, next)
    }

    /// Whether two events share the configured comparison scope
    pub fn same_scope(&self, a: &TimedEvent, b: &TimedEvent) -> bool {
        match self.scope {
            ScopeMode::Ignored => true,
            ScopeMode::Lane => a.lane == b.lane && a.lane.is_some(),
        }
    }
}
