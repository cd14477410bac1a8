//! Offbeat - sequential pattern-deviation engine for rhythm-game charts
//!
//! This library inspects a time-ordered sequence of chart events (placed
//! objects, timing lines, breaks) and flags local temporal, spatial, and
//! loudness anomalies relative to the *surrounding* pattern rather than
//! fixed absolute rules. The host owns parsing, object-model construction,
//! and issue rendering; the engine consumes an already-sorted event stream
//! and produces classified findings.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod expectation;
pub mod finding;
pub mod rules;
pub mod snap;
pub mod timeline;

pub use classify::{FloorLadder, RatioLadder, Tier};
pub use config::{EngineConfig, GapThresholds};
pub use engine::Engine;
pub use error::EngineError;
pub use event::{EventKind, EventSequence, Position, ScopeMode, TimedEvent};
pub use finding::{Category, CueKind, DifficultyTier, Evidence, Finding, RuleKind};
