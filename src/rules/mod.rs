//! Concrete rule drivers.
//!
//! Each driver wires the shared machinery (snap buckets, decay-weighted
//! expectation, threshold ladders, the finding emitter) into one specific
//! analysis. Every driver processes the sequence once, left to right, and
//! owns its history for the duration of the call; nothing is shared
//! across invocations.

pub mod audibility;
pub mod concurrency;
pub mod gap;
pub mod spacing;
