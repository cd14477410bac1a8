//! Snap-bucket history of observed samples.
//!
//! Adjacent-pair observations are grouped by quantized inter-event delta
//! time ("snap"): two samples belong to the same bucket when their deltas
//! lie within a fixed-width tolerance band of each other. The band test is
//! symmetric, so bucket membership cannot drift with processing order.
//!
//! History grows monotonically over one driver invocation and is never
//! evicted; decay weighting (see [`crate::expectation`]) drives the
//! relevance of old samples to zero instead.

use serde::Serialize;

/// Sample class, kept separate because slider-type deltas carry built-in
/// positional leniency that circle-type deltas lack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleClass {
    Circle,
    Slider,
}

/// One adjacent-pair observation recorded by a rule driver
#[derive(Debug, Clone, Serialize)]
pub struct ObservedSample {
    /// Inter-event delta time of the pair (ms)
    pub delta_ms: f64,
    /// Observed magnitude (e.g. spacing rate in px/ms)
    pub magnitude: f64,
    /// Timestamp of the later event of the pair (ms); used for decay
    pub time: f64,
    /// Snap class the sample belongs to
    pub class: SampleClass,
}

/// Append-only sample history with banded lookup
///
/// One instance per driver invocation; never shared across invocations or
/// rules. A linear scan is fine here: history is bounded by one chart's
/// object count (low thousands).
#[derive(Debug, Default)]
pub struct SnapBucketIndex {
    samples: Vec<ObservedSample>,
}

impl SnapBucketIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded samples whose delta lies within `tolerance_ms` of
    /// `delta_ms` and whose class matches
    ///
    /// Callers look up *before* inserting the current pair, so an
    /// observation never matches itself.
    pub fn lookup(&self, delta_ms: f64, class: SampleClass, tolerance_ms: f64) -> Vec<&ObservedSample> {
        self.samples
            .iter()
            .filter(|s| s.class == class && (s.delta_ms - delta_ms).abs() <= tolerance_ms)
            .collect()
    }

    /// Record one observation
    pub fn insert(&mut self, sample: ObservedSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
