//! Spacing-ratio anomaly detection.
//!
//! Compares each consecutive pair's spacing rate (distance per
//! millisecond) against a decay-weighted baseline built from earlier pairs
//! in the same snap bucket. Circle pairs and slider pairs form separate
//! classes, since slider endpoints carry positional leniency circles lack.

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::event::{EventSequence, TimedEvent};
use crate::expectation::decayed_expectation;
use crate::finding::{AnomalyEmitter, Evidence, Finding, RuleKind};
use crate::snap::{ObservedSample, SampleClass, SnapBucketIndex};

/// Run the spacing driver over one sequence
pub fn analyze(seq: &EventSequence, cfg: &EngineConfig) -> Vec<Finding> {
    let emitter = AnomalyEmitter::new(RuleKind::Spacing);
    let mut history = SnapBucketIndex::new();
    let mut findings = Vec::new();

    let events = seq.events();
    for pair in events.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let Some(observed) = observe_pair(a, b, cfg) else {
            continue;
        };

        // Look up history before recording this pair, so it never matches
        // itself.
        let neighbors = history.lookup(
            observed.sample.delta_ms,
            observed.sample.class,
            cfg.snap_tolerance_ms,
        );
        let expected = decayed_expectation(
            &neighbors,
            b.time,
            cfg.decay_horizon_ms,
            cfg.min_ratio_samples,
        );

        if let Some(expected) = expected {
            if observed.raw_distance < cfg.min_spacing_px {
                trace!(time_ms = b.time, "spacing below absolute floor, suppressed");
            } else if expected <= f64::EPSILON {
                trace!(time_ms = b.time, "zero spacing baseline, suppressed");
            } else {
                let ratio = observed.sample.magnitude / expected;
                if let Some(tier) = cfg.spacing_ratio.classify(ratio) {
                    debug!(
                        time_ms = b.time,
                        ratio,
                        ?tier,
                        bucket_size = neighbors.len(),
                        "spacing deviation"
                    );
                    findings.push(emitter.emit_with_comparisons(
                        tier,
                        None,
                        &[a.time, b.time],
                        Evidence::Ratio(ratio),
                        &neighbors,
                    ));
                }
            }
        }

        history.insert(observed.sample);
    }

    findings
}

struct PairObservation {
    sample: ObservedSample,
    /// Distance before leniency reduction, checked against the absolute floor
    raw_distance: f64,
}

/// Turn one consecutive pair into an observation, or skip it
///
/// Skipped: scope-less endpoints (spinners, lines, breaks), overlapping or
/// simultaneous pairs (the concurrency driver's business, and ratio mode
/// must never divide by a zero delta), and pairs too far apart to be
/// visually linked.
fn observe_pair(a: &TimedEvent, b: &TimedEvent, cfg: &EngineConfig) -> Option<PairObservation> {
    if !a.kind.has_position() || !b.kind.has_position() {
        return None;
    }
    let (pos_a, pos_b) = (a.position?, b.position?);

    let delta_ms = b.time - a.effective_end();
    if delta_ms <= 0.0 || delta_ms > cfg.max_linked_delta_ms {
        return None;
    }

    let raw_distance = pos_a.distance_to(pos_b);

    // Slider endpoints are judged leniently by the game, so part of their
    // visual distance does not count.
    let mut leniency = 0.0;
    if a.kind.is_slider() {
        leniency += cfg.slider_leniency_px;
    }
    if b.kind.is_slider() {
        leniency += cfg.slider_leniency_px;
    }
    let distance = (raw_distance - leniency).max(0.0);

    let class = if a.kind.is_slider() || b.kind.is_slider() {
        SampleClass::Slider
    } else {
        SampleClass::Circle
    };

    Some(PairObservation {
        sample: ObservedSample {
            delta_ms,
            magnitude: distance / delta_ms,
            time: b.time,
            class,
        },
        raw_distance,
    })
}
