//! Decay-weighted expected magnitude over same-bucket history.
//!
//! Older comparison points within one snap class should influence the
//! baseline less, since local context drifts (spacing tends to intensify
//! gradually through a section). The horizon constant is the tunable
//! half-relevance distance, 4000 ms by default.

use crate::snap::ObservedSample;

/// Decay-weighted mean magnitude of `samples` as seen from time `now_ms`
///
/// ```text
/// weight(s) = min(1, horizon_ms / (4 * (now_ms - s.time)))
/// expected  = sum(s.magnitude * weight(s)) / count(samples)
/// ```
///
/// Returns `None` with fewer than `min_samples` samples: a baseline built
/// from too little history produces false positives, which are worse than
/// missed detections, so the caller must suppress the deviation entirely.
pub fn decayed_expectation(
    samples: &[&ObservedSample],
    now_ms: f64,
    horizon_ms: f64,
    min_samples: usize,
) -> Option<f64> {
    if samples.len() < min_samples {
        return None;
    }

    let weighted_sum: f64 = samples
        .iter()
        .map(|s| s.magnitude * decay_weight(now_ms - s.time, horizon_ms))
        .sum();

    Some(weighted_sum / samples.len() as f64)
}

/// Weight of one sample at `age_ms` before the reference time, clamped to 1
/// for recent samples
fn decay_weight(age_ms: f64, horizon_ms: f64) -> f64 {
    if age_ms <= 0.0 {
        return 1.0;
    }
    (horizon_ms / (4.0 * age_ms)).min(1.0)
}
