//! Concurrency/overlap detection.
//!
//! Scans every unordered pair of playable events inside a short forward
//! window. The sequence is sorted by start time, so once a pair's start
//! gap exceeds the largest ladder bound the inner scan stops. Lane-aware
//! modes additionally require both events to share a lane.

use tracing::debug;

use crate::config::EngineConfig;
use crate::event::EventSequence;
use crate::finding::{AnomalyEmitter, Evidence, Finding, RuleKind};

/// Run the concurrency driver over one sequence
pub fn analyze(seq: &EventSequence, cfg: &EngineConfig) -> Vec<Finding> {
    let emitter = AnomalyEmitter::new(RuleKind::Concurrency);
    let max_bound = cfg.concurrency.max_bound();
    let mut findings = Vec::new();

    let events = seq.events();
    for (i, a) in events.iter().enumerate() {
        if !a.kind.is_playable() {
            continue;
        }
        for b in &events[i + 1..] {
            // Start times only ever grow, so the gap to a's end grows too.
            let gap_ms = b.time - a.effective_end();
            if gap_ms > max_bound {
                break;
            }
            if !b.kind.is_playable() || !seq.same_scope(a, b) {
                continue;
            }
            if let Some(tier) = cfg.concurrency.classify(gap_ms) {
                debug!(a_ms = a.time, b_ms = b.time, gap_ms, ?tier, "concurrent pair");
                findings.push(emitter.emit(
                    tier,
                    None,
                    &[a.time, b.time],
                    Evidence::GapMs(gap_ms),
                ));
            }
        }
    }

    findings
}
