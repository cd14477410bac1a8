//! Minimum-gap enforcement around special events.
//!
//! Spinners need clear time on both sides: a lead-in before the spinner
//! starts and recovery after it ends. Floors are configured per difficulty
//! tier; every violated tier yields its own finding, scoped to that tier's
//! category.

use tracing::debug;

use crate::config::EngineConfig;
use crate::event::{EventKind, EventSequence, TimedEvent};
use crate::finding::{AnomalyEmitter, Category, Evidence, Finding, RuleKind};

/// Run the minimum-gap driver over one sequence
pub fn analyze(seq: &EventSequence, cfg: &EngineConfig) -> Vec<Finding> {
    let emitter = AnomalyEmitter::new(RuleKind::MinimumGap);
    let mut findings = Vec::new();

    let events = seq.events();
    for (i, special) in events.iter().enumerate() {
        if special.kind != EventKind::Spinner {
            continue;
        }

        if let Some(prev) = nearest_playable(events[..i].iter().rev()) {
            let gap_ms = special.time - prev.effective_end();
            classify_gap(
                &emitter,
                cfg,
                GapSide::Before,
                gap_ms,
                &[prev.time, special.time],
                &mut findings,
            );
        }

        if let Some(next) = nearest_playable(events[i + 1..].iter()) {
            let gap_ms = next.time - special.effective_end();
            classify_gap(
                &emitter,
                cfg,
                GapSide::After,
                gap_ms,
                &[special.time, next.time],
                &mut findings,
            );
        }
    }

    findings
}

#[derive(Debug, Clone, Copy)]
enum GapSide {
    Before,
    After,
}

/// Nearest playable neighbor that is not itself a spinner
///
/// Back-to-back spinners are a deliberate pattern, not a recovery
/// violation, so a same-kind neighbor suppresses the check.
fn nearest_playable<'a>(
    mut events: impl Iterator<Item = &'a TimedEvent>,
) -> Option<&'a TimedEvent> {
    events
        .find(|e| e.kind.is_playable())
        .filter(|e| e.kind != EventKind::Spinner)
}

fn classify_gap(
    emitter: &AnomalyEmitter,
    cfg: &EngineConfig,
    side: GapSide,
    gap_ms: f64,
    anchors: &[f64],
    findings: &mut Vec<Finding>,
) {
    for floor in &cfg.gap.floors {
        let ladder = match side {
            GapSide::Before => &floor.before,
            GapSide::After => &floor.after,
        };
        if let Some(tier) = ladder.classify(gap_ms) {
            debug!(gap_ms, ?side, difficulty = ?floor.difficulty, ?tier, "gap below floor");
            findings.push(emitter.emit(
                tier,
                Some(Category::Difficulty(floor.difficulty)),
                anchors,
                Evidence::GapMs(gap_ms),
            ));
        }
    }
}
