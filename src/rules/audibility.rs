//! Decayed-audibility analysis of feedback cues.
//!
//! Every feedback-relevant point on an object (its start, intermediate
//! ticks, its end) should be audible over the ambient volume active at
//! that exact moment. Active cues (the player's own click) and passive
//! cues (ticks, tails) use different ladders. Observed volume clamps up to
//! a practical minimum audible floor before classification.

use tracing::debug;

use crate::config::EngineConfig;
use crate::event::{EventKind, EventSequence, TimedEvent};
use crate::finding::{AnomalyEmitter, Category, CueKind, Evidence, Finding, RuleKind};
use crate::timeline::VolumeTimeline;

/// Run the audibility driver over one sequence
pub fn analyze(seq: &EventSequence, cfg: &EngineConfig) -> Vec<Finding> {
    let emitter = AnomalyEmitter::new(RuleKind::Audibility);
    let timeline = VolumeTimeline::from_events(seq.events());
    let mut cursor = timeline.cursor();
    let mut findings = Vec::new();

    // Cue times are not globally sorted (a long slider's tail can land
    // after the next object starts), so sort once and keep the volume
    // cursor forward-only.
    let mut cues: Vec<Cue> = seq.events().iter().flat_map(cue_points).collect();
    cues.sort_by(|a, b| {
        a.time_ms
            .partial_cmp(&b.time_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for cue in cues {
        let ambient = cursor.volume_at(cue.time_ms);
        let observed = cue.volume_override.unwrap_or(ambient);
        let observed = observed.max(cfg.min_audible_percent);

        let ladder = match cue.kind {
            CueKind::Active => &cfg.audibility_active,
            CueKind::Passive => &cfg.audibility_passive,
        };
        if let Some(tier) = ladder.classify(observed) {
            debug!(time_ms = cue.time_ms, observed, cue = ?cue.kind, ?tier, "quiet cue");
            findings.push(emitter.emit(
                tier,
                Some(Category::Cue(cue.kind)),
                &[cue.time_ms],
                Evidence::Percent(observed),
            ));
        }
    }

    findings
}

struct Cue {
    time_ms: f64,
    kind: CueKind,
    /// Per-object feedback volume, overriding the ambient timeline
    volume_override: Option<f64>,
}

/// Feedback-relevant points of one event
fn cue_points(event: &TimedEvent) -> Vec<Cue> {
    let cue = |time_ms, kind| Cue {
        time_ms,
        kind,
        volume_override: event.volume,
    };

    match &event.kind {
        EventKind::Circle => vec![cue(event.time, CueKind::Active)],
        EventKind::Slider { tick_times } => {
            let mut cues = vec![cue(event.time, CueKind::Active)];
            cues.extend(tick_times.iter().map(|&t| cue(t, CueKind::Passive)));
            if let Some(end) = event.end_time {
                cues.push(cue(end, CueKind::Passive));
            }
            cues
        }
        EventKind::Hold => {
            let mut cues = vec![cue(event.time, CueKind::Active)];
            if let Some(end) = event.end_time {
                cues.push(cue(end, CueKind::Passive));
            }
            cues
        }
        // A spinner's only feedback moment is its completion bonus.
        EventKind::Spinner => vec![cue(event.effective_end(), CueKind::Active)],
        EventKind::Line | EventKind::Break => Vec::new(),
    }
}
