//! Classified findings and the emitter that builds them.
//!
//! A finding is the engine's only output: anchor timestamps to display,
//! the severity tier, numeric evidence, and up to three comparison
//! timestamps showing which historical points established the baseline.
//! The emitter is pure: it does not log or mutate input events.

use serde::{Deserialize, Serialize};

use crate::classify::Tier;
use crate::snap::ObservedSample;

/// Which rule driver produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    Spacing,
    Concurrency,
    MinimumGap,
    Audibility,
}

/// Numeric evidence backing a finding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Evidence {
    /// Observed / expected magnitude (ratio mode)
    Ratio(f64),
    /// Gap between two events in milliseconds (negative when overlapping)
    GapMs(f64),
    /// Feedback volume percentage, already floor-clamped
    Percent(f64),
}

/// Difficulty tier a fixed-floor threshold is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
    Insane,
    Expert,
}

/// Active cue (a primary interaction moment, e.g. a click) vs. passive cue
/// (a secondary one, e.g. a slider tick or tail)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueKind {
    Active,
    Passive,
}

/// Context category a fixed-floor deviation is scoped to
///
/// Categories are independent: the same observation may violate the Easy
/// floor and the Normal floor at once, yielding one finding per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Difficulty(DifficultyTier),
    Cue(CueKind),
}

/// One classified deviation, ready for the host's issue reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleKind,
    pub tier: Tier,
    /// Context category, for fixed-floor rules with per-category ladders
    pub category: Option<Category>,
    /// One or two timestamps (ms) the host derives a display time from
    pub anchor_timestamps: Vec<f64>,
    pub evidence: Evidence,
    /// Up to three baseline timestamps, most recent first
    pub comparison_timestamps: Vec<f64>,
}

impl Finding {
    /// Timestamp findings are ordered by
    pub fn primary_anchor(&self) -> f64 {
        self.anchor_timestamps.first().copied().unwrap_or(0.0)
    }
}

/// Maximum comparison timestamps attached to one finding
const MAX_COMPARISONS: usize = 3;

/// Builds findings for one rule driver
#[derive(Debug, Clone, Copy)]
pub struct AnomalyEmitter {
    rule: RuleKind,
}

impl AnomalyEmitter {
    pub fn new(rule: RuleKind) -> Self {
        Self { rule }
    }

    /// Build a finding without baseline history (fixed-floor rules)
    pub fn emit(
        &self,
        tier: Tier,
        category: Option<Category>,
        anchors: &[f64],
        evidence: Evidence,
    ) -> Finding {
        self.emit_with_comparisons(tier, category, anchors, evidence, &[])
    }

    /// Build a finding citing the bucket samples that established the
    /// expectation, most recent first, capped at three
    pub fn emit_with_comparisons(
        &self,
        tier: Tier,
        category: Option<Category>,
        anchors: &[f64],
        evidence: Evidence,
        comparisons: &[&ObservedSample],
    ) -> Finding {
        let mut times: Vec<f64> = comparisons.iter().map(|s| s.time).collect();
        times.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        times.truncate(MAX_COMPARISONS);

        Finding {
            rule: self.rule,
            tier,
            category,
            anchor_timestamps: anchors.to_vec(),
            evidence,
            comparison_timestamps: times,
        }
    }
}
