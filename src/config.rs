//! Engine configuration and threshold presets.
//!
//! Every threshold the drivers consult lives here, serde round-trippable
//! so a host can load an override table from JSON. Two observed variants
//! of the minimum-gap rule differ only in their threshold tables, so both
//! ship as explicit presets instead of a hardcoded constant in the driver.

use serde::{Deserialize, Serialize};

use crate::classify::{FloorLadder, RatioLadder, Tier};
use crate::event::ScopeMode;
use crate::finding::DifficultyTier;

/// Per-difficulty minimum clear time around a special (spinner) event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapFloor {
    pub difficulty: DifficultyTier,
    /// Ladder for the gap between the previous event and the spinner (ms)
    pub before: FloorLadder,
    /// Ladder for the gap between the spinner and the next event (ms)
    pub after: FloorLadder,
}

/// Minimum-gap thresholds, one independent category per difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapThresholds {
    pub floors: Vec<GapFloor>,
}

impl GapThresholds {
    /// Fixed per-difficulty duration table preset
    ///
    /// Floors shrink as difficulty rises; each carries a hard Problem
    /// bound and a Warning bound 25% above it.
    pub fn difficulty_table() -> Self {
        let floor = |difficulty, before_ms: f64, after_ms: f64| GapFloor {
            difficulty,
            before: ladder_around(before_ms),
            after: ladder_around(after_ms),
        };
        Self {
            floors: vec![
                floor(DifficultyTier::Easy, 500.0, 1000.0),
                floor(DifficultyTier::Normal, 375.0, 750.0),
                floor(DifficultyTier::Hard, 250.0, 500.0),
                floor(DifficultyTier::Insane, 125.0, 250.0),
            ],
        }
    }

    /// Continuous formula preset: floors scale with the chart's beat
    /// length instead of fixed durations
    ///
    /// Recovery after a spinner costs whole beats (4 on Easy down to 1 on
    /// Insane); the lead-in before it costs a quarter of that.
    pub fn recovery_formula(beat_ms: f64) -> Self {
        let floor = |difficulty, beats: f64| GapFloor {
            difficulty,
            before: ladder_around(beats * beat_ms / 4.0),
            after: ladder_around(beats * beat_ms),
        };
        Self {
            floors: vec![
                floor(DifficultyTier::Easy, 4.0),
                floor(DifficultyTier::Normal, 3.0),
                floor(DifficultyTier::Hard, 2.0),
                floor(DifficultyTier::Insane, 1.0),
            ],
        }
    }
}

/// Problem at the floor itself, Warning up to 25% above it
fn ladder_around(floor_ms: f64) -> FloorLadder {
    FloorLadder::new(vec![
        (Tier::Problem, floor_ms),
        (Tier::Warning, floor_ms * 1.25),
    ])
}

/// All thresholds one engine invocation runs with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scope equivalence for the concurrency driver
    pub scope: ScopeMode,

    /// Snap bucket half-width (ms)
    pub snap_tolerance_ms: f64,
    /// Decay half-relevance horizon (ms)
    pub decay_horizon_ms: f64,
    /// Minimum same-bucket samples before ratio mode may classify
    pub min_ratio_samples: usize,
    /// Pairs farther apart than this are not visually linked (ms)
    pub max_linked_delta_ms: f64,

    /// Ratio-mode tier table for the spacing driver
    pub spacing_ratio: RatioLadder,
    /// Absolute spacing floor (px); smaller observed gaps are too volatile
    /// for ratio classification
    pub min_spacing_px: f64,
    /// Positional leniency subtracted per slider endpoint (px)
    pub slider_leniency_px: f64,

    /// Start-gap ladder for the concurrency driver (ms)
    pub concurrency: FloorLadder,

    /// Minimum-gap thresholds around special events
    pub gap: GapThresholds,

    /// Volume ladder for active cues (percent)
    pub audibility_active: FloorLadder,
    /// Volume ladder for passive cues (percent)
    pub audibility_passive: FloorLadder,
    /// Practical minimum audible volume; observations clamp up to this
    pub min_audible_percent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope: ScopeMode::Ignored,
            snap_tolerance_ms: 5.0,
            decay_horizon_ms: 4000.0,
            min_ratio_samples: 3,
            max_linked_delta_ms: 180.0,
            spacing_ratio: RatioLadder::default(),
            // 4x a size-normalized circle radius
            min_spacing_px: 4.0 * 52.0,
            slider_leniency_px: 52.0,
            concurrency: FloorLadder::new(vec![(Tier::Problem, 0.0), (Tier::Warning, 10.0)]),
            gap: GapThresholds::difficulty_table(),
            audibility_active: FloorLadder::new(vec![(Tier::Warning, 10.0), (Tier::Minor, 20.0)]),
            audibility_passive: FloorLadder::new(vec![(Tier::Warning, 5.0), (Tier::Minor, 10.0)]),
            min_audible_percent: 5.0,
        }
    }
}

impl EngineConfig {
    /// Default configuration for lane-based modes
    pub fn lane_based() -> Self {
        Self {
            scope: ScopeMode::Lane,
            ..Self::default()
        }
    }
}
