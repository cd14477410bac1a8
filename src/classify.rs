//! Severity tiers and threshold ladders.
//!
//! Two classification modes share the [`Tier`] enum:
//!
//! * **Ratio mode** ([`RatioLadder`]): observed / expected against a
//!   descending bound table; the highest exceeded bound wins, values at or
//!   below the lowest bound are not reported.
//! * **Fixed-floor mode** ([`FloorLadder`]): a single observed value
//!   against ascending bounds; the lowest crossed bound wins. Ladders for
//!   different context categories are independent of each other; only
//!   bounds *within* one ladder are mutually exclusive.

use serde::{Deserialize, Serialize};

/// Ordered severity: `Minor < Warning < Problem`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Minor,
    Warning,
    Problem,
}

/// Descending threshold table for ratio-mode classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioLadder {
    /// `(tier, exclusive lower bound)` pairs, most severe first
    pub bounds: Vec<(Tier, f64)>,
}

impl RatioLadder {
    pub fn new(bounds: Vec<(Tier, f64)>) -> Self {
        Self { bounds }
    }

    /// Highest tier whose bound the ratio exceeds, if any
    pub fn classify(&self, ratio: f64) -> Option<Tier> {
        self.bounds
            .iter()
            .find(|(_, bound)| ratio > *bound)
            .map(|(tier, _)| *tier)
    }
}

impl Default for RatioLadder {
    /// Spacing-anomaly defaults: ratio > 15 is a problem, > 2 a warning
    fn default() -> Self {
        Self::new(vec![(Tier::Problem, 15.0), (Tier::Warning, 2.0)])
    }
}

/// Ascending threshold table for fixed-floor classification
///
/// An observed value crosses a bound when it is at or below it; the first
/// (most severe) crossed bound wins, so a value past the Problem bound is
/// never additionally reported as Warning or Minor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLadder {
    /// `(tier, inclusive upper bound)` pairs, most severe (lowest bound) first
    pub bounds: Vec<(Tier, f64)>,
}

impl FloorLadder {
    pub fn new(bounds: Vec<(Tier, f64)>) -> Self {
        Self { bounds }
    }

    /// Most severe tier whose bound the value is at or below, if any
    pub fn classify(&self, observed: f64) -> Option<Tier> {
        self.bounds
            .iter()
            .find(|(_, bound)| observed <= *bound)
            .map(|(tier, _)| *tier)
    }

    /// Largest bound in the ladder; drivers use it to early-exit forward
    /// scans over a time-sorted sequence
    pub fn max_bound(&self) -> f64 {
        self.bounds
            .iter()
            .map(|(_, bound)| *bound)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Ladder with every bound scaled by `factor` (used by the continuous
    /// gap-threshold preset)
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.bounds
                .iter()
                .map(|(tier, bound)| (*tier, bound * factor))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Minor < Tier::Warning);
        assert!(Tier::Warning < Tier::Problem);
    }

    #[test]
    fn test_ratio_ladder_highest_exceeded_wins() {
        let ladder = RatioLadder::default();
        assert_eq!(ladder.classify(20.0), Some(Tier::Problem));
        assert_eq!(ladder.classify(15.0), Some(Tier::Warning));
        assert_eq!(ladder.classify(3.0), Some(Tier::Warning));
    }

    #[test]
    fn test_ratio_at_or_below_lowest_bound_not_reported() {
        let ladder = RatioLadder::default();
        assert_eq!(ladder.classify(2.0), None);
        assert_eq!(ladder.classify(1.0), None);
    }

    #[test]
    fn test_floor_ladder_lowest_crossed_wins() {
        let ladder = FloorLadder::new(vec![(Tier::Problem, 0.0), (Tier::Warning, 10.0)]);
        assert_eq!(ladder.classify(-5.0), Some(Tier::Problem));
        assert_eq!(ladder.classify(0.0), Some(Tier::Problem));
        assert_eq!(ladder.classify(5.0), Some(Tier::Warning));
        assert_eq!(ladder.classify(20.0), None);
    }

    #[test]
    fn test_floor_ladder_problem_excludes_lower_tiers() {
        // Property: one ladder yields at most one tier per observation.
        let ladder = FloorLadder::new(vec![
            (Tier::Problem, 5.0),
            (Tier::Warning, 10.0),
            (Tier::Minor, 20.0),
        ]);
        assert_eq!(ladder.classify(3.0), Some(Tier::Problem));
        assert_eq!(ladder.classify(8.0), Some(Tier::Warning));
        assert_eq!(ladder.classify(15.0), Some(Tier::Minor));
    }

    #[test]
    fn test_floor_ladder_max_bound() {
        let ladder = FloorLadder::new(vec![(Tier::Problem, 0.0), (Tier::Warning, 10.0)]);
        assert_eq!(ladder.max_bound(), 10.0);
    }

    #[test]
    fn test_floor_ladder_scaling() {
        let ladder = FloorLadder::new(vec![(Tier::Problem, 2.0), (Tier::Warning, 3.0)]);
        let scaled = ladder.scaled(500.0);
        assert_eq!(scaled.classify(1400.0), Some(Tier::Warning));
        assert_eq!(scaled.classify(900.0), Some(Tier::Problem));
    }
}
