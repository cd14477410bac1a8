//! Engine facade: validate once, run every driver, merge findings.

use tracing::debug;

use crate::config::EngineConfig;
use crate::event::{EventSequence, TimedEvent};
use crate::error::EngineError;
use crate::finding::Finding;
use crate::rules::{audibility, concurrency, gap, spacing};

/// Runs the four rule drivers over one chart
///
/// Classification is a pure function of the sequence and the
/// configuration: identical inputs always produce identical finding
/// lists. Each call builds its own driver history, so independent charts
/// may be analyzed from parallel threads with separate engines (or one
/// shared `&Engine`: the config is read-only).
///
/// # Example
/// ```
/// use offbeat::config::EngineConfig;
/// use offbeat::engine::Engine;
/// use offbeat::event::{EventKind, TimedEvent};
///
/// let engine = Engine::new(EngineConfig::default());
/// let events = vec![TimedEvent {
///     time: 1000.0,
///     end_time: None,
///     position: None,
///     volume: None,
///     kind: EventKind::Spinner,
///     lane: None,
/// }];
/// let findings = engine.analyze(events).unwrap();
/// assert!(findings.is_empty()); // a lone spinner has nothing to deviate from
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the event list and analyze it
    ///
    /// # Errors
    /// Propagates the sequence contract violations from
    /// [`EventSequence::new`].
    pub fn analyze(&self, events: Vec<TimedEvent>) -> Result<Vec<Finding>, EngineError> {
        let seq = EventSequence::new(events, self.config.scope)?;
        Ok(self.analyze_sequence(&seq))
    }

    /// Analyze an already-validated sequence
    ///
    /// Findings come back ordered by primary anchor time; ties keep the
    /// fixed driver order (spacing, concurrency, gap, audibility), so the
    /// output is deterministic.
    pub fn analyze_sequence(&self, seq: &EventSequence) -> Vec<Finding> {
        let mut findings = spacing::analyze(seq, &self.config);
        findings.extend(concurrency::analyze(seq, &self.config));
        findings.extend(gap::analyze(seq, &self.config));
        findings.extend(audibility::analyze(seq, &self.config));

        findings.sort_by(|a, b| {
            a.primary_anchor()
                .partial_cmp(&b.primary_anchor())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(events = seq.len(), findings = findings.len(), "analysis complete");
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, Position, ScopeMode};
    use crate::finding::RuleKind;

    fn circle(time: f64, x: f64) -> TimedEvent {
        TimedEvent {
            time,
            end_time: None,
            position: Some(Position::new(x, 0.0)),
            volume: None,
            kind: EventKind::Circle,
            lane: None,
        }
    }

    #[test]
    fn test_unsorted_input_fails_fast() {
        let engine = Engine::default();
        let err = engine
            .analyze(vec![circle(100.0, 0.0), circle(0.0, 100.0)])
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsortedEvents { .. }));
    }

    #[test]
    fn test_lane_mode_without_lanes_fails_fast() {
        let engine = Engine::new(EngineConfig::lane_based());
        let err = engine.analyze(vec![circle(0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, EngineError::MissingLane { .. }));
    }

    #[test]
    fn test_findings_ordered_by_anchor_time() {
        // A quiet section early and a stacked pair late: the audibility
        // finding must come out first.
        let engine = Engine::default();
        let events = vec![
            TimedEvent {
                time: 0.0,
                end_time: None,
                position: None,
                volume: Some(8.0),
                kind: EventKind::Line,
                lane: None,
            },
            circle(500.0, 0.0),
            circle(2000.0, 0.0),
            circle(2000.0, 0.0),
        ];
        let findings = engine.analyze(events).unwrap();
        assert!(findings.len() >= 2);
        assert!(findings
            .windows(2)
            .all(|w| w[0].primary_anchor() <= w[1].primary_anchor()));
        assert_eq!(findings[0].rule, RuleKind::Audibility);
    }

    #[test]
    fn test_empty_sequence_is_clean() {
        let engine = Engine::default();
        assert!(engine.analyze(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_sequence_reuse_across_calls() {
        let events = vec![circle(0.0, 0.0), circle(5.0, 0.0)];
        let seq = EventSequence::new(events, ScopeMode::Ignored).unwrap();
        let engine = Engine::default();
        let first = engine.analyze_sequence(&seq);
        let second = engine.analyze_sequence(&seq);
        assert_eq!(first, second);
        assert!(!first.is_empty()); // 5 ms apart: almost concurrent
    }
}
