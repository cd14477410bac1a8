//! Property-based tests with proptest.
//!
//! Pins down the engine's structural guarantees: deterministic output,
//! forward-cursor equivalence with a full rescan, symmetric snap-bucket
//! membership, and the insufficient-evidence suppression floor.

use proptest::prelude::*;

use offbeat::event::{EventKind, Position, TimedEvent};
use offbeat::snap::{ObservedSample, SampleClass, SnapBucketIndex};
use offbeat::timeline::{VolumePoint, VolumeTimeline};
use offbeat::{Engine, EngineConfig};

fn arb_chart() -> impl Strategy<Value = Vec<TimedEvent>> {
    // Deltas and feature toggles; times accumulate so the chart is sorted
    // by construction.
    prop::collection::vec(
        (
            10.0f64..400.0,          // delta to previous event
            0u8..6,                  // kind selector
            0.0f64..512.0,           // x
            0.0f64..384.0,           // y
            prop::option::of(0.0f64..100.0), // volume
        ),
        0..40,
    )
    .prop_map(|rows| {
        let mut t = 0.0;
        rows.into_iter()
            .map(|(delta, kind_sel, x, y, volume)| {
                t += delta;
                let (kind, end_time, position) = match kind_sel {
                    0 | 1 => (EventKind::Circle, None, Some(Position::new(x, y))),
                    2 => (
                        EventKind::Slider { tick_times: vec![t + 50.0] },
                        Some(t + 100.0),
                        Some(Position::new(x, y)),
                    ),
                    3 => (EventKind::Spinner, Some(t + 500.0), None),
                    4 => (EventKind::Line, None, None),
                    _ => (EventKind::Break, Some(t + 200.0), None),
                };
                TimedEvent {
                    time: t,
                    end_time,
                    position,
                    volume,
                    kind,
                    lane: None,
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Identical inputs and configuration yield byte-identical finding
    /// lists across repeated runs.
    #[test]
    fn prop_analysis_is_deterministic(events in arb_chart()) {
        let engine = Engine::new(EngineConfig::default());
        let first = engine.analyze(events.clone()).unwrap();
        let second = engine.analyze(events).unwrap();

        let a = serde_json::to_vec(&first).unwrap();
        let b = serde_json::to_vec(&second).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Findings always come out ordered by primary anchor time.
    #[test]
    fn prop_findings_ordered_by_anchor(events in arb_chart()) {
        let engine = Engine::new(EngineConfig::default());
        let findings = engine.analyze(events).unwrap();
        prop_assert!(findings
            .windows(2)
            .all(|w| w[0].primary_anchor() <= w[1].primary_anchor()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The forward-only cursor returns exactly what a full rescan from the
    /// start would, for every query over a sorted timeline and sorted
    /// query times.
    #[test]
    fn prop_cursor_matches_full_rescan(
        mut point_times in prop::collection::vec(0.0f64..100_000.0, 0..30),
        volumes in prop::collection::vec(0.0f64..100.0, 30),
        mut queries in prop::collection::vec(0.0f64..120_000.0, 1..50),
    ) {
        point_times.sort_by(|a, b| a.partial_cmp(b).unwrap());
        queries.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let points: Vec<VolumePoint> = point_times
            .iter()
            .zip(volumes.iter())
            .map(|(&time, &volume)| VolumePoint { time, volume })
            .collect();
        let timeline = VolumeTimeline::from_points(points);

        let mut cursor = timeline.cursor();
        for &t in &queries {
            prop_assert_eq!(cursor.volume_at(t), timeline.volume_at_rescan(t));
        }
    }

    /// Bucket membership is symmetric: A sees B exactly when B sees A
    /// under the same fixed-width band.
    #[test]
    fn prop_bucket_membership_symmetric(
        delta_a in 0.0f64..1000.0,
        delta_b in 0.0f64..1000.0,
        tolerance in 0.1f64..50.0,
    ) {
        let sample = |delta_ms| ObservedSample {
            delta_ms,
            magnitude: 1.0,
            time: 0.0,
            class: SampleClass::Circle,
        };

        let mut holds_a = SnapBucketIndex::new();
        holds_a.insert(sample(delta_a));
        let a_sees_b = !holds_a.lookup(delta_b, SampleClass::Circle, tolerance).is_empty();

        let mut holds_b = SnapBucketIndex::new();
        holds_b.insert(sample(delta_b));
        let b_sees_a = !holds_b.lookup(delta_a, SampleClass::Circle, tolerance).is_empty();

        prop_assert_eq!(a_sees_b, b_sees_a);
    }

    /// With exactly two historical bucket samples, the spacing driver
    /// never emits, however extreme the third observation's magnitude.
    #[test]
    fn prop_two_samples_never_classify(jump_px in 1000.0f64..1_000_000.0) {
        let circle = |time, x| TimedEvent {
            time,
            end_time: None,
            position: Some(Position::new(x, 0.0)),
            volume: None,
            kind: EventKind::Circle,
            lane: None,
        };
        let events = vec![
            circle(0.0, 0.0),
            circle(100.0, 10.0),
            circle(200.0, 20.0),
            circle(300.0, 20.0 + jump_px),
        ];
        let engine = Engine::new(EngineConfig {
            min_spacing_px: 0.0,
            ..EngineConfig::default()
        });
        let findings = engine.analyze(events).unwrap();
        prop_assert!(findings.is_empty());
    }
}
