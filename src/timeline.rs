//! Ambient-volume timeline with a forward-only lookup cursor.
//!
//! Timing/control lines set the ambient feedback volume from their start
//! time until the next line. The audibility driver queries cue times in
//! non-decreasing order, so the cursor only ever advances; it never rescans
//! from the start.

use crate::event::{EventKind, TimedEvent};

/// Ambient volume before the first line takes effect
pub const DEFAULT_AMBIENT_VOLUME: f64 = 100.0;

/// One volume change point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub time: f64,
    pub volume: f64,
}

/// Time-sorted list of ambient volume change points
#[derive(Debug, Clone, Default)]
pub struct VolumeTimeline {
    points: Vec<VolumePoint>,
}

impl VolumeTimeline {
    /// Extract volume change points from a time-sorted event list
    ///
    /// Only `Line` events carrying a volume contribute.
    pub fn from_events(events: &[TimedEvent]) -> Self {
        let points = events
            .iter()
            .filter(|e| e.kind == EventKind::Line)
            .filter_map(|e| {
                e.volume.map(|volume| VolumePoint {
                    time: e.time,
                    volume,
                })
            })
            .collect();
        Self { points }
    }

    pub fn from_points(points: Vec<VolumePoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Forward-only cursor over this timeline
    pub fn cursor(&self) -> VolumeCursor<'_> {
        VolumeCursor {
            timeline: self,
            next: 0,
        }
    }

    /// Reference lookup that rescans from the start on every query
    ///
    /// Exists to pin down the cursor's semantics in tests; quadratic, so
    /// not used by any driver.
    pub fn volume_at_rescan(&self, t: f64) -> f64 {
        self.points
            .iter()
            .take_while(|p| p.time <= t)
            .last()
            .map_or(DEFAULT_AMBIENT_VOLUME, |p| p.volume)
    }
}

/// Monotone lookup cursor; query times must be non-decreasing
#[derive(Debug)]
pub struct VolumeCursor<'a> {
    timeline: &'a VolumeTimeline,
    /// Index of the first point that has not yet taken effect
    next: usize,
}

impl VolumeCursor<'_> {
    /// Ambient volume active at time `t`
    pub fn volume_at(&mut self, t: f64) -> f64 {
        let points = &self.timeline.points;
        while self.next < points.len() && points[self.next].time <= t {
            self.next += 1;
        }
        if self.next == 0 {
            DEFAULT_AMBIENT_VOLUME
        } else {
            points[self.next - 1].volume
        }
    }
}
