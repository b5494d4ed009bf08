use chrono::{DateTime, Utc};

use crate::model::reference_instant;

/// Minutes of virtual time per unit of wheel delta.
pub const SCROLL_GAIN: f64 = 25.0;

/// Accumulated scroll position, in minutes. Unbounded in both directions.
///
/// Opposite deltas may leave float rounding residue in the offset; the
/// reference instant is rounded to whole milliseconds, so the layout is
/// unaffected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    offset_minutes: f64,
}

impl ScrollState {
    pub fn new(offset_minutes: f64) -> Self {
        Self { offset_minutes }
    }

    pub fn offset_minutes(&self) -> f64 {
        self.offset_minutes
    }

    /// Apply one vertical wheel event. Returns whether a repaint is needed.
    ///
    /// Non-finite deltas are dropped so a bad device event cannot poison the
    /// offset.
    pub fn apply_wheel(&mut self, delta: f64) -> bool {
        if !delta.is_finite() || delta == 0.0 {
            return false;
        }
        let next = self.offset_minutes + delta * SCROLL_GAIN;
        if !next.is_finite() {
            log::debug!("ignoring wheel delta {delta}: offset would overflow");
            return false;
        }
        self.offset_minutes = next;
        true
    }

    /// The instant at the top of the view for a repaint at `now`.
    pub fn reference(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        reference_instant(now, self.offset_minutes)
    }
}
