use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use super::zone::resolve_zone;

/// Height of one hour of real time, in pixels.
pub const HOUR_HEIGHT: f64 = 32.0;
/// Height of the header band holding the zone names.
pub const HEADER_HEIGHT: f64 = 40.0;
/// How far before "now" the top of an unscrolled view sits.
pub const LOOK_BACK_SECS: i64 = 2 * 24 * 3600;

/// Upper bound on rows per column, a leap year of hours.
pub const MAX_ROWS: u32 = 366 * 24;

const STEP_SECS: i64 = 3600;
// Keeps every reachable instant (plus a viewport's worth of hours) inside
// chrono's representable range of roughly ±262 000 years.
const MAX_REFERENCE_SECS: i64 = 7_800_000_000_000;

/// Background category of an hour row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Night,
    Day,
    Default,
}

impl Background {
    /// `Night` for 22–05, `Day` for 08–18, `Default` for the twilight hours
    /// in between. Both ranges are inclusive.
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            22.. | 0..=5 => Background::Night,
            8..=18 => Background::Day,
            _ => Background::Default,
        }
    }
}

/// Rendering metadata for one hour slot of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDescriptor {
    /// Local wall-clock hour, 0–23.
    pub local_hour: u32,
    /// Local civil date of the row.
    pub local_date: NaiveDate,
    /// The local hour is not the one following the previous row's.
    pub is_dst_jump: bool,
    /// Derived minus expected local hour, normalized into `-12..12`.
    /// Zero unless `is_dst_jump`.
    pub jump_delta_hours: i32,
    /// The civil date advanced at this row.
    pub is_date_rollover: bool,
    /// Top edge in viewport pixels. Negative or under the header for the
    /// partially hidden first row.
    pub row_top_y: f64,
    pub background: Background,
}

impl RowDescriptor {
    /// `HH:00`.
    pub fn hour_label(&self) -> String {
        format!("{:02}:00", self.local_hour)
    }

    /// Abbreviated weekday, day of month, abbreviated month: `Sun 28 Mar`.
    pub fn date_label(&self) -> String {
        self.local_date.format("%a %d %b").to_string()
    }

    /// Signed jump size: `+1 hr`, `-1 hr`.
    pub fn delta_label(&self) -> String {
        format!("{:+} hr", self.jump_delta_hours)
    }
}

/// Reference instant for a repaint: `now` minus the look-back, shifted by the
/// scroll offset in minutes.
///
/// Millisecond precision keeps row positions continuous in the offset.
/// Non-finite offsets are treated as zero, and the result saturates at
/// `±MAX_REFERENCE_SECS` so that any finite offset still renders.
pub fn reference_instant(now: DateTime<Utc>, scroll_minutes: f64) -> DateTime<Utc> {
    let limit_ms = MAX_REFERENCE_SECS * 1000;
    let shift_ms = if scroll_minutes.is_finite() {
        // The clamp bounds the float before the saturating cast.
        (scroll_minutes * 60_000.0)
            .round()
            .clamp(-2.0 * limit_ms as f64, 2.0 * limit_ms as f64) as i64
    } else {
        0
    };
    let ms = now
        .timestamp_millis()
        .saturating_sub(LOOK_BACK_SECS * 1000)
        .saturating_add(shift_ms)
        .clamp(-limit_ms, limit_ms);
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// Fraction of the current real-time hour already elapsed at `instant`.
fn hour_fraction(instant: DateTime<Utc>) -> f64 {
    let secs = instant.timestamp().rem_euclid(STEP_SECS) as f64
        + f64::from(instant.timestamp_subsec_nanos()) / 1e9;
    secs / STEP_SECS as f64
}

/// Fold a raw hour difference into `-12..12`, so a jump across midnight
/// (`01 - 00`, `23 - 00`) reads as the ±1 it really is.
fn normalize_delta(raw: i32) -> i32 {
    (raw + 12).rem_euclid(24) - 12
}

/// Hour rows of one column, top to bottom.
///
/// Rows are spaced by real elapsed time, so a DST change shows up as a
/// skipped or repeated local hour rather than as a geometric special case.
#[derive(Debug, Clone)]
pub struct Rows {
    tz: Tz,
    next_instant: Option<DateTime<Utc>>,
    index: u32,
    frac: f64,
    viewport_height: f64,
    // Expected local hour of the next row, before wrapping at 24.
    expected_hour: u32,
    latest_date: Option<NaiveDate>,
}

impl Rows {
    pub fn new(tz: Tz, reference: DateTime<Utc>, viewport_height: f64) -> Self {
        let expected_hour = reference.with_timezone(&tz).hour();
        Self {
            tz,
            next_instant: Some(reference),
            index: 0,
            frac: hour_fraction(reference),
            viewport_height,
            expected_hour,
            latest_date: None,
        }
    }
}

impl Iterator for Rows {
    type Item = RowDescriptor;

    fn next(&mut self) -> Option<RowDescriptor> {
        let instant = self.next_instant?;

        let row_top_y = HEADER_HEIGHT + HOUR_HEIGHT * (f64::from(self.index) - self.frac);
        // A non-finite height has no bottom edge to stop at.
        if !self.viewport_height.is_finite()
            || row_top_y > self.viewport_height
            || self.index >= MAX_ROWS
        {
            self.next_instant = None;
            return None;
        }

        // Re-derived every row; counting hours locally would miss DST jumps.
        let local = instant.with_timezone(&self.tz);
        let hour = local.hour();
        let date = local.date_naive();

        let expected = self.expected_hour % 24;
        let is_dst_jump = hour != expected;
        let jump_delta_hours = if is_dst_jump {
            normalize_delta(hour as i32 - expected as i32)
        } else {
            0
        };

        let wrapped = !is_dst_jump && self.expected_hour == 24;
        let advanced = self.latest_date.is_some_and(|d| date > d);
        let is_date_rollover = wrapped || advanced;

        self.expected_hour = hour + 1;
        self.latest_date = Some(self.latest_date.map_or(date, |d| d.max(date)));
        self.index += 1;
        self.next_instant = instant.checked_add_signed(TimeDelta::seconds(STEP_SECS));

        Some(RowDescriptor {
            local_hour: hour,
            local_date: date,
            is_dst_jump,
            jump_delta_hours,
            is_date_rollover,
            row_top_y,
            background: Background::of_hour(hour),
        })
    }
}

/// Rows for `timezone_id` starting at `reference`, as many as fit in
/// `viewport_height` (at most `MAX_ROWS`; none for a non-finite height).
///
/// Unknown identifiers render as UTC. The result depends only on the
/// arguments, so calling again restarts from the top.
pub fn compute_rows(timezone_id: &str, reference: DateTime<Utc>, viewport_height: f64) -> Rows {
    Rows::new(resolve_zone(timezone_id).tz(), reference, viewport_height)
}
