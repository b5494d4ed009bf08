use chrono::{DateTime, Utc};
use tzclock_protocol::{RenderCommand, SharedStr, Viewport};

use crate::model::{parse_zone, resolve_zone};
use crate::scroll::ScrollState;
use crate::settings::Settings;
use crate::views::render_timeline;

/// Something a host can paint.
pub trait Drawable {
    fn draw(&self, now: DateTime<Utc>, viewport: &Viewport) -> Vec<RenderCommand>;
}

/// Something that reacts to vertical wheel input.
pub trait Scrollable {
    /// Returns whether the host should repaint.
    fn scroll(&mut self, delta_y: f64) -> bool;
}

/// The timezone timeline: the active column list plus the scroll position.
///
/// `now` is passed on every draw rather than cached, so an idle view keeps
/// advancing with real time.
#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    timezones: Vec<SharedStr>,
    scroll: ScrollState,
}

impl TimelineView {
    pub fn new(settings: &Settings) -> Self {
        warn_unknown(&settings.timezones);
        Self {
            timezones: settings.timezones.clone(),
            scroll: ScrollState::default(),
        }
    }

    pub fn timezones(&self) -> &[SharedStr] {
        &self.timezones
    }

    /// Replace the column list. Returns whether a repaint is needed.
    pub fn set_timezones(&mut self, timezones: Vec<SharedStr>) -> bool {
        if self.timezones == timezones {
            return false;
        }
        log::info!("showing {} timezone column(s)", timezones.len());
        warn_unknown(&timezones);
        self.timezones = timezones;
        true
    }

    /// Reload from a changed settings value.
    pub fn apply_settings(&mut self, settings: &Settings) -> bool {
        self.set_timezones(settings.timezones.clone())
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset_minutes()
    }

    /// Columns whose identifier is unusable and that therefore show UTC.
    pub fn fallback_zones(&self) -> Vec<&SharedStr> {
        self.timezones
            .iter()
            .filter(|id| resolve_zone(id).is_fallback())
            .collect()
    }
}

// Once per list change; the per-frame fallback stays quiet.
fn warn_unknown(timezones: &[SharedStr]) {
    for id in timezones {
        if let Err(e) = parse_zone(id) {
            log::warn!("{e}; the column will show UTC");
        }
    }
}

impl Drawable for TimelineView {
    fn draw(&self, now: DateTime<Utc>, viewport: &Viewport) -> Vec<RenderCommand> {
        render_timeline(&self.timezones, self.scroll.reference(now), viewport)
    }
}

impl Scrollable for TimelineView {
    fn scroll(&mut self, delta_y: f64) -> bool {
        self.scroll.apply_wheel(delta_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20)
            .single()
            .expect("unambiguous UTC time")
    }

    #[test]
    fn scroll_round_trip_restores_layout() {
        let mut view = TimelineView::new(&Settings::new(["Europe/Berlin", "America/Asuncion"]));
        let vp = Viewport::new(600.0, 500.0);
        let before = view.draw(now(), &vp);

        assert!(view.scroll(1.75));
        assert_ne!(view.draw(now(), &vp), before);
        assert!(view.scroll(-1.75));
        assert_eq!(view.scroll_offset(), 0.0);
        assert_eq!(view.draw(now(), &vp), before);

        // 0.1 does not cancel exactly in binary; the layout still does.
        for _ in 0..3 {
            assert!(view.scroll(0.1));
        }
        assert_ne!(view.draw(now(), &vp), before);
        for _ in 0..3 {
            assert!(view.scroll(-0.1));
        }
        assert!(view.scroll_offset().abs() < 1e-9);
        assert_eq!(view.draw(now(), &vp), before);
    }

    #[test]
    fn one_tick_moves_every_column_equally() {
        let mut view = TimelineView::new(&Settings::new(["UTC", "Asia/Kolkata"]));
        let vp = Viewport::new(400.0, 300.0);
        let first_row_y = |cmds: &[RenderCommand]| -> Vec<f64> {
            // First background rect after each column's clip.
            let mut ys = Vec::new();
            let mut want = false;
            for c in cmds {
                match c {
                    RenderCommand::SetClip { .. } => want = true,
                    RenderCommand::DrawRect { rect, .. } if want => {
                        ys.push(rect.y);
                        want = false;
                    }
                    _ => {}
                }
            }
            ys
        };
        let before = first_row_y(&view.draw(now(), &vp));
        view.scroll(0.2);
        let after = first_row_y(&view.draw(now(), &vp));
        assert_eq!(before.len(), 2);
        let shifts: Vec<f64> = before.iter().zip(&after).map(|(b, a)| a - b).collect();
        assert!((shifts[0] - shifts[1]).abs() < 1e-9, "{shifts:?}");
        assert!(shifts[0] != 0.0);
    }

    #[test]
    fn settings_reload_replaces_columns() {
        let mut view = TimelineView::new(&Settings::default());
        assert_eq!(view.timezones(), ["UTC"]);
        assert!(!view.apply_settings(&Settings::default()));
        assert!(view.apply_settings(&Settings::from_csv("Asia/Tokyo,Europe/London")));
        assert_eq!(view.timezones().len(), 2);
        assert!(view.fallback_zones().is_empty());
        assert!(view.apply_settings(&Settings::from_csv("Asia/Tokyo,Mars/Base,  ")));
        assert_eq!(view.fallback_zones(), ["Mars/Base"]);
        assert!(view.set_timezones(Vec::new()));
        assert!(view.draw(now(), &Viewport::new(300.0, 200.0)).is_empty());
    }
}
