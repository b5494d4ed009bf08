use std::time::Duration;

use chrono::Utc;
use egui::MouseWheelUnit;
use tzclock_core::{Drawable, Scrollable, Settings, TimelineView, scroll::SCROLL_GAIN};
use tzclock_protocol::Viewport;

use crate::renderer::render_commands;

// Trackpads report pixels; this many make one wheel tick.
const POINTS_PER_TICK: f32 = 50.0;
const REPAINT_INTERVAL: Duration = Duration::from_secs(60);

/// Wheel ticks for one egui wheel event. Positive moves forward in time.
pub(crate) fn wheel_ticks(unit: MouseWheelUnit, delta_y: f32) -> f64 {
    let ticks = match unit {
        MouseWheelUnit::Line | MouseWheelUnit::Page => delta_y,
        MouseWheelUnit::Point => delta_y / POINTS_PER_TICK,
    };
    // egui reports wheel-up as positive y.
    -f64::from(ticks)
}

/// Bar text naming the columns that fell back to UTC, if any.
fn fallback_note(view: &TimelineView) -> Option<String> {
    let fallback = view.fallback_zones();
    if fallback.is_empty() {
        return None;
    }
    let ids: Vec<&str> = fallback.iter().map(|id| id.as_str()).collect();
    Some(format!("shown as UTC: {}", ids.join(", ")))
}

pub struct TzClockApp {
    view: TimelineView,
    settings: Settings,
    zones_input: String,
}

impl TzClockApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            view: TimelineView::new(&settings),
            zones_input: settings.to_csv(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn apply_zones_input(&mut self) -> bool {
        self.settings = Settings::from_csv(&self.zones_input);
        self.view.apply_settings(&self.settings)
    }

    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        ctx.input(|i| {
            for event in &i.raw.events {
                if let egui::Event::MouseWheel { unit, delta, .. } = event {
                    changed |= self.view.scroll(wheel_ticks(*unit, delta.y));
                }
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                changed |= self.view.scroll(1.0);
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                changed |= self.view.scroll(-1.0);
            }
            if i.key_pressed(egui::Key::PageDown) {
                changed |= self.view.scroll(1440.0 / SCROLL_GAIN);
            }
            if i.key_pressed(egui::Key::PageUp) {
                changed |= self.view.scroll(-1440.0 / SCROLL_GAIN);
            }
        });
        changed
    }
}

impl eframe::App for TzClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("zones").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Timezones");
                let response = ui.text_edit_singleline(&mut self.zones_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Apply").clicked() || submitted) && self.apply_zones_input() {
                    ctx.request_repaint();
                }
                ui.separator();
                ui.label(format!("{:+.0} min", self.view.scroll_offset()));
                if let Some(note) = fallback_note(&self.view) {
                    ui.separator();
                    ui.colored_label(
                        crate::theme::resolve(tzclock_protocol::ThemeToken::DstTransitionText),
                        note,
                    );
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(available, egui::Sense::hover());

                let text_focused = ctx.memory(|m| m.focused().is_some());
                if (response.hovered() || !text_focused) && self.handle_input(ctx) {
                    ctx.request_repaint();
                }

                let viewport = Viewport::new(f64::from(available.width()), f64::from(available.height()));
                let commands = self.view.draw(Utc::now(), &viewport);
                let mut painter = ui.painter_at(available);
                render_commands(&mut painter, &commands, available.min);
            });

        // Keep the hour rows moving while nobody touches the window.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
