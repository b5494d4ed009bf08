use egui::text::{LayoutJob, TextWrapping};
use egui::{Align, Align2, CornerRadius, FontId, Pos2, Rect, Stroke};
use tzclock_protocol::{RenderCommand, TextAlign, TextOverflow, TextWrap};

use crate::theme;

const LINE_HEIGHT_EM: f32 = 1.2;

fn to_rect(rect: &tzclock_protocol::Rect, offset: Pos2) -> Rect {
    Rect::from_min_size(
        Pos2::new(rect.x as f32 + offset.x, rect.y as f32 + offset.y),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

fn to_pos(p: &tzclock_protocol::Point, offset: Pos2) -> Pos2 {
    Pos2::new(p.x as f32 + offset.x, p.y as f32 + offset.y)
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area. Clip
/// regions nest by intersecting with the painter's current clip.
pub fn render_commands(painter: &mut egui::Painter, commands: &[RenderCommand], offset: Pos2) {
    let mut clip_stack: Vec<Rect> = Vec::new();

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color } => {
                let egui_rect = to_rect(rect, offset);
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }
                painter.rect_filled(egui_rect, CornerRadius::ZERO, theme::resolve(*color));
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let size = *font_size as f32;
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    to_pos(position, offset),
                    anchor,
                    text.as_str(),
                    FontId::proportional(size),
                    theme::resolve(*color),
                );
            }

            RenderCommand::DrawTextBlock {
                rect,
                text,
                color,
                font_size,
                align,
                wrap,
                overflow,
            } => {
                let egui_rect = to_rect(rect, offset);
                let text_color = theme::resolve(*color);
                let font = FontId::proportional(*font_size as f32);
                let row_height = *font_size as f32 * LINE_HEIGHT_EM;

                let mut job = LayoutJob::simple(text.to_string(), font, text_color, f32::INFINITY);
                job.wrap = TextWrapping {
                    max_width: egui_rect.width(),
                    max_rows: ((egui_rect.height() / row_height).floor() as usize).max(1),
                    break_anywhere: false,
                    overflow_character: match overflow {
                        TextOverflow::EllipsisEnd => Some('…'),
                        TextOverflow::Clip => None,
                    },
                };
                if *wrap == TextWrap::None {
                    job.wrap.max_rows = 1;
                }
                job.halign = match align {
                    TextAlign::Left => Align::LEFT,
                    TextAlign::Center => Align::Center,
                    TextAlign::Right => Align::RIGHT,
                };
                let galley = painter.layout_job(job);

                // Galley rows are aligned around x = 0 for the chosen halign.
                let x = match align {
                    TextAlign::Left => egui_rect.left(),
                    TextAlign::Center => egui_rect.center().x,
                    TextAlign::Right => egui_rect.right(),
                };
                let y = egui_rect.center().y - galley.size().y / 2.0;
                painter.galley(Pos2::new(x, y), galley, text_color);
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [to_pos(from, offset), to_pos(to, offset)],
                    Stroke::new(*width as f32, theme::resolve(*color)),
                );
            }

            RenderCommand::SetClip { rect } => {
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(to_rect(rect, offset));
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic, no visual effect in egui
            }
        }
    }
}
