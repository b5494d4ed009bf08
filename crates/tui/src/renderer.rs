use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::{Buffer, Cell},
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use tzclock_core::{Drawable, Scrollable, TimelineView, text::fit_lines};
use tzclock_protocol::{RenderCommand, TextAlign, ThemeToken, Viewport};

/// Logical pixels covered by one terminal cell.
pub const CELL_W: f64 = 4.0;
pub const CELL_H: f64 = 8.0;

const LINE_STEP: f64 = 1.0;
// One day of wheel ticks at 25 minutes each.
const PAGE_STEP: f64 = 1440.0 / tzclock_core::scroll::SCROLL_GAIN;

pub fn theme_to_color(token: ThemeToken) -> Color {
    let [r, g, b, _] = token.color().to_rgba8();
    Color::Rgb(r, g, b)
}

/// Half-open cell range `[x0, x1) × [y0, y1)` relative to the paint area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cells {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
}

impl Cells {
    fn intersect(self, other: Cells) -> Cells {
        Cells {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

fn to_cell(v: f64, cell: f64, limit: u16) -> u16 {
    (v / cell).floor().clamp(0.0, f64::from(limit)) as u16
}

// Cells whose centers fall inside `[lo, hi)`.
fn covered(lo: f64, hi: f64, cell: f64, limit: u16) -> (u16, u16) {
    let first = (lo / cell - 0.5).ceil().clamp(0.0, f64::from(limit)) as u16;
    let end = (hi / cell - 0.5).ceil().clamp(0.0, f64::from(limit)) as u16;
    (first, end.max(first))
}

fn cells_of(rect: &tzclock_protocol::Rect, area: Rect) -> Cells {
    let (x0, x1) = covered(rect.x, rect.right(), CELL_W, area.width);
    let (y0, y1) = covered(rect.y, rect.bottom(), CELL_H, area.height);
    Cells { x0, y0, x1, y1 }
}

/// Paint a command list onto `buf` inside `area`, one cell per
/// `CELL_W × CELL_H` logical pixels.
pub fn paint(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    let full = Cells {
        x0: 0,
        y0: 0,
        x1: area.width,
        y1: area.height,
    };
    let mut clip_stack: Vec<Cells> = Vec::new();
    let mut clip = full;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color } => {
                let cells = cells_of(rect, area).intersect(clip);
                let bg = theme_to_color(*color);
                for y in cells.y0..cells.y1 {
                    for x in cells.x0..cells.x1 {
                        if let Some(cell) = cell_at(buf, area, clip, x, y) {
                            cell.set_char(' ').set_bg(bg);
                        }
                    }
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let fg = theme_to_color(*color);
                if (to.x - from.x).abs() < (to.y - from.y).abs() {
                    // Lines sit on a pixel boundary; snap to the cell left of it.
                    let x = to_cell((from.x - 1.0).max(0.0), CELL_W, area.width);
                    let y0 = to_cell(from.y.min(to.y), CELL_H, area.height);
                    let y1 = (from.y.max(to.y) / CELL_H).ceil().clamp(0.0, f64::from(area.height))
                        as u16;
                    for y in y0..y1 {
                        if let Some(cell) = cell_at(buf, area, clip, x, y) {
                            cell.set_char('│').set_fg(fg);
                        }
                    }
                } else {
                    let y = to_cell((from.y - 1.0).max(0.0), CELL_H, area.height);
                    let x0 = to_cell(from.x.min(to.x), CELL_W, area.width);
                    let x1 =
                        (from.x.max(to.x) / CELL_W).ceil().clamp(0.0, f64::from(area.width)) as u16;
                    for x in x0..x1 {
                        if let Some(cell) = cell_at(buf, area, clip, x, y) {
                            let ch = if cell.symbol() == "│" { '┼' } else { '─' };
                            cell.set_char(ch).set_fg(fg);
                        }
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let len = text.chars().count() as f64;
                let col = (position.x / CELL_W).floor()
                    - match align {
                        TextAlign::Left => 0.0,
                        TextAlign::Center => (len / 2.0).floor(),
                        TextAlign::Right => len,
                    };
                let row = (position.y / CELL_H).floor();
                write_line(buf, area, clip, col, row, text, theme_to_color(*color));
            }
            RenderCommand::DrawTextBlock {
                rect,
                text,
                color,
                align,
                wrap,
                overflow,
                ..
            } => {
                let per_line = (rect.w / CELL_W).floor().max(0.0) as usize;
                let max_lines = (rect.h / CELL_H).floor().max(0.0) as usize;
                if per_line == 0 || max_lines == 0 {
                    continue;
                }
                let lines = fit_lines(text, per_line, max_lines, *wrap, *overflow);
                let fg = theme_to_color(*color);
                let top = (rect.y / CELL_H).floor() + ((max_lines - lines.len()) / 2) as f64;
                for (i, line) in lines.iter().enumerate() {
                    let slack = (per_line - line.chars().count()) as f64;
                    let col = (rect.x / CELL_W).ceil()
                        + match align {
                            TextAlign::Left => 0.0,
                            TextAlign::Center => (slack / 2.0).floor(),
                            TextAlign::Right => slack,
                        };
                    write_line(buf, area, clip, col, top + i as f64, line, fg);
                }
            }
            RenderCommand::SetClip { rect } => {
                clip_stack.push(clip);
                clip = clip.intersect(cells_of(rect, area));
            }
            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    clip = prev;
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

fn cell_at(buf: &mut Buffer, area: Rect, clip: Cells, x: u16, y: u16) -> Option<&mut Cell> {
    if clip.contains(x, y) {
        buf.cell_mut((area.x + x, area.y + y))
    } else {
        None
    }
}

// Characters keep the background already painted under them.
fn write_line(buf: &mut Buffer, area: Rect, clip: Cells, col: f64, row: f64, text: &str, fg: Color) {
    if row < 0.0 || row >= f64::from(area.height) {
        return;
    }
    let y = row as u16;
    for (i, ch) in text.chars().enumerate() {
        let x = col + i as f64;
        if x < 0.0 {
            continue;
        }
        if x >= f64::from(area.width) {
            break;
        }
        let x = x as u16;
        if !clip.contains(x, y) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(ch).set_fg(fg);
        }
    }
}

/// Logical viewport for a terminal content area.
pub fn viewport_for(area: Rect) -> Viewport {
    Viewport::new(
        f64::from(area.width) * CELL_W,
        f64::from(area.height) * CELL_H,
    )
}

fn status_line(view: &TimelineView) -> String {
    let fallback = view.fallback_zones();
    let unknown = if fallback.is_empty() {
        String::new()
    } else {
        let ids: Vec<&str> = fallback.iter().map(|id| id.as_str()).collect();
        format!("unknown, shown as UTC: {} | ", ids.join(","))
    };
    format!(
        " tzclock | {} | {unknown}scroll {:+.0} min | wheel/↑↓ scroll | PgUp/PgDn day | q quit ",
        view.timezones().join(","),
        view.scroll_offset()
    )
}

/// Run the interactive view until the user quits.
///
/// The terminal is restored even when drawing or input fails.
pub fn run_tui(view: &mut TimelineView) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, view);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    view: &mut TimelineView,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let content = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
            let status = Rect::new(area.x, content.bottom(), area.width, area.height - content.height);

            let commands = view.draw(Utc::now(), &viewport_for(content));
            paint(frame.buffer_mut(), content, &commands);

            let bar = Block::default()
                .title(status_line(view))
                .style(
                    Style::default()
                        .fg(theme_to_color(ThemeToken::HeaderText))
                        .bg(theme_to_color(ThemeToken::HeaderBackground)),
                );
            frame.render_widget(bar, status);
        })?;

        if event::poll(Duration::from_millis(250))? {
            let delta = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down | KeyCode::Char('j') => LINE_STEP,
                    KeyCode::Up | KeyCode::Char('k') => -LINE_STEP,
                    KeyCode::PageDown => PAGE_STEP,
                    KeyCode::PageUp => -PAGE_STEP,
                    _ => 0.0,
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => LINE_STEP,
                    MouseEventKind::ScrollUp => -LINE_STEP,
                    _ => 0.0,
                },
                _ => 0.0,
            };
            if delta != 0.0 && view.scroll(delta) {
                log::trace!("scrolled to {:+.1} min", view.scroll_offset());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzclock_protocol::{Point, TextOverflow, TextWrap};

    fn px(x: f64, y: f64, w: f64, h: f64) -> tzclock_protocol::Rect {
        tzclock_protocol::Rect::new(x, y, w, h)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn rect_fills_cells_by_center() {
        let area = Rect::new(0, 0, 10, 6);
        let mut buf = Buffer::empty(area);
        paint(
            &mut buf,
            area,
            &[RenderCommand::DrawRect {
                rect: px(0.0, 8.0, 12.0, 17.0),
                color: ThemeToken::NightBackground,
            }],
        );
        let night = theme_to_color(ThemeToken::NightBackground);
        assert_eq!(buf[(0, 1)].bg, night);
        assert_eq!(buf[(2, 2)].bg, night);
        assert_ne!(buf[(3, 1)].bg, night);
        assert_ne!(buf[(0, 0)].bg, night);
        assert_ne!(buf[(0, 3)].bg, night);
    }

    #[test]
    fn clip_limits_painting() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        paint(
            &mut buf,
            area,
            &[
                RenderCommand::SetClip {
                    rect: px(0.0, 0.0, 20.0, 16.0),
                },
                RenderCommand::DrawText {
                    position: Point::new(0.0, 0.0),
                    text: "Europe/Berlin".into(),
                    color: ThemeToken::HourLabel,
                    font_size: 14.0,
                    align: TextAlign::Left,
                },
                RenderCommand::ClearClip,
                RenderCommand::DrawText {
                    position: Point::new(0.0, 8.0),
                    text: "UTC".into(),
                    color: ThemeToken::HourLabel,
                    font_size: 14.0,
                    align: TextAlign::Left,
                },
            ],
        );
        assert_eq!(row_text(&buf, 0), "Europ     ");
        assert_eq!(row_text(&buf, 1), "UTC       ");
    }

    #[test]
    fn separators_meet() {
        let area = Rect::new(0, 0, 6, 6);
        let mut buf = Buffer::empty(area);
        paint(
            &mut buf,
            area,
            &[
                RenderCommand::DrawLine {
                    from: Point::new(12.5, 0.0),
                    to: Point::new(12.5, 40.0),
                    color: ThemeToken::ColumnSeparator,
                    width: 1.0,
                },
                RenderCommand::DrawLine {
                    from: Point::new(0.0, 40.5),
                    to: Point::new(24.0, 40.5),
                    color: ThemeToken::RowSeparator,
                    width: 1.0,
                },
            ],
        );
        assert_eq!(buf[(2, 0)].symbol(), "│");
        assert_eq!(buf[(2, 4)].symbol(), "┼");
        assert_eq!(row_text(&buf, 4), "──┼───");
        assert_eq!(buf[(2, 5)].symbol(), " ");
    }

    #[test]
    fn header_block_wraps_and_centers() {
        let area = Rect::new(0, 0, 12, 5);
        let mut buf = Buffer::empty(area);
        paint(
            &mut buf,
            area,
            &[RenderCommand::DrawTextBlock {
                rect: px(4.0, 0.0, 40.0, 38.0),
                text: "Europe/Berlin".into(),
                color: ThemeToken::HeaderText,
                font_size: 12.0,
                align: TextAlign::Center,
                wrap: TextWrap::WordChar,
                overflow: TextOverflow::EllipsisEnd,
            }],
        );
        // 10 cells per line, 4 lines; two lines of text start on row 1.
        assert_eq!(row_text(&buf, 0).trim(), "");
        assert_eq!(row_text(&buf, 1), "  Europe/   ");
        assert_eq!(row_text(&buf, 2), "   Berlin   ");
    }

    #[test]
    fn timeline_fills_the_terminal() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let view = TimelineView::new(&tzclock_core::Settings::new(["UTC", "Asia/Tokyo"]));
        let now = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        paint(&mut buf, area, &view.draw(now, &viewport_for(area)));

        assert!(row_text(&buf, 1).contains("UTC"));
        assert!(row_text(&buf, 1).contains("Asia/Tokyo"));
        assert!(row_text(&buf, 4).contains('─'));
        // Hour labels land on row boundaries, four terminal rows apart.
        let labelled: Vec<u16> = (5..20)
            .filter(|&y| row_text(&buf, y).contains(":00"))
            .collect();
        assert!(labelled.len() >= 2, "{labelled:?}");
        assert!(labelled.windows(2).all(|w| w[1] - w[0] == 4), "{labelled:?}");
    }

    #[test]
    fn status_line_flags_unknown_zones() {
        let view = TimelineView::new(&tzclock_core::Settings::new(["UTC", "Nowhere/City"]));
        let line = status_line(&view);
        assert!(line.contains("unknown, shown as UTC: Nowhere/City"), "{line}");
        let view = TimelineView::new(&tzclock_core::Settings::default());
        assert!(!status_line(&view).contains("unknown"));
    }

    #[test]
    fn page_step_is_a_day() {
        assert_eq!(PAGE_STEP * tzclock_core::scroll::SCROLL_GAIN, 1440.0);
    }
}
