use chrono::{DateTime, Utc};
use tzclock_protocol::{
    Point, Rect, RenderCommand, SharedStr, TextAlign, TextOverflow, TextWrap, ThemeToken, Viewport,
};

use crate::model::{
    Background, HEADER_HEIGHT, HOUR_HEIGHT, MAX_ROWS, RowDescriptor, Rows, resolve_zone,
};

const ROW_FONT_SIZE: f64 = 14.0;
const HEADER_FONT_SIZE: f64 = 12.0;
const HEADER_PADDING: f64 = 4.0;
const HOUR_LABEL_X: f64 = 5.0;
const DST_OVERLAY_X: f64 = 50.0;
const DST_LABEL_DX: f64 = 6.0;
const DATE_LABEL_DX: f64 = -14.0;
const SEPARATOR_WIDTH: f64 = 1.0;
// Puts 1px strokes and label anchors on pixel centres.
const HALF_PX: f64 = 0.5;

/// Horizontal split of the viewport into equal columns.
///
/// Column width is an integer number of pixels; the last column absorbs the
/// remainder so the columns tile the whole width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    count: usize,
    column_width: f64,
    total_width: f64,
}

impl ColumnLayout {
    /// `None` when there is nothing to lay out.
    pub fn new(count: usize, viewport_width: f64) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let total = viewport_width.max(0.0).floor();
        let column_width = (total as u64 / count as u64) as f64;
        Some(Self {
            count,
            column_width,
            total_width: total,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Nominal width shared by every column.
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn x(&self, col: usize) -> f64 {
        self.column_width * col as f64
    }

    /// Actual width of `col`, including the remainder for the last one.
    pub fn width_of(&self, col: usize) -> f64 {
        if col + 1 == self.count {
            self.total_width - self.x(col)
        } else {
            self.column_width
        }
    }
}

pub fn background_token(background: Background) -> ThemeToken {
    match background {
        Background::Night => ThemeToken::NightBackground,
        Background::Day => ThemeToken::DayBackground,
        Background::Default => ThemeToken::DefaultBackground,
    }
}

/// Render the timezone columns for a view whose top edge sits at `reference`.
///
/// Each column gets its hour rows (backgrounds, hour/date labels, DST
/// markers) clipped to its extent; the header band, separators, and zone
/// names are drawn last so they cover rows scrolled under the header.
/// An empty column list renders nothing; a non-finite dimension is treated
/// as zero.
pub fn render_timeline(
    columns: &[SharedStr],
    reference: DateTime<Utc>,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let viewport = &Viewport::new(finite_extent(viewport.width), finite_extent(viewport.height));
    let Some(layout) = ColumnLayout::new(columns.len(), viewport.width) else {
        return Vec::new();
    };

    let rows_hint = ((viewport.height / HOUR_HEIGHT) as usize).min(MAX_ROWS as usize) + 2;
    let mut commands = Vec::with_capacity(
        columns
            .len()
            .saturating_mul(rows_hint * 2 + 6)
            .saturating_add(8),
    );

    for (col, zone_id) in columns.iter().enumerate() {
        // Each column converts with its own zone; nothing carries over.
        let zone = resolve_zone(zone_id);
        let x = layout.x(col);
        let w = layout.width_of(col);

        commands.push(RenderCommand::BeginGroup {
            id: zone_id.clone(),
            label: Some(SharedStr::from(zone.tz().name())),
        });
        commands.push(RenderCommand::SetClip {
            rect: Rect::new(x, 0.0, w, viewport.height.max(0.0)),
        });

        for row in Rows::new(zone.tz(), reference, viewport.height) {
            render_row(&mut commands, &row, x, w);
        }

        commands.push(RenderCommand::ClearClip);
        commands.push(RenderCommand::EndGroup);
    }

    render_header(&mut commands, columns, &layout, viewport);
    commands
}

fn finite_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn render_row(commands: &mut Vec<RenderCommand>, row: &RowDescriptor, x: f64, w: f64) {
    let y = row.row_top_y;

    // One pixel taller than the row so rounding never leaves a gap.
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(x, y, w, HOUR_HEIGHT + 1.0),
        color: background_token(row.background),
    });

    if row.is_dst_jump {
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(
                x + DST_OVERLAY_X + HALF_PX,
                y - HOUR_HEIGHT / 2.0,
                w,
                HOUR_HEIGHT,
            ),
            color: ThemeToken::DstTransitionBackground,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0 + DST_LABEL_DX + HALF_PX, y),
            text: row.delta_label().into(),
            color: ThemeToken::DstTransitionText,
            font_size: ROW_FONT_SIZE,
            align: TextAlign::Left,
        });
    }

    if row.is_date_rollover {
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + w / 2.0 + DATE_LABEL_DX + HALF_PX, y),
            text: row.date_label().into(),
            color: ThemeToken::DayLabel,
            font_size: ROW_FONT_SIZE,
            align: TextAlign::Left,
        });
    } else {
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + HOUR_LABEL_X + HALF_PX, y),
            text: row.hour_label().into(),
            color: ThemeToken::HourLabel,
            font_size: ROW_FONT_SIZE,
            align: TextAlign::Left,
        });
    }
}

fn render_header(
    commands: &mut Vec<RenderCommand>,
    columns: &[SharedStr],
    layout: &ColumnLayout,
    viewport: &Viewport,
) {
    let width = viewport.width.max(0.0);
    let height = viewport.height.max(0.0);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, HEADER_HEIGHT),
        color: ThemeToken::HeaderBackground,
    });

    // Vertical separators at each column's right edge
    for col in 0..layout.count() {
        let edge = layout.x(col) + layout.width_of(col);
        let x = (edge + HALF_PX).min(width - HALF_PX).max(0.0);
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
            color: ThemeToken::ColumnSeparator,
            width: SEPARATOR_WIDTH,
        });
    }

    for (col, zone_id) in columns.iter().enumerate() {
        commands.push(RenderCommand::DrawTextBlock {
            rect: Rect::new(
                layout.x(col) + HEADER_PADDING,
                0.0,
                (layout.width_of(col) - 2.0 * HEADER_PADDING).max(0.0),
                HEADER_HEIGHT - 2.0,
            ),
            text: zone_id.clone(),
            color: ThemeToken::HeaderText,
            font_size: HEADER_FONT_SIZE,
            align: TextAlign::Center,
            wrap: TextWrap::WordChar,
            overflow: TextOverflow::EllipsisEnd,
        });
    }

    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, HEADER_HEIGHT + HALF_PX),
        to: Point::new(width, HEADER_HEIGHT + HALF_PX),
        color: ThemeToken::RowSeparator,
        width: SEPARATOR_WIDTH,
    });
}
