//! End-to-end: zone list + reference instant + viewport in, draw commands out.

use chrono::DateTime;
use tzclock_core::model::{HEADER_HEIGHT, HOUR_HEIGHT, compute_rows};
use tzclock_core::svg::render_svg;
use tzclock_core::views::render_timeline;
use tzclock_core::{Drawable, Scrollable, Settings, TimelineView};
use tzclock_protocol::{RenderCommand, SharedStr, ThemeToken, Viewport};

fn count_text(cmds: &[RenderCommand], token: ThemeToken) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, RenderCommand::DrawText { color, .. } if *color == token))
        .count()
}

#[test]
fn single_utc_column_at_fixed_instant() {
    let reference = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    let viewport = Viewport::new(300.0, 200.0);

    let rows: Vec<_> = compute_rows("UTC", reference, viewport.height).collect();
    assert_eq!(rows.len(), (200.0 / HOUR_HEIGHT).floor() as usize);
    assert!(rows.iter().all(|r| !r.is_dst_jump));
    assert!(rows.iter().filter(|r| r.is_date_rollover).count() <= 1);

    let cmds = render_timeline(&[SharedStr::from("UTC")], reference, &viewport);
    let labels =
        count_text(&cmds, ThemeToken::HourLabel) + count_text(&cmds, ThemeToken::DayLabel);
    assert_eq!(labels, rows.len());
    assert_eq!(count_text(&cmds, ThemeToken::DstTransitionText), 0);

    // 22:13:20 UTC; the first row hides partly under the header.
    assert_eq!(rows[0].local_hour, 22);
    assert!(rows[0].row_top_y < HEADER_HEIGHT);
}

#[test]
fn empty_column_list_draws_nothing() {
    let reference = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    assert!(render_timeline(&[], reference, &Viewport::new(300.0, 200.0)).is_empty());
}

#[test]
fn columns_use_their_own_zone() {
    // 2021-03-28 00:30 UTC: Berlin springs forward at 01:00 UTC,
    // Auckland is still on daylight time until April.
    let reference = DateTime::from_timestamp(1_616_891_400, 0).expect("valid timestamp");
    let viewport = Viewport::new(600.0, 400.0);
    let columns: Vec<SharedStr> = ["UTC", "Europe/Berlin", "Pacific/Auckland"]
        .into_iter()
        .map(SharedStr::from)
        .collect();

    let cmds = render_timeline(&columns, reference, &viewport);

    let mut per_column: Vec<Vec<String>> = Vec::new();
    for cmd in &cmds {
        match cmd {
            RenderCommand::BeginGroup { .. } => per_column.push(Vec::new()),
            RenderCommand::DrawText {
                text,
                color: ThemeToken::HourLabel,
                ..
            } => {
                if let Some(col) = per_column.last_mut() {
                    col.push(text.to_string());
                }
            }
            _ => {}
        }
    }
    assert_eq!(per_column.len(), 3);
    assert_eq!(per_column[0][0], "00:00");
    assert_eq!(per_column[1][0], "01:00");
    assert_eq!(per_column[2][0], "13:00");
    // Only Berlin's column carries a DST marker.
    assert_eq!(count_text(&cmds, ThemeToken::DstTransitionText), 1);
}

#[test]
fn view_renders_to_svg() {
    let mut view = TimelineView::new(&Settings::from_csv("America/Asuncion,Asia/Kathmandu"));
    view.scroll(-3.0);
    let now = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    let cmds = view.draw(now, &Viewport::new(500.0, 630.0));
    let svg = render_svg(&cmds, 500.0, 630.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("America/"));
    assert!(svg.contains("Asia/Kathmandu"));
}
