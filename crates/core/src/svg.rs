//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write as _;

use tzclock_protocol::{Rect, RenderCommand, TextAlign, TextOverflow, TextWrap, ThemeToken};

use crate::text::fit_lines;

// Rough advance of a sans glyph relative to its font size.
const GLYPH_WIDTH_EM: f64 = 0.6;
const LINE_HEIGHT_EM: f64 = 1.2;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions. Clip regions
/// become `<clipPath>` groups; text blocks are wrapped and ellipsized by an
/// approximate per-glyph width since SVG has no native text layout.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:sans-serif">"#,
    );

    let mut clip_count = 0usize;
    let mut open_clips = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    hex(*color),
                );
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{line_width}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    hex(*color),
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{}" dominant-baseline="central">{}</text>"#,
                    position.x,
                    position.y,
                    hex(*color),
                    anchor(*align),
                    escape_xml(text),
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
                let lines = layout_block(text, rect, *font_size, *wrap, *overflow);
                let x = match align {
                    TextAlign::Left => rect.x,
                    TextAlign::Center => rect.x + rect.w / 2.0,
                    TextAlign::Right => rect.right(),
                };
                let _ = write!(
                    svg,
                    r#"<text fill="{}" font-size="{font_size}" text-anchor="{}">"#,
                    hex(*color),
                    anchor(*align),
                );
                for (i, line) in lines.iter().enumerate() {
                    let y = rect.y + font_size * (1.0 + LINE_HEIGHT_EM * i as f64);
                    let _ = write!(svg, r#"<tspan x="{x}" y="{y}">{}</tspan>"#, escape_xml(line));
                }
                svg.push_str("</text>");
            }
            RenderCommand::SetClip { rect } => {
                clip_count += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_count}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_count})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                open_clips += 1;
            }
            RenderCommand::ClearClip => {
                if open_clips > 0 {
                    svg.push_str("</g>");
                    open_clips -= 1;
                }
            }
            // Groups carry no visual effect in a static document
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    for _ in 0..open_clips {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn hex(token: ThemeToken) -> String {
    token.color().to_hex()
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// Lines of a text block that fit `rect`, by estimated glyph width.
fn layout_block(
    text: &str,
    rect: &Rect,
    font_size: f64,
    wrap: TextWrap,
    overflow: TextOverflow,
) -> Vec<String> {
    let per_line = (rect.w / (font_size * GLYPH_WIDTH_EM)).floor() as usize;
    let max_lines = (rect.h / (font_size * LINE_HEIGHT_EM)).floor() as usize;
    fit_lines(text, per_line, max_lines, wrap, overflow)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzclock_protocol::Point;

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::DrawRect {
                rect: Rect::new(0.0, 40.0, 100.0, 33.0),
                color: ThemeToken::NightBackground,
            },
            RenderCommand::DrawText {
                position: Point::new(5.5, 40.0),
                text: "03:00".into(),
                color: ThemeToken::HourLabel,
                font_size: 14.0,
                align: TextAlign::Left,
            },
        ];
        let svg = render_svg(&commands, 300.0, 200.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("#c3c3ce"));
        assert!(svg.contains(">03:00</text>"));
    }

    #[test]
    fn clips_are_balanced() {
        let commands = vec![
            RenderCommand::SetClip {
                rect: Rect::new(0.0, 0.0, 100.0, 200.0),
            },
            RenderCommand::ClearClip,
            RenderCommand::SetClip {
                rect: Rect::new(100.0, 0.0, 100.0, 200.0),
            },
        ];
        let svg = render_svg(&commands, 200.0, 200.0);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains("url(#clip2)"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "<Etc/GMT+3 & co>".into(),
            color: ThemeToken::HeaderText,
            font_size: 12.0,
            align: TextAlign::Center,
        }];
        let svg = render_svg(&commands, 100.0, 100.0);
        assert!(svg.contains("&lt;Etc/GMT+3 &amp; co&gt;"));
    }

    #[test]
    fn text_block_becomes_tspans() {
        // 12px font, 0.6em glyphs: 11 characters per 80px line, 2 lines in 38px.
        let commands = vec![RenderCommand::DrawTextBlock {
            rect: Rect::new(0.0, 0.0, 80.0, 38.0),
            text: "America/Argentina/Buenos_Aires".into(),
            color: ThemeToken::HeaderText,
            font_size: 12.0,
            align: TextAlign::Center,
            wrap: TextWrap::WordChar,
            overflow: TextOverflow::EllipsisEnd,
        }];
        let svg = render_svg(&commands, 80.0, 40.0);
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains(r#"<tspan x="40" y="12">America/</tspan>"#));
        assert!(svg.contains("Argentina/…"));
    }
}
