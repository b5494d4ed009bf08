use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` per repaint. Hosts consume the list
/// sequentially, painting later commands over earlier ones; each command
/// carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill a rectangle.
    DrawRect { rect: Rect, color: ThemeToken },

    /// Draw a single line of text anchored at `position`.
    ///
    /// The anchor is horizontally placed according to `align` and vertically
    /// centered on `position.y`.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Lay out text inside a box, wrapping and truncating as requested.
    DrawTextBlock {
        rect: Rect,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        wrap: TextWrap,
        overflow: TextOverflow,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (one timezone column). Renderers may use this
    /// for layer separation or accessibility.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Line breaking policy for [`RenderCommand::DrawTextBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextWrap {
    /// Never break; a single line.
    None,
    /// Break at word boundaries, falling back to character boundaries for
    /// words wider than the box.
    WordChar,
}

/// What to do with text that still does not fit after wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextOverflow {
    Clip,
    /// Cut the last visible line and end it with `…`.
    EllipsisEnd,
}
