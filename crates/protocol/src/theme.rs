use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Semantic color tokens carried by render commands.
///
/// Hosts resolve them through [`ThemeToken::color`], which maps every token
/// to a fixed RGBA constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Hour row backgrounds
    DefaultBackground,
    DayBackground,
    NightBackground,

    // Header band
    HeaderBackground,
    HeaderText,

    // Row labels
    HourLabel,
    DayLabel,

    ColumnSeparator,
    RowSeparator,

    // DST transition marker
    DstTransitionBackground,
    DstTransitionText,
}

impl ThemeToken {
    pub const ALL: [ThemeToken; 11] = [
        ThemeToken::DefaultBackground,
        ThemeToken::DayBackground,
        ThemeToken::NightBackground,
        ThemeToken::HeaderBackground,
        ThemeToken::HeaderText,
        ThemeToken::HourLabel,
        ThemeToken::DayLabel,
        ThemeToken::ColumnSeparator,
        ThemeToken::RowSeparator,
        ThemeToken::DstTransitionBackground,
        ThemeToken::DstTransitionText,
    ];

    /// The palette entry for this token.
    pub const fn color(self) -> Color {
        use ThemeToken::*;
        match self {
            DefaultBackground => Color::rgb8(0xe4, 0xe4, 0xdf),
            DayBackground => Color::rgb8(0xfb, 0xfb, 0xfb),
            NightBackground => Color::rgb8(0xc3, 0xc3, 0xce),

            HeaderBackground => Color::rgb8(0xf0, 0xf0, 0xf0),
            HeaderText => Color::rgb8(0x22, 0x22, 0x22),

            HourLabel => Color::rgb8(0x55, 0x55, 0x55),
            DayLabel => Color::rgb8(0x22, 0x22, 0x22),

            ColumnSeparator => Color::rgb8(0xdf, 0xdf, 0xdf),
            RowSeparator => Color::rgb8(0xdf, 0xdf, 0xdf),

            DstTransitionBackground => Color::rgb8(0xe1, 0xa1, 0xa1),
            DstTransitionText => Color::rgb8(0xf1, 0x11, 0x11),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_opaque() {
        for token in ThemeToken::ALL {
            assert_eq!(token.color().a, 1.0, "{token:?}");
        }
    }

    #[test]
    fn night_is_darker_than_day() {
        let lum = |c: Color| c.r + c.g + c.b;
        assert!(lum(ThemeToken::NightBackground.color()) < lum(ThemeToken::DefaultBackground.color()));
        assert!(lum(ThemeToken::DefaultBackground.color()) < lum(ThemeToken::DayBackground.color()));
    }
}
