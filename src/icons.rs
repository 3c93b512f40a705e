//! Weather icons: WMO code to glyph and multi-line art
//!
//! Art is monochrome; callers pick the color from the active theme.

use ratatui::style::Style;
use ratatui::text::{Line, Text};

/// How much room an icon gets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconScale {
    /// A single glyph.
    Glyph,
    /// Three rows of art.
    Compact,
    /// Five rows of art.
    Full,
}

impl IconScale {
    pub fn rows(self) -> u16 {
        match self {
            IconScale::Glyph => 1,
            IconScale::Compact => COMPACT_ROWS,
            IconScale::Full => FULL_ROWS,
        }
    }

    pub fn columns(self) -> u16 {
        match self {
            IconScale::Glyph => 2,
            IconScale::Compact => 7,
            IconScale::Full => 13,
        }
    }
}

const COMPACT_ROWS: u16 = 3;
const FULL_ROWS: u16 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Moon,
    CloudSun,
    Cloud,
    Fog,
    Rain,
    Snow,
    Thunder,
}

impl WeatherIcon {
    pub fn from_code(code: u8, is_day: bool) -> Self {
        match code {
            0 | 1 if is_day => WeatherIcon::Sun,
            0 | 1 => WeatherIcon::Moon,
            2 if is_day => WeatherIcon::CloudSun,
            2 | 3 => WeatherIcon::Cloud,
            45..=48 => WeatherIcon::Fog,
            51..=67 | 80..=82 => WeatherIcon::Rain,
            71..=77 | 85 | 86 => WeatherIcon::Snow,
            95..=u8::MAX => WeatherIcon::Thunder,
            _ => WeatherIcon::Sun,
        }
    }

    pub fn glyph(self) -> &'static str {
        GLYPH_ART[self as usize][0]
    }

    pub fn art(self, scale: IconScale) -> &'static [&'static str] {
        match scale {
            IconScale::Glyph => GLYPH_ART[self as usize],
            IconScale::Compact => COMPACT_ART[self as usize],
            IconScale::Full => FULL_ART[self as usize],
        }
    }

    /// Styled art ready for a `Paragraph`.
    pub fn text(self, scale: IconScale, style: Style) -> Text<'static> {
        self.art(scale)
            .iter()
            .map(|row| Line::styled(*row, style))
            .collect::<Vec<_>>()
            .into()
    }
}

// Indexed by `WeatherIcon as usize`.
const GLYPH_ART: [&[&str]; 8] = [
    &["\u{2600}"],
    &["\u{263e}"],
    &["\u{26c5}"],
    &["\u{2601}"],
    &["\u{2261}"],
    &["\u{2602}"],
    &["\u{2744}"],
    &["\u{03df}"],
];

const COMPACT_ART: [&[&str]; 8] = [
    &[r" \ | / ", r" - O - ", r" / | \ "],
    &[r"  ,-.  ", r" (  (  ", r"  `-'  "],
    &[r" \ .-. ", r" -(   )", r"  `---'"],
    &[r"  .--. ", r" (    )", r"  `--' "],
    &[r" - _ - ", r" _ - _ ", r" - _ - "],
    &[r"  .--. ", r" (____)", r"  ' ' '"],
    &[r"  .--. ", r" (____)", r"  * * *"],
    &[r"  .--. ", r" (____)", r"   //  "],
];

const FULL_ART: [&[&str]; 8] = [
    &[
        r"    \   /    ",
        r"     .-.     ",
        r"  - (   ) -  ",
        r"     `-'     ",
        r"    /   \    ",
    ],
    &[
        r"     .--.    ",
        r"  .-'  .'    ",
        r" (    (      ",
        r"  `-.  `.    ",
        r"     `--'    ",
    ],
    &[
        r"   \  /      ",
        r#" _ /"".-.    "#,
        r"   \_(   ).  ",
        r"   /(___(__) ",
        r"             ",
    ],
    &[
        r"             ",
        r"     .--.    ",
        r"  .-(    ).  ",
        r" (___.__)__) ",
        r"             ",
    ],
    &[
        r"             ",
        r" _ - _ - _ - ",
        r"  _ - _ - _  ",
        r" _ - _ - _ - ",
        r"             ",
    ],
    &[
        r"     .-.     ",
        r"    (   ).   ",
        r"   (___(__)  ",
        r"    ' ' ' '  ",
        r"   ' ' ' '   ",
    ],
    &[
        r"     .-.     ",
        r"    (   ).   ",
        r"   (___(__)  ",
        r"    *  *  *  ",
        r"   *  *  *   ",
    ],
    &[
        r"     .-.     ",
        r"    (   ).   ",
        r"   (___(__)  ",
        r"    /_  /_   ",
        r"     /   /   ",
    ],
];
