//! Size variants - which layout a widget gets for each size tag

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ratatui::layout::Rect;
use ratatui::widgets::BorderType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::icons::IconScale;

/// The seven widget sizes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SizeTag {
    #[default]
    Large,
    Medium,
    Small,
    Mini,
    WideSmall,
    WideMedium,
    Micro,
}

impl SizeTag {
    /// Showcase order: standard, panoramic, compact.
    pub const ALL: [SizeTag; 7] = [
        SizeTag::Large,
        SizeTag::Medium,
        SizeTag::WideMedium,
        SizeTag::WideSmall,
        SizeTag::Small,
        SizeTag::Mini,
        SizeTag::Micro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeTag::Large => "large",
            SizeTag::Medium => "medium",
            SizeTag::Small => "small",
            SizeTag::Mini => "mini",
            SizeTag::WideSmall => "wide-small",
            SizeTag::WideMedium => "wide-medium",
            SizeTag::Micro => "micro",
        }
    }

    /// Parse an optional textual tag. Anything unrecognised renders as large.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.map(|t| t.parse().unwrap_or_default()).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let index = Self::position(self);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::position(self);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(tag: SizeTag) -> usize {
        Self::ALL.iter().position(|t| *t == tag).unwrap_or(0)
    }
}

impl FromStr for SizeTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "medium" => SizeTag::Medium,
            "small" => SizeTag::Small,
            "mini" => SizeTag::Mini,
            "wide-small" => SizeTag::WideSmall,
            "wide-medium" => SizeTag::WideMedium,
            "micro" => SizeTag::Micro,
            _ => SizeTag::Large,
        };
        Ok(tag)
    }
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop shadow tiers under the primary card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowDepth {
    Light,
    Heavy,
}

impl ShadowDepth {
    /// Shadow band offset in cells: (columns to the right, rows below).
    pub fn offset(self) -> (u16, u16) {
        match self {
            ShadowDepth::Light => (1, 0),
            ShadowDepth::Heavy => (2, 1),
        }
    }
}

/// Header variants. Compact drops the controls row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderStyle {
    Full,
    Compact,
}

impl HeaderStyle {
    /// Rows taken by the header, including the gap above the card.
    pub fn rows(self) -> u16 {
        match self {
            HeaderStyle::Full => 4,
            HeaderStyle::Compact => 2,
        }
    }

    pub fn has_controls(self) -> bool {
        matches!(self, HeaderStyle::Full)
    }
}

/// Inner arrangement of the primary card, one case per size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardArrangement {
    /// Name on the left, cut with an ellipsis past its share of the width.
    Micro { name_share_pct: u16 },
    /// Name, glyph and temperature stacked.
    Mini,
    /// Icon left, name and temperature right.
    WideSmall { icon: IconScale },
    /// Icon and temperature left, name, description and day 0 range right.
    WideMedium { icon: IconScale },
    /// Icon, temperature and description stacked.
    Small { icon: IconScale },
    /// Icon left, temperature, description and air quality right.
    Medium { icon: IconScale },
    /// Two-pane icon/detail layout with a toggleable detail view.
    Large { icon: IconScale },
}

/// Forecast strip height, including the gap above it.
pub const FORECAST_ROWS: u16 = 6;

/// Number of days in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// Structural parameters for one size tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutParams {
    pub size: SizeTag,
    /// Container width in cells.
    pub width: u16,
    pub padding_x: u16,
    pub padding_y: u16,
    /// Container corner radius in design pixels.
    pub container_radius: u8,
    /// Primary card height in rows, borders included.
    pub card_height: u16,
    pub card_radius: u8,
    pub shadow: ShadowDepth,
    pub header: Option<HeaderStyle>,
    pub forecast: bool,
    pub arrangement: CardArrangement,
}

impl LayoutParams {
    pub fn shows_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn shows_forecast(&self) -> bool {
        self.forecast
    }

    /// Total container height in rows.
    pub fn height(&self) -> u16 {
        let header = self.header.map(HeaderStyle::rows).unwrap_or(0);
        let forecast = if self.forecast { FORECAST_ROWS } else { 0 };
        2 + self.padding_y * 2 + header + self.card_height + forecast
    }

    pub fn container_border(&self) -> BorderType {
        border_for_radius(self.container_radius)
    }

    pub fn card_border(&self) -> BorderType {
        border_for_radius(self.card_radius)
    }

    /// Container rect anchored at the top-left of `area`, clipped to it.
    pub fn fit(&self, area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y,
            width: self.width.min(area.width),
            height: self.height().min(area.height),
        }
    }
}

fn border_for_radius(radius: u8) -> BorderType {
    if radius >= 5 {
        BorderType::Rounded
    } else {
        BorderType::Plain
    }
}

/// Resolve the layout for a size tag
pub fn resolve(size: SizeTag) -> LayoutParams {
    match size {
        SizeTag::Large => LayoutParams {
            size,
            width: 56,
            padding_x: 4,
            padding_y: 2,
            container_radius: 12,
            card_height: 14,
            card_radius: 6,
            shadow: ShadowDepth::Heavy,
            header: Some(HeaderStyle::Full),
            forecast: true,
            arrangement: CardArrangement::Large {
                icon: IconScale::Full,
            },
        },
        SizeTag::Medium => LayoutParams {
            size,
            width: 56,
            padding_x: 3,
            padding_y: 1,
            container_radius: 12,
            card_height: 9,
            card_radius: 6,
            shadow: ShadowDepth::Heavy,
            header: Some(HeaderStyle::Full),
            forecast: false,
            arrangement: CardArrangement::Medium {
                icon: IconScale::Full,
            },
        },
        SizeTag::Small => LayoutParams {
            size,
            width: 24,
            padding_x: 2,
            padding_y: 1,
            container_radius: 10,
            card_height: 7,
            card_radius: 5,
            shadow: ShadowDepth::Light,
            header: Some(HeaderStyle::Compact),
            forecast: false,
            arrangement: CardArrangement::Small {
                icon: IconScale::Compact,
            },
        },
        SizeTag::Mini => compact_params(size, 16, 1, 5, CardArrangement::Mini),
        SizeTag::WideSmall => compact_params(
            size,
            24,
            1,
            5,
            CardArrangement::WideSmall {
                icon: IconScale::Compact,
            },
        ),
        SizeTag::WideMedium => compact_params(
            size,
            56,
            1,
            5,
            CardArrangement::WideMedium {
                icon: IconScale::Compact,
            },
        ),
        SizeTag::Micro => compact_params(
            size,
            16,
            0,
            3,
            CardArrangement::Micro { name_share_pct: 45 },
        ),
    }
}

/// Headerless variants share radius, shadow and horizontal padding.
fn compact_params(
    size: SizeTag,
    width: u16,
    padding_y: u16,
    card_height: u16,
    arrangement: CardArrangement,
) -> LayoutParams {
    LayoutParams {
        size,
        width,
        padding_x: 1,
        padding_y,
        container_radius: 8,
        card_height,
        card_radius: 4,
        shadow: ShadowDepth::Light,
        header: None,
        forecast: false,
        arrangement,
    }
}

/// Resolve straight from a textual tag.
pub fn resolve_tag(tag: Option<&str>) -> LayoutParams {
    resolve(SizeTag::from_tag(tag))
}
