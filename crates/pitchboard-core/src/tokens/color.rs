//! Token colors.

use peniko::Color;
use peniko::color::{self, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed swatches offered by the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    #[default]
    Green,
    Blue,
    Yellow,
    Red,
    Black,
    Gray,
}

impl PaletteColor {
    /// All swatches in picker order.
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
        PaletteColor::Red,
        PaletteColor::Black,
        PaletteColor::Gray,
    ];

    /// Name used in board documents.
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Red => "red",
            PaletteColor::Black => "black",
            PaletteColor::Gray => "gray",
        }
    }

    /// Look up a swatch by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Hex value of the swatch.
    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Green => "#10b981",
            PaletteColor::Blue => "#3b82f6",
            PaletteColor::Yellow => "#fbbf24",
            PaletteColor::Red => "#ef4444",
            PaletteColor::Black => "#1f2937",
            PaletteColor::Gray => "#9ca3af",
        }
    }

    /// The swatch as a peniko color.
    pub fn color(self) -> Color {
        match self {
            PaletteColor::Green => Color::from_rgba8(0x10, 0xb9, 0x81, 0xff),
            PaletteColor::Blue => Color::from_rgba8(0x3b, 0x82, 0xf6, 0xff),
            PaletteColor::Yellow => Color::from_rgba8(0xfb, 0xbf, 0x24, 0xff),
            PaletteColor::Red => Color::from_rgba8(0xef, 0x44, 0x44, 0xff),
            PaletteColor::Black => Color::from_rgba8(0x1f, 0x29, 0x37, 0xff),
            PaletteColor::Gray => Color::from_rgba8(0x9c, 0xa3, 0xaf, 0xff),
        }
    }
}

/// Color of a placed token: a palette swatch or any CSS color string.
///
/// Serialized as a plain string; palette names round-trip to swatches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TokenColor {
    Palette(PaletteColor),
    Custom(String),
}

impl Default for TokenColor {
    fn default() -> Self {
        TokenColor::Palette(PaletteColor::default())
    }
}

impl TokenColor {
    /// Parse a palette name or CSS color. Anything that would not draw is
    /// rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Some(palette) = PaletteColor::from_name(trimmed) {
            return Some(TokenColor::Palette(palette));
        }
        parse_css_color(trimmed)?;
        Some(TokenColor::Custom(trimmed.to_string()))
    }

    /// The string stored in board documents.
    pub fn as_str(&self) -> &str {
        match self {
            TokenColor::Palette(p) => p.name(),
            TokenColor::Custom(s) => s,
        }
    }

    /// Resolve to a drawable color.
    ///
    /// A custom string built without [`TokenColor::parse`] that is not a CSS
    /// color falls back to the black swatch.
    pub fn resolve(&self) -> Color {
        match self {
            TokenColor::Palette(p) => p.color(),
            TokenColor::Custom(s) => {
                parse_css_color(s).unwrap_or_else(|| PaletteColor::Black.color())
            }
        }
    }
}

impl From<PaletteColor> for TokenColor {
    fn from(color: PaletteColor) -> Self {
        TokenColor::Palette(color)
    }
}

impl TryFrom<String> for TokenColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TokenColor::parse(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<TokenColor> for String {
    fn from(color: TokenColor) -> Self {
        match color {
            TokenColor::Palette(p) => p.name().to_string(),
            TokenColor::Custom(s) => s,
        }
    }
}

impl fmt::Display for TokenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse any CSS color: hex, named (`teal`) or functional (`rgb(1 2 3)`).
pub fn parse_css_color(value: &str) -> Option<Color> {
    color::parse_color(value.trim())
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}
