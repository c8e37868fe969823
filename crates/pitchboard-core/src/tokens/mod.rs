//! Placed tokens and their visual vocabulary.

mod color;
mod glyph;

pub use color::{PaletteColor, TokenColor, parse_css_color};
pub use glyph::{
    Anchor, ArrowVariant, EquipmentVariant, Glyph, Heading, PlayerVariant, STANDARD_VARIANT,
    ShapeVariant, TokenKind,
};

use crate::geometry::Orientation;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque token identifier.
///
/// Fresh ids are UUID v4 strings. Ids read from a board document are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Allocate a new random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TokenId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token placed on the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub(crate) id: TokenId,
    /// Kind and variant.
    pub glyph: Glyph,
    pub color: TokenColor,
    /// Anchor point in field coordinates.
    pub position: Point,
    /// Arrow heading; `None` for every other kind.
    pub heading: Option<Heading>,
    /// Sequential label for click-placed players.
    pub number: Option<u32>,
}

impl Token {
    pub(crate) fn new(id: TokenId, glyph: Glyph, color: TokenColor, position: Point) -> Self {
        Self {
            id,
            glyph,
            color,
            position,
            heading: None,
            number: None,
        }
    }

    pub fn id(&self) -> &TokenId {
        &self.id
    }

    pub fn kind(&self) -> TokenKind {
        self.glyph.kind()
    }

    /// Rotation in degrees, for arrows.
    pub fn rotation(&self) -> Option<f64> {
        self.heading.map(Heading::degrees)
    }

    /// Glyph bounds in the field box's on-screen frame.
    pub fn bounds(&self, orientation: Orientation) -> Rect {
        let anchor = orientation.to_local(self.position);
        let origin = anchor - self.glyph.anchor_offset();
        Rect::from_origin_size(origin, self.glyph.size())
    }

    /// Check whether a box-local point hits this token's glyph.
    pub fn hit_test(&self, local: Point, orientation: Orientation, tolerance: f64) -> bool {
        self.bounds(orientation)
            .inflate(tolerance, tolerance)
            .contains(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = TokenId::new();
        let b = TokenId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bounds_apply_anchor() {
        let player = Token::new(
            TokenId::from("p"),
            Glyph::Player(PlayerVariant::Filled),
            PaletteColor::Green.into(),
            Point::new(100.0, 120.0),
        );
        let bounds = player.bounds(Orientation::Landscape);
        assert_eq!(bounds, Rect::new(88.0, 108.0, 112.0, 132.0));

        let square = Token::new(
            TokenId::from("s"),
            Glyph::Shape(ShapeVariant::Square),
            PaletteColor::Red.into(),
            Point::new(100.0, 120.0),
        );
        assert_eq!(
            square.bounds(Orientation::Landscape),
            Rect::new(100.0, 120.0, 124.0, 144.0)
        );
    }

    #[test]
    fn test_hit_test_with_tolerance() {
        let player = Token::new(
            TokenId::from("p"),
            Glyph::Player(PlayerVariant::Circle),
            PaletteColor::Blue.into(),
            Point::new(50.0, 50.0),
        );
        assert!(player.hit_test(Point::new(50.0, 50.0), Orientation::Landscape, 0.0));
        assert!(!player.hit_test(Point::new(64.0, 50.0), Orientation::Landscape, 0.0));
        assert!(player.hit_test(Point::new(64.0, 50.0), Orientation::Landscape, 3.0));
    }
}
