//! Token kinds, variants and their registered glyph geometry.

use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Category of a placeable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Shape,
    Equipment,
    Player,
    Arrow,
    Ball,
    Cone,
}

impl TokenKind {
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Shape,
        TokenKind::Equipment,
        TokenKind::Player,
        TokenKind::Arrow,
        TokenKind::Ball,
        TokenKind::Cone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Shape => "shape",
            TokenKind::Equipment => "equipment",
            TokenKind::Player => "player",
            TokenKind::Arrow => "arrow",
            TokenKind::Ball => "ball",
            TokenKind::Cone => "cone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeVariant {
    Square,
    SquareOutline,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentVariant {
    Ball,
    Triangle,
    GoalSmall,
    GoalTop,
    Ladder,
    Hurdle,
    Pole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerVariant {
    Circle,
    Filled,
    SvgMale,
    SvgFemale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowVariant {
    Solid,
    Dashed,
    Wavy,
    WavyDashed,
}

impl ArrowVariant {
    pub fn is_dashed(self) -> bool {
        matches!(self, ArrowVariant::Dashed | ArrowVariant::WavyDashed)
    }

    pub fn is_wavy(self) -> bool {
        matches!(self, ArrowVariant::Wavy | ArrowVariant::WavyDashed)
    }
}

/// Which point of the glyph a token's position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Position is the glyph's top-left corner.
    TopLeft,
    /// Position is the glyph's center.
    Center,
}

/// Exhaustive kind/variant union.
///
/// Every drawable combination is a value of this type; anything else is
/// rejected by [`Glyph::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Shape(ShapeVariant),
    Equipment(EquipmentVariant),
    Player(PlayerVariant),
    Arrow(ArrowVariant),
    Ball,
    Cone,
}

/// Variant name used for kinds that have a single look.
pub const STANDARD_VARIANT: &str = "standard";

impl Glyph {
    pub fn kind(&self) -> TokenKind {
        match self {
            Glyph::Shape(_) => TokenKind::Shape,
            Glyph::Equipment(_) => TokenKind::Equipment,
            Glyph::Player(_) => TokenKind::Player,
            Glyph::Arrow(_) => TokenKind::Arrow,
            Glyph::Ball => TokenKind::Ball,
            Glyph::Cone => TokenKind::Cone,
        }
    }

    /// Variant name used in board documents.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Glyph::Shape(ShapeVariant::Square) => "square",
            Glyph::Shape(ShapeVariant::SquareOutline) => "square-outline",
            Glyph::Shape(ShapeVariant::Circle) => "circle",
            Glyph::Equipment(EquipmentVariant::Ball) => "ball",
            Glyph::Equipment(EquipmentVariant::Triangle) => "triangle",
            Glyph::Equipment(EquipmentVariant::GoalSmall) => "goal-small",
            Glyph::Equipment(EquipmentVariant::GoalTop) => "goal-top",
            Glyph::Equipment(EquipmentVariant::Ladder) => "ladder",
            Glyph::Equipment(EquipmentVariant::Hurdle) => "hurdle",
            Glyph::Equipment(EquipmentVariant::Pole) => "pole",
            Glyph::Player(PlayerVariant::Circle) => "circle",
            Glyph::Player(PlayerVariant::Filled) => "filled",
            Glyph::Player(PlayerVariant::SvgMale) => "svg-male",
            Glyph::Player(PlayerVariant::SvgFemale) => "svg-female",
            Glyph::Arrow(ArrowVariant::Solid) => "solid",
            Glyph::Arrow(ArrowVariant::Dashed) => "dashed",
            Glyph::Arrow(ArrowVariant::Wavy) => "wavy",
            Glyph::Arrow(ArrowVariant::WavyDashed) => "wavy-dashed",
            Glyph::Ball | Glyph::Cone => STANDARD_VARIANT,
        }
    }

    /// Build a glyph from document kind and variant names.
    ///
    /// Ball and cone accept an empty variant as well as `standard`.
    /// The equipment variant `cone` is accepted as an alias of `triangle`.
    pub fn from_parts(kind: &str, variant: &str) -> Option<Glyph> {
        let kind = TokenKind::from_name(kind)?;
        let glyph = match (kind, variant) {
            (TokenKind::Shape, "square") => Glyph::Shape(ShapeVariant::Square),
            (TokenKind::Shape, "square-outline") => Glyph::Shape(ShapeVariant::SquareOutline),
            (TokenKind::Shape, "circle") => Glyph::Shape(ShapeVariant::Circle),
            (TokenKind::Equipment, "ball") => Glyph::Equipment(EquipmentVariant::Ball),
            (TokenKind::Equipment, "triangle" | "cone") => {
                Glyph::Equipment(EquipmentVariant::Triangle)
            }
            (TokenKind::Equipment, "goal-small") => Glyph::Equipment(EquipmentVariant::GoalSmall),
            (TokenKind::Equipment, "goal-top") => Glyph::Equipment(EquipmentVariant::GoalTop),
            (TokenKind::Equipment, "ladder") => Glyph::Equipment(EquipmentVariant::Ladder),
            (TokenKind::Equipment, "hurdle") => Glyph::Equipment(EquipmentVariant::Hurdle),
            (TokenKind::Equipment, "pole") => Glyph::Equipment(EquipmentVariant::Pole),
            (TokenKind::Player, "circle") => Glyph::Player(PlayerVariant::Circle),
            (TokenKind::Player, "filled") => Glyph::Player(PlayerVariant::Filled),
            (TokenKind::Player, "svg-male") => Glyph::Player(PlayerVariant::SvgMale),
            (TokenKind::Player, "svg-female") => Glyph::Player(PlayerVariant::SvgFemale),
            (TokenKind::Arrow, "solid") => Glyph::Arrow(ArrowVariant::Solid),
            (TokenKind::Arrow, "dashed") => Glyph::Arrow(ArrowVariant::Dashed),
            (TokenKind::Arrow, "wavy") => Glyph::Arrow(ArrowVariant::Wavy),
            (TokenKind::Arrow, "wavy-dashed") => Glyph::Arrow(ArrowVariant::WavyDashed),
            (TokenKind::Ball, "" | STANDARD_VARIANT) => Glyph::Ball,
            (TokenKind::Cone, "" | STANDARD_VARIANT) => Glyph::Cone,
            _ => return None,
        };
        Some(glyph)
    }

    /// Rendered size of the glyph in CSS pixels.
    pub fn size(&self) -> Size {
        match self {
            Glyph::Shape(_) | Glyph::Player(_) | Glyph::Ball => Size::new(24.0, 24.0),
            Glyph::Equipment(EquipmentVariant::Ball | EquipmentVariant::Hurdle) => {
                Size::new(24.0, 24.0)
            }
            Glyph::Equipment(EquipmentVariant::Triangle) => Size::new(16.0, 14.0),
            Glyph::Equipment(EquipmentVariant::GoalSmall | EquipmentVariant::GoalTop) => {
                Size::new(40.0, 12.0)
            }
            Glyph::Equipment(EquipmentVariant::Ladder) => Size::new(28.0, 24.0),
            Glyph::Equipment(EquipmentVariant::Pole) => Size::new(4.0, 32.0),
            Glyph::Arrow(_) => Size::new(40.0, 40.0),
            Glyph::Cone => Size::new(20.0, 20.0),
        }
    }

    /// Registered anchor: square glyphs hang from their top-left corner,
    /// everything else is centered on its position.
    pub fn anchor(&self) -> Anchor {
        match self {
            Glyph::Shape(ShapeVariant::Square | ShapeVariant::SquareOutline) => Anchor::TopLeft,
            _ => Anchor::Center,
        }
    }

    /// Offset from the glyph's top-left corner to its anchor point.
    ///
    /// Subtracting this from a token position gives the glyph origin. The
    /// same correction applies on creation and on every move.
    pub fn anchor_offset(&self) -> Vec2 {
        match self.anchor() {
            Anchor::TopLeft => Vec2::ZERO,
            Anchor::Center => {
                let size = self.size();
                Vec2::new(size.width / 2.0, size.height / 2.0)
            }
        }
    }

    /// Whether the glyph carries a heading.
    pub fn has_heading(&self) -> bool {
        matches!(self, Glyph::Arrow(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Glyph::Player(_))
    }
}

/// Heading of an arrow token.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Heading {
    #[default]
    Right,
    Down,
    Left,
    Up,
    /// Free angle in degrees, clockwise from pointing right.
    Degrees(f64),
}

impl Heading {
    /// Rotation in degrees (screen space, clockwise).
    pub fn degrees(self) -> f64 {
        match self {
            Heading::Right => 0.0,
            Heading::Down => 90.0,
            Heading::Left => 180.0,
            Heading::Up => -90.0,
            Heading::Degrees(d) => d,
        }
    }

    /// Map an angle back to a compass heading when it matches one exactly.
    pub fn from_degrees(degrees: f64) -> Self {
        match degrees {
            d if d == 0.0 => Heading::Right,
            d if d == 90.0 => Heading::Down,
            d if d == 180.0 => Heading::Left,
            d if d == -90.0 => Heading::Up,
            d => Heading::Degrees(d),
        }
    }

    /// Parse a compass name (`right`, `down`, `left`, `up`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "right" => Some(Heading::Right),
            "down" => Some(Heading::Down),
            "left" => Some(Heading::Left),
            "up" => Some(Heading::Up),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_GLYPHS: [Glyph; 20] = [
        Glyph::Shape(ShapeVariant::Square),
        Glyph::Shape(ShapeVariant::SquareOutline),
        Glyph::Shape(ShapeVariant::Circle),
        Glyph::Equipment(EquipmentVariant::Ball),
        Glyph::Equipment(EquipmentVariant::Triangle),
        Glyph::Equipment(EquipmentVariant::GoalSmall),
        Glyph::Equipment(EquipmentVariant::GoalTop),
        Glyph::Equipment(EquipmentVariant::Ladder),
        Glyph::Equipment(EquipmentVariant::Hurdle),
        Glyph::Equipment(EquipmentVariant::Pole),
        Glyph::Player(PlayerVariant::Circle),
        Glyph::Player(PlayerVariant::Filled),
        Glyph::Player(PlayerVariant::SvgMale),
        Glyph::Player(PlayerVariant::SvgFemale),
        Glyph::Arrow(ArrowVariant::Solid),
        Glyph::Arrow(ArrowVariant::Dashed),
        Glyph::Arrow(ArrowVariant::Wavy),
        Glyph::Arrow(ArrowVariant::WavyDashed),
        Glyph::Ball,
        Glyph::Cone,
    ];

    #[test]
    fn test_every_glyph_names_back_to_itself() {
        for glyph in ALL_GLYPHS {
            let parsed = Glyph::from_parts(glyph.kind().name(), glyph.variant_name());
            assert_eq!(parsed, Some(glyph), "{glyph:?}");
        }
    }

    #[test]
    fn test_unknown_combinations_rejected() {
        assert_eq!(Glyph::from_parts("shape", "triangle"), None);
        assert_eq!(Glyph::from_parts("player", "svg"), None);
        assert_eq!(Glyph::from_parts("goalpost", "square"), None);
        assert_eq!(Glyph::from_parts("arrow", ""), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            Glyph::from_parts("equipment", "cone"),
            Some(Glyph::Equipment(EquipmentVariant::Triangle))
        );
        assert_eq!(Glyph::from_parts("ball", ""), Some(Glyph::Ball));
    }

    #[test]
    fn test_anchor_offsets() {
        let square = Glyph::Shape(ShapeVariant::Square);
        assert_eq!(square.anchor(), Anchor::TopLeft);
        assert_eq!(square.anchor_offset(), Vec2::ZERO);

        let player = Glyph::Player(PlayerVariant::Filled);
        assert_eq!(player.anchor(), Anchor::Center);
        assert_eq!(player.anchor_offset(), Vec2::new(12.0, 12.0));
    }

    #[test]
    fn test_heading_degrees() {
        for heading in [Heading::Right, Heading::Down, Heading::Left, Heading::Up] {
            assert_eq!(Heading::from_degrees(heading.degrees()), heading);
        }
        assert_eq!(Heading::from_degrees(45.0), Heading::Degrees(45.0));
        assert_eq!(Heading::default(), Heading::Right);
    }
}
