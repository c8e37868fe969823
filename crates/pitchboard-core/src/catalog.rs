//! Palette of placeable token templates.

use crate::tokens::{
    ArrowVariant, EquipmentVariant, Glyph, Heading, PaletteColor, PlayerVariant, ShapeVariant,
    TokenKind,
};

/// An immutable palette entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolTemplate {
    /// Stable palette id, e.g. `player-filled`.
    pub id: &'static str,
    pub glyph: Glyph,
    /// Color used when no color has been picked.
    pub default_color: PaletteColor,
    /// Initial heading for arrows.
    pub heading: Option<Heading>,
}

impl ToolTemplate {
    const fn new(id: &'static str, glyph: Glyph, default_color: PaletteColor) -> Self {
        Self {
            id,
            glyph,
            default_color,
            heading: None,
        }
    }

    const fn arrow(id: &'static str, variant: ArrowVariant, heading: Heading) -> Self {
        Self {
            id,
            glyph: Glyph::Arrow(variant),
            default_color: PaletteColor::Black,
            heading: Some(heading),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.glyph.kind()
    }
}

static CATALOG: [ToolTemplate; 27] = [
    ToolTemplate::new("shape-square", Glyph::Shape(ShapeVariant::Square), PaletteColor::Green),
    ToolTemplate::new(
        "shape-square-outline",
        Glyph::Shape(ShapeVariant::SquareOutline),
        PaletteColor::Green,
    ),
    ToolTemplate::new("shape-circle", Glyph::Shape(ShapeVariant::Circle), PaletteColor::Green),
    ToolTemplate::new(
        "equipment-ball",
        Glyph::Equipment(EquipmentVariant::Ball),
        PaletteColor::Black,
    ),
    ToolTemplate::new(
        "equipment-triangle",
        Glyph::Equipment(EquipmentVariant::Triangle),
        PaletteColor::Yellow,
    ),
    ToolTemplate::new(
        "equipment-goal-small",
        Glyph::Equipment(EquipmentVariant::GoalSmall),
        PaletteColor::Gray,
    ),
    ToolTemplate::new(
        "equipment-goal-top",
        Glyph::Equipment(EquipmentVariant::GoalTop),
        PaletteColor::Gray,
    ),
    ToolTemplate::new(
        "equipment-hurdle",
        Glyph::Equipment(EquipmentVariant::Hurdle),
        PaletteColor::Black,
    ),
    ToolTemplate::new(
        "equipment-ladder",
        Glyph::Equipment(EquipmentVariant::Ladder),
        PaletteColor::Black,
    ),
    ToolTemplate::new(
        "equipment-pole",
        Glyph::Equipment(EquipmentVariant::Pole),
        PaletteColor::Black,
    ),
    ToolTemplate::new("player-circle", Glyph::Player(PlayerVariant::Circle), PaletteColor::Blue),
    ToolTemplate::new(
        "player-svg-male",
        Glyph::Player(PlayerVariant::SvgMale),
        PaletteColor::Blue,
    ),
    ToolTemplate::new("player-filled", Glyph::Player(PlayerVariant::Filled), PaletteColor::Red),
    ToolTemplate::new(
        "player-svg-female",
        Glyph::Player(PlayerVariant::SvgFemale),
        PaletteColor::Red,
    ),
    ToolTemplate::arrow("arrow-solid-right", ArrowVariant::Solid, Heading::Right),
    ToolTemplate::arrow("arrow-solid-left", ArrowVariant::Solid, Heading::Left),
    ToolTemplate::arrow("arrow-solid-up", ArrowVariant::Solid, Heading::Up),
    ToolTemplate::arrow("arrow-solid-down", ArrowVariant::Solid, Heading::Down),
    ToolTemplate::arrow("arrow-dashed-right", ArrowVariant::Dashed, Heading::Right),
    ToolTemplate::arrow("arrow-dashed-left", ArrowVariant::Dashed, Heading::Left),
    ToolTemplate::arrow("arrow-dashed-up", ArrowVariant::Dashed, Heading::Up),
    ToolTemplate::arrow("arrow-dashed-down", ArrowVariant::Dashed, Heading::Down),
    ToolTemplate::arrow("arrow-wavy-right", ArrowVariant::Wavy, Heading::Right),
    ToolTemplate::arrow("arrow-wavy-dashed-right", ArrowVariant::WavyDashed, Heading::Right),
    ToolTemplate::new("ball", Glyph::Ball, PaletteColor::Black),
    ToolTemplate::new("cone", Glyph::Cone, PaletteColor::Yellow),
    ToolTemplate::new("player", Glyph::Player(PlayerVariant::Filled), PaletteColor::Blue),
];

/// All palette entries in display order.
pub fn templates() -> &'static [ToolTemplate] {
    &CATALOG
}

/// Find a palette entry by id.
pub fn template(id: &str) -> Option<&'static ToolTemplate> {
    CATALOG.iter().find(|t| t.id == id)
}

/// Palette entries of one kind, in display order.
pub fn templates_of(kind: TokenKind) -> impl Iterator<Item = &'static ToolTemplate> {
    CATALOG.iter().filter(move |t| t.kind() == kind)
}

/// Section heading shown above a kind's palette entries.
pub fn section_title(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Shape => "Shapes",
        TokenKind::Equipment => "Equipment",
        TokenKind::Player => "Players",
        TokenKind::Arrow => "Arrows + Lines",
        TokenKind::Ball => "Ball",
        TokenKind::Cone => "Cones",
    }
}
