//! Sample eleven-player arrangement.

use crate::format::{BoardFile, ItemRecord};
use crate::tokens::{Glyph, PaletteColor, PlayerVariant};
use crate::view::FieldLayout;

const GREEN_SIDE: [(f64, f64); 6] = [
    (54.0, 400.0),
    (159.0, 306.0),
    (338.0, 20.0),
    (254.0, 608.0),
    (366.0, 475.0),
    (389.0, 295.0),
];

const RED_SIDE: [(f64, f64); 5] = [
    (996.0, 396.0),
    (745.0, 161.0),
    (661.0, 236.0),
    (709.0, 569.0),
    (850.0, 401.0),
];

/// The demo board: six green and five red players on a full pitch.
pub fn demo_board() -> BoardFile {
    let glyph = Glyph::Player(PlayerVariant::SvgMale);
    let sides = GREEN_SIDE
        .iter()
        .map(|&p| (PaletteColor::Green, p))
        .chain(RED_SIDE.iter().map(|&p| (PaletteColor::Red, p)));

    let items = sides
        .enumerate()
        .map(|(i, (color, (x, y)))| ItemRecord {
            id: format!("demo-{}", i + 1),
            kind: glyph.kind().name().to_string(),
            variant: glyph.variant_name().to_string(),
            color: Some(color.name().to_string()),
            x,
            y,
            rotation: None,
            number: None,
            gender: None,
            direction: None,
        })
        .collect();

    BoardFile {
        items,
        layout: FieldLayout::Full,
        counter: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_valid() {
        let board = demo_board().into_board().unwrap();
        assert_eq!(board.tokens.len(), 11);
        let green = board
            .tokens
            .iter()
            .filter(|t| t.color == PaletteColor::Green.into())
            .count();
        assert_eq!(green, 6);
    }
}
