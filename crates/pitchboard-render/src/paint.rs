//! Token glyphs as drawable primitives.
//!
//! Every glyph is built in its own frame (origin at the glyph's top-left,
//! extent [`Glyph::size`]) and then moved into the field box by
//! [`GlyphDescription::transform`].

use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Size};
use peniko::Color;
use pitchboard_core::tokens::{
    Anchor, ArrowVariant, EquipmentVariant, Glyph, Heading, PlayerVariant, ShapeVariant, Token,
    TokenColor, TokenKind,
};
use pitchboard_core::Orientation;

const TOLERANCE: f64 = 0.1;
const OUTLINE_WIDTH: f64 = 2.0;
const ARROW_WIDTH: f64 = 2.0;
const ARROW_DASH: [f64; 2] = [6.0, 4.0];
const WHITE: Color = Color::from_rgba8(255, 255, 255, 255);

/// How a primitive is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke {
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
}

impl Paint {
    fn stroke(color: Color, width: f64) -> Self {
        Paint::Stroke {
            color,
            width,
            dash: None,
        }
    }
}

/// A path with its paint, in field-box coordinates once transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub path: BezPath,
    pub paint: Paint,
}

impl Primitive {
    fn fill(shape: impl Shape, color: Color) -> Self {
        Self {
            path: shape.to_path(TOLERANCE),
            paint: Paint::Fill(color),
        }
    }

    fn stroke(shape: impl Shape, color: Color, width: f64) -> Self {
        Self {
            path: shape.to_path(TOLERANCE),
            paint: Paint::stroke(color, width),
        }
    }

    fn transformed(mut self, affine: Affine) -> Self {
        self.path.apply_affine(affine);
        self
    }
}

/// Everything a backend needs to draw one token.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDescription {
    pub glyph: Glyph,
    pub kind: TokenKind,
    pub variant: &'static str,
    pub color: Color,
    /// Degrees, clockwise.
    pub rotation: Option<f64>,
    pub anchor: Anchor,
    pub size: Size,
    /// Top-left corner of the glyph in the field box.
    pub origin: Point,
    /// Player number label.
    pub label: Option<u32>,
}

impl GlyphDescription {
    /// Describe a placed token.
    pub fn for_token(token: &Token, orientation: Orientation) -> Self {
        Self::new(
            token.glyph,
            &token.color,
            token.heading,
            token.position,
            orientation,
        )
        .with_label(token.number)
    }

    /// Describe a glyph anchored at a field-space position.
    pub fn new(
        glyph: Glyph,
        color: &TokenColor,
        heading: Option<Heading>,
        position: Point,
        orientation: Orientation,
    ) -> Self {
        let anchor = orientation.to_local(position);
        Self {
            glyph,
            kind: glyph.kind(),
            variant: glyph.variant_name(),
            color: color.resolve(),
            rotation: heading.map(Heading::degrees),
            anchor: glyph.anchor(),
            size: glyph.size(),
            origin: anchor - glyph.anchor_offset(),
            label: None,
        }
    }

    fn with_label(mut self, label: Option<u32>) -> Self {
        self.label = label;
        self
    }

    /// Glyph frame to field-box transform, including arrow rotation.
    pub fn transform(&self) -> Affine {
        let place = Affine::translate(self.origin.to_vec2());
        match self.rotation {
            Some(degrees) if degrees != 0.0 => {
                let center = Point::new(self.size.width / 2.0, self.size.height / 2.0);
                place * Affine::rotate_about(degrees.to_radians(), center)
            }
            _ => place,
        }
    }

    /// Unrotated bounds in the field box.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Center of the label, in the field box.
    pub fn label_position(&self) -> Point {
        self.bounds().center()
    }

    /// Drawable primitives in field-box coordinates.
    pub fn primitives(&self) -> Vec<Primitive> {
        let transform = self.transform();
        glyph_primitives(self.glyph, self.size, self.color)
            .into_iter()
            .map(|p| p.transformed(transform))
            .collect()
    }
}

/// Primitives for a glyph in its own frame.
pub fn glyph_primitives(glyph: Glyph, size: Size, color: Color) -> Vec<Primitive> {
    let frame = size.to_rect();
    let center = frame.center();
    let radius = size.width.min(size.height) / 2.0;
    let half = OUTLINE_WIDTH / 2.0;

    match glyph {
        Glyph::Shape(ShapeVariant::Square) => vec![Primitive::fill(frame, color)],
        Glyph::Shape(ShapeVariant::SquareOutline) => {
            vec![Primitive::stroke(frame.inset(-half), color, OUTLINE_WIDTH)]
        }
        Glyph::Shape(ShapeVariant::Circle) | Glyph::Player(PlayerVariant::Circle) => {
            vec![Primitive::stroke(
                Circle::new(center, radius - half),
                color,
                OUTLINE_WIDTH,
            )]
        }
        Glyph::Player(PlayerVariant::Filled) => vec![Primitive::fill(Circle::new(center, radius), color)],
        Glyph::Player(variant @ (PlayerVariant::SvgMale | PlayerVariant::SvgFemale)) => {
            player_figure(size, color, variant == PlayerVariant::SvgFemale)
        }
        Glyph::Equipment(EquipmentVariant::Ball) | Glyph::Ball => vec![
            Primitive::fill(Circle::new(center, radius), color),
            Primitive::stroke(Circle::new(center, radius - half), WHITE, OUTLINE_WIDTH),
            Primitive::fill(Circle::new(center, radius / 3.0), WHITE),
        ],
        Glyph::Equipment(EquipmentVariant::Triangle) => vec![Primitive::fill(triangle(frame), color)],
        Glyph::Cone => {
            let band_y = frame.y0 + frame.height() * 0.55;
            let band = Rect::new(frame.x0, band_y, frame.x1, band_y + 3.0);
            vec![
                Primitive::fill(triangle(frame), color),
                Primitive {
                    path: intersect_band(frame, band),
                    paint: Paint::Fill(WHITE),
                },
            ]
        }
        Glyph::Equipment(EquipmentVariant::GoalSmall | EquipmentVariant::GoalTop) => {
            let mut net = BezPath::new();
            let mut x = 4.0;
            while x < frame.x1 {
                net.move_to((x, frame.y0));
                net.line_to((x, frame.y1));
                x += 4.0;
            }
            vec![
                Primitive::fill(frame, color),
                Primitive {
                    path: net,
                    paint: Paint::stroke(WHITE, 1.0),
                },
            ]
        }
        Glyph::Equipment(EquipmentVariant::Ladder) => {
            // Five rungs, 4 px wide with 2 px gaps.
            (0..5u32)
                .map(|i| {
                    let x = f64::from(i) * 6.0;
                    Primitive::fill(Rect::new(x, 0.0, x + 4.0, size.height), color)
                })
                .collect()
        }
        Glyph::Equipment(EquipmentVariant::Hurdle) => {
            let mut path = BezPath::new();
            path.move_to((half, 0.0));
            path.line_to((half, frame.y1 - half));
            path.line_to((frame.x1 - half, frame.y1 - half));
            path.line_to((frame.x1 - half, 0.0));
            vec![Primitive {
                path,
                paint: Paint::stroke(color, OUTLINE_WIDTH),
            }]
        }
        Glyph::Equipment(EquipmentVariant::Pole) => vec![Primitive::fill(frame, color)],
        Glyph::Arrow(variant) => arrow(size, color, variant),
    }
}

fn triangle(frame: Rect) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((frame.center().x, frame.y0));
    path.line_to((frame.x1, frame.y1));
    path.line_to((frame.x0, frame.y1));
    path.close_path();
    path
}

/// The part of a horizontal band that lies inside the frame's triangle.
fn intersect_band(frame: Rect, band: Rect) -> BezPath {
    let half_width_at = |y: f64| (y - frame.y0) / frame.height() * frame.width() / 2.0;
    let cx = frame.center().x;
    let mut path = BezPath::new();
    path.move_to((cx - half_width_at(band.y0), band.y0));
    path.line_to((cx + half_width_at(band.y0), band.y0));
    path.line_to((cx + half_width_at(band.y1), band.y1));
    path.line_to((cx - half_width_at(band.y1), band.y1));
    path.close_path();
    path
}

fn player_figure(size: Size, color: Color, female: bool) -> Vec<Primitive> {
    let w = size.width;
    let h = size.height;
    let head = Circle::new((w / 2.0, h * 0.2), h * 0.17);

    let mut body = BezPath::new();
    if female {
        body.move_to((w * 0.35, h * 0.42));
        body.line_to((w * 0.65, h * 0.42));
        body.line_to((w * 0.85, h));
        body.line_to((w * 0.15, h));
    } else {
        body.move_to((w * 0.2, h * 0.42));
        body.line_to((w * 0.8, h * 0.42));
        body.line_to((w * 0.8, h));
        body.line_to((w * 0.2, h));
    }
    body.close_path();

    vec![
        Primitive::fill(head, color),
        Primitive {
            path: body,
            paint: Paint::Fill(color),
        },
    ]
}

fn arrow(size: Size, color: Color, variant: ArrowVariant) -> Vec<Primitive> {
    let mid = size.height / 2.0;
    let start = 2.0;
    let head_len = 8.0;
    let tip = size.width - 2.0;
    let shaft_end = tip - head_len;

    let mut shaft = BezPath::new();
    shaft.move_to((start, mid));
    if variant.is_wavy() {
        let waves: u32 = 4;
        let step = (shaft_end - start) / f64::from(waves);
        for i in 0..waves {
            let x0 = start + step * f64::from(i);
            let amplitude = if i % 2 == 0 { -4.0 } else { 4.0 };
            shaft.quad_to((x0 + step / 2.0, mid + amplitude * 2.0), (x0 + step, mid));
        }
    } else {
        shaft.line_to((shaft_end, mid));
    }

    let mut head = BezPath::new();
    head.move_to((tip, mid));
    head.line_to((shaft_end, mid - 4.0));
    head.line_to((shaft_end, mid + 4.0));
    head.close_path();

    vec![
        Primitive {
            path: shaft,
            paint: Paint::Stroke {
                color,
                width: ARROW_WIDTH,
                dash: variant.is_dashed().then_some(ARROW_DASH),
            },
        },
        Primitive {
            path: head,
            paint: Paint::Fill(color),
        },
    ]
}
