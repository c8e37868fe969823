//! Conversion from screen pointer positions to field coordinates.
//!
//! The field surface is measured by the host as a screen-space [`Rect`].
//! A pointer position becomes box-local by subtracting the box origin and
//! the gesture's capture offset, and field coordinates by applying the
//! active [`Orientation`].

use crate::error::{BoardError, BoardResult};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default viewport width (CSS pixels) below which the field is laid out
/// in portrait.
pub const DEFAULT_PORTRAIT_BREAKPOINT: f64 = 768.0;

/// How the field is laid out on screen relative to its canonical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Field frame equals the on-screen box frame.
    #[default]
    Landscape,
    /// Narrow layout: the field runs top-to-bottom, so x and y swap.
    Portrait,
}

impl Orientation {
    /// Pick the orientation for a viewport width. Call once per render pass.
    pub fn for_viewport(viewport_width: f64, breakpoint: f64) -> Self {
        if viewport_width < breakpoint {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Box-local point to field coordinates.
    pub fn to_field(self, local: Point) -> Point {
        match self {
            Orientation::Landscape => local,
            Orientation::Portrait => Point::new(local.y, local.x),
        }
    }

    /// Field coordinates to a box-local point.
    pub fn to_local(self, field: Point) -> Point {
        // The axis swap is its own inverse.
        self.to_field(field)
    }

    /// Map a field-space vector to box-local space.
    pub fn vec_to_local(self, v: Vec2) -> Vec2 {
        match self {
            Orientation::Landscape => v,
            Orientation::Portrait => Vec2::new(v.y, v.x),
        }
    }
}

/// A pointer location as reported at the end of a gesture.
///
/// Either form must resolve to the same screen point for the same final
/// pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerLocation {
    /// Current pointer position, re-measured.
    Absolute(Point),
    /// Activation point plus the gesture's cumulative delta.
    Relative { activation: Point, delta: Vec2 },
}

impl PointerLocation {
    /// The screen point this location denotes.
    pub fn screen_point(&self) -> Point {
        match *self {
            PointerLocation::Absolute(p) => p,
            PointerLocation::Relative { activation, delta } => activation + delta,
        }
    }
}

impl From<Point> for PointerLocation {
    fn from(point: Point) -> Self {
        PointerLocation::Absolute(point)
    }
}

/// What lies under the pointer when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// The field surface.
    Field,
    /// Anywhere else (palette, outside the window, another panel).
    Outside,
}

/// Check that a measured box can be used for coordinate conversion.
pub fn measured_box(field_box: Option<Rect>) -> BoardResult<Rect> {
    match field_box {
        Some(rect)
            if rect.x0.is_finite()
                && rect.y0.is_finite()
                && rect.x1.is_finite()
                && rect.y1.is_finite()
                && rect.width() > 0.0
                && rect.height() > 0.0 =>
        {
            Ok(rect)
        }
        _ => Err(BoardError::GeometryUnavailable),
    }
}

/// Convert a screen point to box-local coordinates.
pub fn screen_to_local(field_box: Option<Rect>, screen: Point) -> BoardResult<Point> {
    let rect = measured_box(field_box)?;
    if !screen.x.is_finite() || !screen.y.is_finite() {
        return Err(BoardError::GeometryUnavailable);
    }
    Ok(Point::new(screen.x - rect.x0, screen.y - rect.y0))
}

/// Resolve a pointer to field coordinates.
///
/// `offset` is the box-local capture offset taken at gesture start, or
/// zero for a fresh placement (the pointer then becomes the token's anchor).
pub fn resolve(
    field_box: Option<Rect>,
    pointer: PointerLocation,
    offset: Vec2,
    orientation: Orientation,
) -> BoardResult<Point> {
    let local = screen_to_local(field_box, pointer.screen_point())? - offset;
    Ok(orientation.to_field(local))
}

/// Capture offset between the pointer and a token's anchor, in box-local
/// space. Held fixed for the rest of the gesture.
pub fn capture_offset(
    field_box: Option<Rect>,
    pointer: Point,
    token_position: Point,
    orientation: Orientation,
) -> BoardResult<Vec2> {
    let local = screen_to_local(field_box, pointer)?;
    Ok(local - orientation.to_local(token_position))
}

/// Classify a screen point against the field box.
pub fn drop_target_at(field_box: Option<Rect>, screen: Point) -> DropTarget {
    match measured_box(field_box) {
        Ok(rect) if rect.contains(screen) => DropTarget::Field,
        _ => DropTarget::Outside,
    }
}
