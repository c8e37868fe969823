//! Field background: pitch markings per layout and the grid overlay.
//!
//! Markings are laid out in the canonical landscape frame (goal lines on
//! the left and right) and swapped onto the box for portrait.

use crate::renderer::GridStyle;
use kurbo::{Affine, Arc, BezPath, Circle, Point, Rect, Shape, Size, Vec2};
use pitchboard_core::{FieldLayout, Orientation};
use std::f64::consts::{FRAC_PI_2, PI};

const TOLERANCE: f64 = 0.1;
/// Inset of the touchline from the field box edge.
const MARGIN: f64 = 12.0;
const GRID_DOT_RADIUS: f64 = 1.2;

// Pitch proportions, in fractions of the playing length or width.
const PENALTY_AREA_DEPTH: f64 = 16.5 / 105.0;
const PENALTY_AREA_WIDTH: f64 = 40.3 / 68.0;
const GOAL_AREA_DEPTH: f64 = 5.5 / 105.0;
const GOAL_AREA_WIDTH: f64 = 18.32 / 68.0;
const PENALTY_SPOT: f64 = 11.0 / 105.0;
const CENTER_CIRCLE_RADIUS: f64 = 9.15 / 68.0;

/// Transform from the landscape frame to the box frame.
fn frame_transform(orientation: Orientation) -> Affine {
    match orientation {
        Orientation::Landscape => Affine::IDENTITY,
        Orientation::Portrait => Affine::new([0.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
    }
}

/// Box size expressed in the landscape frame.
fn landscape_size(size: Size, orientation: Orientation) -> Size {
    match orientation {
        Orientation::Landscape => size,
        Orientation::Portrait => Size::new(size.height, size.width),
    }
}

/// Pitch markings for a layout, in box coordinates.
pub fn markings(layout: FieldLayout, size: Size, orientation: Orientation) -> BezPath {
    let frame = landscape_size(size, orientation);
    let pitch = Rect::new(MARGIN, MARGIN, frame.width - MARGIN, frame.height - MARGIN);
    let mut path = pitch.to_path(TOLERANCE);

    match layout {
        FieldLayout::Full => {
            let length = pitch.width();
            let mid = pitch.center();
            path.move_to((mid.x, pitch.y0));
            path.line_to((mid.x, pitch.y1));
            let center_circle = Circle::new(mid, CENTER_CIRCLE_RADIUS * pitch.height());
            path.extend(center_circle.path_elements(TOLERANCE));
            path.extend(Circle::new(mid, 2.0).path_elements(TOLERANCE));
            penalty_end(&mut path, pitch, length, End::Left);
            penalty_end(&mut path, pitch, length, End::Right);
        }
        FieldLayout::Half => {
            // Halfway line on the left edge, one goal on the right.
            let length = pitch.width() * 2.0;
            let center = Point::new(pitch.x0, pitch.center().y);
            let radius = CENTER_CIRCLE_RADIUS * pitch.height();
            path.move_to((center.x, center.y - radius));
            let arc = Arc::new(center, (radius, radius), -FRAC_PI_2, PI, 0.0);
            path.extend(arc.append_iter(TOLERANCE));
            penalty_end(&mut path, pitch, length, End::Right);
        }
        FieldLayout::Penalty => {
            // Zoomed on one penalty area: the box spans most of the length.
            let length = pitch.width() / (PENALTY_AREA_DEPTH * 2.2);
            penalty_end(&mut path, pitch, length, End::Right);
        }
    }

    path.apply_affine(frame_transform(orientation));
    path
}

#[derive(Clone, Copy, PartialEq)]
enum End {
    Left,
    Right,
}

/// Penalty area, goal area, spot and arc at one goal line. `length` is the
/// full playing length the markings are proportioned against.
fn penalty_end(path: &mut BezPath, pitch: Rect, length: f64, end: End) {
    let width = pitch.height();
    let mid_y = pitch.center().y;
    let (goal_x, dir) = match end {
        End::Left => (pitch.x0, 1.0),
        End::Right => (pitch.x1, -1.0),
    };

    let area = |depth: f64, breadth: f64| {
        let x = goal_x + dir * depth * length;
        Rect::new(
            goal_x.min(x),
            mid_y - breadth * width / 2.0,
            goal_x.max(x),
            mid_y + breadth * width / 2.0,
        )
    };
    path.extend(area(PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH).path_elements(TOLERANCE));
    path.extend(area(GOAL_AREA_DEPTH, GOAL_AREA_WIDTH).path_elements(TOLERANCE));

    let spot = Point::new(goal_x + dir * PENALTY_SPOT * length, mid_y);
    path.extend(Circle::new(spot, 2.0).path_elements(TOLERANCE));

    // Arc outside the penalty area, centered on the spot.
    let radius = CENTER_CIRCLE_RADIUS * width;
    let edge = goal_x + dir * PENALTY_AREA_DEPTH * length;
    let reach = (edge - spot.x).abs();
    if reach < radius {
        let half_angle = (reach / radius).acos();
        let facing = if dir > 0.0 { 0.0 } else { PI };
        let start = facing - half_angle;
        let arc = Arc::new(spot, (radius, radius), start, 2.0 * half_angle, 0.0);
        path.move_to(spot + radius * Vec2::from_angle(start));
        path.extend(arc.append_iter(TOLERANCE));
    }
}

/// Grid overlay in box coordinates. Empty for [`GridStyle::None`].
pub fn grid(style: GridStyle, size: Size, spacing: f64) -> BezPath {
    let mut path = BezPath::new();
    if spacing <= 0.0 || !spacing.is_finite() {
        return path;
    }
    match style {
        GridStyle::None => {}
        GridStyle::Lines => {
            let mut x = spacing;
            while x < size.width {
                path.move_to((x, 0.0));
                path.line_to((x, size.height));
                x += spacing;
            }
            let mut y = spacing;
            while y < size.height {
                path.move_to((0.0, y));
                path.line_to((size.width, y));
                y += spacing;
            }
        }
        GridStyle::Dots => {
            let mut x = spacing;
            while x < size.width {
                let mut y = spacing;
                while y < size.height {
                    path.extend(Circle::new((x, y), GRID_DOT_RADIUS).path_elements(TOLERANCE));
                    y += spacing;
                }
                x += spacing;
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Size {
        Size::new(1000.0, 650.0)
    }

    #[test]
    fn test_markings_stay_inside_box() {
        for layout in FieldLayout::ALL {
            for orientation in [Orientation::Landscape, Orientation::Portrait] {
                let size = match orientation {
                    Orientation::Landscape => size(),
                    Orientation::Portrait => Size::new(650.0, 1000.0),
                };
                let bounds = markings(layout, size, orientation).bounding_box();
                assert!(bounds.x0 >= MARGIN - 1e-6 && bounds.y0 >= MARGIN - 1e-6, "{layout:?}");
                assert!(bounds.x1 <= size.width - MARGIN + 1e-6, "{layout:?}");
                assert!(bounds.y1 <= size.height - MARGIN + 1e-6, "{layout:?}");
            }
        }
    }

    #[test]
    fn test_layouts_differ() {
        let full = markings(FieldLayout::Full, size(), Orientation::Landscape);
        let half = markings(FieldLayout::Half, size(), Orientation::Landscape);
        let penalty = markings(FieldLayout::Penalty, size(), Orientation::Landscape);
        assert_ne!(full, half);
        assert_ne!(half, penalty);
        assert!(full.elements().len() > penalty.elements().len());
    }

    #[test]
    fn test_portrait_is_swapped_landscape() {
        let landscape = markings(FieldLayout::Full, size(), Orientation::Landscape);
        let portrait = markings(FieldLayout::Full, Size::new(650.0, 1000.0), Orientation::Portrait);
        let a = landscape.bounding_box();
        let b = portrait.bounding_box();
        assert!((a.width() - b.height()).abs() < 1e-6);
        assert!((a.height() - b.width()).abs() < 1e-6);
    }

    #[test]
    fn test_grid_lines() {
        let path = grid(GridStyle::Lines, Size::new(200.0, 100.0), 40.0);
        // Four vertical and two horizontal lines, two elements each.
        assert_eq!(path.elements().len(), 12);
        assert!(grid(GridStyle::None, Size::new(200.0, 100.0), 40.0).is_empty());
        assert!(grid(GridStyle::Lines, Size::new(200.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn test_grid_dots() {
        let path = grid(GridStyle::Dots, Size::new(100.0, 100.0), 40.0);
        assert!(!path.is_empty());
        let bounds = path.bounding_box();
        assert!((bounds.x0 - (40.0 - GRID_DOT_RADIUS)).abs() < 0.01);
    }
}
