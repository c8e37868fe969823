//! Pointer tracking and the drag activation constraint.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Host-assigned pointer identifier (mouse, finger or pen).
pub type PointerId = u32;

/// Default hold delay before a press becomes a drag.
pub const DEFAULT_ACTIVATION_DELAY_MS: u64 = 250;
/// Default distance a held pointer may wander before the press is abandoned.
pub const DEFAULT_ACTIVATION_TOLERANCE: f64 = 5.0;

/// How long a pointer must be held, and how still, before a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConstraint {
    pub delay_ms: u64,
    pub tolerance: f64,
}

impl Default for ActivationConstraint {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_ACTIVATION_DELAY_MS,
            tolerance: DEFAULT_ACTIVATION_TOLERANCE,
        }
    }
}

impl ActivationConstraint {
    /// Activate on the first event after the press.
    pub fn immediate() -> Self {
        Self {
            delay_ms: 0,
            tolerance: f64::MAX,
        }
    }
}

/// State of the one pointer driving a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    pub pointer: PointerId,
    /// Where the pointer went down.
    pub activation: Point,
    /// Latest known position.
    pub current: Point,
    /// Host timestamp of the press.
    pub down_at: u64,
}

impl PointerTracker {
    pub fn new(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            pointer,
            activation: position,
            current: position,
            down_at: time_ms,
        }
    }

    /// Whether an event belongs to this pointer.
    pub fn owns(&self, pointer: PointerId) -> bool {
        self.pointer == pointer
    }

    pub fn move_to(&mut self, position: Point) {
        self.current = position;
    }

    /// Cumulative movement since the press.
    pub fn drag_delta(&self) -> Vec2 {
        self.current - self.activation
    }

    pub fn exceeded_tolerance(&self, constraint: &ActivationConstraint) -> bool {
        self.drag_delta().hypot() > constraint.tolerance
    }

    pub fn delay_elapsed(&self, constraint: &ActivationConstraint, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.down_at) >= constraint.delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_delta() {
        let mut tracker = PointerTracker::new(1, Point::new(100.0, 100.0), 0);
        tracker.move_to(Point::new(130.0, 90.0));
        assert_eq!(tracker.drag_delta(), Vec2::new(30.0, -10.0));
    }

    #[test]
    fn test_tolerance() {
        let constraint = ActivationConstraint::default();
        let mut tracker = PointerTracker::new(1, Point::ZERO, 0);
        tracker.move_to(Point::new(3.0, 4.0));
        assert!(!tracker.exceeded_tolerance(&constraint));
        tracker.move_to(Point::new(4.0, 4.0));
        assert!(tracker.exceeded_tolerance(&constraint));
    }

    #[test]
    fn test_delay() {
        let constraint = ActivationConstraint::default();
        let tracker = PointerTracker::new(1, Point::ZERO, 1_000);
        assert!(!tracker.delay_elapsed(&constraint, 1_249));
        assert!(tracker.delay_elapsed(&constraint, 1_250));
        // Clocks that go backwards never activate early.
        assert!(!tracker.delay_elapsed(&constraint, 10));
    }

    #[test]
    fn test_immediate_constraint() {
        let constraint = ActivationConstraint::immediate();
        let mut tracker = PointerTracker::new(1, Point::ZERO, 5);
        tracker.move_to(Point::new(500.0, 500.0));
        assert!(tracker.delay_elapsed(&constraint, 5));
        assert!(!tracker.exceeded_tolerance(&constraint));
    }
}
