//! Gesture state and per-gesture listener scoping.

use crate::catalog::ToolTemplate;
use crate::input::{ActivationConstraint, PointerId, PointerTracker};
use crate::tokens::{TokenColor, TokenId};
use kurbo::{Point, Vec2};
use std::fmt;

/// What a gesture carries.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// A new token dragged out of the palette.
    NewFromPalette {
        template: &'static ToolTemplate,
        /// Armed color when the gesture began.
        color: TokenColor,
    },
    /// A placed token being repositioned.
    ExistingToken {
        id: TokenId,
        /// Box-local offset from the token's anchor to the grab point.
        capture_offset: Vec2,
    },
}

impl DragPayload {
    pub fn offset(&self) -> Vec2 {
        match self {
            DragPayload::NewFromPalette { .. } => Vec2::ZERO,
            DragPayload::ExistingToken { capture_offset, .. } => *capture_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pressed, waiting for the activation constraint.
    Pending,
    /// Dragging.
    Active,
}

/// A gesture in flight.
#[derive(Debug)]
pub struct Gesture {
    pub payload: DragPayload,
    pub tracker: PointerTracker,
    pub phase: GesturePhase,
    /// Field-space position the token would land at, for host feedback.
    pub preview: Option<Point>,
    /// Held for the life of the gesture; dropping it releases listeners.
    listeners: ListenerGuard,
}

impl Gesture {
    pub fn new(payload: DragPayload, tracker: PointerTracker, listeners: ListenerGuard) -> Self {
        Self {
            payload,
            tracker,
            phase: GesturePhase::Pending,
            preview: None,
            listeners,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GesturePhase::Active
    }

    /// Promote a pending gesture once the constraint holds.
    ///
    /// Returns `false` once the pointer leaves the tolerance while still
    /// pending, in which case the gesture must be abandoned. Tolerance is
    /// checked first, so a late event that lands far away never activates.
    pub fn try_activate(&mut self, constraint: &ActivationConstraint, now_ms: u64) -> bool {
        if self.phase == GesturePhase::Active {
            return true;
        }
        if self.tracker.exceeded_tolerance(constraint) {
            return false;
        }
        if self.tracker.delay_elapsed(constraint, now_ms) {
            self.phase = GesturePhase::Active;
        }
        true
    }

    pub fn listeners_held(&self) -> bool {
        self.listeners.is_held()
    }
}

/// The controller's gesture slot.
#[derive(Debug, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(Gesture),
}

impl InteractionState {
    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(g) => Some(g),
        }
    }

    pub fn gesture_mut(&mut self) -> Option<&mut Gesture> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(g) => Some(g),
        }
    }

    /// End the current gesture, releasing its listeners.
    pub fn take(&mut self) -> Option<Gesture> {
        match std::mem::take(self) {
            InteractionState::Idle => None,
            InteractionState::Dragging(g) => Some(g),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Installs move/up/cancel listeners for the duration of a gesture.
pub trait ListenerRegistry {
    /// Start listening to `pointer`. Listeners stay installed until the
    /// returned guard is dropped.
    fn acquire(&mut self, pointer: PointerId) -> ListenerGuard;
}

/// Releases gesture listeners when dropped.
#[derive(Default)]
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("held", &self.is_held())
            .finish()
    }
}

/// Registry for hosts that route events themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListeners;

impl ListenerRegistry for NoopListeners {
    fn acquire(&mut self, _pointer: PointerId) -> ListenerGuard {
        ListenerGuard::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn existing() -> DragPayload {
        DragPayload::ExistingToken {
            id: TokenId::from("t"),
            capture_offset: Vec2::new(2.0, 3.0),
        }
    }

    #[test]
    fn test_guard_releases_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let guard = ListenerGuard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(guard.is_held());
        drop(guard);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_take_drops_listeners() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let guard = ListenerGuard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut state = InteractionState::Dragging(Gesture::new(
            existing(),
            PointerTracker::new(1, Point::ZERO, 0),
            guard,
        ));
        assert!(state.gesture().unwrap().listeners_held());

        drop(state.take());
        assert!(state.is_idle());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_activation() {
        let constraint = ActivationConstraint::default();
        let mut gesture = Gesture::new(
            existing(),
            PointerTracker::new(1, Point::ZERO, 100),
            ListenerGuard::empty(),
        );

        gesture.tracker.move_to(Point::new(2.0, 2.0));
        assert!(gesture.try_activate(&constraint, 200));
        assert!(!gesture.is_active());

        assert!(gesture.try_activate(&constraint, 350));
        assert!(gesture.is_active());
    }

    #[test]
    fn test_early_movement_abandons() {
        let constraint = ActivationConstraint::default();
        let mut gesture = Gesture::new(
            existing(),
            PointerTracker::new(1, Point::ZERO, 0),
            ListenerGuard::empty(),
        );
        gesture.tracker.move_to(Point::new(20.0, 0.0));
        assert!(!gesture.try_activate(&constraint, 50));
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_late_jump_beyond_tolerance_abandons() {
        let constraint = ActivationConstraint::default();
        let mut gesture = Gesture::new(
            existing(),
            PointerTracker::new(1, Point::ZERO, 0),
            ListenerGuard::empty(),
        );
        gesture.tracker.move_to(Point::new(200.0, 0.0));
        assert!(!gesture.try_activate(&constraint, 300));
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_payload_offset() {
        assert_eq!(existing().offset(), Vec2::new(2.0, 3.0));
    }
}
