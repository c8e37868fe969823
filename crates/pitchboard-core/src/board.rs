//! The board session: document, tools, selection and the gesture in flight.
//!
//! [`Board`] is the single writer for all session state. Hosts feed it
//! pointer and command events (either by calling methods directly or via
//! [`Board::handle`]) and re-render when [`Board::revision`] changes.

use crate::catalog::{self, ToolTemplate};
use crate::config::BoardConfig;
use crate::demo;
use crate::document::{BoardDocument, TokenPatch};
use crate::error::{BoardError, BoardResult};
use crate::format::{BoardFile, ImportedBoard};
use crate::geometry::{self, DropTarget, Orientation, PointerLocation};
use crate::input::{PointerId, PointerTracker};
use crate::interaction::{
    DragPayload, Gesture, InteractionState, ListenerRegistry, NoopListeners,
};
use crate::selection::Selection;
use crate::tokens::{Token, TokenColor, TokenId};
use crate::tools::{ArmedTool, ToolChoice, ToolState};
use crate::view::{FieldLayout, ViewState};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An input or command addressed to a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// Pointer pressed on a palette entry.
    PaletteDown {
        template: String,
        #[serde(default)]
        pointer: PointerId,
        position: Point,
        #[serde(default)]
        time_ms: u64,
    },
    /// Pointer pressed on a placed token.
    TokenDown {
        id: TokenId,
        #[serde(default)]
        pointer: PointerId,
        position: Point,
        #[serde(default)]
        time_ms: u64,
    },
    PointerMove {
        #[serde(default)]
        pointer: PointerId,
        position: Point,
        #[serde(default)]
        time_ms: u64,
    },
    /// Pointer released. A missing drop target is classified against the
    /// measured field box.
    PointerUp {
        #[serde(default)]
        pointer: PointerId,
        location: PointerLocation,
        #[serde(default)]
        drop_target: Option<DropTarget>,
        #[serde(default)]
        time_ms: u64,
    },
    /// Clock advance with no pointer movement.
    Tick { time_ms: u64 },
    /// Pointer cancel or Escape.
    Cancel,
    FieldClick { position: Point },
    SelectTool { tool: ToolChoice },
    ClearTool,
    Recolor { color: String },
    Select { id: TokenId },
    DeleteSelected,
    Deselect,
    Remove { id: TokenId },
    ClearAll,
    ToggleGrid,
    SetLayout { layout: FieldLayout },
    /// The host measured (or lost) the field surface.
    MeasureField { rect: Option<Rect> },
    Viewport { width: f64 },
    LoadDemo,
}

/// What an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    Created(TokenId),
    Moved(TokenId),
    Recolored(TokenId),
    Removed(TokenId),
    Cleared,
    Selected(TokenId),
    Deselected,
    /// A press is waiting for the activation constraint.
    GesturePending,
    /// A drag became active.
    GestureStarted,
    /// The active drag's preview moved.
    Dragged { preview: Option<Point> },
    GestureCancelled,
    /// A new token was dropped off the field.
    Discarded,
    ToolChanged,
    ViewChanged,
    Imported { tokens: usize },
}

/// A tactics board session.
pub struct Board {
    document: BoardDocument,
    tools: ToolState,
    selection: Selection,
    interaction: InteractionState,
    view: ViewState,
    config: BoardConfig,
    listeners: Box<dyn ListenerRegistry + Send>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("document", &self.document)
            .field("tools", &self.tools)
            .field("selection", &self.selection)
            .field("interaction", &self.interaction)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create an empty board whose host routes gesture events itself.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_listeners(config, NoopListeners)
    }

    /// Create an empty board that scopes gesture listeners through `registry`.
    pub fn with_listeners(
        config: BoardConfig,
        registry: impl ListenerRegistry + Send + 'static,
    ) -> Self {
        let view = ViewState {
            show_grid: config.show_grid,
            layout: config.initial_layout,
            ..ViewState::default()
        };
        Self {
            document: BoardDocument::new(),
            tools: ToolState::new(config.default_color.clone()),
            selection: Selection::new(),
            interaction: InteractionState::Idle,
            view,
            config,
            listeners: Box::new(registry),
        }
    }

    pub fn document(&self) -> &BoardDocument {
        &self.document
    }

    /// Tokens in z-order.
    pub fn tokens(&self) -> &[Token] {
        self.document.snapshot()
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn selected(&self) -> Option<&TokenId> {
        self.selection.selected()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.interaction.gesture()
    }

    /// Preview position of the active drag, in field coordinates.
    pub fn preview(&self) -> Option<Point> {
        self.interaction.gesture().and_then(|g| g.preview)
    }

    pub fn revision(&self) -> u64 {
        self.document.revision()
    }

    // --- Gestures ---

    fn start_gesture(
        &mut self,
        payload: DragPayload,
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    ) -> Outcome {
        let guard = self.listeners.acquire(pointer);
        let mut gesture = Gesture::new(
            payload,
            PointerTracker::new(pointer, position, time_ms),
            guard,
        );
        gesture.try_activate(&self.config.activation, time_ms);
        let outcome = if gesture.is_active() {
            gesture.preview = preview_at(&self.view, &gesture);
            Outcome::GestureStarted
        } else {
            Outcome::GesturePending
        };
        log::debug!("Gesture on pointer {} {:?}", pointer, outcome);
        self.interaction = InteractionState::Dragging(gesture);
        outcome
    }

    /// Press on a palette entry: start dragging a new token.
    pub fn begin_palette_drag(
        &mut self,
        template: &'static ToolTemplate,
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    ) -> Outcome {
        if !self.interaction.is_idle() {
            log::debug!("Ignoring pointer {} during a gesture", pointer);
            return Outcome::Unchanged;
        }
        let payload = DragPayload::NewFromPalette {
            template,
            color: self.tools.color.clone(),
        };
        self.start_gesture(payload, pointer, position, time_ms)
    }

    /// Press on a placed token: select it and start a move.
    ///
    /// Does nothing while a placing tool is armed.
    pub fn begin_token_drag(
        &mut self,
        id: &TokenId,
        pointer: PointerId,
        position: Point,
        time_ms: u64,
    ) -> BoardResult<Outcome> {
        if !self.interaction.is_idle() {
            log::debug!("Ignoring pointer {} during a gesture", pointer);
            return Ok(Outcome::Unchanged);
        }
        if !self.tools.drag_enabled() {
            return Ok(Outcome::Unchanged);
        }
        let token_position = match self.document.require(id) {
            Ok(token) => token.position,
            Err(e) => {
                log::debug!("{}", e);
                return Ok(Outcome::Unchanged);
            }
        };
        let capture_offset = geometry::capture_offset(
            self.view.field_box,
            position,
            token_position,
            self.view.orientation,
        )?;
        self.selection.select(id.clone());
        let payload = DragPayload::ExistingToken {
            id: id.clone(),
            capture_offset,
        };
        Ok(self.start_gesture(payload, pointer, position, time_ms))
    }

    /// Pointer moved. Updates the preview only; the document is untouched.
    pub fn pointer_move(&mut self, pointer: PointerId, position: Point, time_ms: u64) -> Outcome {
        let constraint = self.config.activation;
        let Some(gesture) = self.interaction.gesture_mut() else {
            return Outcome::Unchanged;
        };
        if !gesture.tracker.owns(pointer) {
            return Outcome::Unchanged;
        }
        gesture.tracker.move_to(position);
        let was_active = gesture.is_active();
        if !gesture.try_activate(&constraint, time_ms) {
            self.interaction.take();
            log::debug!("Pointer {} moved before activation, gesture dropped", pointer);
            return Outcome::GestureCancelled;
        }
        if !gesture.is_active() {
            return Outcome::Unchanged;
        }

        let preview = preview_at(&self.view, gesture);
        gesture.preview = preview;
        if was_active {
            Outcome::Dragged { preview }
        } else {
            Outcome::GestureStarted
        }
    }

    /// Clock advance: lets a held, still pointer activate its drag.
    pub fn tick(&mut self, time_ms: u64) -> Outcome {
        let constraint = self.config.activation;
        let view = &self.view;
        let Some(gesture) = self.interaction.gesture_mut() else {
            return Outcome::Unchanged;
        };
        if gesture.is_active() {
            return Outcome::Unchanged;
        }
        gesture.try_activate(&constraint, time_ms);
        if !gesture.is_active() {
            return Outcome::Unchanged;
        }
        gesture.preview = preview_at(view, gesture);
        Outcome::GestureStarted
    }

    /// Pointer released: commit or abandon the gesture. Always returns to idle.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        location: PointerLocation,
        drop_target: DropTarget,
        time_ms: u64,
    ) -> BoardResult<Outcome> {
        match self.interaction.gesture() {
            Some(g) if g.tracker.owns(pointer) => {}
            _ => return Ok(Outcome::Unchanged),
        }
        let Some(mut gesture) = self.interaction.take() else {
            return Ok(Outcome::Unchanged);
        };

        gesture.tracker.move_to(location.screen_point());
        let within = gesture.try_activate(&self.config.activation, time_ms);
        if !gesture.is_active() {
            return Ok(match gesture.payload {
                // Released before the drag started: a plain click.
                DragPayload::ExistingToken { id, .. } if within => {
                    log::debug!("Click on token {}", id);
                    Outcome::Selected(id)
                }
                _ => Outcome::GestureCancelled,
            });
        }

        let offset = gesture.payload.offset();
        match gesture.payload {
            DragPayload::ExistingToken { id, .. } => {
                let position = self.resolve_commit(location, offset)?;
                if self.document.update(&id, TokenPatch::position(position)) {
                    Ok(Outcome::Moved(id))
                } else {
                    Ok(Outcome::Unchanged)
                }
            }
            DragPayload::NewFromPalette { template, color } => {
                if drop_target != DropTarget::Field {
                    log::debug!("Dropped {} outside the field", template.id);
                    return Ok(Outcome::Discarded);
                }
                let position = self.resolve_commit(location, offset)?;
                let token = self.document.create(template, color, position);
                Ok(Outcome::Created(token.id().clone()))
            }
        }
    }

    fn resolve_commit(&self, location: PointerLocation, offset: Vec2) -> BoardResult<Point> {
        geometry::resolve(self.view.field_box, location, offset, self.view.orientation).inspect_err(
            |e| log::warn!("Gesture aborted: {}", e),
        )
    }

    /// Abort any gesture without touching the document.
    pub fn cancel_gesture(&mut self) -> Outcome {
        match self.interaction.take() {
            Some(_) => {
                log::debug!("Gesture cancelled");
                Outcome::GestureCancelled
            }
            None => Outcome::Unchanged,
        }
    }

    /// Click on empty field: place the armed template, if any.
    pub fn field_click(&mut self, position: Point) -> BoardResult<Outcome> {
        if !self.interaction.is_idle() {
            return Ok(Outcome::Unchanged);
        }
        let Some(template) = self.tools.placing() else {
            return Ok(Outcome::Unchanged);
        };
        let point = geometry::resolve(
            self.view.field_box,
            PointerLocation::Absolute(position),
            Vec2::ZERO,
            self.view.orientation,
        )?;
        let color = self.tools.color.clone();
        let token = self.document.create_numbered(template, color, point);
        Ok(Outcome::Created(token.id().clone()))
    }

    // --- Tools and selection ---

    pub fn select_tool(&mut self, tool: ArmedTool) -> Outcome {
        log::debug!("Armed {:?}", tool);
        self.tools.arm(tool);
        Outcome::ToolChanged
    }

    pub fn clear_tool(&mut self) -> Outcome {
        match self.tools.disarm() {
            Some(_) => Outcome::ToolChanged,
            None => Outcome::Unchanged,
        }
    }

    /// Set the armed color and recolor the selected token, if any.
    pub fn recolor(&mut self, color: TokenColor) -> Outcome {
        self.tools.color = color.clone();
        let Some(id) = self.selection.selected().cloned() else {
            return Outcome::ToolChanged;
        };
        if self.document.update(&id, TokenPatch::color(color)) {
            Outcome::Recolored(id)
        } else {
            self.selection.clear_if(&id);
            Outcome::ToolChanged
        }
    }

    pub fn select(&mut self, id: &TokenId) -> Outcome {
        if let Err(e) = self.document.require(id) {
            log::debug!("{}", e);
            return Outcome::Unchanged;
        }
        self.selection.select(id.clone());
        Outcome::Selected(id.clone())
    }

    pub fn deselect(&mut self) -> Outcome {
        match self.selection.deselect() {
            Some(_) => Outcome::Deselected,
            None => Outcome::Unchanged,
        }
    }

    /// Remove the selected token. No-op without a selection.
    pub fn delete_selected(&mut self) -> Outcome {
        let Some(id) = self.selection.deselect() else {
            return Outcome::Unchanged;
        };
        match self.document.remove(&id) {
            Some(_) => Outcome::Removed(id),
            None => Outcome::Unchanged,
        }
    }

    pub fn remove(&mut self, id: &TokenId) -> Outcome {
        match self.document.remove(id) {
            Some(_) => {
                self.selection.clear_if(id);
                Outcome::Removed(id.clone())
            }
            None => Outcome::Unchanged,
        }
    }

    /// Empty the field and reset player numbering. A gesture in flight is
    /// left alone; committing it later is a no-op for removed tokens.
    pub fn clear_all(&mut self) -> Outcome {
        log::info!("Clearing {} tokens", self.document.len());
        self.document.clear_all();
        self.selection.deselect();
        Outcome::Cleared
    }

    // --- View ---

    pub fn toggle_grid(&mut self) -> Outcome {
        self.view.toggle_grid();
        Outcome::ViewChanged
    }

    pub fn set_layout(&mut self, layout: FieldLayout) -> Outcome {
        if self.view.layout == layout {
            return Outcome::Unchanged;
        }
        self.view.layout = layout;
        self.selection.deselect();
        Outcome::ViewChanged
    }

    /// Record the field surface's screen box, or `None` when unmounted.
    pub fn measure_field(&mut self, rect: Option<Rect>) -> Outcome {
        self.view.field_box = rect;
        Outcome::ViewChanged
    }

    /// Pick the orientation for a viewport width. Switching orientation
    /// cancels a gesture in flight since its capture offset no longer
    /// applies.
    pub fn set_viewport(&mut self, width: f64) -> Outcome {
        let orientation = Orientation::for_viewport(width, self.config.portrait_breakpoint);
        if orientation == self.view.orientation {
            return Outcome::Unchanged;
        }
        self.interaction.take();
        self.view.orientation = orientation;
        log::debug!("Orientation now {:?}", orientation);
        Outcome::ViewChanged
    }

    /// Front-most token under a screen point.
    pub fn token_at(&self, screen: Point) -> Option<&TokenId> {
        let local = geometry::screen_to_local(self.view.field_box, screen).ok()?;
        self.document
            .token_at(local, self.view.orientation, self.config.hit_tolerance)
    }

    pub fn drop_target_at(&self, screen: Point) -> DropTarget {
        geometry::drop_target_at(self.view.field_box, screen)
    }

    // --- Import / export ---

    /// Snapshot the board for saving. Never fails.
    pub fn export(&self) -> BoardFile {
        BoardFile::from_document(&self.document, self.view.layout)
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        self.export().to_json()
    }

    /// Replace the board from JSON. On error nothing changes.
    pub fn import_json(&mut self, json: &str) -> BoardResult<Outcome> {
        let board = BoardFile::parse(json).inspect_err(|e| log::warn!("Import rejected: {}", e))?;
        Ok(self.import(board))
    }

    /// Replace the board with validated contents.
    pub fn import(&mut self, board: ImportedBoard) -> Outcome {
        self.interaction.take();
        self.selection.deselect();
        let count = board.tokens.len();
        self.document.replace(board.tokens, board.counter);
        self.view.layout = board.layout;
        log::info!("Imported {} tokens", count);
        Outcome::Imported { tokens: count }
    }

    pub fn load_demo(&mut self) -> BoardResult<Outcome> {
        let board = demo::demo_board().into_board()?;
        Ok(self.import(board))
    }

    /// Apply one event.
    pub fn handle(&mut self, event: BoardEvent) -> BoardResult<Outcome> {
        match event {
            BoardEvent::PaletteDown {
                template,
                pointer,
                position,
                time_ms,
            } => {
                let template = catalog::template(&template)
                    .ok_or(BoardError::UnknownTemplate(template))?;
                Ok(self.begin_palette_drag(template, pointer, position, time_ms))
            }
            BoardEvent::TokenDown {
                id,
                pointer,
                position,
                time_ms,
            } => self.begin_token_drag(&id, pointer, position, time_ms),
            BoardEvent::PointerMove {
                pointer,
                position,
                time_ms,
            } => Ok(self.pointer_move(pointer, position, time_ms)),
            BoardEvent::PointerUp {
                pointer,
                location,
                drop_target,
                time_ms,
            } => {
                let target =
                    drop_target.unwrap_or_else(|| self.drop_target_at(location.screen_point()));
                self.pointer_up(pointer, location, target, time_ms)
            }
            BoardEvent::Tick { time_ms } => Ok(self.tick(time_ms)),
            BoardEvent::Cancel => Ok(self.cancel_gesture()),
            BoardEvent::FieldClick { position } => self.field_click(position),
            BoardEvent::SelectTool { tool } => {
                let armed = tool.resolve()?;
                Ok(self.select_tool(armed))
            }
            BoardEvent::ClearTool => Ok(self.clear_tool()),
            BoardEvent::Recolor { color } => {
                let parsed = TokenColor::parse(&color).ok_or(BoardError::InvalidColor(color))?;
                Ok(self.recolor(parsed))
            }
            BoardEvent::Select { id } => Ok(self.select(&id)),
            BoardEvent::DeleteSelected => Ok(self.delete_selected()),
            BoardEvent::Deselect => Ok(self.deselect()),
            BoardEvent::Remove { id } => Ok(self.remove(&id)),
            BoardEvent::ClearAll => Ok(self.clear_all()),
            BoardEvent::ToggleGrid => Ok(self.toggle_grid()),
            BoardEvent::SetLayout { layout } => Ok(self.set_layout(layout)),
            BoardEvent::MeasureField { rect } => Ok(self.measure_field(rect)),
            BoardEvent::Viewport { width } => Ok(self.set_viewport(width)),
            BoardEvent::LoadDemo => self.load_demo(),
        }
    }
}

/// Where the gesture's token would land if released now.
fn preview_at(view: &ViewState, gesture: &Gesture) -> Option<Point> {
    geometry::resolve(
        view.field_box,
        PointerLocation::Absolute(gesture.tracker.current),
        gesture.payload.offset(),
        view.orientation,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ActivationConstraint;
    use crate::tokens::PaletteColor;

    fn board() -> Board {
        let config = BoardConfig {
            activation: ActivationConstraint::immediate(),
            ..BoardConfig::default()
        };
        let mut board = Board::new(config);
        board.measure_field(Some(Rect::new(50.0, 100.0, 1050.0, 750.0)));
        board
    }

    fn place(board: &mut Board, template: &str, screen: Point) -> TokenId {
        let template = catalog::template(template).unwrap();
        board.begin_palette_drag(template, 1, Point::new(10.0, 10.0), 0);
        match board
            .pointer_up(1, screen.into(), DropTarget::Field, 0)
            .unwrap()
        {
            Outcome::Created(id) => id,
            other => panic!("expected a new token, got {other:?}"),
        }
    }

    #[test]
    fn test_palette_drop_creates_token() {
        let mut board = board();
        board.recolor(PaletteColor::Red.into());
        let id = place(&mut board, "player-filled", Point::new(150.0, 220.0));

        let token = board.document().get(&id).unwrap();
        assert_eq!(token.position, Point::new(100.0, 120.0));
        assert_eq!(token.color, PaletteColor::Red.into());
        assert_eq!(token.number, None);
        assert!(board.gesture().is_none());
    }

    #[test]
    fn test_drop_outside_field_discards() {
        let mut board = board();
        let template = catalog::template("cone").unwrap();
        board.begin_palette_drag(template, 1, Point::ZERO, 0);
        let outcome = board
            .pointer_up(1, Point::new(5.0, 5.0).into(), DropTarget::Outside, 0)
            .unwrap();
        assert_eq!(outcome, Outcome::Discarded);
        assert!(board.tokens().is_empty());
        assert_eq!(board.revision(), 0);
    }

    #[test]
    fn test_drag_existing_token() {
        let mut board = board();
        let id = place(&mut board, "player-filled", Point::new(150.0, 220.0));

        board
            .begin_token_drag(&id, 2, Point::new(155.0, 223.0), 0)
            .unwrap();
        assert_eq!(board.selected(), Some(&id));
        let moved = board.pointer_move(2, Point::new(170.0, 215.0), 10);
        assert!(matches!(moved, Outcome::Dragged { .. }));
        assert_eq!(board.preview(), Some(Point::new(115.0, 112.0)));
        // Moves never touch the document.
        assert_eq!(board.document().get(&id).unwrap().position, Point::new(100.0, 120.0));

        let location = PointerLocation::Relative {
            activation: Point::new(155.0, 223.0),
            delta: Vec2::new(30.0, -10.0),
        };
        let outcome = board.pointer_up(2, location, DropTarget::Outside, 20).unwrap();
        assert_eq!(outcome, Outcome::Moved(id.clone()));
        assert_eq!(board.document().get(&id).unwrap().position, Point::new(130.0, 110.0));
    }

    #[test]
    fn test_second_pointer_ignored() {
        let mut board = board();
        let id = place(&mut board, "cone", Point::new(300.0, 300.0));
        let template = catalog::template("ball").unwrap();
        board.begin_palette_drag(template, 1, Point::ZERO, 0);

        assert_eq!(
            board.begin_token_drag(&id, 2, Point::new(300.0, 300.0), 0),
            Ok(Outcome::Unchanged)
        );
        assert_eq!(board.pointer_move(2, Point::new(1.0, 1.0), 0), Outcome::Unchanged);
        assert_eq!(
            board.pointer_up(2, Point::new(300.0, 300.0).into(), DropTarget::Field, 0),
            Ok(Outcome::Unchanged)
        );
        assert!(board.gesture().is_some());
    }

    #[test]
    fn test_unmeasured_field_aborts() {
        let mut board = board();
        board.measure_field(None);
        let template = catalog::template("cone").unwrap();
        board.begin_palette_drag(template, 1, Point::ZERO, 0);
        let result = board.pointer_up(1, Point::new(100.0, 100.0).into(), DropTarget::Field, 0);
        assert_eq!(result, Err(BoardError::GeometryUnavailable));
        assert!(board.tokens().is_empty());
        assert!(board.gesture().is_none());
    }

    #[test]
    fn test_click_to_place_numbers_players() {
        let mut board = board();
        let template = catalog::template("player-filled").unwrap();
        board.select_tool(ArmedTool::Place(template));

        let first = board.field_click(Point::new(150.0, 220.0)).unwrap();
        let second = board.field_click(Point::new(160.0, 230.0)).unwrap();
        let (Outcome::Created(a), Outcome::Created(b)) = (first, second) else {
            panic!("expected two placements");
        };
        let a = board.document().get(&a).unwrap();
        let b = board.document().get(&b).unwrap();
        assert_eq!((a.position, a.number), (Point::new(100.0, 120.0), Some(1)));
        assert_eq!((b.position, b.number), (Point::new(110.0, 130.0), Some(2)));
        assert!(board.tools().placing().is_some());
    }

    #[test]
    fn test_placing_tool_blocks_drags() {
        let mut board = board();
        let id = place(&mut board, "cone", Point::new(300.0, 300.0));
        board.select_tool(ArmedTool::Place(catalog::template("ball").unwrap()));
        assert_eq!(
            board.begin_token_drag(&id, 1, Point::new(300.0, 300.0), 0),
            Ok(Outcome::Unchanged)
        );

        board.select_tool(ArmedTool::Move);
        assert_eq!(board.field_click(Point::new(400.0, 400.0)), Ok(Outcome::Unchanged));
        assert_eq!(
            board.begin_token_drag(&id, 1, Point::new(300.0, 300.0), 0),
            Ok(Outcome::GestureStarted)
        );
    }

    #[test]
    fn test_recolor_and_delete_selected() {
        let mut board = board();
        let id = place(&mut board, "shape-circle", Point::new(200.0, 200.0));
        assert_eq!(board.delete_selected(), Outcome::Unchanged);

        board.select(&id);
        assert_eq!(board.recolor(PaletteColor::Blue.into()), Outcome::Recolored(id.clone()));
        assert_eq!(board.document().get(&id).unwrap().color, PaletteColor::Blue.into());

        assert_eq!(board.delete_selected(), Outcome::Removed(id));
        assert!(board.selected().is_none());
        assert!(board.tokens().is_empty());
    }

    #[test]
    fn test_layout_change_clears_selection() {
        let mut board = board();
        let id = place(&mut board, "ball", Point::new(200.0, 200.0));
        board.select(&id);
        assert_eq!(board.set_layout(FieldLayout::Half), Outcome::ViewChanged);
        assert!(board.selected().is_none());
        assert_eq!(board.set_layout(FieldLayout::Half), Outcome::Unchanged);
    }

    #[test]
    fn test_clear_all_during_drag_makes_commit_stale() {
        let mut board = board();
        let id = place(&mut board, "ball", Point::new(200.0, 200.0));
        board.begin_token_drag(&id, 1, Point::new(200.0, 200.0), 0).unwrap();
        board.clear_all();
        let outcome = board
            .pointer_up(1, Point::new(250.0, 250.0).into(), DropTarget::Field, 0)
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(board.tokens().is_empty());
    }

    #[test]
    fn test_token_at_hits_front_most() {
        let mut board = board();
        let _back = place(&mut board, "player-filled", Point::new(150.0, 220.0));
        let front = place(&mut board, "player-circle", Point::new(155.0, 220.0));
        assert_eq!(board.token_at(Point::new(152.0, 220.0)), Some(&front));
        assert_eq!(board.token_at(Point::new(900.0, 700.0)), None);
    }

    #[test]
    fn test_handle_events() {
        let mut board = board();
        let events: Vec<BoardEvent> = serde_json::from_str(
            r#"[
                {"type": "select_tool", "tool": {"place": "player-filled"}},
                {"type": "recolor", "color": "yellow"},
                {"type": "field_click", "position": {"x": 150, "y": 220}},
                {"type": "toggle_grid"}
            ]"#,
        )
        .unwrap();
        for event in events {
            board.handle(event).unwrap();
        }
        assert_eq!(board.tokens().len(), 1);
        assert_eq!(board.tokens()[0].color, PaletteColor::Yellow.into());
        assert!(board.view().show_grid);

        let unknown = BoardEvent::SelectTool {
            tool: ToolChoice::Place("trampoline".to_string()),
        };
        assert!(matches!(board.handle(unknown), Err(BoardError::UnknownTemplate(_))));
        let blank = BoardEvent::Recolor {
            color: " ".to_string(),
        };
        assert!(matches!(board.handle(blank), Err(BoardError::InvalidColor(_))));
    }

    #[test]
    fn test_load_demo() {
        let mut board = board();
        let outcome = board.load_demo().unwrap();
        assert_eq!(outcome, Outcome::Imported { tokens: 11 });
        assert_eq!(board.export().items.len(), 11);
    }
}
