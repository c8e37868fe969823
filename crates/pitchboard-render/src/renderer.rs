//! Renderer trait abstraction.

use kurbo::{Point, Size};
use peniko::Color;
use pitchboard_core::interaction::DragPayload;
use pitchboard_core::tokens::{Glyph, Heading, Token, TokenColor, TokenId};
use pitchboard_core::{Board, FieldLayout, Orientation};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
    #[error("Output failed: {0}")]
    Output(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// Plain field.
    #[default]
    None,
    /// Full grid lines.
    Lines,
    /// Dots at line crossings.
    Dots,
}

impl GridStyle {
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// A token being dragged, drawn at its would-be position.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub glyph: Glyph,
    pub color: TokenColor,
    pub heading: Option<Heading>,
    /// Field coordinates.
    pub position: Point,
}

impl DragPreview {
    /// Preview of the board's active gesture, if it has a resolvable position.
    pub fn from_board(board: &Board) -> Option<Self> {
        let gesture = board.gesture()?;
        let position = gesture.preview?;
        match &gesture.payload {
            DragPayload::NewFromPalette { template, color } => Some(Self {
                glyph: template.glyph,
                color: color.clone(),
                heading: template.heading,
                position,
            }),
            DragPayload::ExistingToken { id, .. } => {
                let token = board.document().get(id)?;
                Some(Self {
                    glyph: token.glyph,
                    color: token.color.clone(),
                    heading: token.heading,
                    position,
                })
            }
        }
    }
}

/// Context for rendering one frame of the field.
pub struct RenderContext<'a> {
    /// Tokens in z-order.
    pub tokens: &'a [Token],
    pub layout: FieldLayout,
    pub orientation: Orientation,
    /// On-screen size of the field box.
    pub viewport_size: Size,
    pub background_color: Color,
    /// Pitch marking color.
    pub line_color: Color,
    pub grid_style: GridStyle,
    pub grid_size: f64,
    pub grid_color: Color,
    pub selected: Option<&'a TokenId>,
    pub selection_color: Color,
    pub preview: Option<DragPreview>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(tokens: &'a [Token], viewport_size: Size) -> Self {
        Self {
            tokens,
            layout: FieldLayout::Full,
            orientation: Orientation::Landscape,
            viewport_size,
            background_color: Color::from_rgba8(0x4a, 0x9d, 0x5b, 255),
            line_color: Color::from_rgba8(255, 255, 255, 230),
            grid_style: GridStyle::None,
            grid_size: pitchboard_core::config::DEFAULT_GRID_SIZE,
            grid_color: Color::from_rgba8(255, 255, 255, 50),
            selected: None,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            preview: None,
        }
    }

    /// Context mirroring a board's view state.
    pub fn from_board(board: &'a Board, viewport_size: Size) -> Self {
        let view = board.view();
        let grid_style = if view.show_grid {
            GridStyle::Lines
        } else {
            GridStyle::None
        };
        Self::new(board.tokens(), viewport_size)
            .with_layout(view.layout)
            .with_orientation(view.orientation)
            .with_grid(grid_style, board.config().grid_size)
            .with_selected(board.selected())
            .with_preview(DragPreview::from_board(board))
    }

    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style and spacing.
    pub fn with_grid(mut self, style: GridStyle, size: f64) -> Self {
        self.grid_style = style;
        self.grid_size = size;
        self
    }

    pub fn with_selected(mut self, selected: Option<&'a TokenId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_preview(mut self, preview: Option<DragPreview>) -> Self {
        self.preview = preview;
        self
    }

    pub(crate) fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidViewport(format!("{width}x{height}")));
        }
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(RenderError::InvalidViewport(format!(
                "grid size {}",
                self.grid_size
            )));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the output for one frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
