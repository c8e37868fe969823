//! Board configuration.

use crate::error::{BoardError, BoardResult};
use crate::geometry::DEFAULT_PORTRAIT_BREAKPOINT;
use crate::input::ActivationConstraint;
use crate::tokens::TokenColor;
use crate::view::FieldLayout;
use serde::{Deserialize, Serialize};

/// Default spacing of the grid overlay in CSS pixels.
pub const DEFAULT_GRID_SIZE: f64 = 40.0;
/// Default slack around glyph bounds when hit testing.
pub const DEFAULT_HIT_TOLERANCE: f64 = 4.0;

/// Tunables for a board session. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Hold delay and tolerance before a drag starts.
    pub activation: ActivationConstraint,
    /// Color armed when a session starts.
    pub default_color: TokenColor,
    pub initial_layout: FieldLayout,
    pub show_grid: bool,
    pub grid_size: f64,
    /// Viewport width below which the field is shown in portrait.
    pub portrait_breakpoint: f64,
    pub hit_tolerance: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            activation: ActivationConstraint::default(),
            default_color: TokenColor::default(),
            initial_layout: FieldLayout::default(),
            show_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            portrait_breakpoint: DEFAULT_PORTRAIT_BREAKPOINT,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: BoardConfig =
            serde_json::from_str(json).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(BoardError::Config(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if !(self.portrait_breakpoint >= 0.0) {
            return Err(BoardError::Config(
                "portrait_breakpoint must not be negative".to_string(),
            ));
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(BoardError::Config(
                "hit_tolerance must be a finite non-negative number".to_string(),
            ));
        }
        if self.activation.tolerance.is_nan() || self.activation.tolerance < 0.0 {
            return Err(BoardError::Config(
                "activation.tolerance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
