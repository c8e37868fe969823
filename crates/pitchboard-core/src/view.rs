//! Field view state: grid, layout and measured geometry.

use crate::geometry::Orientation;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Which part of the pitch the background shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLayout {
    #[default]
    Full,
    Half,
    Penalty,
}

impl FieldLayout {
    pub const ALL: [FieldLayout; 3] = [FieldLayout::Full, FieldLayout::Half, FieldLayout::Penalty];

    pub fn name(self) -> &'static str {
        match self {
            FieldLayout::Full => "full",
            FieldLayout::Half => "half",
            FieldLayout::Penalty => "penalty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

/// Presentation state that does not belong to the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub show_grid: bool,
    pub layout: FieldLayout,
    pub orientation: Orientation,
    /// Screen-space field box; `None` until the host measures it.
    pub field_box: Option<Rect>,
}

impl ViewState {
    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }
}
