//! Armed tool and color.

use crate::catalog::{self, ToolTemplate};
use crate::error::{BoardError, BoardResult};
use crate::tokens::TokenColor;
use serde::{Deserialize, Serialize};

/// A tool the user has armed for click-to-place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmedTool {
    /// Clicks on the field place this template.
    Place(&'static ToolTemplate),
    /// Clicks place nothing; tokens can be dragged.
    Move,
}

impl ArmedTool {
    /// Whether pressing on a placed token may start a drag.
    pub fn allows_drag(&self) -> bool {
        matches!(self, ArmedTool::Move)
    }
}

/// Serializable name of a tool, as carried by board events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    Move,
    /// Catalog template id.
    Place(String),
}

impl ToolChoice {
    /// Look the choice up in the catalog.
    pub fn resolve(&self) -> BoardResult<ArmedTool> {
        match self {
            ToolChoice::Move => Ok(ArmedTool::Move),
            ToolChoice::Place(id) => catalog::template(id)
                .map(ArmedTool::Place)
                .ok_or_else(|| BoardError::UnknownTemplate(id.clone())),
        }
    }
}

/// Armed tool slot and current color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolState {
    pub armed: Option<ArmedTool>,
    pub color: TokenColor,
}

impl ToolState {
    pub fn new(color: TokenColor) -> Self {
        Self { armed: None, color }
    }

    pub fn arm(&mut self, tool: ArmedTool) {
        self.armed = Some(tool);
    }

    pub fn disarm(&mut self) -> Option<ArmedTool> {
        self.armed.take()
    }

    /// Whether pressing on a token may start a drag: with nothing armed,
    /// or with the move tool.
    pub fn drag_enabled(&self) -> bool {
        self.armed.as_ref().is_none_or(ArmedTool::allows_drag)
    }

    /// Template placed by a field click, if any.
    pub fn placing(&self) -> Option<&'static ToolTemplate> {
        match self.armed {
            Some(ArmedTool::Place(template)) => Some(template),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_gate() {
        let mut tools = ToolState::default();
        assert!(tools.drag_enabled());

        tools.arm(ArmedTool::Move);
        assert!(tools.drag_enabled());
        assert!(tools.placing().is_none());

        tools.arm(ArmedTool::Place(catalog::template("cone").unwrap()));
        assert!(!tools.drag_enabled());
        assert_eq!(tools.placing().map(|t| t.id), Some("cone"));

        tools.disarm();
        assert!(tools.drag_enabled());
    }

    #[test]
    fn test_tool_choice() {
        assert_eq!(ToolChoice::Move.resolve(), Ok(ArmedTool::Move));
        assert!(ToolChoice::Place("player-filled".into()).resolve().is_ok());
        assert_eq!(
            ToolChoice::Place("trampoline".into()).resolve(),
            Err(BoardError::UnknownTemplate("trampoline".into()))
        );

        let json = serde_json::to_string(&ToolChoice::Place("cone".into())).unwrap();
        assert_eq!(json, r#"{"place":"cone"}"#);
    }
}
