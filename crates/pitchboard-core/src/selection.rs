//! Single-token selection.

use crate::tokens::TokenId;

/// At most one selected token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selected: Option<TokenId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a token, replacing any previous selection.
    pub fn select(&mut self, id: TokenId) {
        self.selected = Some(id);
    }

    /// Clear the selection, returning what was selected.
    pub fn deselect(&mut self) -> Option<TokenId> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&TokenId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &TokenId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Clear the selection only if it is `id`.
    pub fn clear_if(&mut self, id: &TokenId) -> bool {
        if self.is_selected(id) {
            self.selected = None;
            true
        } else {
            false
        }
    }
}
