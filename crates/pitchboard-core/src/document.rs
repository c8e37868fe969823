//! Placement store: the ordered tokens on the field.

use crate::catalog::ToolTemplate;
use crate::error::{BoardError, BoardResult};
use crate::geometry::Orientation;
use crate::tokens::{Token, TokenColor, TokenId};
use kurbo::Point;

/// First number handed out to a click-placed player.
pub const INITIAL_PLAYER_NUMBER: u32 = 1;
/// Highest value the player counter may hold. Numbers stay below it.
pub const MAX_PLAYER_COUNTER: u32 = u32::MAX - 1;

/// Fields that can change on an existing token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPatch {
    pub position: Option<Point>,
    pub color: Option<TokenColor>,
}

impl TokenPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            color: None,
        }
    }

    pub fn color(color: TokenColor) -> Self {
        Self {
            position: None,
            color: Some(color),
        }
    }
}

/// Ordered tokens on the field.
///
/// Insertion order is z-order (back to front). Every committed mutation
/// bumps [`BoardDocument::revision`] so hosts know to re-render.
#[derive(Debug, Clone)]
pub struct BoardDocument {
    tokens: Vec<Token>,
    next_number: u32,
    revision: u64,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            next_number: INITIAL_PLAYER_NUMBER,
            revision: 0,
        }
    }

    fn fresh_id(&self) -> TokenId {
        loop {
            let id = TokenId::new();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Append a token built from a palette entry.
    pub fn create(&mut self, template: &ToolTemplate, color: TokenColor, position: Point) -> &Token {
        let mut token = Token::new(self.fresh_id(), template.glyph, color, position);
        token.heading = template.heading;
        self.push(token)
    }

    /// Append a token and, for players, label it with the next number.
    pub fn create_numbered(
        &mut self,
        template: &ToolTemplate,
        color: TokenColor,
        position: Point,
    ) -> &Token {
        let number = if template.glyph.is_player() {
            self.take_number()
        } else {
            None
        };
        let mut token = Token::new(self.fresh_id(), template.glyph, color, position);
        token.heading = template.heading;
        token.number = number;
        self.push(token)
    }

    /// Hand out the next player number. Once the counter is exhausted
    /// players are placed without a label.
    fn take_number(&mut self) -> Option<u32> {
        let n = self.next_number;
        match n.checked_add(1) {
            Some(next) if next <= MAX_PLAYER_COUNTER => {
                self.next_number = next;
                Some(n)
            }
            _ => {
                log::warn!("Player numbers exhausted at {}", n);
                None
            }
        }
    }

    fn push(&mut self, token: Token) -> &Token {
        log::debug!(
            "Created {} {} at ({:.1}, {:.1})",
            token.glyph.kind().name(),
            token.id,
            token.position.x,
            token.position.y
        );
        self.touch();
        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &self.tokens[last]
    }

    /// Merge changed fields into a token. Returns `false` (and changes
    /// nothing) when the id no longer exists.
    pub fn update(&mut self, id: &TokenId, patch: TokenPatch) -> bool {
        let Some(token) = self.tokens.iter_mut().find(|t| &t.id == id) else {
            log::debug!("Ignoring update of removed token {}", id);
            return false;
        };
        if let Some(position) = patch.position {
            token.position = position;
        }
        if let Some(color) = patch.color {
            token.color = color;
        }
        self.touch();
        true
    }

    /// Delete a token. Absent ids are a no-op.
    pub fn remove(&mut self, id: &TokenId) -> Option<Token> {
        let index = self.tokens.iter().position(|t| &t.id == id)?;
        self.touch();
        Some(self.tokens.remove(index))
    }

    /// Remove every token and reset the player counter.
    pub fn clear_all(&mut self) {
        self.tokens.clear();
        self.next_number = INITIAL_PLAYER_NUMBER;
        self.touch();
    }

    /// Tokens in z-order (back to front).
    pub fn snapshot(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| &t.id == id)
    }

    /// Look a token up, reporting a stale id as an error.
    pub fn require(&self, id: &TokenId) -> BoardResult<&Token> {
        self.get(id)
            .ok_or_else(|| BoardError::StaleReference(id.clone()))
    }

    pub fn contains(&self, id: &TokenId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number the next click-placed player will receive.
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    /// Count of committed mutations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Front-most token under a box-local point.
    pub fn token_at(&self, local: Point, orientation: Orientation, tolerance: f64) -> Option<&TokenId> {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.hit_test(local, orientation, tolerance))
            .map(|t| &t.id)
    }

    /// Replace the whole contents, as an import does.
    pub(crate) fn replace(&mut self, tokens: Vec<Token>, next_number: u32) {
        self.tokens = tokens;
        self.next_number = next_number;
        self.touch();
    }
}
