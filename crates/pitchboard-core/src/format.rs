//! Board document format: the JSON export/import boundary.
//!
//! The current format is an object:
//!
//! ```json
//! { "items": [{"id": "...", "kind": "player", "variant": "filled",
//!              "color": "red", "x": 100, "y": 120, "number": 1}],
//!   "layout": "full", "counter": 2 }
//! ```
//!
//! Older boards were saved as a bare array of items using `type` instead of
//! `kind`, with `svg` players carrying a `gender` and arrows a `direction`.
//! Both are accepted on import; export always writes the current format.

use crate::document::{BoardDocument, INITIAL_PLAYER_NUMBER, MAX_PLAYER_COUNTER};
use crate::error::{BoardError, BoardResult};
use crate::tokens::{Glyph, Heading, PaletteColor, PlayerVariant, Token, TokenColor, TokenId};
use crate::view::FieldLayout;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One token as stored in a board document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Legacy `svg` player figure.
    #[serde(default, skip_serializing)]
    pub gender: Option<String>,
    /// Legacy arrow direction.
    #[serde(default, skip_serializing)]
    pub direction: Option<String>,
}

impl ItemRecord {
    fn from_token(token: &Token) -> Self {
        Self {
            id: token.id().to_string(),
            kind: token.kind().name().to_string(),
            variant: token.glyph.variant_name().to_string(),
            color: Some(token.color.as_str().to_string()),
            x: token.position.x,
            y: token.position.y,
            rotation: token.rotation(),
            number: token.number,
            gender: None,
            direction: None,
        }
    }
}

/// A serialized board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardFile {
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub layout: FieldLayout,
    pub counter: u32,
}

/// A validated board ready to replace a session's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedBoard {
    pub tokens: Vec<Token>,
    pub layout: FieldLayout,
    pub counter: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Current,
    Legacy,
}

impl BoardFile {
    /// Snapshot a document and layout.
    pub fn from_document(document: &BoardDocument, layout: FieldLayout) -> Self {
        Self {
            items: document
                .snapshot()
                .iter()
                .map(ItemRecord::from_token)
                .collect(),
            layout,
            counter: document.next_number(),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a document in either dialect.
    pub fn parse(json: &str) -> BoardResult<ImportedBoard> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| BoardError::MalformedImport(format!("invalid JSON: {e}")))?;
        match value {
            serde_json::Value::Array(_) => {
                let items: Vec<ItemRecord> = serde_json::from_value(value)
                    .map_err(|e| BoardError::MalformedImport(e.to_string()))?;
                Self::validate(items, FieldLayout::default(), None, Dialect::Legacy)
            }
            serde_json::Value::Object(_) => {
                let file: BoardFile = serde_json::from_value(value)
                    .map_err(|e| BoardError::MalformedImport(e.to_string()))?;
                file.into_board()
            }
            _ => Err(BoardError::MalformedImport(
                "expected an object or an array of items".to_string(),
            )),
        }
    }

    /// Validate this file into tokens.
    pub fn into_board(self) -> BoardResult<ImportedBoard> {
        Self::validate(self.items, self.layout, Some(self.counter), Dialect::Current)
    }

    fn validate(
        items: Vec<ItemRecord>,
        layout: FieldLayout,
        counter: Option<u32>,
        dialect: Dialect,
    ) -> BoardResult<ImportedBoard> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let token = item_to_token(item, dialect)
                .map_err(|msg| BoardError::MalformedImport(format!("item {index}: {msg}")))?;
            if !seen.insert(token.id().clone()) {
                return Err(BoardError::MalformedImport(format!(
                    "item {index}: duplicate id {}",
                    token.id()
                )));
            }
            tokens.push(token);
        }

        let highest = tokens.iter().filter_map(|t| t.number).max();
        let counter = match counter {
            Some(counter) => {
                if !(INITIAL_PLAYER_NUMBER..=MAX_PLAYER_COUNTER).contains(&counter) {
                    return Err(BoardError::MalformedImport(format!(
                        "counter {counter} outside {INITIAL_PLAYER_NUMBER}..={MAX_PLAYER_COUNTER}"
                    )));
                }
                match highest {
                    Some(highest) if counter <= highest => {
                        return Err(BoardError::MalformedImport(format!(
                            "counter {counter} does not exceed player number {highest}"
                        )));
                    }
                    _ => {}
                }
                counter
            }
            // Item numbers are already below the ceiling, so this cannot wrap.
            None => highest.map_or(INITIAL_PLAYER_NUMBER, |n| n + 1),
        };

        Ok(ImportedBoard {
            tokens,
            layout,
            counter,
        })
    }
}

fn item_to_token(item: ItemRecord, dialect: Dialect) -> Result<Token, String> {
    if item.id.is_empty() {
        return Err("empty id".to_string());
    }
    if !item.x.is_finite() || !item.y.is_finite() {
        return Err(format!("non-finite position ({}, {})", item.x, item.y));
    }

    let glyph = match (dialect, item.kind.as_str(), item.variant.as_str()) {
        (Dialect::Legacy, "player", "svg") => match item.gender.as_deref() {
            Some("female") => Glyph::Player(PlayerVariant::SvgFemale),
            _ => Glyph::Player(PlayerVariant::SvgMale),
        },
        (_, kind, variant) => Glyph::from_parts(kind, variant)
            .ok_or_else(|| format!("unknown kind/variant {kind}/{variant}"))?,
    };

    let color = match item.color.as_deref() {
        Some(color) => TokenColor::parse(color).ok_or_else(|| format!("invalid color {color:?}"))?,
        None if dialect == Dialect::Legacy => PaletteColor::Black.into(),
        None => return Err("missing color".to_string()),
    };

    let heading = match (item.rotation, item.direction.as_deref()) {
        (Some(_), _) if !glyph.has_heading() => {
            return Err(format!("rotation on a {} token", glyph.kind().name()));
        }
        (Some(degrees), _) if !degrees.is_finite() => {
            return Err("non-finite rotation".to_string());
        }
        (Some(degrees), _) => Some(Heading::from_degrees(degrees)),
        (None, Some(direction)) if dialect == Dialect::Legacy && glyph.has_heading() => Some(
            Heading::from_name(direction)
                .ok_or_else(|| format!("unknown direction {direction}"))?,
        ),
        (None, _) if glyph.has_heading() => Some(Heading::default()),
        (None, _) => None,
    };

    match item.number {
        Some(_) if !glyph.is_player() => {
            return Err(format!("number on a {} token", glyph.kind().name()));
        }
        Some(number) if number >= MAX_PLAYER_COUNTER => {
            return Err(format!("player number {number} out of range"));
        }
        _ => {}
    }

    let mut token = Token::new(
        TokenId::from(item.id),
        glyph,
        color,
        Point::new(item.x, item.y),
    );
    token.heading = heading;
    token.number = item.number;
    Ok(token)
}
