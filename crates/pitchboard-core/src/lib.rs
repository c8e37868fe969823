//! Pitchboard core library.
//!
//! Data model and interaction logic for a football tactics board: tokens
//! dragged from a palette onto a field, repositioned, recolored and
//! removed, with JSON export and import.

pub mod board;
pub mod catalog;
pub mod config;
pub mod demo;
pub mod document;
pub mod error;
pub mod format;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod storage;
pub mod tokens;
pub mod tools;
pub mod view;

pub use board::{Board, BoardEvent, Outcome};
pub use catalog::{ToolTemplate, template, templates};
pub use config::BoardConfig;
pub use document::{BoardDocument, TokenPatch};
pub use error::{BoardError, BoardResult};
pub use format::{BoardFile, ImportedBoard, ItemRecord};
pub use geometry::{DropTarget, Orientation, PointerLocation};
pub use input::{ActivationConstraint, PointerId};
pub use interaction::{ListenerGuard, ListenerRegistry, NoopListeners};
pub use storage::{FileStorage, StorageError, StorageResult};
pub use tokens::{Glyph, Heading, PaletteColor, Token, TokenColor, TokenId, TokenKind};
pub use tools::{ArmedTool, ToolChoice};
pub use view::FieldLayout;

// Re-export kurbo types for convenience
pub use kurbo::{Point, Rect, Vec2};
