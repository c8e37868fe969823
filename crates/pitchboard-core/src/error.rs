//! Board error types.

use crate::tokens::TokenId;
use thiserror::Error;

/// Errors produced by board operations.
///
/// Only `GeometryUnavailable` and `MalformedImport` ever reach the user.
/// `StaleReference` is reported by lookups but the board itself treats it
/// as a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("Field surface could not be measured")]
    GeometryUnavailable,
    #[error("Token no longer exists: {0}")]
    StaleReference(TokenId),
    #[error("Malformed import: {0}")]
    MalformedImport(String),
    #[error("Unknown palette template: {0}")]
    UnknownTemplate(String),
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
