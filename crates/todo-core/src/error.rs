//! Error types for the todo service

use crate::ItemId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Malformed or missing caller input
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Storage engine unavailable or corrupt
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TodoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TodoError::Validation(msg.into())
    }

    pub fn storage(msg: impl std::fmt::Display) -> Self {
        TodoError::Storage(msg.to_string())
    }
}
