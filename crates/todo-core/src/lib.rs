//! Todo Core Library
//!
//! Error taxonomy, the item store port, and list pagination.

// Re-export pure types from todo-types
pub use todo_types::*;

pub mod error;
pub mod pagination;
pub mod ports;

pub use error::{Result, TodoError};
pub use pagination::Window;
pub use ports::ItemStore;
