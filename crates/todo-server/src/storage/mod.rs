//! Storage layer
//!
//! SQLite (embedded) for the persisted deployment, a locked in-memory
//! collection otherwise.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;
