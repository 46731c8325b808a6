//! Todo Types - Pure type definitions shared by the store and the HTTP layer
//!
//! This crate contains only serde data types with no async runtime
//! dependencies.

pub mod item;

pub use item::*;
