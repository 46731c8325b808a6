//! Storage trait for item persistence

use crate::{Item, ItemId, Result, Window};
use async_trait::async_trait;

/// Item store
///
/// Owns the canonical item collection. Ids are assigned by the store,
/// strictly increasing and never reused. Every mutation is visible to reads
/// that start after it completes.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Append a new, incomplete item and return it with its assigned id
    async fn insert(&self, text: &str) -> Result<Item>;

    /// All items in ascending id order
    async fn list_all(&self) -> Result<Vec<Item>>;

    /// One window of `list_all`
    async fn list_window(&self, window: Window) -> Result<Vec<Item>> {
        Ok(window.apply(self.list_all().await?))
    }

    async fn get(&self, id: ItemId) -> Result<Item>;

    /// Replace the completion flag, leaving id and text untouched
    async fn update_completion(&self, id: ItemId, is_complete: bool) -> Result<Item>;

    async fn delete(&self, id: ItemId) -> Result<()>;

    /// Remove every item. Idempotent.
    async fn delete_all(&self) -> Result<()>;
}
