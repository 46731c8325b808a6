//! In-memory item store (non-persistent deployment mode)

use async_trait::async_trait;
use todo_core::{Item, ItemId, ItemStore, Result, TodoError, Window};
use tokio::sync::RwLock;

/// Item store kept entirely in process memory
///
/// A single lock guards the collection and the id high-water mark, so id
/// assignment and append happen in one critical section.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    /// Ascending by id
    items: Vec<Item>,
    /// Highest id ever assigned, survives deletions
    last_id: ItemId,
}

impl MemoryState {
    fn position(&self, id: ItemId) -> Result<usize> {
        // `items` is sorted by id, appends only ever use a larger id
        self.items
            .binary_search_by_key(&id, |item| item.id)
            .map_err(|_| TodoError::NotFound(id))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert(&self, text: &str) -> Result<Item> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let item = Item::new(state.last_id, text);
        state.items.push(item.clone());

        Ok(item)
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        Ok(self.state.read().await.items.clone())
    }

    async fn list_window(&self, window: Window) -> Result<Vec<Item>> {
        let state = self.state.read().await;
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);

        Ok(state.items.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get(&self, id: ItemId) -> Result<Item> {
        let state = self.state.read().await;
        let index = state.position(id)?;
        Ok(state.items[index].clone())
    }

    async fn update_completion(&self, id: ItemId, is_complete: bool) -> Result<Item> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;

        let item = &mut state.items[index];
        item.is_complete = is_complete;
        Ok(item.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut state = self.state.write().await;
        let index = state.position(id)?;
        state.items.remove(index);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.state.write().await.items.clear();
        Ok(())
    }
}
