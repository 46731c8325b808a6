//! Item resource service

use std::sync::Arc;
use todo_core::{
    CreateItemRequest, Item, ItemId, ItemStore, PageQuery, Result, TodoError, UpdateItemRequest,
    Window,
};
use tracing::{debug, info};

/// Validated CRUD operations on top of an injected item store
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateItemRequest) -> Result<Item> {
        info!("Creating item with text: {:?}", request.text);

        if request.text.trim().is_empty() {
            debug!("Rejected item with blank text");
            return Err(TodoError::validation("text must not be empty"));
        }

        self.store.insert(&request.text).await
    }

    pub async fn list(&self, query: PageQuery) -> Result<Vec<Item>> {
        info!(
            "Listing items with page {} and size {}",
            query.page, query.size
        );

        let window = Window::try_from(query)?;
        self.store.list_window(window).await
    }

    pub async fn get(&self, id: ItemId) -> Result<Item> {
        info!("Getting item by id: {}", id);
        self.store.get(id).await
    }

    pub async fn update(&self, id: ItemId, request: UpdateItemRequest) -> Result<Item> {
        info!(
            "Updating item {} with is_complete={}",
            id, request.is_complete
        );

        let item = self.get(id).await?;
        self.store
            .update_completion(item.id, request.is_complete)
            .await
    }

    pub async fn delete_all(&self) -> Result<()> {
        info!("Deleting all items");
        self.store.delete_all().await
    }

    pub async fn delete(&self, id: ItemId) -> Result<()> {
        info!("Deleting item by id: {}", id);

        let item = self.get(id).await?;
        self.store.delete(item.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> ItemService {
        ItemService::new(Arc::new(MemoryStore::new()))
    }

    fn create(text: &str) -> CreateItemRequest {
        CreateItemRequest {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();

        let item = service.create(create("buy milk")).await.unwrap();
        assert!(!item.is_complete);

        let fetched = service.get(item.id).await.unwrap();
        assert_eq!(fetched.text, "buy milk");
        assert!(!fetched.is_complete);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_text() {
        let service = service();

        for text in ["", "   ", "\t\n"] {
            let err = service.create(create(text)).await.unwrap_err();
            assert!(matches!(err, TodoError::Validation(_)));
        }
        assert!(service.list(PageQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_ids_not_found() {
        let service = service();
        let item = service.create(create("a")).await.unwrap();
        service.delete(item.id).await.unwrap();

        for id in [item.id, 99] {
            assert_eq!(service.get(id).await, Err(TodoError::NotFound(id)));
            assert_eq!(
                service
                    .update(id, UpdateItemRequest { is_complete: true })
                    .await,
                Err(TodoError::NotFound(id))
            );
            assert_eq!(service.delete(id).await, Err(TodoError::NotFound(id)));
        }
    }

    #[tokio::test]
    async fn test_update_changes_only_flag() {
        let service = service();
        let before = service.create(create("a")).await.unwrap();

        let after = service
            .update(before.id, UpdateItemRequest { is_complete: true })
            .await
            .unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.text, before.text);
        assert!(after.is_complete);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let service = service();
        for text in ["1", "2", "3", "4", "5"] {
            service.create(create(text)).await.unwrap();
        }

        let page = service
            .list(PageQuery { page: 1, size: 2 })
            .await
            .unwrap();
        let texts: Vec<&str> = page.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "3"]);

        let past_end = service
            .list(PageQuery { page: 5, size: 3 })
            .await
            .unwrap();
        assert!(past_end.is_empty());

        assert!(matches!(
            service.list(PageQuery { page: 0, size: 0 }).await,
            Err(TodoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_all_then_ids_keep_increasing() {
        let service = service();
        let first = service.create(create("a")).await.unwrap();
        service.create(create("b")).await.unwrap();

        service.delete_all().await.unwrap();
        assert!(service.list(PageQuery::default()).await.unwrap().is_empty());

        let next = service.create(create("c")).await.unwrap();
        assert!(next.id > first.id + 1);
    }
}
