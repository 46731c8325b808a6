//! SQLite item store (embedded, persists across restarts)

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use todo_core::{Item, ItemId, ItemStore, Result, TodoError, Window};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    TodoError::storage(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                TodoError::storage(format!(
                    "Failed to connect to SQLite database at {}: {}",
                    database_path, e
                ))
            })?;

        tracing::info!("SQLite connection established, creating tables...");

        Self::create_tables(&pool).await?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn create_tables(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids from being reused after the highest row is deleted
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                is_complete BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ItemStore for Database {
    async fn insert(&self, text: &str) -> Result<Item> {
        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO items (text, is_complete)
            VALUES (?1, 0)
            RETURNING id, text, is_complete
            "#,
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, text, is_complete FROM items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn list_window(&self, window: Window) -> Result<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, text, is_complete FROM items
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get(&self, id: ItemId) -> Result<Item> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, text, is_complete FROM items WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(|r| r.into()).ok_or(TodoError::NotFound(id))
    }

    async fn update_completion(&self, id: ItemId, is_complete: bool) -> Result<Item> {
        // Rolled back on drop if any step below returns early
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            UPDATE items SET is_complete = ?1
            WHERE id = ?2
            RETURNING id, text, is_complete
            "#,
        )
        .bind(is_complete)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let row = row.ok_or(TodoError::NotFound(id))?;
        tx.commit().await.map_err(db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM items WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id));
        }
        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM items
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> TodoError {
    TodoError::storage(format!("Database error: {}", e))
}

// Persistence record, kept apart from the wire type
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    text: String,
    is_complete: bool,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Item {
            id: r.id,
            text: r.text,
            is_complete: r.is_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn open(dir: &TempDir) -> Database {
        let path = dir.path().join("todo.db");
        Database::new(path.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_crud() {
        let dir = TempDir::new().unwrap();
        let db = open(&dir).await;

        assert!(db.list_all().await.unwrap().is_empty());

        let a = db.insert("a").await.unwrap();
        assert_eq!(a, Item::new(1, "a"));
        let b = db.insert("b").await.unwrap();
        assert_eq!(b.id, 2);

        assert_eq!(db.get(1).await.unwrap(), a);
        assert_eq!(db.list_all().await.unwrap(), vec![a.clone(), b.clone()]);

        let done = db.update_completion(b.id, true).await.unwrap();
        assert_eq!(done.text, "b");
        assert!(done.is_complete);
        assert!(db.get(b.id).await.unwrap().is_complete);

        db.delete(a.id).await.unwrap();
        assert_eq!(db.get(a.id).await, Err(TodoError::NotFound(a.id)));
        assert_eq!(db.delete(a.id).await, Err(TodoError::NotFound(a.id)));
        assert_eq!(
            db.update_completion(a.id, true).await,
            Err(TodoError::NotFound(a.id))
        );

        db.delete_all().await.unwrap();
        db.delete_all().await.unwrap();
        assert!(db.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_window_matches_default() {
        let dir = TempDir::new().unwrap();
        let db = open(&dir).await;
        for text in ["a", "b", "c", "d", "e"] {
            db.insert(text).await.unwrap();
        }

        let window = Window::new(1, 2).unwrap();
        let page = db.list_window(window).await.unwrap();
        assert_eq!(page, window.apply(db.list_all().await.unwrap()));
        let texts: Vec<&str> = page.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);

        let past_end = db.list_window(Window::new(10, 2).unwrap()).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_ids_survive_reopen_and_deletion() {
        let dir = TempDir::new().unwrap();

        {
            let db = open(&dir).await;
            db.insert("a").await.unwrap();
            let b = db.insert("b").await.unwrap();
            db.update_completion(b.id, true).await.unwrap();
            db.close().await;
        }

        let db = open(&dir).await;
        let items = db.list_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_complete);
        assert_eq!(db.insert("c").await.unwrap().id, 3);

        // Highest id deleted, then everything deleted: neither is reused
        db.delete(3).await.unwrap();
        assert_eq!(db.insert("d").await.unwrap().id, 4);
        db.delete_all().await.unwrap();
        assert_eq!(db.insert("e").await.unwrap().id, 5);
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("todo.db");

        let db = Database::new(path.to_str().unwrap()).await.unwrap();
        db.insert("a").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_mutations() {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(open(&dir).await);

        let handles: Vec<_> = (0..60)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let item = db.insert(&format!("item {}", i)).await?;
                    let done = db.update_completion(item.id, true).await?;
                    assert_eq!(done.text, item.text);
                    if i % 3 == 0 {
                        db.delete(item.id).await?;
                    }
                    Ok::<_, TodoError>(item.id)
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 60);

        let remaining = db.list_all().await.unwrap();
        assert_eq!(remaining.len(), 40);
        assert!(remaining.iter().all(|item| item.is_complete));
        assert!(remaining.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
