//! List pagination
//!
//! Windows use the zero-based offset convention: `page` is the index of the
//! first record returned and `size` is the maximum number of records, so a
//! window covers records `[page, page + size)` of the store's ascending
//! order. A window that starts past the end is empty, never an error.

use crate::{PageQuery, Result, TodoError};

/// Contiguous slice of the store's natural order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    offset: i64,
    limit: i64,
}

impl Window {
    /// Negative offsets and non-positive sizes are rejected, not clamped.
    pub fn new(page: i64, size: i64) -> Result<Self> {
        if page < 0 {
            return Err(TodoError::validation(format!(
                "page must be zero or greater, got {}",
                page
            )));
        }
        if size < 1 {
            return Err(TodoError::validation(format!(
                "size must be at least 1, got {}",
                size
            )));
        }

        Ok(Self {
            offset: page,
            limit: size,
        })
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Cut this window out of a full, already ordered sequence
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);

        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for Window {
    fn default() -> Self {
        let query = PageQuery::default();
        Self {
            offset: query.page,
            limit: query.size,
        }
    }
}

impl TryFrom<PageQuery> for Window {
    type Error = TodoError;

    fn try_from(query: PageQuery) -> Result<Self> {
        Self::new(query.page, query.size)
    }
}
