//! Item types

use serde::{Deserialize, Serialize};

/// Store-assigned item identifier
pub type ItemId = i64;

/// Default zero-based record offset for list requests
pub const DEFAULT_PAGE: i64 = 0;

/// Default number of records per list request
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// To-do item as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub is_complete: bool,
}

impl Item {
    /// A freshly created item is never complete
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_complete: false,
        }
    }
}

/// Body of `POST /items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub text: String,
}

/// Body of `PATCH /items/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub is_complete: bool,
}

/// Query string of `GET /items`
///
/// `page` is a zero-based record offset, `size` the maximum number of
/// records returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}
