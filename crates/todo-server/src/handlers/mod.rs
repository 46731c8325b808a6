//! HTTP handlers

pub mod items;

use axum::Json;
use serde_json::{json, Value};

pub const MAIN_PAGE_TEXT: &str = "This is the main page!";

pub async fn main_page() -> &'static str {
    tracing::info!("Hello from the todo server!");
    MAIN_PAGE_TEXT
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
