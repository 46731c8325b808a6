//! Todo Server
//!
//! HTTP API for to-do items: create, list, get, update and delete, backed by
//! an embedded SQLite table or, when configured, an in-memory store.

mod config;
mod error;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use todo_core::ItemStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{Config, StorageKind};
use services::ItemService;
use storage::{Database, MemoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemService>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            items: Arc::new(ItemService::new(store)),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Todo Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        "Config loaded: bind={}, storage={}, db={}",
        config.bind_address, config.storage, config.database_path
    );

    let addr = config.socket_addr()?;

    // The table is created before the listener binds
    let (store, db): (Arc<dyn ItemStore>, Option<Arc<Database>>) = match config.storage {
        StorageKind::Sqlite => {
            info!("Initializing SQLite database...");
            let db = Arc::new(
                Database::new(&config.database_path)
                    .await
                    .context("Failed to initialize database")?,
            );
            info!("SQLite database initialized at: {}", config.database_path);
            let store: Arc<dyn ItemStore> = db.clone();
            (store, Some(db))
        }
        StorageKind::Memory => {
            info!("Using in-memory item store, items will not survive a restart");
            let store: Arc<dyn ItemStore> = Arc::new(MemoryStore::new());
            (store, None)
        }
    };

    let app = app(AppState::new(store));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(db) = db {
        info!("Closing SQLite database...");
        db.close().await;
    }
    info!("Server stopped");

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::main_page))
        .route("/health", get(handlers::health))
        .merge(item_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::items::list)
                .post(handlers::items::create)
                .delete(handlers::items::delete_all),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .patch(handlers::items::update)
                .delete(handlers::items::delete),
        )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
