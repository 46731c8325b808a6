//! Server configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `todo.toml` in the working directory, then `TODO_*` environment
//! variables (`TODO_BIND_ADDRESS`, `TODO_STORAGE`, `TODO_DATABASE_PATH`,
//! `TODO_LOG_FILTER`).

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;

/// Config file name, looked up without extension
pub const CONFIG_FILE_NAME: &str = "todo";

/// Prefix of the environment variables that override the file
pub const ENV_PREFIX: &str = "TODO";

/// Where items live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Memory,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Sqlite => write!(f, "sqlite"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub storage: StorageKind,
    pub database_path: String,
    pub log_filter: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX));

        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = config::Config::builder()
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("storage", "sqlite")?
            .set_default("database_path", "data/todo.db")?
            .set_default("log_filter", "info")?;

        Ok(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address: {}", self.bind_address))
    }
}
