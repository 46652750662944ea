//! # usergql - Typed GraphQL querying over a relational user store
//!
//! usergql provides:
//! - A pooled, parameterized SQLite store for user records
//! - A GraphQL schema with a `usersByName` root query
//! - An axum handler that bridges `POST /graphql` to the schema executor

pub mod user;
pub mod storage;
pub mod graphql;
pub mod server;
pub mod config;
pub mod ui;

use std::path::PathBuf;
use std::time::Duration;

// Re-exports for convenient access
pub use user::User;
pub use storage::{SqliteStore, UserStore, SharedStore};
pub use graphql::{UserSchema, build_schema};

/// Result type alias for usergql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for usergql operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_sqlite::PoolError),

    #[error("Failed to create connection pool: {0}")]
    CreatePool(#[from] deadpool_sqlite::CreatePoolError),

    #[error("Connection task failed: {0}")]
    Interact(String),

    #[error("Database not found: {} (run with --create-schema to create it)", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("users table is not readable (run with --create-schema to create it): {0}")]
    UsersTable(String),

    #[error("Store query exceeded deadline of {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
