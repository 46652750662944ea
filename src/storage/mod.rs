//! Storage Layer - pooled SQLite access for user records
//!
//! System of record is a SQLite database with one table:
//! - users(id, name, age, profession, friendly)
//!
//! Resolvers only see the [`UserStore`] trait, so the SQLite pool can be
//! swapped for any other implementation (tests use in-process fakes).

pub mod schema;
pub mod sqlite;

use std::sync::Arc;
use async_trait::async_trait;
use crate::{Result, User};

pub use sqlite::SqliteStore;

/// Read access to user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every user whose name matches `name` exactly.
    ///
    /// No rows is `Ok(vec![])`; any prepare, execute, or decode failure is an
    /// `Err` and never a truncated list. Order is whatever the backend returns.
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>>;
}

/// Store handle shared by every request
pub type SharedStore = Arc<dyn UserStore>;

#[cfg(test)]
pub(crate) mod testing;
