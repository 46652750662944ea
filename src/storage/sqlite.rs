//! SQLite storage implementation

use std::time::Duration;
use async_trait::async_trait;
use deadpool_sqlite::{Config, Pool, PoolConfig, Runtime};
use rusqlite::Connection;
use crate::config::DatabaseConfig;
use crate::{Result, Error, User};
use super::{schema, UserStore};

/// Pooled SQLite handle for the user table.
///
/// Connections are checked out per call and every closure runs on the
/// blocking thread pool, so one handle serves any number of concurrent
/// requests.
pub struct SqliteStore {
    pool: Pool,
    query_timeout: Duration,
}

impl SqliteStore {
    /// Build the connection pool. Connections are opened lazily; call
    /// [`SqliteStore::ping`] to prove the database is reachable.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let mut pool_config = Config::new(config.path.clone());
        pool_config.pool = Some(PoolConfig::new(config.pool_size));
        let pool = pool_config.create_pool(Runtime::Tokio1)?;

        tracing::debug!(
            "Opened pool for {} (size {}, timeout {:?})",
            config.path.display(),
            config.pool_size,
            config.query_timeout()
        );

        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    /// Open the pool and prove it can serve `users` before anything is
    /// served from it.
    ///
    /// Without `create_schema` the database file must already exist, so a
    /// mistyped path never leaves an empty database behind.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let path = &config.path;
        if config.create_schema {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        } else if !path.exists() {
            return Err(Error::DatabaseNotFound(path.clone()));
        }

        let store = Self::open(config)?;
        store.ping().await?;

        if config.create_schema {
            store.initialize_schema().await?;
        }

        let users = store
            .count_users()
            .await
            .map_err(|e| Error::UsersTable(e.to_string()))?;
        tracing::info!("Store ready: {} ({} users)", path.display(), users);

        Ok(store)
    }

    /// Run `f` on a pooled connection, bounded by the configured deadline.
    pub async fn interact<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let deadline = self.query_timeout;
        let run = async {
            let conn = self.pool.get().await?;
            let value = conn
                .interact(f)
                .await
                .map_err(|e| Error::Interact(e.to_string()))??;
            Ok::<T, Error>(value)
        };

        tokio::time::timeout(deadline, run)
            .await
            .map_err(|_| Error::Timeout(deadline))?
    }

    /// Check that a connection can be opened and answer a trivial query
    pub async fn ping(&self) -> Result<()> {
        self.interact(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map(|_| ())
    }

    /// Create the users table and its indexes if they are missing
    pub async fn initialize_schema(&self) -> Result<()> {
        self.interact(|conn| {
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }
            Ok(())
        })
        .await
    }

    /// Count all users
    pub async fn count_users(&self) -> Result<usize> {
        let count: i64 = self
            .interact(|conn| conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0)))
            .await?;
        Ok(count as usize)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn find_by_name(&self, name: &str) -> Result<Vec<User>> {
        let name = name.to_owned();
        self.interact(move |conn| {
            let mut stmt = conn.prepare_cached(schema::SELECT_USERS_BY_NAME)?;
            let users = stmt
                .query_map([&name], row_to_user)?
                .collect::<rusqlite::Result<Vec<User>>>()?;
            Ok(users)
        })
        .await
    }
}

/// Decode a row selected with [`schema::SELECT_USERS_BY_NAME`]
fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        profession: row.get(3)?,
        friendly: row.get(4)?,
    })
}
