//! Fixtures for tests that need a populated on-disk store

use rusqlite::params;
use tempfile::TempDir;
use crate::config::DatabaseConfig;
use crate::User;
use super::SqliteStore;

/// Fresh store in a temp dir with the schema created and `users` inserted.
/// Keep the returned `TempDir` alive for as long as the store is used.
pub(crate) async fn seeded_store(users: &[User]) -> (TempDir, SqliteStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        path: dir.path().join("users.db"),
        pool_size: 4,
        ..DatabaseConfig::default()
    };
    let store = SqliteStore::open(&config).unwrap();
    store.initialize_schema().await.unwrap();
    insert_users(&store, users).await;
    (dir, store)
}

pub(crate) async fn insert_users(store: &SqliteStore, users: &[User]) {
    let users = users.to_vec();
    store
        .interact(move |conn| {
            for u in &users {
                conn.execute(
                    "INSERT INTO users (id, name, age, profession, friendly) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![u.id, u.name, u.age, u.profession, u.friendly],
                )?;
            }
            Ok(())
        })
        .await
        .unwrap();
}

/// Store whose every fetch fails, standing in for a lost connection
pub(crate) struct FailingStore;

#[async_trait::async_trait]
impl super::UserStore for FailingStore {
    async fn find_by_name(&self, _name: &str) -> crate::Result<Vec<User>> {
        Err(crate::Error::Interact("connection lost".into()))
    }
}
