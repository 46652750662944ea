use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsergqlConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    /// Deepest selection nesting the executor accepts
    pub max_query_depth: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 4000)),
            max_query_depth: 16,
        }
    }
}

/// Store connection settings. Everything the pool needs comes from here,
/// nothing about the backend is hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub pool_size: usize,
    pub query_timeout_ms: u64,
    /// Create the `users` table on startup if it is missing
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("usergql.db"),
            pool_size: 16,
            query_timeout_ms: 5000,
            create_schema: false,
        }
    }
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl UsergqlConfig {
    /// Parse and validate a config document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.pool_size == 0 {
            return Err(Error::Config("database.pool_size must be at least 1".into()));
        }
        if self.database.query_timeout_ms == 0 {
            return Err(Error::Config("database.query_timeout_ms must be positive".into()));
        }
        if self.server.max_query_depth == 0 {
            return Err(Error::Config("server.max_query_depth must be at least 1".into()));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("usergql.toml")
}

/// Read `path` (or `./usergql.toml`). A file that is not there is
/// `Ok(None)`; one that does not parse or validate is an error.
pub fn load_config(path: Option<&Path>) -> Result<Option<UsergqlConfig>> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    UsergqlConfig::from_toml(&contents)
        .map(Some)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Write `config` as TOML. An existing file is only replaced with `force`.
pub fn write_config(path: &Path, config: &UsergqlConfig, force: bool) -> Result<()> {
    let contents = config.to_toml()?;

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )),
        _ => Error::Io(e),
    })?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usergql.toml");
        std::fs::write(&path, "[database]\npath = \"/var/lib/usergql/users.db\"\npool_size = 4\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/usergql/users.db"));
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.database.query_timeout_ms, 5000);
        assert!(!config.database.create_schema);
        assert_eq!(config.server.listen.port(), 4000);
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usergql.toml");
        std::fs::write(&path, "[database]\npool_size = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("pool_size"));
    }

    #[test]
    fn test_write_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usergql.toml");
        let config = UsergqlConfig::default();

        write_config(&path, &config, false).unwrap();
        let err = write_config(&path, &config, false).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("--force")));

        let mut custom = config.clone();
        custom.database.pool_size = 2;
        write_config(&path, &custom, true).unwrap();

        let reloaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(reloaded.server.listen, config.server.listen);
        assert_eq!(reloaded.database.path, config.database.path);
        assert_eq!(reloaded.database.pool_size, 2);
    }

    #[test]
    fn test_unparseable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usergql.toml");
        std::fs::write(&path, "[database\npool_size = 4\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("usergql.toml"));
    }

    #[test]
    fn test_wrong_value_type_rejected() {
        let err = UsergqlConfig::from_toml("[server]\nlisten = 4000\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
