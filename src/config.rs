//! Application configuration
//!
//! Read once at startup from the process environment (a `.env` file is
//! loaded first when present) and immutable afterwards.
//!
//! | Variable | Default |
//! |---|---|
//! | `PUBLIC_SUPABASE_URL` | required unless the memory backend is used |
//! | `PUBLIC_SUPABASE_ANON_KEY` | required unless the memory backend is used |
//! | `UNIFORMES_TABLE` | `uniformes` |
//! | `UNIFORMES_PARTIAL_UPDATES` | `false` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `4321` |
//! | `CORS_ORIGINS` | empty (any origin) |

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::handler::DEFAULT_TABLE;
use crate::catalog::UpdateMode;
use crate::http_server::HttpServerConfig;
use crate::storage::PostgrestConfig;

pub const SUPABASE_URL: &str = "PUBLIC_SUPABASE_URL";
pub const SUPABASE_KEY: &str = "PUBLIC_SUPABASE_ANON_KEY";
pub const TABLE: &str = "UNIFORMES_TABLE";
pub const PARTIAL_UPDATES: &str = "UNIFORMES_PARTIAL_UPDATES";
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const CORS_ORIGINS: &str = "CORS_ORIGINS";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read env file: {0}")]
    EnvFile(String),
}

/// Which table client backs the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// The managed datastore
    Postgrest(PostgrestConfig),
    /// Process-local tables, lost on exit
    Memory,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: HttpServerConfig,
    pub storage: StorageBackend,
    pub table: String,
    pub update_mode: UpdateMode,
}

impl AppConfig {
    /// Load from the process environment, after applying `.env` if present
    pub fn from_env(memory: bool) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok(), memory)
    }

    /// Load from an explicit env file, falling back to the process
    /// environment for keys the file does not set
    pub fn from_env_file(path: &Path, memory: bool) -> Result<Self, ConfigError> {
        let vars = read_env_file(path)?;
        Self::from_lookup(
            |key| vars.get(key).cloned().or_else(|| std::env::var(key).ok()),
            memory,
        )
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F, memory: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = if memory {
            StorageBackend::Memory
        } else {
            let url = get(SUPABASE_URL).ok_or(ConfigError::Missing(SUPABASE_URL))?;
            let key = get(SUPABASE_KEY).ok_or(ConfigError::Missing(SUPABASE_KEY))?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    key: SUPABASE_URL,
                    value: url,
                    reason: "expected an http(s) URL".to_string(),
                });
            }
            StorageBackend::Postgrest(PostgrestConfig::new(url, key))
        };

        let mut server = HttpServerConfig::default();
        if let Some(host) = get(HOST) {
            server.host = host;
        }
        if let Some(port) = get(PORT) {
            server.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    key: PORT,
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(origins) = get(CORS_ORIGINS) {
            server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        let table = get(TABLE).unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let update_mode = match get(PARTIAL_UPDATES) {
            None => UpdateMode::default(),
            Some(value) => match parse_bool(&value) {
                Some(true) => UpdateMode::Partial,
                Some(false) => UpdateMode::Overwrite,
                None => {
                    return Err(ConfigError::Invalid {
                        key: PARTIAL_UPDATES,
                        value,
                        reason: "expected true or false".to_string(),
                    })
                }
            },
        };

        if update_mode == UpdateMode::Overwrite {
            info!("updates overwrite every data field; absent fields are written as null");
        }

        Ok(Self {
            server,
            storage,
            table,
            update_mode,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;

    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "skipping env file line"),
        }
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_postgrest_backend() {
        let config = AppConfig::from_lookup(
            lookup(&[
                (SUPABASE_URL, "https://demo.supabase.co"),
                (SUPABASE_KEY, "anon-key"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(
            config.storage,
            StorageBackend::Postgrest(PostgrestConfig::new("https://demo.supabase.co", "anon-key"))
        );
        assert_eq!(config.table, "uniformes");
        assert_eq!(config.update_mode, UpdateMode::Overwrite);
        assert_eq!(config.server.port, 4321);
    }

    #[test]
    fn test_missing_credentials() {
        let err = AppConfig::from_lookup(
            lookup(&[(SUPABASE_URL, "https://demo.supabase.co")]),
            false,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(SUPABASE_KEY));

        let err = AppConfig::from_lookup(lookup(&[]), false).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SUPABASE_URL));
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let config = AppConfig::from_lookup(lookup(&[]), true).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_server_overrides() {
        let config = AppConfig::from_lookup(
            lookup(&[
                (HOST, "127.0.0.1"),
                (PORT, "8080"),
                (CORS_ORIGINS, "http://localhost:4321, https://tienda.example"),
                (TABLE, "catalogo"),
                (PARTIAL_UPDATES, "true"),
            ]),
            true,
        )
        .unwrap();

        assert_eq!(config.server.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.table, "catalogo");
        assert_eq!(config.update_mode, UpdateMode::Partial);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(PORT, "http")]), true).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PORT, .. }));

        let err = AppConfig::from_lookup(lookup(&[(PARTIAL_UPDATES, "maybe")]), true).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PARTIAL_UPDATES, .. }));

        let err = AppConfig::from_lookup(
            lookup(&[(SUPABASE_URL, "demo.supabase.co"), (SUPABASE_KEY, "k")]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: SUPABASE_URL, .. }));
    }

    #[test]
    fn test_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "UNIFORMES_TABLE=desde_archivo").unwrap();
        writeln!(file, "PORT=5050").unwrap();

        let config = AppConfig::from_env_file(file.path(), true).unwrap();
        assert_eq!(config.table, "desde_archivo");
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_missing_env_file() {
        let err = AppConfig::from_env_file(Path::new("/nonexistent/.env"), true).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }
}
