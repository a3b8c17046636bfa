//! Server settings from environment variables.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres:postgres@db:5432/recipes";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_RECIPES_JSON: &str = "/app/data/recipes.json";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    /// Directory holding the frontend bundle served for non-API paths.
    pub static_dir: PathBuf,
    /// Default input file for the `seed` command.
    pub recipes_json: PathBuf,
    pub pool_size: u32,
    /// Report per-request query counts in the `X-DB-Query-Count` header.
    pub track_db_query_count: bool,
}

impl Settings {
    /// Load settings from the process environment, after reading `.env` if one
    /// exists.
    ///
    /// - `DATABASE_URL` (default: postgres on host `db`)
    /// - `PORT` (default: 8000)
    /// - `STATIC_DIR` (default: "static")
    /// - `RECIPES_JSON` (default: "/app/data/recipes.json")
    /// - `DB_POOL_SIZE` (default: 10)
    /// - `TRACK_DB_QUERY_COUNT` ("1" to enable)
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "DB_POOL_SIZE",
                        value,
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port,
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            recipes_json: lookup("RECIPES_JSON")
                .unwrap_or_else(|| DEFAULT_RECIPES_JSON.to_string())
                .into(),
            pool_size,
            track_db_query_count: lookup("TRACK_DB_QUERY_COUNT")
                .map(|v| v == "1")
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.static_dir, PathBuf::from("static"));
        assert_eq!(settings.pool_size, 10);
        assert!(!settings.track_db_query_count);
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/test"),
            ("PORT", "3000"),
            ("DB_POOL_SIZE", "4"),
            ("TRACK_DB_QUERY_COUNT", "1"),
        ])
        .unwrap();
        assert_eq!(settings.database_url, "postgres://localhost/test");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.pool_size, 4);
        assert!(settings.track_db_query_count);
    }

    #[test]
    fn test_invalid_port() {
        assert_eq!(
            settings_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue {
                var: "PORT",
                value: "eighty".to_string()
            })
        );
    }

    #[test]
    fn test_zero_pool_size_is_invalid() {
        assert!(settings_from(&[("DB_POOL_SIZE", "0")]).is_err());
    }
}
