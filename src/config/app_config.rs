// src/config/app_config.rs

use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};
use crate::integrations::tmdb::client::DEFAULT_BASE_URL;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
///
/// Every field has a default; the environment may override:
/// - `MOVIEFLIX_DB_PATH` database file
/// - `MOVIEFLIX_TMDB_BASE_URL` TMDB API root
/// - `MOVIEFLIX_DEBOUNCE_MS` import search debounce window
/// - `MOVIEFLIX_HTTP_TIMEOUT_SECS` TMDB request timeout
/// - `MOVIEFLIX_LOG` log level (`error`..`trace`, default `info`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub debounce: Duration,
    pub http_timeout: Duration,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Defaults with the given database path
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            tmdb_base_url: DEFAULT_BASE_URL.to_string(),
            tmdb_image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_level: LevelFilter::Info,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup("MOVIEFLIX_DB_PATH").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let mut config = Self::new(db_path);

        if let Some(url) = lookup("MOVIEFLIX_TMDB_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.tmdb_base_url = url;
        }
        if let Some(ms) = lookup("MOVIEFLIX_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(parse_number("MOVIEFLIX_DEBOUNCE_MS", &ms)?);
        }
        if let Some(secs) = lookup("MOVIEFLIX_HTTP_TIMEOUT_SECS") {
            config.http_timeout =
                Duration::from_secs(parse_number("MOVIEFLIX_HTTP_TIMEOUT_SECS", &secs)?);
        }
        if let Some(level) = lookup("MOVIEFLIX_LOG") {
            config.log_level = level.trim().parse().map_err(|_| {
                AppError::Config(format!("MOVIEFLIX_LOG: unknown level \"{}\"", level))
            })?;
        }

        Ok(config)
    }
}

fn parse_number(key: &str, value: &str) -> AppResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::Config(format!("{}: expected a number, got \"{}\"", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("/tmp/movieflix.db");
        assert_eq!(config.tmdb_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MOVIEFLIX_DB_PATH", "/data/catalog.db"),
            ("MOVIEFLIX_TMDB_BASE_URL", "http://localhost:9000/3"),
            ("MOVIEFLIX_DEBOUNCE_MS", "250"),
            ("MOVIEFLIX_HTTP_TIMEOUT_SECS", "5"),
            ("MOVIEFLIX_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/catalog.db"));
        assert_eq!(config.tmdb_base_url, "http://localhost:9000/3");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let err = AppConfig::from_lookup(lookup(&[
            ("MOVIEFLIX_DB_PATH", "/data/catalog.db"),
            ("MOVIEFLIX_DEBOUNCE_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_lookup(lookup(&[
            ("MOVIEFLIX_DB_PATH", "/data/catalog.db"),
            ("MOVIEFLIX_LOG", "loud"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
