//! Server configuration from environment variables
//!
//! | Variable         | Default                | Meaning                          |
//! |------------------|------------------------|----------------------------------|
//! | `CATALOG_PATH`   | `data/mock_bikes.json` | Bike catalog JSON file           |
//! | `HOST`           | `0.0.0.0`              | Bind address                     |
//! | `PORT`           | `5000`                 | Bind port                        |
//! | `CORS_ORIGINS`   | `*`                    | Comma-separated allowed origins  |
//! | `CACHE_TTL_SECS` | `300`                  | Verdict cache time-to-live       |
//! | `CACHE_CAPACITY` | `10000`                | Verdict cache max entries        |
//!
//! Log filtering uses `RUST_LOG` and is handled by the binary.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub catalog_path: String,
    pub host: String,
    pub port: u16,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/mock_bikes.json".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.catalog_path);

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let cache_capacity = lookup("CACHE_CAPACITY")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cache_capacity);

        Self {
            catalog_path,
            host,
            port,
            cors_origins,
            cache_ttl,
            cache_capacity,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }
}

/// `*` anywhere in the list means any origin (empty result)
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}
