//! Configuration loading and representation.
//!
//! Values come from `CARMARKET_*` environment variables. Parsing goes through a
//! lookup function so tests can supply values without touching the process
//! environment.

use std::net::SocketAddr;

use carmarket_observability::LogFormat;
use thiserror::Error;

use crate::catalog::ListingDefaults;

pub const BIND_ADDR: &str = "CARMARKET_BIND_ADDR";
pub const ADMIN_TOKEN: &str = "CARMARKET_ADMIN_TOKEN";
pub const LOG_FORMAT: &str = "CARMARKET_LOG_FORMAT";
pub const FEATURED_LIMIT: &str = "CARMARKET_FEATURED_LIMIT";
pub const RECENT_LIMIT: &str = "CARMARKET_RECENT_LIMIT";
pub const SIMILAR_LIMIT: &str = "CARMARKET_SIMILAR_LIMIT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Shared bearer token for admin routes; `None` leaves them open (dev).
    pub admin_token: Option<String>,
    pub log_format: LogFormat,
    pub listing: ListingDefaults,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match get(BIND_ADDR) {
            Some(v) => parse(BIND_ADDR, v)?,
            None => parse(BIND_ADDR, DEFAULT_BIND_ADDR.to_string())?,
        };

        let log_format = match get(LOG_FORMAT).as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: LOG_FORMAT,
                    value: other.to_string(),
                });
            }
        };

        let defaults = ListingDefaults::default();
        let listing = ListingDefaults {
            featured: get(FEATURED_LIMIT)
                .map(|v| parse(FEATURED_LIMIT, v))
                .transpose()?
                .unwrap_or(defaults.featured),
            recent: get(RECENT_LIMIT)
                .map(|v| parse(RECENT_LIMIT, v))
                .transpose()?
                .unwrap_or(defaults.recent),
            similar: get(SIMILAR_LIMIT)
                .map(|v| parse(SIMILAR_LIMIT, v))
                .transpose()?
                .unwrap_or(defaults.similar),
        };

        Ok(Self {
            bind_addr,
            admin_token: get(ADMIN_TOKEN),
            log_format,
            listing,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            admin_token: None,
            log_format: LogFormat::Json,
            listing: ListingDefaults::default(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
