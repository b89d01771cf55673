use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::fetcher::DEFAULT_SOURCE_URL;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://nba.db";

/// Runtime settings, read from the environment (optionally seeded from `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: Ipv4Addr,
    pub port: u16,
    pub database_url: String,
    pub enable_cors: bool,
    pub source_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            enable_cors: true,
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Malformed values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: parse_or("BACKEND_HOST", lookup("BACKEND_HOST"), defaults.host),
            port: parse_or("BACKEND_PORT", lookup("BACKEND_PORT"), defaults.port),
            database_url: lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.database_url),
            enable_cors: parse_flag(
                "ENABLE_CORS",
                lookup("ENABLE_CORS"),
                defaults.enable_cors,
            ),
            source_url: lookup("PLAYER_SOURCE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.source_url),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("{} has invalid value {:?}, using default", key, raw);
        default
    })
}

fn parse_flag(key: &str, raw: Option<String>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!("{} has invalid value {:?}, using default", key, raw);
            default
        }
    }
}
