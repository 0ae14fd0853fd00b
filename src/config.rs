//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheSettings, Promotion, DEFAULT_CAPACITY, DEFAULT_SWEEP_MULTIPLIER};

// == Promotion Mode ==
/// Read-hit behavior selectable from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionMode {
    /// Reads move the key to newest and restart its TTL
    #[default]
    Newest,
    /// Reads leave the entry untouched
    None,
}

impl PromotionMode {
    /// Builds the matching cache promotion.
    pub fn to_promotion<K, V>(self) -> Promotion<K, V> {
        match self {
            PromotionMode::Newest => Promotion::PromoteToNewest,
            PromotionMode::None => Promotion::NoPromotion,
        }
    }
}

impl FromStr for PromotionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "lru" => Ok(PromotionMode::Newest),
            "none" | "fifo" => Ok(PromotionMode::None),
            other => Err(format!("unknown promotion mode '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Entry TTL in seconds, None = entries never expire
    pub ttl_secs: Option<u64>,
    /// Full sweep interval as a multiple of the TTL
    pub sweep_multiplier: u32,
    /// Read-hit behavior
    pub promotion: PromotionMode,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds, unset or 0 disables expiry
    /// - `CACHE_SWEEP_MULTIPLIER` - Sweep interval multiplier (default: 10)
    /// - `CACHE_PROMOTION` - `newest` or `none` (default: newest)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|v| v.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            capacity: parsed(lookup("CACHE_CAPACITY")).unwrap_or(defaults.capacity),
            ttl_secs: parsed::<u64>(lookup("CACHE_TTL_SECS")).filter(|secs| *secs > 0),
            sweep_multiplier: parsed(lookup("CACHE_SWEEP_MULTIPLIER"))
                .unwrap_or(defaults.sweep_multiplier),
            promotion: parsed(lookup("CACHE_PROMOTION")).unwrap_or(defaults.promotion),
            server_port: parsed(lookup("SERVER_PORT")).unwrap_or(defaults.server_port),
        }
    }

    /// Cache settings described by this configuration.
    ///
    /// Validation happens when the cache is built.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            capacity: self.capacity,
            ttl: self.ttl_secs.map(Duration::from_secs),
            sweep_multiplier: self.sweep_multiplier,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_secs: None,
            sweep_multiplier: DEFAULT_SWEEP_MULTIPLIER,
            promotion: PromotionMode::Newest,
            server_port: 3000,
        }
    }
}
