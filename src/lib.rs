//! Simple Cache - A bounded in-memory key-value cache
//!
//! Provides TTL expiration (lazy plus amortized sweeps), count-based
//! eviction of the oldest entry, pluggable read promotion, and a
//! mutex-wrapped variant for shared use. A small HTTP adapter exposes a
//! string cache over the network.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, CacheBuilder, CacheSettings, KeySnapshot, Promotion, SyncCache};
pub use config::Config;
pub use error::{CacheError, Result};
