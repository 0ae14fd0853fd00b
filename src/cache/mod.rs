//! Cache Module
//!
//! Bounded in-memory caching with TTL expiration, capacity eviction and
//! pluggable read promotion.

mod clock;
mod entry;
mod expiration;
mod order;
mod promotion;
mod settings;
mod snapshot;
mod store;
mod sync;
mod unsync;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use expiration::ExpirationPolicy;
pub use order::{Iter as Keys, RecencyList};
pub use promotion::{Promotion, PromotionStrategy};
pub use settings::{CacheSettings, DEFAULT_CAPACITY, DEFAULT_SWEEP_MULTIPLIER};
pub use snapshot::KeySnapshot;
pub use store::OrderedStore;
pub use sync::SyncCache;
pub use unsync::{Cache, CacheBuilder};
