//! Local read-through cache for venue reference data
//!
//! SQLite-backed persistence with a per-call TTL policy. Designed to keep
//! slowly-changing reference data (buildings, floors, rooms) off the network
//! on repeat lookups while never serving data past its freshness window.

pub mod client;
pub mod key;
pub mod store;
pub mod ttl;

use std::time::Duration;

/// Cache TTL per entity type.
///
/// Reference data has uneven volatility: buildings almost never change,
/// floors rarely, while room bookability can flip within the hour. Each
/// entity type gets its own window rather than one uniform constant.
pub struct CacheTtl;

impl CacheTtl {
    pub const BUILDINGS: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const FLOORS: Duration = Duration::from_secs(30 * 60); // 30 min
    pub const ROOMS: Duration = Duration::from_secs(15 * 60); // 15 min
}

// Re-export main types
pub use client::CachedVenueClient;
pub use key::{Scope, derive_key};
pub use store::CacheStore;
pub use ttl::TtlCache;
