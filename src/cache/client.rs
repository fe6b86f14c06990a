//! Cached wrapper for the venue API client
//!
//! Wires key derivation, per-entity TTLs, and the read-through engine around
//! any `VenueApi` implementation. Screens and CLI commands talk to this type
//! exactly as they would to the raw client; caching is transparent.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::{CacheStore, CacheTtl, Scope, TtlCache, derive_key};
use crate::client::{Building, Floor, Room, VenueApi};
use crate::error::Result;

/// Caching wrapper for any `VenueApi` implementation.
///
/// The cache is optional: it is absent when the caller asked for `--no-cache`
/// or when the local store could not be opened, and every call then passes
/// straight through to the inner client.
pub struct CachedVenueClient<C: VenueApi> {
    inner: Arc<C>,
    cache: Option<TtlCache>,
}

impl<C: VenueApi> CachedVenueClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, enabled: bool) -> Self {
        let cache = if enabled {
            match CacheStore::open() {
                Ok(store) => Some(TtlCache::new(store)),
                Err(e) => {
                    log::warn!("Could not open cache store, running uncached: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            inner: Arc::new(inner),
            cache,
        }
    }

    /// Wrap an inner client around an explicit cache (for testing or a
    /// non-default store location).
    pub fn with_cache(inner: C, cache: TtlCache) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: Some(cache),
        }
    }
}

#[async_trait]
impl<C: VenueApi + 'static> VenueApi for CachedVenueClient<C> {
    async fn list_buildings(&self) -> Result<Vec<Building>> {
        let Some(cache) = &self.cache else {
            return self.inner.list_buildings().await;
        };
        let key = derive_key("buildings", None);
        let result = cache
            .get(&key, CacheTtl::BUILDINGS, || self.inner.list_buildings())
            .await?;
        Ok(result)
    }

    async fn list_floors(&self) -> Result<Vec<Floor>> {
        let Some(cache) = &self.cache else {
            return self.inner.list_floors().await;
        };
        let key = derive_key("floors", None);
        let result = cache
            .get(&key, CacheTtl::FLOORS, || self.inner.list_floors())
            .await?;
        Ok(result)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let Some(cache) = &self.cache else {
            return self.inner.list_rooms().await;
        };
        let key = derive_key("rooms", None);
        let result = cache
            .get(&key, CacheTtl::ROOMS, || self.inner.list_rooms())
            .await?;
        Ok(result)
    }

    async fn list_floors_of_building(&self, building_id: &str) -> Result<Vec<Floor>> {
        let Some(cache) = &self.cache else {
            return self.inner.list_floors_of_building(building_id).await;
        };
        let key = derive_key("floors", Some(Scope::new("building", building_id)));
        let result = cache
            .get(&key, CacheTtl::FLOORS, || {
                self.inner.list_floors_of_building(building_id)
            })
            .await?;
        Ok(result)
    }

    async fn list_rooms_of_floor(&self, floor_id: &str) -> Result<Vec<Room>> {
        let Some(cache) = &self.cache else {
            return self.inner.list_rooms_of_floor(floor_id).await;
        };
        let key = derive_key("rooms", Some(Scope::new("floor", floor_id)));
        let result = cache
            .get(&key, CacheTtl::ROOMS, || {
                self.inner.list_rooms_of_floor(floor_id)
            })
            .await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockVenueClient;
    use crate::error::{ApiError, CacheError, Error};
    use tempfile::TempDir;

    fn building(id: &str, name: &str) -> Building {
        Building {
            id: id.to_string(),
            name: name.to_string(),
            latitude: None,
            longitude: None,
        }
    }

    fn room(id: &str, floor_id: &str) -> Room {
        Room {
            id: id.to_string(),
            floor_id: floor_id.to_string(),
            name: id.to_string(),
            capacity: None,
            bookable: None,
        }
    }

    fn cached_client(mock: MockVenueClient) -> (CachedVenueClient<MockVenueClient>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::open_at(dir.path()).unwrap();
        let client = CachedVenueClient::with_cache(mock, TtlCache::new(store));
        (client, dir)
    }

    #[tokio::test]
    async fn test_list_buildings_cached() {
        let mock = MockVenueClient::new()
            .with_buildings(vec![building("b-1", "Library")])
            .await;
        let (client, _dir) = cached_client(mock);

        // First call - cache miss
        let first = client.list_buildings().await.unwrap();

        // Second call - cache hit
        let second = client.list_buildings().await.unwrap();

        assert_eq!(first, second);
        let counts = client.inner.call_counts().await;
        assert_eq!(counts.list_buildings, 1);
    }

    #[tokio::test]
    async fn test_cache_disabled_bypasses_cache() {
        let mock = MockVenueClient::new();
        let client = CachedVenueClient {
            inner: Arc::new(mock),
            cache: None,
        };

        let _ = client.list_buildings().await;
        let _ = client.list_buildings().await;

        let counts = client.inner.call_counts().await;
        assert_eq!(counts.list_buildings, 2);
    }

    #[tokio::test]
    async fn test_scoped_queries_cache_independently() {
        let mock = MockVenueClient::new()
            .with_rooms(vec![room("r-1", "f-1"), room("r-2", "f-2")])
            .await;
        let (client, _dir) = cached_client(mock);

        let f1 = client.list_rooms_of_floor("f-1").await.unwrap();
        let f2 = client.list_rooms_of_floor("f-2").await.unwrap();
        assert_eq!(f1.len(), 1);
        assert_eq!(f2.len(), 1);
        assert_ne!(f1[0].id, f2[0].id);

        // Different floors are different keys, both missed
        let counts = client.inner.call_counts().await;
        assert_eq!(counts.list_rooms_of_floor, 2);

        // Repeat for the first floor is a hit
        let _ = client.list_rooms_of_floor("f-1").await.unwrap();
        let counts = client.inner.call_counts().await;
        assert_eq!(counts.list_rooms_of_floor, 2);
    }

    #[tokio::test]
    async fn test_scoped_and_global_listings_do_not_collide() {
        let mock = MockVenueClient::new()
            .with_rooms(vec![room("r-1", "f-1"), room("r-2", "f-2")])
            .await;
        let (client, _dir) = cached_client(mock);

        let scoped = client.list_rooms_of_floor("f-1").await.unwrap();
        let all = client.list_rooms().await.unwrap();

        assert_eq!(scoped.len(), 1);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_carries_cache_key() {
        let mock = MockVenueClient::new()
            .with_error(ApiError::ServerError("down".to_string()))
            .await;
        let (client, _dir) = cached_client(mock);

        let err = client.list_rooms_of_floor("f-9").await.unwrap_err();
        match err {
            Error::Cache(CacheError::Fetch { key, .. }) => {
                assert_eq!(key, "rooms:floor:f-9");
            }
            other => panic!("Expected Cache(Fetch), got {:?}", other),
        }
    }
}
