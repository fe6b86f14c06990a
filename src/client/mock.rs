//! Mock venue API client for testing
//!
//! Provides a mock implementation of `VenueApi` for unit testing the cache
//! layer without a live backend.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{Building, Floor, Room, VenueApi};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses via builder methods, then assert on call counts after
/// driving the code under test.
///
/// # Example
/// ```ignore
/// let mock = MockVenueClient::new()
///     .with_buildings(vec![building("b-1", "Library")])
///     .await;
///
/// let buildings = mock.list_buildings().await?;
/// assert_eq!(mock.call_counts().await.list_buildings, 1);
/// ```
#[derive(Default)]
pub struct MockVenueClient {
    /// Buildings to return from list_buildings
    buildings: Arc<Mutex<Vec<Building>>>,
    /// Floors to return from the floor listing methods
    floors: Arc<Mutex<Vec<Floor>>>,
    /// Rooms to return from the room listing methods
    rooms: Arc<Mutex<Vec<Room>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_buildings: usize,
    pub list_floors: usize,
    pub list_rooms: usize,
    pub list_floors_of_building: usize,
    pub list_rooms_of_floor: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_buildings
            + self.list_floors
            + self.list_rooms
            + self.list_floors_of_building
            + self.list_rooms_of_floor
    }
}

impl MockVenueClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure buildings to return from list_buildings.
    pub async fn with_buildings(self, buildings: Vec<Building>) -> Self {
        *self.buildings.lock().await = buildings;
        self
    }

    /// Configure floors to return from the floor listing methods.
    pub async fn with_floors(self, floors: Vec<Floor>) -> Self {
        *self.floors.lock().await = floors;
        self
    }

    /// Configure rooms to return from the room listing methods.
    pub async fn with_rooms(self, rooms: Vec<Room>) -> Self {
        *self.rooms.lock().await = rooms;
        self
    }

    /// Configure an error returned by the next call (consumed on first use).
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get a snapshot of the call counts.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Take the injected error, if one is pending.
    async fn take_error(&self) -> Option<ApiError> {
        self.error.lock().await.take()
    }
}

#[async_trait]
impl VenueApi for MockVenueClient {
    async fn list_buildings(&self) -> Result<Vec<Building>> {
        self.call_count.lock().await.list_buildings += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        Ok(self.buildings.lock().await.clone())
    }

    async fn list_floors(&self) -> Result<Vec<Floor>> {
        self.call_count.lock().await.list_floors += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        Ok(self.floors.lock().await.clone())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.call_count.lock().await.list_rooms += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        Ok(self.rooms.lock().await.clone())
    }

    async fn list_floors_of_building(&self, building_id: &str) -> Result<Vec<Floor>> {
        self.call_count.lock().await.list_floors_of_building += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        let floors = self.floors.lock().await;
        Ok(floors
            .iter()
            .filter(|f| f.building_id == building_id)
            .cloned()
            .collect())
    }

    async fn list_rooms_of_floor(&self, floor_id: &str) -> Result<Vec<Room>> {
        self.call_count.lock().await.list_rooms_of_floor += 1;
        if let Some(err) = self.take_error().await {
            return Err(err.into());
        }
        let rooms = self.rooms.lock().await;
        Ok(rooms
            .iter()
            .filter(|r| r.floor_id == floor_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(id: &str, building_id: &str, level: i32) -> Floor {
        Floor {
            id: id.to_string(),
            building_id: building_id.to_string(),
            level,
            name: None,
        }
    }

    #[tokio::test]
    async fn test_scoped_listing_filters_by_parent() {
        let mock = MockVenueClient::new()
            .with_floors(vec![
                floor("f-1", "b-1", 0),
                floor("f-2", "b-1", 1),
                floor("f-3", "b-2", 0),
            ])
            .await;

        let floors = mock.list_floors_of_building("b-1").await.unwrap();
        assert_eq!(floors.len(), 2);

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_floors_of_building, 1);
        assert_eq!(counts.total(), 1);
    }

    #[tokio::test]
    async fn test_error_consumed_on_first_use() {
        let mock = MockVenueClient::new()
            .with_error(ApiError::ServerError("down".to_string()))
            .await;

        assert!(mock.list_rooms().await.is_err());
        assert!(mock.list_rooms().await.is_ok());
    }
}
