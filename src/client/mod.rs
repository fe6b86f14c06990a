//! Venue reference data API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::VenueClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockVenueClient;

/// Venue reference data API trait.
///
/// The one boundary to the hosted backend: every method is a keyed fetcher
/// producing the authoritative record list for one entity type, optionally
/// scoped to a parent (floors of one building, rooms of one floor). The cache
/// layer wraps any implementation of this trait, so tests inject a mock
/// instead of a live client.
#[async_trait]
pub trait VenueApi: Send + Sync {
    /// List all buildings
    async fn list_buildings(&self) -> Result<Vec<Building>>;

    /// List all floors across buildings
    async fn list_floors(&self) -> Result<Vec<Floor>>;

    /// List all rooms across floors
    async fn list_rooms(&self) -> Result<Vec<Room>>;

    /// List floors belonging to one building
    async fn list_floors_of_building(&self, building_id: &str) -> Result<Vec<Floor>>;

    /// List rooms belonging to one floor
    async fn list_rooms_of_floor(&self, floor_id: &str) -> Result<Vec<Room>>;
}

/// Building resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Building ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Latitude of the building entrance (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude of the building entrance (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Floor resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor ID
    pub id: String,

    /// Parent building ID
    #[serde(rename = "buildingId")]
    pub building_id: String,

    /// Floor level, ground floor is 0, basements are negative
    pub level: i32,

    /// Display name, e.g. "Mezzanine" (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Room resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room ID
    pub id: String,

    /// Parent floor ID
    #[serde(rename = "floorId")]
    pub floor_id: String,

    /// Display name
    pub name: String,

    /// Seating capacity (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    /// Whether the room can currently be booked (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookable: Option<bool>,
}
