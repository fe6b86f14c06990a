//! HTTP implementation of the venue API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::{Building, Floor, Room, VenueApi};
use crate::error::{ApiError, Result};

/// Request timeout for the hosted data API
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Venue API client over the hosted REST data service
pub struct VenueClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl VenueClient {
    /// Create a new client for the given API base URL.
    ///
    /// `base_url` may carry a trailing slash; it is normalized away so path
    /// joining stays predictable.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Make a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl VenueApi for VenueClient {
    async fn list_buildings(&self) -> Result<Vec<Building>> {
        self.get_json("/v1/buildings").await
    }

    async fn list_floors(&self) -> Result<Vec<Floor>> {
        self.get_json("/v1/floors").await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.get_json("/v1/rooms").await
    }

    async fn list_floors_of_building(&self, building_id: &str) -> Result<Vec<Floor>> {
        let path = format!("/v1/buildings/{}/floors", building_id);
        self.get_json(&path).await
    }

    async fn list_rooms_of_floor(&self, floor_id: &str) -> Result<Vec<Room>> {
        let path = format!("/v1/floors/{}/rooms", floor_id);
        self.get_json(&path).await
    }
}
