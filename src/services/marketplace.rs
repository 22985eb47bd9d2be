use crate::models::{Listing, MatchQuery, RecyclerProfile};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace backend
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// GeoJSON point as stored by the marketplace backend.
///
/// Coordinates are `[longitude, latitude]` (GeoJSON axis order), reversed
/// from the argument order of everything in `core::distance`. The
/// conversion happens here, once; nothing past this module sees a raw
/// coordinate pair.
#[derive(Debug, Clone, Deserialize)]
struct GeoJsonPoint {
    coordinates: [f64; 2],
}

impl GeoJsonPoint {
    fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    fn longitude(&self) -> f64 {
        self.coordinates[0]
    }
}

/// Listing document as served by the marketplace API
#[derive(Debug, Clone, Deserialize)]
struct ListingDocument {
    id: String,
    title: String,
    #[serde(rename = "type")]
    waste_type: String,
    volume: String,
    location: GeoJsonPoint,
    #[serde(rename = "producerId")]
    producer_id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_status")]
    status: String,
    #[serde(rename = "createdAt", default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_status() -> String {
    "active".to_string()
}

impl From<ListingDocument> for Listing {
    fn from(doc: ListingDocument) -> Self {
        let is_active = doc.status == "active";
        Listing {
            id: doc.id,
            title: doc.title,
            waste_type: doc.waste_type,
            volume: doc.volume,
            latitude: doc.location.latitude(),
            longitude: doc.location.longitude(),
            producer_id: doc.producer_id,
            description: doc.description,
            is_active,
            created_at: doc.created_at,
        }
    }
}

/// Recycler document as served by the marketplace API
#[derive(Debug, Clone, Deserialize)]
struct RecyclerDocument {
    id: String,
    #[serde(rename = "companyName")]
    company_name: String,
    #[serde(rename = "wasteTypes", default)]
    waste_types: Vec<String>,
    location: GeoJsonPoint,
    #[serde(default)]
    capacity: String,
    #[serde(rename = "processEfficiency", default)]
    process_efficiency: f64,
    #[serde(default)]
    certifications: Vec<String>,
}

impl From<RecyclerDocument> for RecyclerProfile {
    fn from(doc: RecyclerDocument) -> Self {
        RecyclerProfile {
            recycler_id: doc.id,
            company_name: doc.company_name,
            waste_types: doc.waste_types,
            latitude: doc.location.latitude(),
            longitude: doc.location.longitude(),
            capacity: doc.capacity,
            process_efficiency: doc.process_efficiency,
            certifications: doc.certifications,
        }
    }
}

/// Marketplace API client
///
/// Handles all communication with the marketplace backend including:
/// - Fetching recycler profiles
/// - Querying candidate listings
/// - Forwarding interaction events for analytics
pub struct MarketplaceClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl MarketplaceClient {
    /// Create a new marketplace client
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch the recycler profile for a given recycler ID
    pub async fn get_recycler_profile(
        &self,
        recycler_id: &str,
    ) -> Result<RecyclerProfile, MarketplaceError> {
        let url = format!(
            "{}/api/recyclers/{}",
            self.base_url.trim_end_matches('/'),
            recycler_id
        );

        tracing::debug!("Fetching recycler profile from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketplaceError::NotFound(format!(
                "Recycler profile not found for {}",
                recycler_id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch recycler {}: {} - {}", recycler_id, status, body);
            return Err(MarketplaceError::ApiError(format!(
                "Failed to fetch recycler profile: {}",
                status
            )));
        }

        let doc: RecyclerDocument = response
            .json()
            .await
            .map_err(|e| MarketplaceError::InvalidResponse(format!("Failed to parse recycler profile: {}", e)))?;

        Ok(doc.into())
    }

    /// Query candidate listings matching the given constraints
    ///
    /// Status, waste type and the bounding box are pushed down to the
    /// backend; exclusions and scoring stay in the matcher.
    pub async fn query_listings(
        &self,
        query: &MatchQuery,
    ) -> Result<Vec<Listing>, MarketplaceError> {
        let url = format!("{}/api/listings", self.base_url.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = vec![("status", "active".to_string())];

        if let Some(waste_type) = &query.waste_type {
            params.push(("type", waste_type.clone()));
        }

        if let Some(bbox) = &query.bounding_box {
            params.push(("minLat", bbox.min_lat.to_string()));
            params.push(("maxLat", bbox.max_lat.to_string()));
            params.push(("minLng", bbox.min_lon.to_string()));
            params.push(("maxLng", bbox.max_lon.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketplaceError::ApiError(format!(
                "Failed to query listings: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("listings")
            .and_then(|l| l.as_array())
            .ok_or_else(|| MarketplaceError::InvalidResponse("Missing listings array".into()))?;

        // Skip documents that fail to parse rather than failing the batch
        let listings: Vec<Listing> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value::<ListingDocument>(doc.clone()).ok())
            .map(Listing::from)
            .collect();

        tracing::debug!("Queried {} listings (total: {})", listings.len(), total);

        Ok(listings)
    }

    /// Forward an interaction event to the marketplace for analytics
    pub async fn record_event(
        &self,
        recycler_id: &str,
        listing_id: &str,
        interaction: &str,
    ) -> Result<(), MarketplaceError> {
        let url = format!("{}/api/matches/events", self.base_url.trim_end_matches('/'));

        let payload = serde_json::json!({
            "recyclerId": recycler_id,
            "listingId": listing_id,
            "interaction": interaction,
        });

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketplaceError::ApiError(format!(
                "Failed to record event: {}",
                response.status()
            )));
        }

        tracing::debug!("Recorded event: {} -> {} ({})", recycler_id, listing_id, interaction);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_client_creation() {
        let client = MarketplaceClient::new(
            "https://marketplace.test".to_string(),
            "test_key".to_string(),
        );

        assert_eq!(client.base_url, "https://marketplace.test");
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_geojson_axis_order() {
        // GeoJSON is [longitude, latitude]
        let json = r#"{
            "id": "l1",
            "title": "Steel offcuts",
            "type": "Metal Scraps",
            "volume": "50 tons",
            "location": { "coordinates": [-83.0, 40.0] },
            "producerId": "p1"
        }"#;

        let doc: ListingDocument = serde_json::from_str(json).unwrap();
        let listing = Listing::from(doc);

        assert_eq!(listing.latitude, 40.0);
        assert_eq!(listing.longitude, -83.0);
    }

    #[test]
    fn test_non_active_status_maps_to_inactive() {
        let json = r#"{
            "id": "l1",
            "title": "Steel offcuts",
            "type": "Metal Scraps",
            "volume": "50 tons",
            "location": { "coordinates": [-83.0, 40.0] },
            "producerId": "p1",
            "status": "closed"
        }"#;

        let doc: ListingDocument = serde_json::from_str(json).unwrap();
        let listing = Listing::from(doc);
        assert!(!listing.is_active);
    }
}
