use serde::{Deserialize, Serialize};

use crate::core::scoring::ListingScores;

/// Waste listing published by a producer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub volume: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "producerId")]
    pub producer_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

/// Recycler profile with accepted waste types, capacity and location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclerProfile {
    #[serde(rename = "recyclerId")]
    pub recycler_id: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "wasteTypes")]
    pub waste_types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: String,
    /// Nominal range 0-40, not clamped
    #[serde(rename = "processEfficiency", default)]
    pub process_efficiency: f64,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Scored listing returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredListing {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub volume: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "producerId")]
    pub producer_id: String,
    pub description: Option<String>,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "sustainabilityScore")]
    pub sustainability_score: i32,
    #[serde(rename = "distanceKm")]
    pub distance_km: u32,
}

impl ScoredListing {
    /// Attach computed scores to a listing, rounding the distance to
    /// whole kilometers for the wire.
    pub fn from_listing(listing: Listing, scores: ListingScores) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            waste_type: listing.waste_type,
            volume: listing.volume,
            latitude: listing.latitude,
            longitude: listing.longitude,
            producer_id: listing.producer_id,
            description: listing.description,
            match_score: scores.match_score,
            sustainability_score: scores.sustainability_score,
            distance_km: scores.distance_km.round() as u32,
        }
    }
}

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Candidate query parameters
#[derive(Debug, Clone)]
pub struct MatchQuery {
    pub waste_type: Option<String>,
    pub min_match_score: Option<u8>,
    pub bounding_box: Option<BoundingBox>,
    pub exclude_listing_ids: Vec<String>,
    pub limit: usize,
}

/// Scoring parameters
///
/// The match-score normalization base is `max_match_points()`, the sum of
/// the three factor maxima (90 under the defaults). The two distance decay
/// radii are separate parameters: the match score decays over 100 km, the
/// sustainability score over 200 km.
#[derive(Debug, Clone, Copy)]
pub struct ScoringParams {
    pub type_points: f64,
    pub distance_points: f64,
    pub volume_points: f64,
    pub match_distance_decay_km: f64,
    pub sustainability_distance_points: f64,
    pub sustainability_distance_decay_km: f64,
    pub certification_bonus_points: f64,
    pub certification_bonus_cap: f64,
}

impl ScoringParams {
    /// Maximum earnable match points; the normalization denominator.
    #[inline]
    pub fn max_match_points(&self) -> f64 {
        self.type_points + self.distance_points + self.volume_points
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            type_points: 40.0,
            distance_points: 30.0,
            volume_points: 20.0,
            match_distance_decay_km: 100.0,
            sustainability_distance_points: 30.0,
            sustainability_distance_decay_km: 200.0,
            certification_bonus_points: 10.0,
            certification_bonus_cap: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_normalization_base_is_90() {
        let params = ScoringParams::default();
        assert_eq!(params.max_match_points(), 90.0);
    }

    #[test]
    fn test_listing_deserializes_with_defaults() {
        let json = r#"{
            "id": "l1",
            "title": "Steel offcuts",
            "type": "Metal Scraps",
            "volume": "50 tons",
            "latitude": 40.0,
            "longitude": -83.0,
            "producerId": "p1"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.is_active);
        assert!(listing.description.is_none());
        assert_eq!(listing.waste_type, "Metal Scraps");
    }
}
