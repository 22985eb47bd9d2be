use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::GeoPoint;

/// Request to recommend listings for a recycler
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "recycler_id", rename = "recyclerId")]
    pub recycler_id: String,
    #[serde(default)]
    #[serde(alias = "waste_type", rename = "wasteType")]
    pub waste_type: Option<String>,
    /// Overrides the profile location when present
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    #[serde(alias = "min_match_score", rename = "minMatchScore")]
    pub min_match_score: Option<u8>,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    #[serde(alias = "exclude_listing_ids", rename = "excludeListingIds")]
    pub exclude_listing_ids: Vec<String>,
}

fn default_limit() -> u16 {
    20
}

/// Request to record a recycler/listing interaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordInteractionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "recycler_id", rename = "recyclerId")]
    pub recycler_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "listing_id", rename = "listingId")]
    pub listing_id: String,
    pub interaction: String,
}
