use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredListing;

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub matches: Vec<ScoredListing>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record interaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInteractionResponse {
    pub success: bool,
    pub event_id: String,
}
