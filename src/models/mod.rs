// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, RecyclerProfile, ScoredListing, GeoPoint, BoundingBox, MatchQuery, ScoringParams};
pub use requests::{RecommendRequest, RecordInteractionRequest};
pub use responses::{RecommendResponse, HealthResponse, ErrorResponse, RecordInteractionResponse};
