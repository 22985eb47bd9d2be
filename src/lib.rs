//! Reloop Algo - Match recommendation service for the Reloop marketplace
//!
//! This library scores waste listings against recycler profiles and ranks
//! them for recommendation: a bounded compatibility score, an additive
//! sustainability score, and the great-circle distance between the two.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, distance::{haversine_distance, calculate_bounding_box}};
pub use crate::models::{Listing, RecyclerProfile, ScoredListing, ScoringParams, MatchQuery, RecommendRequest, RecommendResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let bbox = calculate_bounding_box(40.0, -83.0, 10.0);
        assert!(bbox.min_lat < 40.0);
    }
}
