// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod volume;

pub use distance::{haversine_distance, calculate_bounding_box, is_within_bounding_box};
pub use filters::{accepts_waste_type, matches_query_constraints};
pub use matcher::{Matcher, RecommendResult};
pub use scoring::{calculate_match_score, calculate_sustainability_score, score_listing, ListingScores};
pub use volume::{leading_amount, volume_compatibility};
