use crate::core::{filters::matches_query_constraints, scoring::score_listing};
use crate::models::{Listing, MatchQuery, RecyclerProfile, ScoredListing, ScoringParams};

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendResult {
    pub matches: Vec<ScoredListing>,
    pub total_candidates: usize,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Query constraint pre-filter (active, exclusions, type, bounding box)
/// 2. Scoring (match score, sustainability score, distance)
/// 3. Minimum score cut
/// 4. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    params: ScoringParams,
}

impl Matcher {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    pub fn with_default_params() -> Self {
        Self {
            params: ScoringParams::default(),
        }
    }

    /// Rank candidate listings for a recycler.
    ///
    /// Each candidate is scored independently (the batch is an
    /// order-insensitive map), then the batch is cut at the requested
    /// minimum match score, sorted descending by match score with distance
    /// as the tie-break, and truncated to the query limit.
    ///
    /// # Arguments
    /// * `profile` - The recycler profile to score against
    /// * `candidates` - Candidate listings from the marketplace store
    /// * `query` - Constraints, minimum score, and result limit
    ///
    /// # Returns
    /// RecommendResult containing scored and ranked listings
    pub fn recommend(
        &self,
        profile: &RecyclerProfile,
        candidates: Vec<Listing>,
        query: &MatchQuery,
    ) -> RecommendResult {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredListing> = candidates
            .into_iter()
            .filter(|listing| matches_query_constraints(listing, query))
            .filter_map(|listing| {
                let scores = score_listing(&listing, profile, &self.params);

                if let Some(min) = query.min_match_score {
                    if scores.match_score < min {
                        return None;
                    }
                }

                Some(ScoredListing::from_listing(listing, scores))
            })
            .collect();

        // Sort by match score (descending) and then by distance (ascending)
        matches.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.distance_km.cmp(&b.distance_km))
        });

        matches.truncate(query.limit);

        RecommendResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_params()
    }
}
