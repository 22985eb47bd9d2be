use crate::models::{Listing, MatchQuery, RecyclerProfile};

/// Check whether a recycler accepts a listing's waste type.
///
/// Exact category membership; a mismatch is a scoring factor, not a hard
/// filter, so this feeds the scorer rather than the pipeline below.
#[inline]
pub fn accepts_waste_type(profile: &RecyclerProfile, listing: &Listing) -> bool {
    profile.waste_types.iter().any(|t| t == &listing.waste_type)
}

/// Check if a listing is within the candidate query constraints
///
/// This is the pre-scoring filter stage: inactive listings, explicitly
/// excluded ids, a requested waste-type filter, and the optional geographic
/// bounding box all remove a candidate before any score is computed.
#[inline]
pub fn matches_query_constraints(listing: &Listing, query: &MatchQuery) -> bool {
    if !listing.is_active {
        return false;
    }

    if query.exclude_listing_ids.contains(&listing.id) {
        return false;
    }

    if let Some(waste_type) = &query.waste_type {
        if &listing.waste_type != waste_type {
            return false;
        }
    }

    // Geospatial pre-filter (cheap compared to Haversine per candidate)
    if let Some(bbox) = &query.bounding_box {
        if !super::distance::is_within_bounding_box(listing.latitude, listing.longitude, bbox) {
            return false;
        }
    }

    true
}
