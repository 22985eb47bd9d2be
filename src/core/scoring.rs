use crate::core::{distance::haversine_distance, filters::accepts_waste_type, volume::volume_compatibility};
use crate::models::{Listing, RecyclerProfile, ScoringParams};

/// All scores for one listing/recycler pair, computed in a single pass.
#[derive(Debug, Clone, Copy)]
pub struct ListingScores {
    /// Compatibility score in [0, 100]
    pub match_score: u8,
    /// Additive sustainability score, not clamped to 100
    pub sustainability_score: i32,
    /// Great-circle distance in kilometers
    pub distance_km: f64,
}

/// Score a listing against a recycler profile.
///
/// Computes the distance once and derives both scores from it.
pub fn score_listing(
    listing: &Listing,
    profile: &RecyclerProfile,
    params: &ScoringParams,
) -> ListingScores {
    let distance_km = haversine_distance(
        profile.latitude,
        profile.longitude,
        listing.latitude,
        listing.longitude,
    );

    ListingScores {
        match_score: match_score_at(listing, profile, distance_km, params),
        sustainability_score: sustainability_score_at(profile, distance_km, params),
        distance_km,
    }
}

/// Calculate a match score (0-100) for a listing against a recycler profile
///
/// Scoring formula (defaults):
/// earned = (
///     type_points   (40 if the recycler accepts the listing's waste type)
///   + distance_points (30 decaying linearly to 0 at 100 km)
///   + volume_points   (20 scaled by the volume compatibility coefficient)
/// )
/// score = round(100 * earned / 90)
///
/// The denominator is the sum of the three factor maxima (90 by default),
/// so full marks on every factor land exactly on 100.
pub fn calculate_match_score(
    listing: &Listing,
    profile: &RecyclerProfile,
    params: &ScoringParams,
) -> u8 {
    let distance_km = haversine_distance(
        profile.latitude,
        profile.longitude,
        listing.latitude,
        listing.longitude,
    );

    match_score_at(listing, profile, distance_km, params)
}

/// Calculate the sustainability score for a listing/recycler pair
///
/// Additive and unnormalized: a generous process efficiency can push the
/// total past 100, and that value is passed through as-is.
pub fn calculate_sustainability_score(
    listing: &Listing,
    profile: &RecyclerProfile,
    params: &ScoringParams,
) -> i32 {
    let distance_km = haversine_distance(
        profile.latitude,
        profile.longitude,
        listing.latitude,
        listing.longitude,
    );

    sustainability_score_at(profile, distance_km, params)
}

#[inline]
fn match_score_at(
    listing: &Listing,
    profile: &RecyclerProfile,
    distance_km: f64,
    params: &ScoringParams,
) -> u8 {
    let type_points = if accepts_waste_type(profile, listing) {
        params.type_points
    } else {
        0.0
    };

    let distance_points = linear_decay_points(
        distance_km,
        params.match_distance_decay_km,
        params.distance_points,
    );

    let volume_points =
        volume_compatibility(&listing.volume, &profile.capacity) * params.volume_points;

    let earned = type_points + distance_points + volume_points;

    (100.0 * earned / params.max_match_points()).round() as u8
}

#[inline]
fn sustainability_score_at(
    profile: &RecyclerProfile,
    distance_km: f64,
    params: &ScoringParams,
) -> i32 {
    // Uses its own decay radius (200 km by default), independent of the
    // match score's 100 km radius.
    let distance_points = linear_decay_points(
        distance_km,
        params.sustainability_distance_decay_km,
        params.sustainability_distance_points,
    );

    let certification_bonus = (profile.certifications.len() as f64
        * params.certification_bonus_points)
        .min(params.certification_bonus_cap);

    (distance_points + profile.process_efficiency + certification_bonus).round() as i32
}

/// Linear decay from `max_points` at 0 km down to 0 at `decay_km`, floored at 0.
#[inline]
fn linear_decay_points(distance_km: f64, decay_km: f64, max_points: f64) -> f64 {
    (max_points * (1.0 - distance_km / decay_km)).max(0.0)
}
