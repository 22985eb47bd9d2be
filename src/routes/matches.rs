use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    RecommendRequest, RecordInteractionRequest, RecommendResponse, HealthResponse,
    RecordInteractionResponse, ErrorResponse, MatchQuery, RecyclerProfile,
};
use crate::services::{CacheKey, CacheManager, Interaction, MarketplaceClient, PostgresClient};
use crate::core::{calculate_bounding_box, Matcher};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<MarketplaceClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
    /// Candidate search radius pushed down to the listing query, when set
    pub search_radius_km: Option<f64>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/recommend", web::post().to(recommend))
        .route("/matches/interaction", web::post().to(record_interaction))
        .route("/matches/interactions", web::get().to(get_interactions))
        .route("/debug/echo", web::post().to(debug_echo));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Check PostgreSQL health
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Debug endpoint to echo raw JSON for debugging
async fn debug_echo(
    body: web::Bytes,
    req: actix_web::HttpRequest,
) -> impl Responder {
    let body_str = String::from_utf8_lossy(&body);
    tracing::info!("DEBUG echo - path: {}, method: {}, body: {}", req.path(), req.method(), body_str);
    HttpResponse::Ok().json(serde_json::json!({
        "path": req.path(),
        "method": req.method().to_string(),
        "body": body_str,
    }))
}

/// Recommend listings endpoint
///
/// POST /api/v1/matches/recommend
///
/// Request body:
/// ```json
/// {
///   "recyclerId": "string",
///   "wasteType": "string",
///   "location": { "latitude": 0.0, "longitude": 0.0 },
///   "minMatchScore": 60,
///   "limit": 20,
///   "excludeListingIds": ["string"]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
    http_req: actix_web::HttpRequest,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        tracing::info!("Request path: {}, method: {}", http_req.path(), http_req.method());
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let recycler_id = &req.recycler_id;
    // Cap limit at 100 to prevent excessive queries
    let limit = req.limit.min(100) as usize;

    tracing::info!("Recommending listings for recycler: {}, limit: {}", recycler_id, limit);

    // Note: recommendation responses are not cached so that listings a
    // recycler just saved, contacted or dismissed drop out immediately

    // Fetch suppressed listings from PostgreSQL to keep them out of results
    let mut exclude_listing_ids = match state.postgres.get_interacted_listings(recycler_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!("Failed to fetch interactions for {}, proceeding without suppression: {}", recycler_id, e);
            vec![]
        }
    };

    // Add client-provided exclude IDs (if any)
    exclude_listing_ids.extend(req.exclude_listing_ids.clone());

    tracing::debug!("Excluding {} listings for recycler {}", exclude_listing_ids.len(), recycler_id);

    // Fetch the recycler profile, cache-aside
    let cache_key = CacheKey::recycler(recycler_id);
    let mut profile = match state.cache.get::<RecyclerProfile>(&cache_key).await {
        Ok(Some(profile)) => profile,
        _ => {
            let profile = match state.marketplace.get_recycler_profile(recycler_id).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!("Failed to fetch recycler profile for {}: {}", recycler_id, e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to fetch recycler profile".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };

            if let Err(e) = state.cache.set(&cache_key, &profile).await {
                tracing::warn!("Failed to cache recycler profile: {}", e);
            }

            profile
        }
    };

    // A request location overrides the profile location
    if let Some(location) = &req.location {
        profile.latitude = location.latitude;
        profile.longitude = location.longitude;
    }

    let bounding_box = state
        .search_radius_km
        .map(|radius| calculate_bounding_box(profile.latitude, profile.longitude, radius));

    let query = MatchQuery {
        waste_type: req.waste_type.clone(),
        min_match_score: req.min_match_score,
        bounding_box,
        exclude_listing_ids,
        limit,
    };

    // Query candidate listings from the marketplace
    let candidates = match state.marketplace.query_listings(&query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query listings for {}: {}", recycler_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Found {} candidates for {}", candidates.len(), recycler_id);

    // Run the matching pipeline
    let result = state.matcher.recommend(&profile, candidates, &query);

    let response = RecommendResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Returning {} matches for recycler {} (from {} candidates)",
        response.matches.len(),
        recycler_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Record interaction endpoint
///
/// POST /api/v1/matches/interaction
///
/// Request body:
/// ```json
/// {
///   "recyclerId": "string",
///   "listingId": "string",
///   "interaction": "viewed|saved|contacted|dismissed"
/// }
/// ```
async fn record_interaction(
    state: web::Data<AppState>,
    req: web::Json<RecordInteractionRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Parse interaction kind
    let interaction = match req.interaction.to_lowercase().as_str() {
        "viewed" => Interaction::Viewed,
        "saved" => Interaction::Saved,
        "contacted" => Interaction::Contacted,
        "dismissed" => Interaction::Dismissed,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid interaction".to_string(),
                message: "Interaction must be one of: viewed, saved, contacted, dismissed".to_string(),
                status_code: 400,
            });
        }
    };

    // Record in PostgreSQL for recommendation suppression (primary source)
    let postgres_result = state
        .postgres
        .record_interaction(&req.recycler_id, &req.listing_id, interaction)
        .await;

    // Forward to the marketplace backend (best-effort, for analytics)
    let marketplace_result = state
        .marketplace
        .record_event(&req.recycler_id, &req.listing_id, &req.interaction.to_lowercase())
        .await;

    // Handle results - PostgreSQL is the critical one
    match postgres_result {
        Ok(_) => {
            if let Err(e) = &marketplace_result {
                // Log marketplace failure but don't fail the request
                tracing::warn!("Interaction recorded in PostgreSQL but marketplace forwarding failed: {}", e);
            } else {
                tracing::debug!(
                    "Recorded interaction: {} -> {} ({})",
                    req.recycler_id,
                    req.listing_id,
                    req.interaction
                );
            }

            // Invalidate cached recommendations for this recycler
            let cache_key = CacheKey::recommendations(&req.recycler_id);
            if let Err(e) = state.cache.delete(&cache_key).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }

            HttpResponse::Ok().json(RecordInteractionResponse {
                success: true,
                event_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            // PostgreSQL failed - this is the critical failure
            tracing::error!("Failed to record interaction in PostgreSQL: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record interaction".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get suppressed listings for a recycler
///
/// GET /api/v1/matches/interactions?recyclerId={recyclerId}
///
/// Returns the listing IDs currently excluded from the recycler's
/// recommendations, for client-side synchronization and debugging.
async fn get_interactions(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let recycler_id = match query.get("recyclerId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing recyclerId parameter".to_string(),
                message: "recyclerId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.postgres.get_interacted_listings(recycler_id).await {
        Ok(listing_ids) => {
            HttpResponse::Ok().json(serde_json::json!({
                "recyclerId": recycler_id,
                "listingIds": listing_ids,
                "count": listing_ids.len(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to fetch interactions for {}: {}", recycler_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch interactions".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
