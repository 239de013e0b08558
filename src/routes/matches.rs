use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{FindMatchesQuery, FindMatchesResponse, HealthResponse};
use super::{engine_error_response, validation_error_response, AppState};

/// Configure match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// GET /api/v1/matches?shipmentId={shipmentId}&limit={limit}
///
/// Returns candidate trips ranked by composite score, each with the
/// reasons it matched.
async fn find_matches(
    state: web::Data<AppState>,
    query: web::Query<FindMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return validation_error_response(errors);
    }

    let limit = query
        .limit
        .unwrap_or(state.default_limit)
        .min(state.max_limit) as usize;

    tracing::info!("Finding matches for shipment: {}, limit: {}", query.shipment_id, limit);

    let mut ranked = match state.matches.find_matches_for_id(&query.shipment_id).await {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!("Failed to find matches for {}: {}", query.shipment_id, e);
            return engine_error_response(&e);
        }
    };

    ranked.matches.truncate(limit);

    HttpResponse::Ok().json(FindMatchesResponse {
        shipment_id: ranked.shipment.id,
        matches: ranked.matches,
        total_candidates: ranked.total_candidates,
    })
}
