// Route exports
pub mod contacts;
pub mod matches;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use crate::core::{ContactInitiator, EngineError, MatchService};
use crate::models::ErrorResponse;
use crate::services::{JwtAuthenticator, MarketplaceStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketplaceStore>,
    pub matches: MatchService,
    pub contacts: ContactInitiator,
    pub auth: Arc<JwtAuthenticator>,
    pub default_limit: u16,
    pub max_limit: u16,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(contacts::configure),
    );
}

/// JSON error body for a failed engine call
pub(crate) fn engine_error_response(err: &EngineError) -> HttpResponse {
    let body = |status_code: u16| ErrorResponse {
        error: err.code().to_string(),
        message: err.to_string(),
        status_code,
    };

    match err {
        EngineError::NotAuthenticated => HttpResponse::Unauthorized().json(body(401)),
        EngineError::ShipperNotFound(_)
        | EngineError::TripNotFound(_)
        | EngineError::ShipmentNotFound(_) => HttpResponse::NotFound().json(body(404)),
        EngineError::InvalidInput(_) => HttpResponse::BadRequest().json(body(400)),
        EngineError::DataAccess(_) => HttpResponse::InternalServerError().json(body(500)),
    }
}

pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
