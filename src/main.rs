use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use shipmatch::config::{BackendKind, Settings};
use shipmatch::core::{CandidateFetcher, ContactInitiator, MatchService, Matcher};
use shipmatch::models::{ErrorResponse, ScoringWeights};
use shipmatch::routes::{self, AppState};
use shipmatch::services::{
    BackendClient, BackendTables, CandidateCache, JwtAuthenticator, MarketplaceStore, MemoryStore,
    PostgresStore,
};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload and query errors
#[derive(Debug)]
struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(&self.0)
    }
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle query payload errors
fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn MarketplaceStore>> {
    let store: Arc<dyn MarketplaceStore> = match settings.backend.kind {
        BackendKind::Rest => {
            let tables = BackendTables {
                trips: settings.backend.tables.trips.clone(),
                shipments: settings.backend.tables.shipments.clone(),
                shippers: settings.backend.tables.shippers.clone(),
                contact_requests: settings.backend.tables.contact_requests.clone(),
            };
            let client = BackendClient::new(
                settings.backend.endpoint.clone(),
                settings.backend.api_key.clone(),
                settings.backend.request_timeout_secs,
                tables,
            )
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

            info!("Backend client initialized for {}", settings.backend.endpoint);
            Arc::new(client)
        }
        BackendKind::Postgres => {
            let store = PostgresStore::from_settings(
                &settings.database.url,
                settings.database.max_connections,
                settings.database.min_connections,
                settings.database.acquire_timeout_secs,
                settings.database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                settings.database.max_connections.unwrap_or(10)
            );
            Arc::new(store)
        }
        BackendKind::Memory => {
            info!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(store)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let loaded = match std::env::var("SHIPMATCH_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };
    let settings = loaded.map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting Shipmatch matching service...");

    let store = build_store(&settings).await?;

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let matcher = Matcher::new(weights).with_min_score(settings.matching.min_score);

    info!(
        "Matcher initialized with weights: {:?}, min score: {}",
        matcher.weights(),
        matcher.min_score()
    );

    let mut fetcher = CandidateFetcher::new(store.clone());
    if settings.cache.candidate_ttl_secs > 0 {
        fetcher = fetcher.with_cache(CandidateCache::new(
            settings.cache.max_entries,
            settings.cache.candidate_ttl_secs,
        ));
        info!("Candidate cache enabled (TTL: {}s)", settings.cache.candidate_ttl_secs);
    }

    let app_state = AppState {
        store: store.clone(),
        matches: MatchService::new(store.clone(), fetcher, matcher),
        contacts: ContactInitiator::new(store),
        auth: Arc::new(JwtAuthenticator::new(
            &settings.auth.jwt_secret,
            settings.auth.audience.as_deref(),
        )),
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
