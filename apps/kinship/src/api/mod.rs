//! # Kinship HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Family metrics and store revision
//! - `GET /tree` - Full snapshot (`{ people, rootPersonId }`)
//! - `GET /people/{id}` - One person record
//! - `GET /generations` - Generation layout
//! - `GET /audit` - Link issues
//! - `POST /people/{id}/children` - Add a child to a person (and spouse)
//! - `POST /children` - Add a child with an explicit parent list
//! - `POST /people/{id}/spouse` - Add a spouse
//! - `PATCH /people/{id}` - Partial update of a person
//!
//! Mutations accept `?expectedRevision=N` and answer `409 Conflict` when the
//! store has moved past that revision.
//!
//! ## Configuration (Environment Variables)
//!
//! - `KINSHIP_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `kinship::api::*`)
pub use handlers::{
    add_child_handler, add_child_of_handler, add_spouse_handler, audit_handler,
    generations_handler, health_handler, person_handler, status_handler, tree_handler,
    update_person_handler,
};
pub use types::{
    AddChildOfRequest, AddChildRequest, CreatedResponse, ErrorResponse, GenerationResponse,
    HealthResponse, RevisionQuery, StatusResponse, UpdateResponse, validate_fields,
    validate_update,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use kinship_core::{FamilyStore, KinshipError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MiB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the family store.
#[derive(Clone)]
pub struct AppState {
    /// The one store this server edits.
    pub store: Arc<RwLock<FamilyStore>>,
}

impl AppState {
    /// Create new app state around a store.
    #[must_use]
    pub fn new(store: FamilyStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Methods and headers every non-permissive CORS policy allows.
const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::OPTIONS];
const CORS_HEADERS: [HeaderName; 1] = [header::CONTENT_TYPE];

/// Origins allowed when `KINSHIP_CORS_ORIGINS` is unset or holds nothing valid.
const LOCALHOST_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Build CORS layer from environment configuration.
///
/// Reads `KINSHIP_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins
/// - If not set: defaults to localhost only
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    match std::env::var("KINSHIP_CORS_ORIGINS").ok().as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (KINSHIP_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed = parse_origins(origins.split(','));
            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in KINSHIP_CORS_ORIGINS, defaulting to localhost only"
                );
                restricted_cors(parse_origins(LOCALHOST_ORIGINS))
            } else {
                restricted_cors(allowed)
            }
        }
        None => {
            tracing::info!("CORS: No KINSHIP_CORS_ORIGINS set, defaulting to localhost only");
            restricted_cors(parse_origins(LOCALHOST_ORIGINS))
        }
    }
}

/// Parse origin strings, skipping (and logging) the ones that are not valid
/// header values.
fn parse_origins<'a>(origins: impl IntoIterator<Item = &'a str>) -> Vec<HeaderValue> {
    origins
        .into_iter()
        .map(str::trim)
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

/// CORS policy for an explicit origin list.
fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CORS_METHODS)
        .allow_headers(CORS_HEADERS)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/tree", get(handlers::tree_handler))
        .route("/generations", get(handlers::generations_handler))
        .route("/audit", get(handlers::audit_handler))
        .route(
            "/people/{id}",
            get(handlers::person_handler).patch(handlers::update_person_handler),
        )
        .route("/people/{id}/children", post(handlers::add_child_of_handler))
        .route("/people/{id}/spouse", post(handlers::add_spouse_handler))
        .route("/children", post(handlers::add_child_handler))
        .layer(middleware)
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, store: FamilyStore) -> Result<(), KinshipError> {
    let state = AppState::new(store);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KinshipError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Kinship HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| KinshipError::IoError(format!("Server error: {}", e)))
}
