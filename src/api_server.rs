// Axum API Server Module
//
// Purpose: REST API serving compatibility verdicts to the storefront widget
// Endpoints: /api/compat, /api/compat/batch, /api/health, /api/brands

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::analyzer::Analyzer;
use crate::catalog::BikeCatalog;
use crate::config::ServerConfig;
use crate::error::InputError;
use crate::input::BikeQuery;
use crate::verdict::CompatibilityVerdict;

/// Reported by /api/health
pub const API_VERSION: &str = "1.0";

/// Largest batch accepted by /api/compat/batch
pub const MAX_BATCH_SIZE: usize = 100;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    /// Verdicts keyed by the validated brand/model pair
    pub cache: Cache<String, CompatibilityVerdict>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Load the catalog named in `config`; a missing or malformed file
    /// leaves the service running with an empty catalog
    pub fn new(config: ServerConfig) -> Self {
        tracing::info!("Loading bike catalog from {}...", config.catalog_path);
        let catalog = BikeCatalog::load_or_empty(&config.catalog_path);
        Self::with_catalog(catalog, config)
    }

    pub fn with_catalog(catalog: BikeCatalog, config: ServerConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            analyzer: Arc::new(Analyzer::new(catalog)),
            cache,
            config: Arc::new(config),
        }
    }

    /// Cached verdict for an already validated query
    pub async fn verdict(&self, query: &BikeQuery) -> CompatibilityVerdict {
        let key = format!("{}\u{1f}{}", query.brand, query.model);

        if let Some(cached) = self.cache.get(&key).await {
            return cached;
        }

        let verdict = self.analyzer.analyze(&query.brand, &query.model);
        self.cache.insert(key, verdict.clone()).await;
        verdict
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Known paths answer a wrong method with the JSON error envelope
        .route("/api/compat", get(check_compatibility).fallback(method_not_allowed))
        .route(
            "/api/compat/batch",
            post(check_compatibility_batch).fallback(method_not_allowed),
        )
        .route("/api/health", get(health_check).fallback(method_not_allowed))
        .route("/api/brands", get(list_brands).fallback(method_not_allowed))
        .fallback(not_found)
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CompatParams {
    pub brand: Option<String>,
    pub model: Option<String>,
}

async fn check_compatibility(
    State(state): State<AppState>,
    Query(params): Query<CompatParams>,
) -> Result<Json<CompatibilityVerdict>, AppError> {
    let query = BikeQuery::new(
        params.brand.unwrap_or_default(),
        params.model.unwrap_or_default(),
    )
    .validated()?;

    tracing::info!("Compatibility check: {} {}", query.brand, query.model);

    let verdict = state.verdict(&query).await;

    tracing::info!(
        "Result: {} - {} kits",
        verdict.status.as_str(),
        verdict.kits.len()
    );

    Ok(Json(verdict))
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub bikes: Vec<BikeQuery>,
}

async fn check_compatibility_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if request.bikes.len() > MAX_BATCH_SIZE {
        return Err(InputError::BatchTooLarge { max: MAX_BATCH_SIZE }.into());
    }

    let queries = request
        .bikes
        .iter()
        .map(BikeQuery::validated)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("Batch compatibility check: {} bikes", queries.len());

    let analyzer = Arc::clone(&state.analyzer);
    let results = tokio::task::spawn_blocking(move || analyzer.analyze_batch(&queries))
        .await
        .map_err(|e| AppError::Internal(format!("batch evaluation task failed: {}", e)))?;

    Ok(Json(serde_json::json!({
        "count": results.len(),
        "results": results,
    })))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": API_VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "bikes_count": state.analyzer.catalog().len(),
    }))
}

async fn list_brands(State(state): State<AppState>) -> impl IntoResponse {
    let brands = state.analyzer.catalog().all_brands();

    Json(serde_json::json!({
        "count": brands.len(),
        "brands": brands,
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Bind the listen socket; `host` may be an IP literal or a resolvable name
pub async fn bind_listener(config: &ServerConfig) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Input(InputError),
    BadRequest(String),
    NotFound,
    MethodNotAllowed,
    Internal(String),
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Input(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, message) = match self {
            AppError::Input(InputError::Missing) => (
                StatusCode::BAD_REQUEST,
                "Missing required parameters",
                InputError::Missing.to_string(),
            ),
            AppError::Input(e) => (StatusCode::BAD_REQUEST, "Invalid parameters", e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Invalid request body", msg),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The requested endpoint does not exist".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed",
                "The requested method is not supported for this endpoint".to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Error processing request: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An error occurred while processing your request".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}
