use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use recommend::{JsonCatalog, Recommender, RecommendError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct SimilarParams {
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    recommend::engine::DEFAULT_TOP_N
}

#[derive(Serialize)]
pub struct SimilarResponse {
    pub product_id: u32,
    pub took_s: f64,
    pub count: usize,
    pub results: Vec<SimilarHit>,
}

#[derive(Serialize)]
pub struct SimilarHit {
    pub product_id: u32,
    pub score: f32,
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub catalog: Arc<JsonCatalog>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(catalog_path: String) -> Self {
        Self {
            recommender: Arc::new(Recommender::new()),
            catalog: Arc::new(JsonCatalog::new(catalog_path)),
            admin_token: std::env::var("ADMIN_TOKEN").ok(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/products/:product_id/similar", get(similar_handler))
        .route("/admin/refresh", post(refresh_handler))
        .with_state(state)
        .layer(cors)
}

pub async fn similar_handler(
    State(state): State<AppState>,
    Path(product_id): Path<u32>,
    Query(params): Query<SimilarParams>,
) -> Result<Json<SimilarResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let k = params.k.min(100);
    let hits = state
        .recommender
        .similar_products_scored(product_id, k)
        .map_err(http_error)?;
    let results: Vec<SimilarHit> = hits
        .into_iter()
        .map(|n| SimilarHit { product_id: n.id, score: n.score })
        .collect();
    Ok(Json(SimilarResponse {
        product_id,
        took_s: start.elapsed().as_secs_f64(),
        count: results.len(),
        results,
    }))
}

async fn refresh_handler(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let recommender = state.recommender.clone();
    let catalog = state.catalog.clone();
    // The rebuild is CPU-bound; keep it off the async worker threads.
    let items = tokio::task::spawn_blocking(move || recommender.refresh(catalog.as_ref()))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(http_error)?;
    Ok(Json(serde_json::json!({ "status": "ok", "items": items })))
}

fn http_error(err: RecommendError) -> (StatusCode, String) {
    let status = match err {
        RecommendError::UnknownItem(_) => StatusCode::NOT_FOUND,
        RecommendError::ModelNotBuilt | RecommendError::CatalogUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, err.to_string())
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
