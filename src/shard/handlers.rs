use super::protocol::*;
use super::service::ShardService;
use crate::error::ApiError;
use crate::search::engine::top_k_limit;
use crate::search::types::{SearchParams, SearchResult};

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub async fn handle_shard_search(
    Extension(shard): Extension<Arc<ShardService>>,
    Json(req): Json<ShardQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let k = top_k_limit(req.top_k);
    let results = shard.search(&req.query, k).await?;

    tracing::debug!(
        "Shard query {:?} (topK={}) -> {} result(s)",
        req.query,
        req.top_k,
        results.len()
    );
    Ok(Json(results))
}

pub async fn handle_search(
    Extension(shard): Extension<Arc<ShardService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Query(params) = params?;
    let Some(query) = params.query() else {
        return Err(ApiError::BadRequest("Missing query parameter".to_string()));
    };

    let k = params.limit.unwrap_or(shard.top_k());
    let results = shard.search(query, k).await?;
    Ok(Json(results))
}

pub async fn handle_health(Extension(shard): Extension<Arc<ShardService>>) -> Json<ShardHealth> {
    let store = shard.store();
    Json(ShardHealth {
        status: "ok".to_string(),
        strategy: store.strategy().to_string(),
        index_files: store.files().len(),
        loaded: store.is_loaded(),
    })
}

/// HTTP routes served by an index shard.
pub fn router(shard: Arc<ShardService>) -> Router {
    Router::new()
        .route(ENDPOINT_SHARD_SEARCH, post(handle_shard_search))
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(shard))
}
