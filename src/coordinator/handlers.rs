use super::service::ShardCoordinator;
use crate::error::ApiError;
use crate::search::types::{SearchParams, SearchResult};
use crate::shard::protocol::{ENDPOINT_HEALTH, ENDPOINT_SEARCH};

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinatorHealth {
    pub status: String,
    pub shards: usize,
}

/// `GET /api/search?q=...&limit=...`: merged results from every reachable shard.
///
/// A missing or blank `q` is rejected before any shard is contacted.
pub async fn handle_search(
    Extension(coordinator): Extension<Arc<ShardCoordinator>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Query(params) = params?;
    let Some(query) = params.query() else {
        tracing::debug!("Rejecting search without query parameter");
        return Err(ApiError::BadRequest("Missing query parameter".to_string()));
    };

    let k = params.limit.unwrap_or(coordinator.top_k());
    let search = coordinator.search(query, k).await;
    Ok(Json(search.results))
}

pub async fn handle_health(
    Extension(coordinator): Extension<Arc<ShardCoordinator>>,
) -> Json<CoordinatorHealth> {
    Json(CoordinatorHealth {
        status: "ok".to_string(),
        shards: coordinator.shards().len(),
    })
}

pub fn router(coordinator: Arc<ShardCoordinator>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(coordinator))
}
