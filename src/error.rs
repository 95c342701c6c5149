//! Error types shared across the index, partitioner and HTTP layers.
//!
//! Library code returns the typed errors below; the HTTP handlers translate
//! them into [`ApiError`], which renders a JSON `{"error": "..."}` body.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or scanning index source files.
///
/// Malformed lines are never reported here: they are skipped and recorded in
/// the load report instead.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no index files configured")]
    NoFiles,

    #[error("failed to open index file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading index file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Failures of an offline partition run.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("number of partitions must be >= 1, got {0}")]
    InvalidPartitionCount(usize),

    #[error("output pattern {pattern:?} must contain exactly one '%d' placeholder")]
    InvalidPattern { pattern: String },

    #[error("failed to open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading input file: {0}")]
    ReadInput(#[source] io::Error),

    #[error("failed to create output file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to partition {partition}: {source}")]
    Write {
        partition: usize,
        #[source]
        source: io::Error,
    },
}

/// A shard endpoint that is not a `host:port` pair.
#[derive(Debug, Error)]
#[error("invalid shard address {addr:?}: {reason}")]
pub struct InvalidShardAddress {
    pub addr: String,
    pub reason: &'static str,
}

/// Errors surfaced to HTTP clients.
///
/// - `BadRequest` → 400
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<IndexError> for ApiError {
    fn from(err: IndexError) -> Self {
        tracing::error!("Index search failed: {}", err);
        ApiError::Internal(format!("search failed: {}", err))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
