//! Defines routes for the bucket tool operations.
//!
//! ## Structure
//! - **Tool endpoints**
//!   - `POST /tools/list_buckets`  — list all buckets with resolved regions
//!   - `POST /tools/create_bucket` — create a bucket (idempotent)
//!   - `POST /tools/delete_bucket` — delete a bucket, optionally forced
//!
//! - **Health endpoints**
//!   - `GET /healthz` — liveness
//!   - `GET /readyz`  — readiness (provider round-trip)
//!
//! Tool endpoints take a JSON body matching their input record; `list_buckets`
//! takes none.

use crate::{
    config::AppConfig,
    handlers::{
        bucket_handlers::{create_bucket, delete_bucket, list_buckets},
        health_handlers::{healthz, readyz},
    },
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build and return the router for all tool and health routes.
///
/// The router carries shared state (`AppConfig`) to all handlers; each tool
/// call constructs its own gateway from it.
pub fn routes() -> Router<AppConfig> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // tool endpoints
        .route("/tools/list_buckets", post(list_buckets))
        .route("/tools/create_bucket", post(create_bucket))
        .route("/tools/delete_bucket", post(delete_bucket))
}
