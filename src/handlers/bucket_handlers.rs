//! Tool handlers for the bucket operations.
//!
//! Each handler validates its input, builds a gateway for the call, runs the
//! operation against the `BucketStore` seam, and serializes the result. The
//! `do_*` functions hold the orchestration and are what the tests exercise.

use crate::{
    config::{AppConfig, DEFAULT_REGION},
    errors::ToolError,
    models::bucket::{
        BucketInfo, CreateBucketInput, CreateBucketResult, DeleteBucketInput, DeleteBucketResult,
        ListBucketsResult,
    },
    services::s3_gateway::{BucketStore, S3Gateway},
};
use axum::{Json, extract::State};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Region marker recorded when a per-bucket region lookup fails.
const UNKNOWN_REGION: &str = "unknown";

/// `POST /tools/list_buckets`
pub async fn list_buckets(
    State(cfg): State<AppConfig>,
) -> Result<Json<ListBucketsResult>, ToolError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, tool = "list_buckets", "tool invoked");

    let store = S3Gateway::connect(&cfg).await;
    match do_list_buckets(&store).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            error!(%request_id, "list_buckets failed: {}", err);
            Err(err)
        }
    }
}

/// `POST /tools/create_bucket`
pub async fn create_bucket(
    State(cfg): State<AppConfig>,
    Json(input): Json<CreateBucketInput>,
) -> Result<Json<CreateBucketResult>, ToolError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, tool = "create_bucket", bucket = %input.bucket_name, "tool invoked");

    let store = S3Gateway::connect(&cfg).await;
    match do_create_bucket(&store, &input, &cfg.region).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            error!(%request_id, "create_bucket failed: {}", err);
            Err(err)
        }
    }
}

/// `POST /tools/delete_bucket`
pub async fn delete_bucket(
    State(cfg): State<AppConfig>,
    Json(input): Json<DeleteBucketInput>,
) -> Result<Json<DeleteBucketResult>, ToolError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, tool = "delete_bucket", bucket = %input.bucket_name, force = input.force, "tool invoked");

    let store = S3Gateway::connect(&cfg).await;
    match do_delete_bucket(&store, &input).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            error!(%request_id, "delete_bucket failed: {}", err);
            Err(err)
        }
    }
}

/// List every bucket with its resolved region.
///
/// A failed region lookup downgrades that one entry to `"unknown"` instead of
/// failing the batch; a provider reporting no constraint means the default
/// region.
pub async fn do_list_buckets(store: &impl BucketStore) -> Result<ListBucketsResult, ToolError> {
    let entries = store
        .list_buckets()
        .await
        .map_err(|err| ToolError::operation("listing buckets", err))?;

    let mut buckets = Vec::with_capacity(entries.len());
    for entry in entries {
        let region = match store.bucket_region(&entry.name).await {
            Ok(constraint) => constraint.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            Err(err) => {
                warn!("region lookup for bucket `{}` failed: {}", entry.name, err);
                UNKNOWN_REGION.to_string()
            }
        };
        buckets.push(BucketInfo {
            name: entry.name,
            creation_date: entry.created,
            region,
        });
    }

    Ok(ListBucketsResult { buckets })
}

/// Create a bucket unless it already exists.
///
/// Already-exists is an idempotent success, not an error. The provider
/// rejects a creation call that spells out the default region, so the
/// location constraint is only attached for non-default regions.
pub async fn do_create_bucket(
    store: &impl BucketStore,
    input: &CreateBucketInput,
    region: &str,
) -> Result<CreateBucketResult, ToolError> {
    input.validate()?;
    let name = &input.bucket_name;

    let exists = store
        .bucket_exists(name)
        .await
        .map_err(|err| ToolError::operation(format!("creating bucket `{}`", name), err))?;
    if exists {
        return Ok(CreateBucketResult {
            message: format!("Bucket '{}' already exists.", name),
        });
    }

    let constraint = (region != DEFAULT_REGION).then_some(region);
    store
        .create_bucket(name, constraint)
        .await
        .map_err(|err| ToolError::operation(format!("creating bucket `{}`", name), err))?;

    Ok(CreateBucketResult {
        message: format!("Bucket '{}' created successfully in {}.", name, region),
    })
}

/// Delete a bucket, optionally clearing it of all objects first.
///
/// A missing bucket is an idempotent success. Deleting a non-empty bucket
/// without `force` surfaces the provider's rejection as-is.
pub async fn do_delete_bucket(
    store: &impl BucketStore,
    input: &DeleteBucketInput,
) -> Result<DeleteBucketResult, ToolError> {
    input.validate()?;
    let name = &input.bucket_name;

    let exists = store
        .bucket_exists(name)
        .await
        .map_err(|err| ToolError::operation(format!("deleting bucket `{}`", name), err))?;
    if !exists {
        return Ok(DeleteBucketResult {
            message: format!("Bucket '{}' does not exist.", name),
        });
    }

    if input.force {
        clear_bucket(store, name).await?;
    }

    store
        .delete_bucket(name)
        .await
        .map_err(|err| ToolError::operation(format!("deleting bucket `{}`", name), err))?;

    Ok(DeleteBucketResult {
        message: format!("Bucket '{}' deleted successfully.", name),
    })
}

/// Remove every object from a bucket, page by page, until the provider
/// reports no further continuation token. A bucket with zero objects is a
/// no-op. Noncurrent object versions are not handled; deleting a versioned
/// bucket still fails at the final delete call.
async fn clear_bucket(store: &impl BucketStore, bucket: &str) -> Result<(), ToolError> {
    let mut token = None;
    loop {
        let page = store
            .list_object_page(bucket, token)
            .await
            .map_err(|err| ToolError::operation(format!("clearing bucket `{}`", bucket), err))?;

        if !page.keys.is_empty() {
            store
                .delete_objects(bucket, &page.keys)
                .await
                .map_err(|err| {
                    ToolError::operation(format!("clearing bucket `{}`", bucket), err)
                })?;
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(())
}
