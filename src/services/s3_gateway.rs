//! src/services/s3_gateway.rs
//!
//! Storage gateway — the provider-facing edge of the service. `BucketStore`
//! is the seam the operation handlers are written against; `S3Gateway` is the
//! production implementation over `aws-sdk-s3`. The gateway translates every
//! provider failure into a tagged `GatewayError` so handlers branch on the
//! kind, never on provider string codes.

use crate::config::AppConfig;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{BucketLocationConstraint, CreateBucketConfiguration, Delete, ObjectIdentifier},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// One bucket row from the provider's account-wide listing.
#[derive(Clone, Debug)]
pub struct BucketEntry {
    pub name: String,
    pub created: DateTime<Utc>,
}

/// One page of object keys, restartable via the opaque continuation token.
#[derive(Debug)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("transient failure: {0}")]
    Transient(String),
    #[error("{0}")]
    Other(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Provider-facing bucket operations.
///
/// Every method maps to a single provider round-trip. Implementations must
/// report "bucket absent" through `Ok(false)` / `NotFound` rather than a
/// generic failure, since handlers treat absence as a documented terminal
/// state.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Account-wide bucket listing, in provider response order.
    async fn list_buckets(&self) -> GatewayResult<Vec<BucketEntry>>;

    /// Raw location constraint for one bucket. `None` when the provider
    /// reports no constraint (its marker for the default region).
    async fn bucket_region(&self, name: &str) -> GatewayResult<Option<String>>;

    /// Lightweight existence probe. Absence is `Ok(false)`; any other
    /// failure keeps its tagged kind.
    async fn bucket_exists(&self, name: &str) -> GatewayResult<bool>;

    /// Create a bucket, attaching a location constraint only when `region`
    /// is `Some`.
    async fn create_bucket(&self, name: &str, region: Option<&str>) -> GatewayResult<()>;

    async fn delete_bucket(&self, name: &str) -> GatewayResult<()>;

    /// Fetch one page of object keys. Pass the previous page's `next_token`
    /// to continue; `None` starts from the beginning.
    async fn list_object_page(
        &self,
        name: &str,
        token: Option<String>,
    ) -> GatewayResult<ObjectPage>;

    /// Batch-delete the given keys. Deleting an already-deleted key is not
    /// an error.
    async fn delete_objects(&self, name: &str, keys: &[String]) -> GatewayResult<()>;
}

/// S3 gateway handle. Constructed once per request from `AppConfig`;
/// construction only captures connection configuration and cannot fail.
pub struct S3Gateway {
    client: Client,
}

impl S3Gateway {
    /// Build a configured client from environment-derived settings.
    ///
    /// Self-hosted endpoints (MinIO and friends) usually don't resolve
    /// virtual-host bucket names, so an endpoint override also switches the
    /// client to path-style addressing.
    pub async fn connect(cfg: &AppConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()));
        if let Some(endpoint) = cfg.endpoint_url.as_deref() {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let conf = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(cfg.endpoint_url.is_some())
            .build();

        Self {
            client: Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl BucketStore for S3Gateway {
    async fn list_buckets(&self) -> GatewayResult<Vec<BucketEntry>> {
        let out = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(map_sdk_err)?;

        let mut entries = Vec::new();
        for bucket in out.buckets() {
            let name = bucket.name().map(str::to_string);
            let created = bucket
                .creation_date()
                .and_then(|d| DateTime::from_timestamp(d.secs(), d.subsec_nanos()));
            match (name, created) {
                (Some(name), Some(created)) => entries.push(BucketEntry { name, created }),
                (name, _) => {
                    debug!("skipping incomplete bucket entry {:?}", name);
                }
            }
        }
        Ok(entries)
    }

    async fn bucket_region(&self, name: &str) -> GatewayResult<Option<String>> {
        let out = self
            .client
            .get_bucket_location()
            .bucket(name)
            .send()
            .await
            .map_err(map_sdk_err)?;

        Ok(out
            .location_constraint()
            .map(BucketLocationConstraint::as_str)
            .filter(|region| !region.is_empty())
            .map(str::to_string))
    }

    async fn bucket_exists(&self, name: &str) -> GatewayResult<bool> {
        match self.client.head_bucket().bucket(name).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(false),
            Err(err) => Err(map_sdk_err(err)),
        }
    }

    async fn create_bucket(&self, name: &str, region: Option<&str>) -> GatewayResult<()> {
        let mut req = self.client.create_bucket().bucket(name);
        if let Some(region) = region {
            let constraint = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            req = req.create_bucket_configuration(constraint);
        }
        req.send().await.map_err(map_sdk_err)?;
        debug!("created bucket {}", name);
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> GatewayResult<()> {
        self.client
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(map_sdk_err)?;
        debug!("deleted bucket {}", name);
        Ok(())
    }

    async fn list_object_page(
        &self,
        name: &str,
        token: Option<String>,
    ) -> GatewayResult<ObjectPage> {
        let out = self
            .client
            .list_objects_v2()
            .bucket(name)
            .set_continuation_token(token)
            .send()
            .await
            .map_err(map_sdk_err)?;

        let keys = out
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect();
        let next_token = if out.is_truncated().unwrap_or(false) {
            out.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage { keys, next_token })
    }

    async fn delete_objects(&self, name: &str, keys: &[String]) -> GatewayResult<()> {
        let identifiers = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| GatewayError::Other(err.to_string()))?;
        let delete = Delete::builder()
            .set_objects(Some(identifiers))
            .build()
            .map_err(|err| GatewayError::Other(err.to_string()))?;

        self.client
            .delete_objects()
            .bucket(name)
            .delete(delete)
            .send()
            .await
            .map_err(map_sdk_err)?;
        debug!("deleted {} objects from bucket {}", keys.len(), name);
        Ok(())
    }
}

/// Collapse an SDK error into a tagged `GatewayError`, keeping the full
/// stringified cause. Transport-level failures (timeouts, dispatch) are
/// transient; everything else is classified by the provider error code.
fn map_sdk_err<E>(err: SdkError<E>) -> GatewayError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let detail = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => GatewayError::Transient(detail),
        _ => match err.code() {
            Some("NoSuchBucket") | Some("NotFound") => GatewayError::NotFound(detail),
            Some("AccessDenied") | Some("Forbidden") => GatewayError::Permission(detail),
            _ => GatewayError::Other(detail),
        },
    }
}
