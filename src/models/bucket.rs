//! Input and result records for the bucket tool operations.

use crate::errors::ToolError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bucket as reported by the storage provider.
///
/// Produced only by the list operation and never mutated. The `region` is
/// whatever resolution produced: the provider's constraint, the default
/// region when the provider reports none, or `"unknown"` when the per-bucket
/// lookup failed.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BucketInfo {
    /// Globally unique bucket name, assigned by the provider.
    pub name: String,

    /// When this bucket was created. Serializes as ISO-8601.
    pub creation_date: DateTime<Utc>,

    /// Region the bucket lives in.
    pub region: String,
}

/// All buckets visible to the caller, in provider response order.
#[derive(Serialize, Deserialize, Debug)]
pub struct ListBucketsResult {
    pub buckets: Vec<BucketInfo>,
}

/// Parameters for the create operation.
#[derive(Deserialize, Debug)]
pub struct CreateBucketInput {
    pub bucket_name: String,
}

/// Outcome of the create operation.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateBucketResult {
    pub message: String,
}

/// Parameters for the delete operation. `force` clears the bucket of all
/// objects before deleting it.
#[derive(Deserialize, Debug)]
pub struct DeleteBucketInput {
    pub bucket_name: String,
    #[serde(default)]
    pub force: bool,
}

/// Outcome of the delete operation.
#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteBucketResult {
    pub message: String,
}

impl CreateBucketInput {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_bucket_name(&self.bucket_name)
    }
}

impl DeleteBucketInput {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_bucket_name(&self.bucket_name)
    }
}

/// Presence-only check. Full provider naming rules are enforced
/// provider-side; this layer only rejects missing/blank names before
/// issuing a network call.
fn require_bucket_name(name: &str) -> Result<(), ToolError> {
    if name.trim().is_empty() {
        return Err(ToolError::validation(
            "bucket_name",
            "must be a non-empty string",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn blank_bucket_name_is_rejected() {
        let input = CreateBucketInput {
            bucket_name: "  ".into(),
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("bucket_name"));

        let input = DeleteBucketInput {
            bucket_name: String::new(),
            force: true,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn named_bucket_passes_validation() {
        let input = CreateBucketInput {
            bucket_name: "photos".into(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn force_defaults_to_false_when_absent() {
        let input: DeleteBucketInput =
            serde_json::from_str(r#"{"bucket_name": "photos"}"#).unwrap();
        assert!(!input.force);
    }

    #[test]
    fn creation_date_serializes_as_iso8601() {
        let info = BucketInfo {
            name: "bucket1".into(),
            creation_date: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
            region: "us-east-1".into(),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["creation_date"], "2025-01-01T12:00:00Z");
    }
}
