use crate::services::s3_gateway::GatewayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error surfaced to tool callers.
///
/// `Validation` is raised before any network access and names the offending
/// field. `Operation` wraps a gateway failure that is not one of the
/// documented terminal outcomes; the stringified cause stays in the message.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("error {context}: {source}")]
    Operation {
        context: String,
        source: GatewayError,
    },
}

impl ToolError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn operation(context: impl Into<String>, source: GatewayError) -> Self {
        Self::Operation {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let status = match &self {
            ToolError::Validation { .. } => StatusCode::BAD_REQUEST,
            ToolError::Operation { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
