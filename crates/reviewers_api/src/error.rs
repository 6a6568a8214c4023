//! Failure-to-response mapping.
//!
//! Each operation has its own body contract for failures, so the mapping is
//! keyed by [`Operation`] instead of living in a blanket `IntoResponse` impl.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use reviewers_core::ServiceError;
use serde_json::json;
use thiserror::Error;

/// Endpoint identity used to select the failure body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Patch,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("{0}")]
    Body(#[from] serde_json::Error),
    #[error("database worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response `operation` promises for this failure.
    pub fn respond(self, operation: Operation) -> Response {
        let status = self.status();
        let op = operation.as_str();
        match status {
            StatusCode::NOT_FOUND => {
                warn!("event=reviewer_{op} module=api status=not_found error={}", self);
                if operation == Operation::Update {
                    return error_body(status, self.to_string());
                }
                status.into_response()
            }
            StatusCode::CONFLICT => {
                warn!("event=reviewer_{op} module=api status=conflict error={}", self);
                error_body(status, "Email already exists".to_string())
            }
            _ => {
                error!("event=reviewer_{op} module=api status=error error={}", self);
                match operation {
                    Operation::Create => error_body(status, self.to_string()),
                    Operation::Update => {
                        error_body(status, format!("Failed to update reviewer: {}", self))
                    }
                    Operation::Delete => {
                        error_body(status, format!("Error deleting reviewer: {}", self))
                    }
                    Operation::List | Operation::Get | Operation::Patch => {
                        status.into_response()
                    }
                }
            }
        }
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
