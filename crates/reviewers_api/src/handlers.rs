//! Request handlers for `/test` and `/reviewers`.
//!
//! JSON bodies arrive as raw bytes and are decoded here, so a malformed body
//! takes the same failure path as any other unexpected error of that
//! operation.

use crate::error::{ApiError, Operation};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;
use reviewers_core::{Reviewer, ReviewerId, ReviewerPatch};
use serde::de::DeserializeOwned;
use serde_json::json;

/// `GET /test`
pub async fn greeting() -> &'static str {
    reviewers_core::greeting()
}

/// `GET /reviewers`
pub async fn list_reviewers(State(state): State<AppState>) -> Response {
    match state.run(|service| service.list_reviewers()).await {
        Ok(reviewers) => Json(reviewers).into_response(),
        Err(err) => err.respond(Operation::List),
    }
}

/// `GET /reviewers/{id}`
pub async fn get_reviewer(State(state): State<AppState>, Path(id): Path<ReviewerId>) -> Response {
    match state.run(move |service| service.get_reviewer(id)).await {
        Ok(Some(reviewer)) => Json(reviewer).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => err.respond(Operation::Get),
    }
}

/// `POST /reviewers`
pub async fn create_reviewer(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let reviewer: Reviewer = decode(&body)?;
        state
            .run(move |service| service.create_reviewer(&reviewer))
            .await
    }
    .await;

    match result {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(err) => err.respond(Operation::Create),
    }
}

/// `PUT /reviewers/{id}`
pub async fn replace_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
    body: Bytes,
) -> Response {
    debug!("event=reviewer_update module=api status=start id={id}");
    let result = async {
        let reviewer: Reviewer = decode(&body)?;
        state
            .run(move |service| service.replace_reviewer(id, &reviewer))
            .await
    }
    .await;

    match result {
        Ok(saved) => Json(saved).into_response(),
        Err(err) => err.respond(Operation::Update),
    }
}

/// `PATCH /reviewers/{id}`
pub async fn patch_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
    body: Bytes,
) -> Response {
    let result = async {
        let patch: ReviewerPatch = decode(&body)?;
        if patch.is_empty() {
            debug!("event=reviewer_patch module=api status=noop id={id}");
        }
        state
            .run(move |service| service.patch_reviewer(id, &patch))
            .await
    }
    .await;

    match result {
        Ok(saved) => Json(saved).into_response(),
        Err(err) => err.respond(Operation::Patch),
    }
}

/// `DELETE /reviewers/{id}`
pub async fn delete_reviewer(
    State(state): State<AppState>,
    Path(id): Path<ReviewerId>,
) -> Response {
    match state.run(move |service| service.delete_reviewer(id)).await {
        Ok(()) => Json(json!({ "message": "Reviewer successfully deleted" })).into_response(),
        Err(err) => err.respond(Operation::Delete),
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}
