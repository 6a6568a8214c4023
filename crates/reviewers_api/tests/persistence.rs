use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use reviewers_api::{create_router, AppState, DatabaseTarget};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn reviewers_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = DatabaseTarget::File(dir.path().join("reviewers.sqlite3"));

    let app = create_router(AppState::open(&target).unwrap());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/reviewers")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "Ada", "email": "ada@example.org" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let reopened = create_router(AppState::open(&target).unwrap());
    let request = Request::builder()
        .uri("/reviewers")
        .body(Body::empty())
        .unwrap();
    let response = reopened.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let reviewers: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reviewers[0]["email"], "ada@example.org");
}

#[tokio::test]
async fn reviewer_count_reflects_stored_rows() {
    let state = AppState::open(&DatabaseTarget::Memory).unwrap();
    assert_eq!(state.reviewer_count().await.unwrap(), 0);

    let app = create_router(state.clone());
    for email in ["ada@example.org", "grace@example.org"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/reviewers")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "name": "R", "email": email }).to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    assert_eq!(state.reviewer_count().await.unwrap(), 2);
}
