// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use pantry_tracker::error::AppError;

mod common;
use common::body_json;

#[test]
fn test_upstream_error_message() {
    let err = AppError::upstream("fetch recipes", "HTTP 502: bad gateway");

    assert_eq!(err.to_string(), "Failed to fetch recipes: HTTP 502: bad gateway");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(
        err,
        AppError::Upstream { action: "fetch recipes", ref detail } if detail == "HTTP 502: bad gateway"
    ));
}

#[test]
fn test_upstream_error_has_no_cause() {
    let err = AppError::upstream("fetch recipes", "timeout");
    assert!(std::error::Error::source(&err).is_none());
}

#[tokio::test]
async fn test_upstream_response_hides_detail() {
    let response = AppError::upstream("fetch disposal tip", "HTTP 401: invalid key").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "upstream_error");
    assert_eq!(body["details"], "Failed to fetch disposal tip");
    assert!(!body.to_string().contains("invalid key"));
}

#[test]
fn test_client_errors_map_to_4xx() {
    assert_eq!(
        AppError::BadRequest("Missing required parameter: terms".to_string()).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::NotFound("Ingredient x not found".to_string()).status(),
        StatusCode::NOT_FOUND
    );
}
