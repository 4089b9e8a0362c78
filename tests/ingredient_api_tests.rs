// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingredient inventory API tests (in-memory storage).

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{body_json, delete, get, post_json};

fn expiry_in(days: i64) -> String {
    // An extra hour keeps the whole-day count stable while the test runs.
    (Utc::now() + Duration::days(days) + Duration::hours(1)).to_rfc3339()
}

async fn add(app: &axum::Router, user_id: &str, name: &str, expiry: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/ingredients/add",
            &json!({"userId": user_id, "name": name, "expiryDate": expiry}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_add_ingredient_returns_created_record() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/ingredients/add",
            &json!({
                "userId": "u1",
                "name": "Milk",
                "image": "milk.png",
                "expiryDate": "2030-01-15"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["userId"], "u1");
    assert_eq!(body["ingredientName"], "Milk");
    assert_eq!(body["ingredientPicture"], "milk.png");
    assert!(body["ingredientDateExpired"]
        .as_str()
        .unwrap()
        .starts_with("2030-01-15T00:00:00"));
    assert!(!body["ingredientId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_ingredient_missing_fields() {
    let (app, _state) = common::create_test_app();

    for body in [
        json!({"name": "Milk", "expiryDate": "2030-01-15"}),
        json!({"userId": "u1", "expiryDate": "2030-01-15"}),
        json!({"userId": "u1", "name": "Milk"}),
        json!({"userId": "u1", "name": "   ", "expiryDate": "2030-01-15"}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/ingredients/add", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body_json(response).await["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_add_ingredient_invalid_date() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/ingredients/add",
            &json!({"userId": "u1", "name": "Milk", "expiryDate": "next tuesday"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_ingredient_malformed_json() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/ingredients/add")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_scoped_to_user() {
    let (app, _state) = common::create_test_app();
    add(&app, "u1", "Milk", &expiry_in(3)).await;
    add(&app, "u1", "Eggs", &expiry_in(9)).await;
    add(&app, "u2", "Bread", &expiry_in(1)).await;

    let response = app.clone().oneshot(get("/ingredients/u1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["ingredientName"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Milk") && names.contains(&"Eggs"));
}

#[tokio::test]
async fn test_empty_inventory_is_ok() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/ingredients/nobody")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_delete_ingredient() {
    let (app, _state) = common::create_test_app();
    let created = add(&app, "u1", "Milk", &expiry_in(3)).await;
    let id = created["ingredientId"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/ingredients/delete/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ingredientId"], id);

    let response = app.clone().oneshot(get("/ingredients/u1")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));

    // Second delete finds nothing.
    let response = app
        .oneshot(delete(&format!("/ingredients/delete/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_overview_orders_urgent_first() {
    let (app, _state) = common::create_test_app();
    add(&app, "u1", "Rice", &expiry_in(30)).await;
    add(&app, "u1", "Spinach", &expiry_in(2)).await;
    add(&app, "u1", "Yogurt", &expiry_in(-2)).await;
    add(&app, "u1", "Apples", &expiry_in(10)).await;

    let response = app.oneshot(get("/ingredients/u1/overview")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let items = body["items"].as_array().unwrap();
    let names: Vec<&str> = items
        .iter()
        .map(|i| i["ingredientName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Yogurt", "Spinach", "Apples", "Rice"]);

    assert_eq!(items[0]["status"], "expired");
    assert_eq!(items[0]["badge"], "Expired");
    assert_eq!(items[1]["status"], "expiring-soon");
    assert_eq!(items[1]["daysUntilExpiry"], 2);
    assert_eq!(items[1]["badge"], "2 days left");
    assert_eq!(items[2]["status"], "valid");
    assert!(items[2]["badge"].is_null());

    assert_eq!(body["summary"], json!({"expired": 1, "expiringSoon": 1, "urgent": 2}));
    assert_eq!(body["alert"], "Expired & Expiring Soon");

    // No picture supplied: the overview substitutes the placeholder.
    assert_eq!(items[0]["ingredientPicture"], "/placeholder.svg");
}

#[tokio::test]
async fn test_overview_search_filters_items_not_summary() {
    let (app, _state) = common::create_test_app();
    add(&app, "u1", "Green Apples", &expiry_in(10)).await;
    add(&app, "u1", "Yogurt", &expiry_in(-1)).await;

    let response = app
        .oneshot(get("/ingredients/u1/overview?search=APPLE"))
        .await
        .unwrap();
    let body = body_json(response).await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ingredientName"], "Green Apples");
    assert_eq!(body["summary"]["expired"], 1);
    assert!(body["alert"].is_null());
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let (app, _state) = common::create_test_app_offline();

    let response = app.oneshot(get("/ingredients/u1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "database_error");
    // Internal messages are not exposed.
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_catalog_search_requires_query() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/ingredients/info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_search_without_key_is_500() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/ingredients/info?query=apple")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "configuration_error");
}

#[tokio::test]
async fn test_catalog_search_passes_through() {
    let (app, _state) = common::create_test_app_with_upstream().await;

    let response = app.oneshot(get("/ingredients/info?query=apple")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"][0]["name"], "apple");
    assert_eq!(body["totalResults"], 2);
}

#[tokio::test]
async fn test_disposal_tip() {
    let (app, _state) = common::create_test_app_with_upstream().await;

    let response = app
        .oneshot(get("/ingredients/tip/fetch?name=banana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"tip": "Compost the peels."}));
}

#[tokio::test]
async fn test_disposal_tip_requires_name() {
    let (app, _state) = common::create_test_app_with_upstream().await;

    let response = app.oneshot(get("/ingredients/tip/fetch?name=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disposal_tip_without_key_is_500() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(get("/ingredients/tip/fetch?name=banana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
