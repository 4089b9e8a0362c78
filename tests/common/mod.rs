// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use pantry_tracker::config::Config;
use pantry_tracker::db::{Database, FirestoreDb};
use pantry_tracker::routes::create_router;
use pantry_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Unique suffix for test isolation against a shared emulator.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Create a test app backed by in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), Database::in_memory())
}

/// Create a test app whose storage calls all fail.
#[allow(dead_code)]
pub fn create_test_app_offline() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), Database::offline())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: Database) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Canned catalog, completion and place-search responses.
///
/// Returns the stub's base URL and a counter of requests it has served.
#[allow(dead_code)]
pub async fn spawn_stub_upstream() -> (String, Arc<std::sync::atomic::AtomicUsize>) {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::Json;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let router = axum::Router::new()
        .route(
            "/food/ingredients/search",
            get(|| async {
                Json(json!({
                    "results": [
                        {"id": 9003, "name": "apple", "image": "apple.jpg"},
                        {"id": 9019, "name": "applesauce"}
                    ],
                    "totalResults": 2
                }))
            }),
        )
        .route(
            "/recipes/findByIngredients",
            get(|| async {
                Json(json!([{
                    "id": 1,
                    "title": "Apple Pie",
                    "image": "pie.jpg",
                    "usedIngredients": [{"name": "apple"}],
                    "missedIngredients": [{"name": "flour"}, {"name": "butter"}],
                    "usedIngredientCount": 1,
                    "missedIngredientCount": 2
                }]))
            }),
        )
        .route(
            "/recipes/complexSearch",
            get(|| async {
                Json(json!({
                    "results": [{"id": 2, "title": "Pasta", "image": "pasta.jpg"}],
                    "totalResults": 1
                }))
            }),
        )
        .route(
            "/recipes/{id}/information",
            get(|Path(id): Path<String>| async move {
                if id == "999" {
                    return Err(StatusCode::INTERNAL_SERVER_ERROR);
                }
                Ok(Json(json!({"id": id, "title": "Apple Pie", "instructions": "Bake."})))
            }),
        )
        .route(
            "/v1/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "  Compost the peels.  "}}]
                }))
            }),
        )
        .route(
            "/search/searchbox/v1/forward",
            get(|| async {
                Json(json!({
                    "type": "FeatureCollection",
                    "features": [
                        {
                            "type": "Feature",
                            "geometry": {"type": "Point", "coordinates": [-122.30, 37.80]},
                            "properties": {"name": "Far Pantry", "mapbox_id": "far"}
                        },
                        {
                            "type": "Feature",
                            "geometry": {"type": "Point", "coordinates": [-122.271, 37.8045]},
                            "properties": {"name": "Near Food Bank", "full_address": "1 Main St"}
                        }
                    ]
                }))
            }),
        )
        .route(
            "/geocoding/v5/mapbox.places/{query}",
            get(|Path(query): Path<String>| async move {
                let features = if query.starts_with("nowhere") {
                    json!([])
                } else {
                    json!([{
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-122.27, 37.80]},
                        "properties": {},
                        "center": [-122.27, 37.80],
                        "place_name": "Oakland, California"
                    }])
                };
                Json(json!({"type": "FeatureCollection", "features": features}))
            }),
        )
        .layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    next.run(req).await
                }
            },
        ));

    (spawn_server(router).await, hits)
}

/// Config with every upstream key set and pointed at `base_url`.
#[allow(dead_code)]
pub fn config_with_upstream(base_url: &str) -> Config {
    Config {
        spoonacular_api_key: Some("test-catalog-key".to_string()),
        spoonacular_base_url: base_url.to_string(),
        openai_api_key: Some("test-openai-key".to_string()),
        openai_base_url: base_url.to_string(),
        mapbox_token: Some("test-mapbox-token".to_string()),
        mapbox_base_url: base_url.to_string(),
        ..Config::test_default()
    }
}

/// App with in-memory storage and a running stub upstream.
#[allow(dead_code)]
pub async fn create_test_app_with_upstream() -> (axum::Router, Arc<AppState>) {
    let (base_url, _) = spawn_stub_upstream().await;
    create_test_app_with(config_with_upstream(&base_url), Database::in_memory())
}
