// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `PantryClient` against a live router with in-memory storage.

use chrono::{Duration, Utc};
use pantry_tracker::client::{ClientError, NewIngredient, PantryClient};
use pantry_tracker::db::Database;
use pantry_tracker::services::expiry::ExpiryStatus;
use std::sync::atomic::Ordering;

mod common;

async fn spawn_client() -> (PantryClient, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
    let (upstream, hits) = common::spawn_stub_upstream().await;
    let (app, _state) =
        common::create_test_app_with(common::config_with_upstream(&upstream), Database::in_memory());
    let base_url = common::spawn_server(app).await;
    (PantryClient::new(base_url), hits)
}

fn new_ingredient(user_id: &str, name: &str, days: i64) -> NewIngredient {
    NewIngredient {
        user_id: user_id.to_string(),
        name: name.to_string(),
        image: None,
        expiry_date: (Utc::now() + Duration::days(days) + Duration::hours(1)).to_rfc3339(),
    }
}

#[tokio::test]
async fn test_add_invalidates_cached_list() {
    let (client, _hits) = spawn_client().await;

    assert!(client.ingredients("u1").await.unwrap().is_empty());
    let first_fetch = client.ingredients_fetched_at("u1").unwrap();

    // Cached: same timestamp on a second read.
    client.ingredients("u1").await.unwrap();
    assert_eq!(client.ingredients_fetched_at("u1").unwrap(), first_fetch);

    let added = client
        .add_ingredient(&new_ingredient("u1", "Milk", 3))
        .await
        .unwrap();
    assert!(client.ingredients_fetched_at("u1").is_none());

    let list = client.ingredients("u1").await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].ingredient_id, added.ingredient_id);

    client.delete_ingredient(&added.ingredient_id).await.unwrap();
    assert!(client.ingredients("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inventory_is_classified_locally() {
    let (client, _hits) = spawn_client().await;
    client
        .add_ingredient(&new_ingredient("u1", "Rice", 30))
        .await
        .unwrap();
    client
        .add_ingredient(&new_ingredient("u1", "Spinach", 1))
        .await
        .unwrap();

    let view = client.inventory("u1", "", Utc::now()).await.unwrap();

    assert_eq!(view.items[0].ingredient.ingredient_name, "Spinach");
    assert_eq!(view.items[0].status, ExpiryStatus::ExpiringSoon);
    assert_eq!(view.items[0].badge.as_deref(), Some("Expires tomorrow"));
    assert_eq!(view.summary.urgent, 1);
    assert_eq!(view.alert.as_deref(), Some("Expiring Soon"));
}

#[tokio::test]
async fn test_delete_missing_ingredient_is_404() {
    let (client, _hits) = spawn_client().await;

    let err = client.delete_ingredient("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(matches!(err, ClientError::Http { ref message, .. } if message.contains("missing")));
}

#[tokio::test]
async fn test_catalog_search_is_cached_and_guarded() {
    let (client, hits) = spawn_client().await;

    assert!(client.search_ingredient_catalog("a").await.unwrap().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let suggestions = client.search_ingredient_catalog("app").await.unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].name, "apple");
    assert!(suggestions[0].image_url.ends_with("apple.jpg"));

    client.search_ingredient_catalog(" app ").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recipe_searches_are_normalized() {
    let (client, _hits) = spawn_client().await;

    let by_ingredients = client
        .search_recipes_by_ingredients(&["apple".to_string()], 5)
        .await
        .unwrap();
    assert_eq!(by_ingredients.len(), 1);
    assert_eq!(by_ingredients[0].id, "1");
    assert_eq!(by_ingredients[0].ingredients, vec!["apple", "flour", "butter"]);
    assert_eq!(by_ingredients[0].missed_ingredient_count, 2);

    let complex = client.search_recipes("pasta", 5).await.unwrap();
    assert_eq!(complex.len(), 1);
    assert_eq!(complex[0].title, "Pasta");
    assert!(complex[0].ingredients.is_empty());
}

#[tokio::test]
async fn test_bookmark_round_trip() {
    let (client, _hits) = spawn_client().await;
    let recipe = client.search_recipes("pasta", 5).await.unwrap().remove(0);

    assert!(client.bookmarks("u1").await.unwrap().is_empty());

    let saved = client.bookmark("u1", &recipe).await.unwrap();
    assert_eq!(saved.recipe_id, "2");
    assert_eq!(saved.recipe_picture.as_deref(), Some("pasta.jpg"));

    // Bookmarking invalidated the cached empty list.
    assert_eq!(client.bookmarks("u1").await.unwrap().len(), 1);

    client.unbookmark("u1", "2").await.unwrap();
    assert!(client.bookmarks("u1").await.unwrap().is_empty());

    let err = client.unbookmark("u1", "2").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_tip_and_detail() {
    let (client, _hits) = spawn_client().await;

    assert_eq!(client.disposal_tip("banana").await.unwrap(), "Compost the peels.");
    assert_eq!(client.recipe_detail("1").await.unwrap()["title"], "Apple Pie");

    let err = client.recipe_detail("999").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_check_user_and_donations() {
    let (client, _hits) = spawn_client().await;

    assert_eq!(client.check_user("u1").await.unwrap().user_id, "u1");

    let centers = client
        .nearby_donation_centers(-122.27, 37.80)
        .await
        .unwrap();
    assert_eq!(centers[0].name, "Near Food Bank");

    let found = client.search_donation_centers("Oakland").await.unwrap();
    assert_eq!(found.centers.len(), 2);
}

#[tokio::test]
async fn test_concurrent_reads_share_one_request() {
    let (client, hits) = spawn_client().await;

    let (a, b) = tokio::join!(
        client.search_recipes("soup", 3),
        client.search_recipes("soup", 3)
    );

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    client.invalidate_all();
    client.search_recipes("soup", 3).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
