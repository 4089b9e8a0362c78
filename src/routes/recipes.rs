// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe search and bookmark routes.

use crate::error::{AppError, Result};
use crate::models::SavedRecipe;
use crate::routes::params::{self, check_id, require, require_number};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes/byIng", get(search_by_ingredients))
        .route("/recipes/complex", get(search_complex))
        .route("/recipes/bookmark", post(bookmark_recipe))
        .route("/recipes/bookmarks/{user_id}", get(list_bookmarks))
        .route(
            "/recipes/unbookmark/{user_id}/{recipe_id}",
            delete(unbookmark_recipe),
        )
        .route("/recipes/{id}", get(recipe_detail))
}

// ─── Search (catalog pass-through) ───────────────────────────

#[derive(Deserialize)]
struct ByIngredientsQuery {
    ingredients: Option<String>,
    number: Option<String>,
}

async fn search_by_ingredients(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ByIngredientsQuery>,
) -> Result<Json<Value>> {
    let ingredients = require("ingredients", params.ingredients)?;
    let number = require_number(params.number)?;

    tracing::debug!(ingredients = %ingredients, number, "Recipe search by ingredients");
    Ok(Json(
        state.catalog.find_by_ingredients(&ingredients, number).await?,
    ))
}

#[derive(Deserialize)]
struct ComplexQuery {
    terms: Option<String>,
    number: Option<String>,
}

async fn search_complex(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ComplexQuery>,
) -> Result<Json<Value>> {
    let terms = require("terms", params.terms)?;
    let number = require_number(params.number)?;

    tracing::debug!(terms = %terms, number, "Recipe search by text");
    Ok(Json(state.catalog.complex_search(&terms, number).await?))
}

async fn recipe_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    check_id("recipeId", &id)?;
    Ok(Json(state.catalog.recipe_information(&id).await?))
}

// ─── Bookmarks ───────────────────────────────────────────────

/// Recipe IDs arrive as numbers from the catalog or as strings once normalized.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeIdInput {
    Number(u64),
    Text(String),
}

impl RecipeIdInput {
    fn into_string(self) -> String {
        match self {
            RecipeIdInput::Number(n) => n.to_string(),
            RecipeIdInput::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct BookmarkRequest {
    #[validate(
        required(message = "userId is required"),
        length(min = 1, max = 128, message = "userId must be 1-128 characters")
    )]
    user_id: Option<String>,
    id: Option<RecipeIdInput>,
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 300, message = "name must be 1-300 characters")
    )]
    name: Option<String>,
    #[validate(length(max = 2048, message = "image URL is too long"))]
    image: Option<String>,
}

/// Bookmark a recipe. Bookmarking the same recipe again returns the existing bookmark.
async fn bookmark_recipe(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<BookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedRecipe>)> {
    let body = params::validated_body(payload)?;

    let user_id = require("userId", body.user_id)?;
    let recipe_id = require("id", body.id.map(RecipeIdInput::into_string))?;
    check_id("id", &recipe_id)?;
    let name = require("name", body.name)?;

    let bookmark = SavedRecipe {
        recipe_id,
        user_id,
        recipe_name: name,
        recipe_picture: body.image.filter(|i| !i.trim().is_empty()),
        saved_at: chrono::Utc::now(),
    };

    let outcome = state.db.bookmark_recipe(bookmark).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let saved = outcome.into_inner();

    tracing::info!(
        user_id = %saved.user_id,
        recipe_id = %saved.recipe_id,
        created = status == StatusCode::CREATED,
        "Recipe bookmarked"
    );
    Ok((status, Json(saved)))
}

/// List a user's bookmarks. No bookmarks is an empty list.
async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SavedRecipe>>> {
    check_id("userId", &user_id)?;
    Ok(Json(state.db.list_bookmarks(&user_id).await?))
}

async fn unbookmark_recipe(
    State(state): State<Arc<AppState>>,
    Path((user_id, recipe_id)): Path<(String, String)>,
) -> Result<Json<SavedRecipe>> {
    check_id("userId", &user_id)?;
    check_id("recipeId", &recipe_id)?;

    let removed = state
        .db
        .unbookmark_recipe(&user_id, &recipe_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Bookmark for recipe {} not found", recipe_id))
        })?;

    tracing::info!(user_id = %user_id, recipe_id = %recipe_id, "Recipe unbookmarked");
    Ok(Json(removed))
}
