// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingredient inventory routes.

use crate::error::{AppError, Result};
use crate::models::ingredient::PLACEHOLDER_PICTURE;
use crate::models::Ingredient;
use crate::routes::params::{self, check_id, require};
use crate::services::expiry::{self, InventoryView};
use crate::services::tips::DisposalTip;
use crate::time_utils::parse_user_date;
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
        .route("/ingredients/info", get(search_catalog))
        .route("/ingredients/add", post(add_ingredient))
        .route("/ingredients/tip/fetch", get(fetch_disposal_tip))
        .route("/ingredients/delete/{id}", delete(delete_ingredient))
        .route("/ingredients/{user_id}", get(list_ingredients))
        .route("/ingredients/{user_id}/overview", get(inventory_overview))
}

// ─── Catalog Search ──────────────────────────────────────────

#[derive(Deserialize)]
struct CatalogQuery {
    query: Option<String>,
}

/// Search the external ingredient catalog (raw catalog response).
async fn search_catalog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Value>> {
    let query = require("query", params.query)?;
    tracing::debug!(query = %query, "Searching ingredient catalog");
    Ok(Json(state.catalog.search_ingredients(&query).await?))
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct AddIngredientRequest {
    #[validate(
        required(message = "userId is required"),
        length(min = 1, max = 128, message = "userId must be 1-128 characters")
    )]
    user_id: Option<String>,
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 100, message = "name must be 1-100 characters")
    )]
    name: Option<String>,
    #[validate(length(max = 2048, message = "image URL is too long"))]
    image: Option<String>,
    #[validate(required(message = "expiryDate is required"))]
    expiry_date: Option<String>,
}

/// Add an ingredient to a user's inventory.
async fn add_ingredient(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddIngredientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ingredient>)> {
    let body = params::validated_body(payload)?;

    let user_id = require("userId", body.user_id)?;
    let name = require("name", body.name)?;
    let raw_expiry = require("expiryDate", body.expiry_date)?;
    let expires_at = parse_user_date(&raw_expiry).ok_or_else(|| {
        AppError::BadRequest("Invalid expiryDate: expected RFC3339 or YYYY-MM-DD".to_string())
    })?;
    let picture = body
        .image
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty());

    let ingredient = Ingredient::new(user_id, name, picture, expires_at);
    state.db.add_ingredient(&ingredient).await?;

    tracing::info!(
        user_id = %ingredient.user_id,
        ingredient_id = %ingredient.ingredient_id,
        "Ingredient added"
    );

    Ok((StatusCode::CREATED, Json(ingredient)))
}

// ─── Read ────────────────────────────────────────────────────

/// List a user's ingredients. No ingredients is an empty list.
async fn list_ingredients(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Ingredient>>> {
    check_id("userId", &user_id)?;
    Ok(Json(state.db.list_ingredients(&user_id).await?))
}

#[derive(Deserialize)]
struct OverviewQuery {
    #[serde(default)]
    search: String,
}

/// Inventory classified by expiry, urgent items first.
async fn inventory_overview(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<OverviewQuery>,
) -> Result<Json<InventoryView>> {
    check_id("userId", &user_id)?;
    let ingredients = state.db.list_ingredients(&user_id).await?;

    let mut view = expiry::inventory_view(ingredients, &params.search, chrono::Utc::now());
    for item in &mut view.items {
        if item.ingredient.picture_or_placeholder() == PLACEHOLDER_PICTURE {
            item.ingredient.ingredient_picture = Some(PLACEHOLDER_PICTURE.to_string());
        }
    }

    tracing::debug!(
        user_id = %user_id,
        shown = view.items.len(),
        expired = view.summary.expired,
        expiring_soon = view.summary.expiring_soon,
        "Inventory overview"
    );
    Ok(Json(view))
}

// ─── Delete ──────────────────────────────────────────────────

/// Delete one ingredient and return it.
async fn delete_ingredient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>> {
    check_id("id", &id)?;
    let deleted = state
        .db
        .delete_ingredient(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ingredient {} not found", id)))?;

    tracing::info!(ingredient_id = %id, user_id = %deleted.user_id, "Ingredient deleted");
    Ok(Json(deleted))
}

// ─── Disposal Tips ───────────────────────────────────────────

#[derive(Deserialize)]
struct TipQuery {
    name: Option<String>,
}

async fn fetch_disposal_tip(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TipQuery>,
) -> Result<Json<DisposalTip>> {
    let name = require("name", params.name)?;
    Ok(Json(state.tips.disposal_tip(&name).await?))
}
