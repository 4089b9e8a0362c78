// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed client for the Pantry-Tracker API.
//!
//! Reads go through per-resource [`QueryCache`]s; mutations invalidate the
//! list they change so the next read refetches. Inventory classification
//! runs locally on the cached ingredient list.

pub mod cache;

pub use cache::{Cached, QueryCache};

use crate::models::{
    DonationCenter, Ingredient, IngredientSuggestion, Recipe, SavedRecipe, SearchKind, User,
};
use crate::services::catalog::ingredient_suggestions;
use crate::services::donation::DonationSearchResponse;
use crate::services::expiry::{self, InventoryView};
use crate::services::normalizer;
use crate::services::tips::DisposalTip;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog lookups are skipped until the term has this many characters.
pub const MIN_SEARCH_CHARS: usize = 2;

/// Errors surfaced by [`PantryClient`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Gateway answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error envelope returned by the gateway.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<String>,
}

/// New inventory item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub user_id: String,
    pub name: String,
    pub image: Option<String>,
    /// RFC3339 timestamp or `YYYY-MM-DD`
    pub expiry_date: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkBody<'a> {
    user_id: &'a str,
    id: &'a str,
    name: &'a str,
    image: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckUserBody<'a> {
    user_id: &'a str,
}

type RecipeSearchKey = (SearchKind, String, u32);

/// Caching API client.
pub struct PantryClient {
    http: reqwest::Client,
    base_url: String,
    ingredients: QueryCache<String, Vec<Ingredient>>,
    bookmarks: QueryCache<String, Vec<SavedRecipe>>,
    catalog: QueryCache<String, Vec<IngredientSuggestion>>,
    recipes: QueryCache<RecipeSearchKey, Vec<Recipe>>,
    recipe_details: QueryCache<String, Value>,
}

impl PantryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ingredients: QueryCache::new(),
            bookmarks: QueryCache::new(),
            catalog: QueryCache::new(),
            recipes: QueryCache::new(),
            recipe_details: QueryCache::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    // ─── Users ───────────────────────────────────────────────

    /// Register the user if unknown.
    pub async fn check_user(&self, user_id: &str) -> Result<User, ClientError> {
        let req = self
            .request(Method::POST, "/user/checkUser")
            .json(&CheckUserBody { user_id });
        send_json(req).await
    }

    // ─── Ingredients ─────────────────────────────────────────

    /// Catalog suggestions for a name fragment.
    pub async fn search_ingredient_catalog(
        &self,
        term: &str,
    ) -> Result<Vec<IngredientSuggestion>, ClientError> {
        let term = term.trim().to_string();
        if term.chars().count() < MIN_SEARCH_CHARS {
            return Ok(Vec::new());
        }

        let req = self
            .request(Method::GET, "/ingredients/info")
            .query(&[("query", term.as_str())]);
        self.catalog
            .get_or_fetch(term, move || async move {
                let payload: Value = send_json(req).await?;
                Ok(ingredient_suggestions(&payload))
            })
            .await
    }

    pub async fn ingredients(&self, user_id: &str) -> Result<Vec<Ingredient>, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/ingredients/{}", urlencoding::encode(user_id)),
        );
        self.ingredients
            .get_or_fetch(user_id.to_string(), move || send_json(req))
            .await
    }

    pub async fn refetch_ingredients(&self, user_id: &str) -> Result<Vec<Ingredient>, ClientError> {
        self.ingredients.invalidate(&user_id.to_string());
        self.ingredients(user_id).await
    }

    /// Classified inventory, filtered by `query` and ordered for display.
    pub async fn inventory(
        &self,
        user_id: &str,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<InventoryView, ClientError> {
        let ingredients = self.ingredients(user_id).await?;
        Ok(expiry::inventory_view(ingredients, query, now))
    }

    pub async fn add_ingredient(&self, new: &NewIngredient) -> Result<Ingredient, ClientError> {
        let req = self.request(Method::POST, "/ingredients/add").json(new);
        let created: Ingredient = send_json(req).await?;
        self.ingredients.invalidate(&created.user_id);
        Ok(created)
    }

    pub async fn delete_ingredient(&self, ingredient_id: &str) -> Result<Ingredient, ClientError> {
        let req = self.request(
            Method::DELETE,
            &format!("/ingredients/delete/{}", urlencoding::encode(ingredient_id)),
        );
        let deleted: Ingredient = send_json(req).await?;
        self.ingredients.invalidate(&deleted.user_id);
        Ok(deleted)
    }

    /// Disposal advice for an ingredient (never cached).
    pub async fn disposal_tip(&self, name: &str) -> Result<String, ClientError> {
        let req = self
            .request(Method::GET, "/ingredients/tip/fetch")
            .query(&[("name", name)]);
        let tip: DisposalTip = send_json(req).await?;
        Ok(tip.tip)
    }

    // ─── Recipes ─────────────────────────────────────────────

    /// Recipes that use the given ingredients. No ingredients, no search.
    pub async fn search_recipes_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<Recipe>, ClientError> {
        let list = ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        if list.is_empty() {
            return Ok(Vec::new());
        }
        self.search_recipes_with(SearchKind::ByIngredients, list, number)
            .await
    }

    /// Free-text recipe search. Blank terms return nothing.
    pub async fn search_recipes(&self, terms: &str, number: u32) -> Result<Vec<Recipe>, ClientError> {
        let terms = terms.trim();
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        self.search_recipes_with(SearchKind::Complex, terms.to_string(), number)
            .await
    }

    async fn search_recipes_with(
        &self,
        kind: SearchKind,
        input: String,
        number: u32,
    ) -> Result<Vec<Recipe>, ClientError> {
        let (path, param) = match kind {
            SearchKind::ByIngredients => ("/recipes/byIng", "ingredients"),
            SearchKind::Complex => ("/recipes/complex", "terms"),
        };
        let req = self
            .request(Method::GET, path)
            .query(&[(param, input.clone()), ("number", number.to_string())]);

        self.recipes
            .get_or_fetch((kind, input, number), move || async move {
                let payload = send_lenient(req).await?;
                Ok(normalizer::normalize(kind, &payload))
            })
            .await
    }

    /// Raw catalog detail for one recipe.
    pub async fn recipe_detail(&self, recipe_id: &str) -> Result<Value, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/recipes/{}", urlencoding::encode(recipe_id)),
        );
        self.recipe_details
            .get_or_fetch(recipe_id.to_string(), move || send_json(req))
            .await
    }

    // ─── Bookmarks ───────────────────────────────────────────

    pub async fn bookmarks(&self, user_id: &str) -> Result<Vec<SavedRecipe>, ClientError> {
        let req = self.request(
            Method::GET,
            &format!("/recipes/bookmarks/{}", urlencoding::encode(user_id)),
        );
        self.bookmarks
            .get_or_fetch(user_id.to_string(), move || send_json(req))
            .await
    }

    pub async fn refetch_bookmarks(&self, user_id: &str) -> Result<Vec<SavedRecipe>, ClientError> {
        self.bookmarks.invalidate(&user_id.to_string());
        self.bookmarks(user_id).await
    }

    /// Bookmark a search result. Bookmarking twice returns the existing record.
    pub async fn bookmark(&self, user_id: &str, recipe: &Recipe) -> Result<SavedRecipe, ClientError> {
        let req = self
            .request(Method::POST, "/recipes/bookmark")
            .json(&BookmarkBody {
                user_id,
                id: &recipe.id,
                name: &recipe.title,
                image: recipe.image_url.as_deref(),
            });
        let saved: SavedRecipe = send_json(req).await?;
        self.bookmarks.invalidate(&saved.user_id);
        Ok(saved)
    }

    pub async fn unbookmark(&self, user_id: &str, recipe_id: &str) -> Result<SavedRecipe, ClientError> {
        let req = self.request(
            Method::DELETE,
            &format!(
                "/recipes/unbookmark/{}/{}",
                urlencoding::encode(user_id),
                urlencoding::encode(recipe_id)
            ),
        );
        let removed: SavedRecipe = send_json(req).await?;
        self.bookmarks.invalidate(&user_id.to_string());
        Ok(removed)
    }

    // ─── Donation centers ────────────────────────────────────

    pub async fn nearby_donation_centers(
        &self,
        lng: f64,
        lat: f64,
    ) -> Result<Vec<DonationCenter>, ClientError> {
        let req = self
            .request(Method::GET, "/donations/nearby")
            .query(&[("lng", lng), ("lat", lat)]);
        let response: DonationSearchResponse = send_json(req).await?;
        Ok(response.centers)
    }

    pub async fn search_donation_centers(
        &self,
        location: &str,
    ) -> Result<DonationSearchResponse, ClientError> {
        let req = self
            .request(Method::GET, "/donations/search")
            .query(&[("location", location)]);
        send_json(req).await
    }

    /// Drop every cached read.
    pub fn invalidate_all(&self) {
        self.ingredients.invalidate_all();
        self.bookmarks.invalidate_all();
        self.catalog.invalidate_all();
        self.recipes.invalidate_all();
        self.recipe_details.invalidate_all();
    }

    /// When the user's ingredient list was last fetched, if cached.
    pub fn ingredients_fetched_at(&self, user_id: &str) -> Option<DateTime<Utc>> {
        self.ingredients
            .peek(&user_id.to_string())
            .map(|c| c.fetched_at)
    }
}

async fn send(req: RequestBuilder) -> Result<reqwest::Response, ClientError> {
    let response = req
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            details: Some(details),
            ..
        }) => details,
        Ok(ErrorBody {
            error: Some(error), ..
        }) => error,
        _ => body,
    };
    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    send(req)
        .await?
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Like [`send_json`], but an undecodable body becomes `Value::Null`.
async fn send_lenient(req: RequestBuilder) -> Result<Value, ClientError> {
    let body = send(req)
        .await?
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
}
