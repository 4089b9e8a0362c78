// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe and ingredient catalog client (Spoonacular API).
//!
//! Responses are passed through as raw JSON; shaping happens in
//! [`crate::services::normalizer`] and [`ingredient_suggestions`].

use crate::error::AppError;
use crate::models::ingredient::{catalog_image_url, IngredientSuggestion};
use serde_json::Value;

/// Number of ingredient suggestions requested per catalog search.
pub const INGREDIENT_SUGGESTION_COUNT: u32 = 10;

/// Catalog API client.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    /// Create a client. A missing key is reported per request, not here.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("SPOONACULAR_API_KEY is not set".to_string()))
    }

    /// Search catalog ingredients by name fragment.
    pub async fn search_ingredients(&self, query: &str) -> Result<Value, AppError> {
        self.get_json(
            "/food/ingredients/search",
            &[
                ("query", query.to_string()),
                ("number", INGREDIENT_SUGGESTION_COUNT.to_string()),
            ],
            "fetch ingredients",
        )
        .await
    }

    /// Find recipes using a comma-separated ingredient list.
    pub async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Value, AppError> {
        self.get_json(
            "/recipes/findByIngredients",
            &[
                ("ingredients", ingredients.to_string()),
                ("number", number.to_string()),
            ],
            "fetch recipes",
        )
        .await
    }

    /// Free-text recipe search.
    pub async fn complex_search(&self, terms: &str, number: u32) -> Result<Value, AppError> {
        self.get_json(
            "/recipes/complexSearch",
            &[("query", terms.to_string()), ("number", number.to_string())],
            "fetch recipes",
        )
        .await
    }

    /// Full information for a single recipe.
    pub async fn recipe_information(&self, recipe_id: &str) -> Result<Value, AppError> {
        let path = format!("/recipes/{}/information", urlencoding::encode(recipe_id));
        self.get_json(&path, &[], "fetch recipe detail").await
    }

    /// Generic GET request with JSON response.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
        action: &'static str,
    ) -> Result<Value, AppError> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(path, "Calling catalog API");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apiKey", api_key)])
            .send()
            .await
            .map_err(|e| AppError::upstream(action, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(
                action,
                format!("HTTP {}: {}", status, body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(action, format!("JSON parse error: {}", e)))
    }
}

/// Shape an ingredient search response into form suggestions.
///
/// Accepts the `{"results": [...]}` envelope; anything else gives no suggestions.
pub fn ingredient_suggestions(payload: &Value) -> Vec<IngredientSuggestion> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|raw| {
            let name = raw.get("name")?.as_str()?.to_string();
            let id = match raw.get("id") {
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::String(s)) => s.clone(),
                _ => name.clone(),
            };
            Some(IngredientSuggestion {
                id,
                name,
                image_url: catalog_image_url(raw.get("image").and_then(Value::as_str)),
            })
        })
        .collect()
}
