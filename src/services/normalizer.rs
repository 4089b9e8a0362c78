// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe search result normalization.
//!
//! The catalog answers ingredient-based and free-text searches with different
//! shapes. Both are mapped onto [`Recipe`]. A payload that does not have the
//! expected shape yields no recipes rather than an error; the caller shows an
//! empty result state.

use crate::models::{Recipe, SearchKind};
use serde_json::Value;

/// Normalize a raw catalog response of the given kind.
pub fn normalize(kind: SearchKind, payload: &Value) -> Vec<Recipe> {
    match kind {
        SearchKind::ByIngredients => normalize_by_ingredients(payload),
        SearchKind::Complex => normalize_complex(payload),
    }
}

/// Normalize a find-by-ingredients response (a top-level array).
pub fn normalize_by_ingredients(payload: &Value) -> Vec<Recipe> {
    let Some(results) = payload.as_array() else {
        tracing::debug!("Ingredient search payload is not an array");
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|raw| {
            let mut recipe = base_recipe(raw)?;
            let used = ingredient_names(raw.get("usedIngredients"));
            let missed = ingredient_names(raw.get("missedIngredients"));

            recipe.used_ingredient_count = count_field(raw, "usedIngredientCount", used.len());
            recipe.missed_ingredient_count =
                count_field(raw, "missedIngredientCount", missed.len());
            recipe.ingredients = used.into_iter().chain(missed).collect();
            Some(recipe)
        })
        .collect()
}

/// Normalize a complex (free-text) search response (`{"results": [...]}`).
pub fn normalize_complex(payload: &Value) -> Vec<Recipe> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        tracing::debug!("Complex search payload has no results array");
        return Vec::new();
    };

    results.iter().filter_map(base_recipe).collect()
}

/// Shared fields. `None` when the entry has no usable ID or title.
fn base_recipe(raw: &Value) -> Option<Recipe> {
    let id = match raw.get("id")? {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        _ => return None,
    };
    let title = raw.get("title")?.as_str()?.to_string();
    let image_url = raw
        .get("image")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(Recipe {
        id,
        title,
        image_url,
        ingredients: Vec::new(),
        used_ingredient_count: 0,
        missed_ingredient_count: 0,
        api_data: raw.clone(),
    })
}

fn ingredient_names(list: Option<&Value>) -> Vec<String> {
    list.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn count_field(raw: &Value, field: &str, fallback: usize) -> u32 {
    raw.get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_else(|| u32::try_from(fallback).unwrap_or(u32::MAX))
}
