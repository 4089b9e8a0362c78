// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Transient recipe model produced from catalog search results.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Which catalog search produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Search by a list of ingredients (top-level array with ingredient breakdown).
    ByIngredients,
    /// Free-text search (object with a `results` array, no breakdown).
    Complex,
}

/// Uniform recipe record shown in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: Option<String>,
    /// Used ingredient names followed by missing ones
    pub ingredients: Vec<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    /// Untouched upstream object, kept for the detail view
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub api_data: serde_json::Value,
}
