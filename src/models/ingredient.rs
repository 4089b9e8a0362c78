// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pantry ingredient model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Image shown when an ingredient has no picture.
pub const PLACEHOLDER_PICTURE: &str = "/placeholder.svg";

/// CDN prefix for catalog ingredient images.
pub const CATALOG_IMAGE_BASE: &str = "https://img.spoonacular.com/ingredients_250x250/";

/// Ingredient stored in a user's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Ingredient {
    /// Generated identifier (also used as document ID)
    pub ingredient_id: String,
    /// Owning user (identity provider ID)
    pub user_id: String,
    /// Display name
    pub ingredient_name: String,
    /// Picture URL, if any
    pub ingredient_picture: Option<String>,
    /// When the ingredient was added; never changes
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub ingredient_date_added: DateTime<Utc>,
    /// When the ingredient expires
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub ingredient_date_expired: DateTime<Utc>,
}

impl Ingredient {
    /// Create a new ingredient with a fresh ID, added now.
    pub fn new(
        user_id: String,
        name: String,
        picture: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ingredient_id: uuid::Uuid::new_v4().to_string(),
            user_id,
            ingredient_name: name,
            ingredient_picture: picture,
            ingredient_date_added: Utc::now(),
            ingredient_date_expired: expires_at,
        }
    }

    /// Picture URL, or the placeholder when none was supplied.
    pub fn picture_or_placeholder(&self) -> &str {
        self.ingredient_picture
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(PLACEHOLDER_PICTURE)
    }
}

/// Catalog search hit, shaped for the add-ingredient form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSuggestion {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// Resolve a catalog image file name against the catalog CDN.
pub fn catalog_image_url(image: Option<&str>) -> String {
    match image.map(str::trim).filter(|i| !i.is_empty()) {
        Some(file) if file.starts_with("http://") || file.starts_with("https://") => {
            file.to_string()
        }
        Some(file) => format!("{}{}", CATALOG_IMAGE_BASE, file),
        None => PLACEHOLDER_PICTURE.to_string(),
    }
}
