//! User and bookmark models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User record. Created lazily the first time a user ID is seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Identity provider user ID (also used as document ID)
    pub user_id: String,
    /// When the user was first seen
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

/// A user's bookmark of an external recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SavedRecipe {
    /// External recipe ID
    pub recipe_id: String,
    /// Owning user
    pub user_id: String,
    /// Recipe title
    pub recipe_name: String,
    /// Recipe picture URL
    pub recipe_picture: Option<String>,
    /// When the bookmark was created
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub saved_at: DateTime<Utc>,
}

impl SavedRecipe {
    /// Document ID for a bookmark. One document per (user, recipe) pair.
    ///
    /// Both parts are percent-encoded so the `:` separator cannot occur inside them.
    pub fn storage_key(user_id: &str, recipe_id: &str) -> String {
        format!(
            "{}:{}",
            urlencoding::encode(user_id),
            urlencoding::encode(recipe_id)
        )
    }

    pub fn key(&self) -> String {
        Self::storage_key(&self.user_id, &self.recipe_id)
    }
}
