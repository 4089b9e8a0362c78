// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore, or in-memory for local runs and tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Ingredient, SavedRecipe, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const INGREDIENTS: &str = "ingredients";
    /// Bookmarks, keyed by `SavedRecipe::storage_key`
    pub const SAVED_RECIPES: &str = "saved_recipes";
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

/// Storage handle shared by all handlers.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

/// Outcome of an idempotent create.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    Created(T),
    Existing(T),
}

impl<T> Upserted<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(v) | Upserted::Existing(v) => v,
        }
    }
}

impl From<FirestoreDb> for Database {
    fn from(db: FirestoreDb) -> Self {
        Self {
            backend: Backend::Firestore(db),
        }
    }
}

impl From<MemoryDb> for Database {
    fn from(db: MemoryDb) -> Self {
        Self {
            backend: Backend::Memory(db),
        }
    }
}

impl Database {
    /// In-memory storage.
    pub fn in_memory() -> Self {
        MemoryDb::new().into()
    }

    /// Storage whose every call fails, for exercising error paths.
    pub fn offline() -> Self {
        FirestoreDb::new_mock().into()
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.get_user(user_id).await,
            Backend::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    /// Return the user, creating it on first sight.
    pub async fn get_or_create_user(&self, user_id: &str) -> Result<Upserted<User>, AppError> {
        if let Some(user) = self.get_user(user_id).await? {
            return Ok(Upserted::Existing(user));
        }

        let user = User {
            user_id: user_id.to_string(),
            created_at: chrono::Utc::now(),
        };
        match &self.backend {
            Backend::Firestore(db) => db.create_user(&user).await?,
            Backend::Memory(db) => db.create_user(&user),
        }
        tracing::info!(user_id, "User created");
        Ok(Upserted::Created(user))
    }

    // ─── Ingredients ─────────────────────────────────────────────

    pub async fn add_ingredient(&self, ingredient: &Ingredient) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.add_ingredient(ingredient).await,
            Backend::Memory(db) => {
                db.add_ingredient(ingredient);
                Ok(())
            }
        }
    }

    /// A user's ingredients, oldest first.
    pub async fn list_ingredients(&self, user_id: &str) -> Result<Vec<Ingredient>, AppError> {
        let mut ingredients = match &self.backend {
            Backend::Firestore(db) => db.list_ingredients(user_id).await?,
            Backend::Memory(db) => db.list_ingredients(user_id),
        };
        ingredients.sort_by(|a, b| {
            a.ingredient_date_added
                .cmp(&b.ingredient_date_added)
                .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
        });
        Ok(ingredients)
    }

    /// Delete an ingredient, returning it, or `None` if it did not exist.
    pub async fn delete_ingredient(&self, ingredient_id: &str) -> Result<Option<Ingredient>, AppError> {
        let existing = match &self.backend {
            Backend::Firestore(db) => db.get_ingredient(ingredient_id).await?,
            Backend::Memory(db) => db.get_ingredient(ingredient_id),
        };
        if existing.is_none() {
            return Ok(None);
        }

        match &self.backend {
            Backend::Firestore(db) => db.delete_ingredient(ingredient_id).await?,
            Backend::Memory(db) => db.delete_ingredient(ingredient_id),
        }
        Ok(existing)
    }

    // ─── Bookmarks ───────────────────────────────────────────────

    /// Save a bookmark unless the user already bookmarked this recipe.
    pub async fn bookmark_recipe(&self, bookmark: SavedRecipe) -> Result<Upserted<SavedRecipe>, AppError> {
        let existing = match &self.backend {
            Backend::Firestore(db) => db.get_bookmark(&bookmark.user_id, &bookmark.recipe_id).await?,
            Backend::Memory(db) => db.get_bookmark(&bookmark.user_id, &bookmark.recipe_id),
        };
        if let Some(existing) = existing {
            return Ok(Upserted::Existing(existing));
        }

        match &self.backend {
            Backend::Firestore(db) => db.add_bookmark(&bookmark).await?,
            Backend::Memory(db) => db.add_bookmark(&bookmark),
        }
        Ok(Upserted::Created(bookmark))
    }

    /// A user's bookmarks, most recently saved first.
    pub async fn list_bookmarks(&self, user_id: &str) -> Result<Vec<SavedRecipe>, AppError> {
        let mut bookmarks = match &self.backend {
            Backend::Firestore(db) => db.list_bookmarks(user_id).await?,
            Backend::Memory(db) => db.list_bookmarks(user_id),
        };
        bookmarks.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| a.recipe_id.cmp(&b.recipe_id))
        });
        Ok(bookmarks)
    }

    /// Remove a bookmark, returning it, or `None` if it did not exist.
    pub async fn unbookmark_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Option<SavedRecipe>, AppError> {
        let existing = match &self.backend {
            Backend::Firestore(db) => db.get_bookmark(user_id, recipe_id).await?,
            Backend::Memory(db) => db.get_bookmark(user_id, recipe_id),
        };
        if existing.is_none() {
            return Ok(None);
        }

        match &self.backend {
            Backend::Firestore(db) => db.delete_bookmark(user_id, recipe_id).await?,
            Backend::Memory(db) => db.delete_bookmark(user_id, recipe_id),
        }
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn bookmark(user_id: &str, recipe_id: &str) -> SavedRecipe {
        SavedRecipe {
            recipe_id: recipe_id.to_string(),
            user_id: user_id.to_string(),
            recipe_name: "Soup".to_string(),
            recipe_picture: None,
            saved_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_bookmark_is_noop() {
        let db = Database::in_memory();

        let first = db.bookmark_recipe(bookmark("u1", "42")).await.unwrap();
        assert!(first.is_created());

        let mut renamed = bookmark("u1", "42");
        renamed.recipe_name = "Different".to_string();
        let second = db.bookmark_recipe(renamed).await.unwrap();
        assert!(!second.is_created());
        assert_eq!(second.into_inner().recipe_name, "Soup");

        // Same recipe, different user: separate bookmark.
        assert!(db.bookmark_recipe(bookmark("u2", "42")).await.unwrap().is_created());

        assert_eq!(db.list_bookmarks("u1").await.unwrap().len(), 1);
        assert_eq!(db.list_bookmarks("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unbookmark_only_touches_owner() {
        let db = Database::in_memory();
        db.bookmark_recipe(bookmark("u1", "42")).await.unwrap();
        db.bookmark_recipe(bookmark("u2", "42")).await.unwrap();

        assert!(db.unbookmark_recipe("u1", "42").await.unwrap().is_some());
        assert!(db.unbookmark_recipe("u1", "42").await.unwrap().is_none());
        assert_eq!(db.list_bookmarks("u2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ingredients_listed_per_user_oldest_first() {
        let db = Database::in_memory();
        let expires = Utc::now() + Duration::days(3);

        let mut older = Ingredient::new("u1".into(), "Milk".into(), None, expires);
        older.ingredient_date_added = Utc::now() - Duration::days(2);
        let newer = Ingredient::new("u1".into(), "Eggs".into(), None, expires);
        let other = Ingredient::new("u2".into(), "Kale".into(), None, expires);

        for i in [&newer, &older, &other] {
            db.add_ingredient(i).await.unwrap();
        }

        let names: Vec<String> = db
            .list_ingredients("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.ingredient_name)
            .collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);
        assert!(db.list_ingredients("nobody").await.unwrap().is_empty());

        let deleted = db.delete_ingredient(&older.ingredient_id).await.unwrap();
        assert_eq!(deleted, Some(older.clone()));
        assert_eq!(db.delete_ingredient(&older.ingredient_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_or_create_user() {
        let db = Database::in_memory();
        let created = db.get_or_create_user("user_abc").await.unwrap();
        assert!(created.is_created());
        let again = db.get_or_create_user("user_abc").await.unwrap();
        assert_eq!(again, Upserted::Existing(created.into_inner()));
    }

    #[tokio::test]
    async fn test_offline_database_errors() {
        let db = Database::offline();
        assert!(matches!(
            db.list_ingredients("u1").await,
            Err(AppError::Database(_))
        ));
    }
}
