// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store used for local runs (`STORAGE=memory`) and tests.

use crate::models::{Ingredient, SavedRecipe, User};
use dashmap::DashMap;
use std::sync::Arc;

/// Collections held in concurrent maps keyed like their Firestore documents.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, User>>,
    ingredients: Arc<DashMap<String, Ingredient>>,
    bookmarks: Arc<DashMap<String, SavedRecipe>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.clone())
    }

    pub fn create_user(&self, user: &User) {
        self.users.insert(user.user_id.clone(), user.clone());
    }

    pub fn add_ingredient(&self, ingredient: &Ingredient) {
        self.ingredients
            .insert(ingredient.ingredient_id.clone(), ingredient.clone());
    }

    pub fn get_ingredient(&self, ingredient_id: &str) -> Option<Ingredient> {
        self.ingredients.get(ingredient_id).map(|i| i.clone())
    }

    pub fn list_ingredients(&self, user_id: &str) -> Vec<Ingredient> {
        self.ingredients
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn delete_ingredient(&self, ingredient_id: &str) {
        self.ingredients.remove(ingredient_id);
    }

    pub fn get_bookmark(&self, user_id: &str, recipe_id: &str) -> Option<SavedRecipe> {
        self.bookmarks
            .get(&SavedRecipe::storage_key(user_id, recipe_id))
            .map(|b| b.clone())
    }

    pub fn add_bookmark(&self, bookmark: &SavedRecipe) {
        self.bookmarks.insert(bookmark.key(), bookmark.clone());
    }

    pub fn list_bookmarks(&self, user_id: &str) -> Vec<SavedRecipe> {
        self.bookmarks
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn delete_bookmark(&self, user_id: &str, recipe_id: &str) {
        self.bookmarks
            .remove(&SavedRecipe::storage_key(user_id, recipe_id));
    }
}
