// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod donation;
pub mod ingredient;
pub mod recipe;
pub mod user;

pub use donation::DonationCenter;
pub use ingredient::{Ingredient, IngredientSuggestion};
pub use recipe::{Recipe, SearchKind};
pub use user::{SavedRecipe, User};
