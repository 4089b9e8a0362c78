// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingredient expiry classification and inventory ordering.
//!
//! Everything here is a pure function of the ingredient list and `now`.
//! Callers pass the current time on every call, so a status can change
//! between two renders without any invalidation step.

use crate::models::Ingredient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Items with fewer days left than this are urgent.
pub const EXPIRING_SOON_DAYS: i64 = 5;

/// Three-way expiry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Valid,
}

impl ExpiryStatus {
    /// Classify a signed day count.
    pub fn from_days(days: i64) -> Self {
        if days <= 0 {
            ExpiryStatus::Expired
        } else if days < EXPIRING_SOON_DAYS {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Valid
        }
    }

    /// Expired or expiring soon.
    pub fn is_urgent(self) -> bool {
        self != ExpiryStatus::Valid
    }

    /// Badge text shown next to an urgent ingredient.
    pub fn badge(self, days: i64) -> Option<String> {
        match self {
            ExpiryStatus::Expired => Some("Expired".to_string()),
            ExpiryStatus::ExpiringSoon if days == 1 => Some("Expires tomorrow".to_string()),
            ExpiryStatus::ExpiringSoon => Some(format!("{} days left", days)),
            ExpiryStatus::Valid => None,
        }
    }
}

/// Whole days from `now` until `expires_at`, truncated toward zero.
///
/// An item expiring in 36 hours has 1 day left; one that expired 36 hours
/// ago has -1.
pub fn days_until_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    expires_at.signed_duration_since(now).num_days()
}

fn is_urgent_at(ingredient: &Ingredient, now: DateTime<Utc>) -> bool {
    days_until_expiry(ingredient.ingredient_date_expired, now) < EXPIRING_SOON_DAYS
}

/// An ingredient together with its expiry classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ClassifiedIngredient {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
    pub badge: Option<String>,
}

/// Classify every ingredient, preserving input order.
pub fn classify(ingredients: &[Ingredient], now: DateTime<Utc>) -> Vec<ClassifiedIngredient> {
    ingredients
        .iter()
        .map(|ingredient| {
            let days = days_until_expiry(ingredient.ingredient_date_expired, now);
            let status = ExpiryStatus::from_days(days);
            ClassifiedIngredient {
                ingredient: ingredient.clone(),
                days_until_expiry: days,
                status,
                badge: status.badge(days),
            }
        })
        .collect()
}

/// Keep ingredients whose name contains `query`, ignoring case.
pub fn filter_by_name(ingredients: Vec<Ingredient>, query: &str) -> Vec<Ingredient> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return ingredients;
    }
    ingredients
        .into_iter()
        .filter(|i| i.ingredient_name.to_lowercase().contains(&needle))
        .collect()
}

/// Order for display: urgent items first, each group by expiry time.
///
/// The sort is stable, so identical expiry timestamps keep their input order.
pub fn sort_for_display(ingredients: &mut [Ingredient], now: DateTime<Utc>) {
    ingredients.sort_by(|a, b| {
        is_urgent_at(b, now)
            .cmp(&is_urgent_at(a, now))
            .then_with(|| a.ingredient_date_expired.cmp(&b.ingredient_date_expired))
    });
}

/// Counts shown in the inventory banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExpirySummary {
    pub expired: u32,
    pub expiring_soon: u32,
    /// `expired + expiring_soon`
    pub urgent: u32,
}

pub fn summarize(ingredients: &[Ingredient], now: DateTime<Utc>) -> ExpirySummary {
    let mut summary = ExpirySummary::default();
    for ingredient in ingredients {
        match ExpiryStatus::from_days(days_until_expiry(ingredient.ingredient_date_expired, now)) {
            ExpiryStatus::Expired => summary.expired += 1,
            ExpiryStatus::ExpiringSoon => summary.expiring_soon += 1,
            ExpiryStatus::Valid => {}
        }
    }
    summary.urgent = summary.expired + summary.expiring_soon;
    summary
}

/// Inventory ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InventoryView {
    /// Filtered and ordered ingredients
    pub items: Vec<ClassifiedIngredient>,
    /// Counts over the whole inventory, before filtering
    pub summary: ExpirySummary,
    /// Section heading when any shown item is urgent
    pub alert: Option<String>,
}

/// Filter by name, order for display and classify in one pass.
pub fn inventory_view(ingredients: Vec<Ingredient>, query: &str, now: DateTime<Utc>) -> InventoryView {
    let summary = summarize(&ingredients, now);

    let mut shown = filter_by_name(ingredients, query);
    sort_for_display(&mut shown, now);
    let items = classify(&shown, now);

    let alert = if items.iter().any(|i| i.status == ExpiryStatus::Expired) {
        Some("Expired & Expiring Soon".to_string())
    } else if items.iter().any(|i| i.status.is_urgent()) {
        Some("Expiring Soon".to_string())
    } else {
        None
    };

    InventoryView {
        items,
        summary,
        alert,
    }
}
