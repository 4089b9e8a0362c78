// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pantry-Tracker: track food before it expires
//!
//! This crate provides the backend API for a personal ingredient inventory
//! with expiry alerts, recipe discovery through an external catalog,
//! recipe bookmarks, disposal tips, and nearby donation centers. The
//! `client` module is the typed, caching consumer of that API.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{CatalogClient, DonationLocator, TipService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub catalog: CatalogClient,
    pub tips: TipService,
    pub donations: DonationLocator,
}

impl AppState {
    /// Build upstream clients from configuration.
    pub fn new(config: Config, db: Database) -> Self {
        let catalog = CatalogClient::new(
            config.spoonacular_base_url.clone(),
            config.spoonacular_api_key.clone(),
        );
        let tips = TipService::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        );
        let donations =
            DonationLocator::new(config.mapbox_base_url.clone(), config.mapbox_token.clone());

        Self {
            config,
            db,
            catalog,
            tips,
            donations,
        }
    }
}
