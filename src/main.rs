// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pantry-Tracker API Server
//!
//! Tracks a user's ingredients and their expiry dates, and proxies recipe,
//! disposal-tip and donation-center lookups to external services.

use pantry_tracker::{
    config::{Config, StorageBackend},
    db::{Database, FirestoreDb},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, storage = ?config.storage, "Starting Pantry-Tracker API");

    let db: Database = match config.storage {
        StorageBackend::Firestore => FirestoreDb::new(&config.gcp_project_id).await?.into(),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Database::in_memory()
        }
    };

    for (name, configured) in [
        ("SPOONACULAR_API_KEY", config.spoonacular_api_key.is_some()),
        ("OPENAI_API_KEY", config.openai_api_key.is_some()),
        ("MAPBOX_TOKEN", config.mapbox_token.is_some()),
    ] {
        if !configured {
            tracing::warn!(variable = name, "Not set; dependent endpoints will return 500");
        }
    }

    let state = Arc::new(AppState::new(config.clone(), db));
    let app = pantry_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pantry_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
