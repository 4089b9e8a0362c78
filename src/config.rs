// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Third-party API keys are optional at startup. Requests that need a missing
//! key fail individually with a configuration error.

use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3001;

/// Where ingredients, bookmarks and users are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StorageBackend::Firestore),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid("STORAGE", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Storage backend selection
    pub storage: StorageBackend,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,

    // --- Recipe / ingredient catalog ---
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,

    // --- Completion API (disposal tips) ---
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,

    // --- Place search (donation centers) ---
    pub mapbox_token: Option<String>,
    pub mapbox_base_url: String,
}

impl Config {
    /// Config for tests: in-memory storage and no upstream keys.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: "http://localhost:3000".to_string(),
            storage: StorageBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            spoonacular_api_key: None,
            spoonacular_base_url: "http://127.0.0.1:9".to_string(),
            openai_api_key: None,
            openai_base_url: "http://127.0.0.1:9".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            mapbox_token: None,
            mapbox_base_url: "http://127.0.0.1:9".to_string(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |name: &str| {
            var(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let storage = match var("STORAGE") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Firestore,
        };

        Ok(Self {
            port,
            frontend_url: var("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            storage,
            gcp_project_id: var("GCP_PROJECT_ID").unwrap_or_else(|| "local-dev".to_string()),

            spoonacular_api_key: secret("SPOONACULAR_API_KEY"),
            spoonacular_base_url: var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|| "https://api.spoonacular.com".to_string()),

            openai_api_key: secret("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),

            mapbox_token: secret("MAPBOX_TOKEN"),
            mapbox_base_url: var("MAPBOX_BASE_URL")
                .unwrap_or_else(|| "https://api.mapbox.com".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
