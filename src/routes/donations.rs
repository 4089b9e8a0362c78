// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Donation center lookup routes.

use crate::error::{AppError, Result};
use crate::routes::params::require;
use crate::services::donation::{DonationSearchResponse, MAX_RESULTS};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use geo::Point;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/donations/nearby", get(nearby))
        .route("/donations/search", get(search))
}

fn parse_limit(limit: Option<String>) -> Result<u32> {
    match limit {
        None => Ok(MAX_RESULTS),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(n) if (1..=MAX_RESULTS).contains(&n) => Ok(n),
            _ => Err(AppError::BadRequest(format!(
                "Invalid parameter: limit must be between 1 and {}",
                MAX_RESULTS
            ))),
        },
    }
}

fn parse_coordinate(name: &str, value: Option<String>, bound: f64) -> Result<f64> {
    let raw = require(name, value)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= bound => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "Invalid parameter: {} must be a number between -{} and {}",
            name, bound, bound
        ))),
    }
}

#[derive(Deserialize)]
struct NearbyQuery {
    lng: Option<String>,
    lat: Option<String>,
    limit: Option<String>,
}

async fn nearby(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearbyQuery>,
) -> Result<Json<DonationSearchResponse>> {
    let lng = parse_coordinate("lng", params.lng, 180.0)?;
    let lat = parse_coordinate("lat", params.lat, 90.0)?;
    let limit = parse_limit(params.limit)?;

    Ok(Json(state.donations.nearby(Point::new(lng, lat), limit).await?))
}

#[derive(Deserialize)]
struct SearchQuery {
    location: Option<String>,
    limit: Option<String>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<DonationSearchResponse>> {
    let location = require("location", params.location)?;
    let limit = parse_limit(params.limit)?;

    tracing::debug!(location = %location, "Searching donation centers by place name");
    Ok(Json(state.donations.search(&location, limit).await?))
}
