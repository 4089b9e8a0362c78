// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Donation center lookup (Mapbox geocoding and search box APIs).

use crate::error::AppError;
use crate::models::DonationCenter;
use geo::{Distance, Haversine, Point};
use geojson::{Feature, GeoJson};

/// Upper bound on centers returned per lookup.
pub const MAX_RESULTS: u32 = 10;

const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_MILE: f64 = 5280.0;
const SEARCH_TERM: &str = "food bank";
const DEFAULT_LABEL: &str = "Food Bank";

/// Food banks near a point, nearest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSearchResponse {
    /// `[longitude, latitude]` the distances are measured from
    pub origin: [f64; 2],
    pub centers: Vec<DonationCenter>,
}

/// Place-search client for finding donation centers.
#[derive(Clone)]
pub struct DonationLocator {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl DonationLocator {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn token(&self) -> Result<&str, AppError> {
        self.access_token
            .as_deref()
            .ok_or_else(|| AppError::Config("MAPBOX_TOKEN is not set".to_string()))
    }

    /// Find food banks around `origin`.
    pub async fn nearby(&self, origin: Point<f64>, limit: u32) -> Result<DonationSearchResponse, AppError> {
        const ACTION: &str = "fetch donation centers";
        let token = self.token()?;

        let body = self
            .get_text(
                "/search/searchbox/v1/forward",
                &[
                    ("q", SEARCH_TERM.to_string()),
                    ("limit", limit.min(MAX_RESULTS).to_string()),
                    ("proximity", format!("{},{}", origin.x(), origin.y())),
                    ("access_token", token.to_string()),
                ],
                ACTION,
            )
            .await?;

        let centers = parse_donation_centers(&body, origin)
            .map_err(|e| AppError::upstream(ACTION, e))?;

        tracing::debug!(count = centers.len(), "Donation centers found");
        Ok(DonationSearchResponse {
            origin: [origin.x(), origin.y()],
            centers,
        })
    }

    /// Geocode `location` and find food banks around it.
    pub async fn search(&self, location: &str, limit: u32) -> Result<DonationSearchResponse, AppError> {
        let origin = self.geocode(location).await?.ok_or_else(|| {
            AppError::NotFound(format!("Location '{}' not found", location))
        })?;
        self.nearby(origin, limit).await
    }

    /// Resolve free text to a point, `None` when nothing matches.
    pub async fn geocode(&self, location: &str) -> Result<Option<Point<f64>>, AppError> {
        const ACTION: &str = "geocode location";
        let token = self.token()?;

        let path = format!(
            "/geocoding/v5/mapbox.places/{}.json",
            urlencoding::encode(location)
        );
        let body = self
            .get_text(
                &path,
                &[
                    ("limit", "1".to_string()),
                    ("access_token", token.to_string()),
                ],
                ACTION,
            )
            .await?;

        parse_first_point(&body).map_err(|e| AppError::upstream(ACTION, e))
    }

    async fn get_text(
        &self,
        path: &str,
        params: &[(&str, String)],
        action: &'static str,
    ) -> Result<String, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::upstream(action, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(action, e))?;

        if !status.is_success() {
            return Err(AppError::upstream(action, format!("HTTP {}: {}", status, body)));
        }
        Ok(body)
    }
}

fn parse_feature_collection(body: &str) -> Result<Vec<Feature>, String> {
    match body.parse::<GeoJson>().map_err(|e| e.to_string())? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        _ => Err("expected a FeatureCollection".to_string()),
    }
}

fn feature_point(feature: &Feature) -> Option<Point<f64>> {
    if let Some(geojson::Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value) {
        if coords.len() >= 2 {
            return Some(Point::new(coords[0], coords[1]));
        }
    }
    // Geocoding results also carry a top-level `center`.
    let center = feature.foreign_members.as_ref()?.get("center")?.as_array()?;
    Some(Point::new(center.first()?.as_f64()?, center.get(1)?.as_f64()?))
}

fn string_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| feature.property(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First point in a geocoding response.
pub fn parse_first_point(body: &str) -> Result<Option<Point<f64>>, String> {
    Ok(parse_feature_collection(body)?.iter().find_map(feature_point))
}

/// Convert a search box response into donation centers, nearest first.
///
/// Distances are measured from `origin`; features without a point are dropped.
pub fn parse_donation_centers(body: &str, origin: Point<f64>) -> Result<Vec<DonationCenter>, String> {
    let mut centers: Vec<DonationCenter> = parse_feature_collection(body)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let point = feature_point(&feature)?;
            let miles = Haversine.distance(origin, point) / METERS_PER_MILE;

            let name = string_property(&feature, &["name", "place_name"])
                .unwrap_or_else(|| DEFAULT_LABEL.to_string());
            let id = string_property(&feature, &["mapbox_id"])
                .unwrap_or_else(|| format!("{}-{}", name, index));

            Some(DonationCenter {
                id,
                name,
                address: string_property(&feature, &["full_address", "address", "place_name"]),
                coordinates: [point.x(), point.y()],
                description: string_property(&feature, &["category"])
                    .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
                distance_miles: Some(miles),
                distance_label: format_distance(Some(miles)),
                services: vec!["Food Assistance".to_string()],
            })
        })
        .collect();

    centers.sort_by(|a, b| {
        a.distance_miles
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_miles.unwrap_or(f64::INFINITY))
    });
    Ok(centers)
}

/// Human-readable distance: feet under a tenth of a mile, else miles.
pub fn format_distance(miles: Option<f64>) -> String {
    match miles {
        Some(m) if m.is_finite() && m >= 0.0 => {
            if m < 0.1 {
                format!("{} ft away", (m * FEET_PER_MILE).round() as i64)
            } else {
                format!("{:.1} mi away", m)
            }
        }
        _ => "Unknown distance".to_string(),
    }
}
