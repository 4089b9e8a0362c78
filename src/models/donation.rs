// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Donation center (food bank) model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A food bank returned by place search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DonationCenter {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    pub description: String,
    /// Distance from the search point in miles, when known
    pub distance_miles: Option<f64>,
    pub distance_label: String,
    pub services: Vec<String>,
}
