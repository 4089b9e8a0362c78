// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic and third-party API clients.

pub mod catalog;
pub mod donation;
pub mod expiry;
pub mod normalizer;
pub mod tips;

pub use catalog::CatalogClient;
pub use donation::DonationLocator;
pub use tips::TipService;
