// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request parameter validation shared by the route modules.

use crate::error::{AppError, Result};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use validator::{Validate, ValidationErrors};

/// Largest `number` accepted for recipe searches.
pub const MAX_RESULTS: u32 = 100;

/// Longest identifier accepted in a path or body.
pub const MAX_ID_LEN: usize = 128;

/// A required, non-blank query parameter.
pub fn require(name: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter: {}", name)))
}

/// A required result count between 1 and [`MAX_RESULTS`].
pub fn require_number(value: Option<String>) -> Result<u32> {
    let raw = require("number", value)?;
    match raw.parse::<u32>() {
        Ok(n) if (1..=MAX_RESULTS).contains(&n) => Ok(n),
        _ => Err(AppError::BadRequest(format!(
            "Invalid parameter: number must be an integer between 1 and {}",
            MAX_RESULTS
        ))),
    }
}

/// An identifier taken from the path.
pub fn check_id(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("Missing required parameter: {}", name)));
    }
    if value.len() > MAX_ID_LEN {
        return Err(AppError::BadRequest(format!("Invalid parameter: {} is too long", name)));
    }
    Ok(())
}

/// Unwrap a JSON body and run its `validator` rules.
pub fn validated_body<T: Validate>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(body) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;
    body.validate().map_err(validation_error)?;
    Ok(body)
}

/// Collapse validation errors into one message naming every bad field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();
    AppError::BadRequest(messages.join("; "))
}
