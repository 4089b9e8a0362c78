// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::error::Result;
use crate::models::User;
use crate::routes::params::{self, require};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/checkUser", post(check_user))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CheckUserRequest {
    #[validate(
        required(message = "userId is required"),
        length(min = 1, max = 128, message = "userId must be 1-128 characters")
    )]
    user_id: Option<String>,
}

/// Get or create the user: 200 if known, 201 if created now.
async fn check_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CheckUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let body = params::validated_body(payload)?;
    let user_id = require("userId", body.user_id)?;

    let outcome = state.db.get_or_create_user(&user_id).await?;
    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.into_inner())))
}
