// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly training report routes.

use crate::error::Result;
use crate::models::UserReport;
use crate::services::{fetch_user_history, report::render_page};
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(report_page))
        .route("/api/report", get(report_json))
}

/// Fetch every registered user's history and summarise it.
///
/// Fails as a whole if any single user's fetch fails.
async fn build_reports(state: &AppState) -> Result<Vec<UserReport>> {
    let users = state.db.list_users().await?;
    tracing::debug!(users = users.len(), "Building reports");

    let reports = fetch_user_history(&users, Arc::clone(&state.fetcher)).await?;
    Ok(reports)
}

/// HTML page with one table per user.
async fn report_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let reports = build_reports(&state).await?;
    Ok(Html(render_page(
        &reports,
        &state.config.strava_client_id,
        &state.config.redirect_uri,
    )))
}

/// Same reports as JSON.
async fn report_json(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserReport>>> {
    Ok(Json(build_reports(&state).await?))
}
