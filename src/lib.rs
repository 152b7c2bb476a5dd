// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marathon tracker: weekly run summaries for a group of Strava users.
//!
//! Users register through Strava OAuth. The report page fetches every
//! registered user's recent activities concurrently and shows one table of
//! weekly run totals per user.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{ActivityFetcher, StravaClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    /// Used for OAuth code exchange at registration
    pub strava_client: StravaClient,
    /// Source of activity history for the reports
    pub fetcher: Arc<dyn ActivityFetcher>,
}
