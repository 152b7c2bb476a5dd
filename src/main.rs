// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marathon tracker server
//!
//! Serves weekly run summaries for every user who registered through Strava.

use marathon_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{StravaClient, StravaFetcher},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        lookback_days = config.activity_lookback_days,
        basic_auth = config.basic_auth.is_some(),
        "Starting marathon tracker"
    );

    let db = FirestoreDb::new(&config.gcp_project_id, &config.namespace).await?;

    let strava_client = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );
    let fetcher = StravaFetcher::new(strava_client.clone(), config.activity_lookback_days);

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        strava_client,
        fetcher: Arc::new(fetcher),
    });

    let app = marathon_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["marathon_tracker=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry().with(filter).with(format).init();
}
