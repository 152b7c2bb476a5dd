// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use marathon_tracker::config::Config;
use marathon_tracker::db::FirestoreDb;
use marathon_tracker::error::FetchError;
use marathon_tracker::models::{Activity, ActivityKind, User};
use marathon_tracker::routes::create_router;
use marathon_tracker::services::{ActivityFetcher, StravaClient};
use marathon_tracker::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db(namespace: &str) -> FirestoreDb {
    FirestoreDb::new("test-project", namespace)
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Parse an RFC 3339 timestamp.
#[allow(dead_code)]
pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 timestamp")
}

#[allow(dead_code)]
pub fn run(start: DateTime<FixedOffset>, elapsed: Duration, meters: f64) -> Activity {
    Activity {
        kind: ActivityKind::Run,
        start_date: start,
        elapsed_time: elapsed.as_secs(),
        distance: meters,
    }
}

#[allow(dead_code)]
pub fn ride(start: DateTime<FixedOffset>, elapsed: Duration, meters: f64) -> Activity {
    Activity {
        kind: ActivityKind::Ride,
        start_date: start,
        elapsed_time: elapsed.as_secs(),
        distance: meters,
    }
}

#[allow(dead_code)]
pub fn user(firstname: &str, token: &str) -> User {
    User {
        firstname: firstname.to_string(),
        lastname: "k".to_string(),
        strava_token: token.to_string(),
    }
}

/// Fetcher answering per token after a delay, counting finished fetches.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedFetcher {
    responses: HashMap<String, (Duration, Result<Vec<Activity>, FetchError>)>,
    completed: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        token: &str,
        delay: Duration,
        result: Result<Vec<Activity>, FetchError>,
    ) -> Self {
        self.responses.insert(token.to_string(), (delay, result));
        self
    }

    /// Number of fetches that have run to completion.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActivityFetcher for ScriptedFetcher {
    async fn fetch_activities(&self, token: &str) -> Result<Vec<Activity>, FetchError> {
        let (delay, result) = self
            .responses
            .get(token)
            .cloned()
            .unwrap_or((Duration::ZERO, Err(FetchError::Unauthorized)));

        tokio::time::sleep(delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

/// Create a test app with an offline database and the given fetcher.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(
    config: Config,
    strava_client: StravaClient,
    fetcher: Arc<dyn ActivityFetcher>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        db: FirestoreDb::new_mock(),
        strava_client,
        fetcher,
    });

    (create_router(state.clone()), state)
}

/// Offline test app with default config and an empty fetcher.
#[allow(dead_code)]
pub fn create_offline_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let client = StravaClient::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );
    create_test_app(config, client, Arc::new(ScriptedFetcher::new()))
}
