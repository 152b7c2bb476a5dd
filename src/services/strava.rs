// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Activity listing (paginated) behind the `ActivityFetcher` seam
//! - OAuth code exchange and user registration

use crate::error::{AppError, FetchError};
use crate::models::{Activity, User};
use crate::services::history::ActivityFetcher;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth";

/// Largest page Strava serves for the activity list.
pub const MAX_PER_PAGE: u32 = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(client_id, client_secret, STRAVA_API_URL, STRAVA_OAUTH_URL)
    }

    /// Create a client talking to other endpoints (used by tests).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        base_url: &str,
        oauth_url: &str,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            oauth_url: oauth_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        }
    }

    /// List the authenticated athlete's activities started after `after`
    /// (Unix timestamp).
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Activity>, FetchError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        check_response_json(response).await
    }

    /// Exchange an authorization code for tokens and the athlete profile.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, FetchError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Request(format!("Token exchange failed: {}", e)))?;

        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
            return Err(FetchError::RateLimited);
        }

        if status.as_u16() == 401 {
            return Err(FetchError::Unauthorized);
        }

        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub athlete: StravaAthlete,
}

/// Athlete info from OAuth token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaFetcher - recent history for the weekly report
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches every activity started within the lookback window.
#[derive(Clone)]
pub struct StravaFetcher {
    client: StravaClient,
    lookback: chrono::Duration,
    per_page: u32,
}

impl StravaFetcher {
    pub fn new(client: StravaClient, lookback_days: i64) -> Self {
        Self {
            client,
            lookback: chrono::Duration::days(lookback_days),
            per_page: MAX_PER_PAGE,
        }
    }

    /// Override the page size (mostly useful for exercising pagination).
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }
}

#[async_trait]
impl ActivityFetcher for StravaFetcher {
    async fn fetch_activities(&self, token: &str) -> Result<Vec<Activity>, FetchError> {
        let after = (chrono::Utc::now() - self.lookback).timestamp();

        let mut activities = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .client
                .list_activities(token, after, page, self.per_page)
                .await?;
            let short_page = batch.len() < self.per_page as usize;
            activities.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }

        tracing::debug!(count = activities.len(), pages = page, "Listed activities");
        Ok(activities)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange an OAuth code and store the new user.
pub async fn register_from_oauth(
    client: &StravaClient,
    db: &crate::db::FirestoreDb,
    code: &str,
) -> Result<User, AppError> {
    let auth = client.exchange_code(code).await?;

    let user = User {
        firstname: auth.athlete.firstname,
        lastname: auth.athlete.lastname,
        strava_token: auth.access_token,
    };
    db.register_user(auth.athlete.id, &user).await?;

    tracing::info!(
        athlete_id = auth.athlete.id,
        firstname = %user.firstname,
        "Registered user"
    );
    Ok(user)
}
