// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOOKBACK_DAYS: i64 = 30;
const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/oauth_callback";

/// Credentials guarding the report pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub pass: String,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// GCP project holding the Firestore database
    pub gcp_project_id: String,
    /// Prefix for Firestore collections, empty for none
    pub namespace: String,
    /// Report page credentials; `None` leaves the pages open
    pub basic_auth: Option<BasicAuth>,
    /// Where Strava sends the user after authorization
    pub redirect_uri: String,
    /// How far back to request activities
    pub activity_lookback_days: i64,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let basic_auth = match (env::var("BASIC_AUTH_USER"), env::var("BASIC_AUTH_PASS")) {
            (Ok(user), Ok(pass)) if !user.is_empty() => Some(BasicAuth {
                user,
                pass: pass.trim().to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            namespace: env::var("NAMESPACE").unwrap_or_default(),
            basic_auth,
            redirect_uri: env::var("REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            activity_lookback_days: parse_var("ACTIVITY_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?,
            port: parse_var("PORT", DEFAULT_PORT)?,
        })
    }

    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            gcp_project_id: "test-project".to_string(),
            namespace: String::new(),
            basic_auth: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            activity_lookback_days: DEFAULT_LOOKBACK_DAYS,
            port: DEFAULT_PORT,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
