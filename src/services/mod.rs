// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod history;
pub mod report;
pub mod strava;
pub mod summary;

pub use history::{fetch_all, fetch_user_history, ActivityFetcher};
pub use strava::{StravaClient, StravaFetcher};
pub use summary::summarize_weeks;
