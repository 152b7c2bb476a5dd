// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model, as returned by the activity list endpoint.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of workout. Only the common Strava types get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Run,
    Ride,
    Swim,
    Walk,
    Hike,
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Run => "Run",
            ActivityKind::Ride => "Ride",
            ActivityKind::Swim => "Swim",
            ActivityKind::Walk => "Walk",
            ActivityKind::Hike => "Hike",
            ActivityKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "Run" => ActivityKind::Run,
            "Ride" => ActivityKind::Ride,
            "Swim" => ActivityKind::Swim,
            "Walk" => ActivityKind::Walk,
            "Hike" => ActivityKind::Hike,
            _ => ActivityKind::Other(kind),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded workout.
///
/// Field names follow Strava's summary activity JSON; other fields in the
/// response are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Workout type (Strava's `type` field)
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Start time (RFC 3339)
    pub start_date: DateTime<FixedOffset>,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Distance in meters
    pub distance: f64,
}
