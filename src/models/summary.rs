// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly training summaries.

use crate::models::Activity;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Summary of the runs done in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekSummary {
    /// Midnight of the Saturday this week starts on
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub week_start: DateTime<FixedOffset>,
    /// How many runs were done this week (never 0)
    pub count: u32,
    /// Time spent running
    #[serde(with = "crate::time_utils::duration_secs")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub elapsed: Duration,
    /// Distance covered, in meters
    pub distance: f64,
}

impl WeekSummary {
    /// Open a week with its first activity.
    pub(crate) fn starting(week_start: DateTime<FixedOffset>, activity: &Activity) -> Self {
        let mut week = Self {
            week_start,
            count: 0,
            elapsed: Duration::ZERO,
            distance: 0.0,
        };
        week.add(activity);
        week
    }

    pub(crate) fn add(&mut self, activity: &Activity) {
        self.count += 1;
        self.elapsed += Duration::from_secs(activity.elapsed_time);
        self.distance += activity.distance;
    }
}

/// Weekly training history for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserReport {
    pub name: String,
    /// Ascending by `week_start`, one entry per week with at least one run
    pub weeks: Vec<WeekSummary>,
}
