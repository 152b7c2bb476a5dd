// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for week bucketing and date/duration formatting.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime};
use std::time::Duration;

/// Start of the training week containing `instant`.
///
/// Weeks start on Saturday. The result is midnight of that Saturday in the
/// same UTC offset as `instant`, so the time of day never affects the bucket.
pub fn week_start(instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let offset = *instant.offset();
    let day = instant.date_naive();

    // Saturday is 6 days from Sunday, so it walks back 0 days; Sunday walks back 1.
    let days_back = (day.weekday().num_days_from_sunday() + 1) % 7;
    let saturday = day
        .checked_sub_days(Days::new(days_back.into()))
        .unwrap_or(NaiveDate::MIN);

    saturday
        .and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .unwrap_or(instant)
}

/// Format a week start for report tables, e.g. `2018/03/03`.
pub fn format_week_date(date: DateTime<FixedOffset>) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Format a duration as hours and minutes, e.g. `1h 5m`.
pub fn format_hours_minutes(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Serialize a `Duration` as whole seconds.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
