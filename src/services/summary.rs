// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly aggregation of a user's activities.

use crate::models::{Activity, ActivityKind, WeekSummary};
use crate::time_utils::week_start;

/// Only this kind of activity counts towards weekly totals.
pub const TRACKED_KIND: ActivityKind = ActivityKind::Run;

/// Summarise activities into weekly run totals, oldest week first.
///
/// Non-run activities are dropped before anything else. The remaining runs
/// are sorted by start time (stable, on a copy) and grouped consecutively by
/// week start; because the list is time-ordered each week forms exactly one
/// contiguous run, so the output is already ascending with no duplicates.
/// Weeks without runs are not emitted.
///
/// All weeks of one call are computed in the UTC offset of the earliest
/// run, whatever offsets the later runs were recorded in.
pub fn summarize_weeks(activities: &[Activity]) -> Vec<WeekSummary> {
    let mut runs: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.kind == TRACKED_KIND)
        .collect();
    // Equal instants are tie-broken on offset so the reference offset does
    // not depend on input order.
    runs.sort_by_key(|a| (a.start_date, a.start_date.offset().local_minus_utc()));

    let Some(offset) = runs.first().map(|a| *a.start_date.offset()) else {
        return Vec::new();
    };

    let mut weeks: Vec<WeekSummary> = Vec::new();
    for run in runs {
        let start = week_start(run.start_date.with_timezone(&offset));
        if let Some(week) = weeks.last_mut().filter(|w| w.week_start == start) {
            week.add(run);
        } else {
            weeks.push(WeekSummary::starting(start, run));
        }
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn activity(kind: ActivityKind, start: &str, secs: u64, meters: f64) -> Activity {
        Activity {
            kind,
            start_date: DateTime::<FixedOffset>::parse_from_rfc3339(start).unwrap(),
            elapsed_time: secs,
            distance: meters,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_weeks(&[]).is_empty());
    }

    #[test]
    fn test_input_is_not_reordered() {
        let activities = vec![
            activity(ActivityKind::Run, "2018-03-12T08:00:00Z", 600, 1000.0),
            activity(ActivityKind::Run, "2018-03-05T08:00:00Z", 600, 1000.0),
        ];
        let before = activities.clone();

        let weeks = summarize_weeks(&activities);

        assert_eq!(activities, before);
        assert_eq!(weeks.len(), 2);
    }

    #[test]
    fn test_mixed_offsets_share_one_week() {
        // 01:00 Saturday in +10:00 is still Friday in UTC.
        let activities = vec![
            activity(ActivityKind::Run, "2018-03-03T01:00:00+10:00", 600, 1000.0),
            activity(ActivityKind::Run, "2018-03-02T16:00:00Z", 600, 1000.0),
            activity(ActivityKind::Run, "2018-03-04T08:00:00+10:00", 600, 1000.0),
        ];

        let weeks = summarize_weeks(&activities);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].count, 3);
        assert_eq!(
            weeks[0].week_start,
            DateTime::<FixedOffset>::parse_from_rfc3339("2018-03-03T00:00:00+10:00").unwrap()
        );
        assert_eq!(weeks[0].week_start.offset().local_minus_utc(), 10 * 3600);
    }

    #[test]
    fn test_ride_between_runs_does_not_split_week() {
        let activities = vec![
            activity(ActivityKind::Run, "2018-03-03T08:00:00Z", 600, 1000.0),
            activity(ActivityKind::Ride, "2018-03-04T08:00:00Z", 3600, 30000.0),
            activity(ActivityKind::Run, "2018-03-05T08:00:00Z", 900, 2000.0),
        ];

        let weeks = summarize_weeks(&activities);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].count, 2);
        assert_eq!(weeks[0].distance, 3000.0);
    }
}
