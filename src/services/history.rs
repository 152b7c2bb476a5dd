// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Concurrent fetching of every user's activity history.
//!
//! One task is spawned per user and all of them start before any result is
//! awaited. Results are reassembled in user order. The first failure to
//! *complete* fails the whole batch, so with several failing users the
//! reported error depends on timing.

use crate::error::{BatchFetchError, FetchError};
use crate::models::{Activity, User, UserReport};
use crate::services::summary::summarize_weeks;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Source of raw activities for one user's credential token.
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    /// Zero or more activities, in no particular order.
    async fn fetch_activities(&self, token: &str) -> Result<Vec<Activity>, FetchError>;
}

/// Fetch activities for all users concurrently.
///
/// `result[i]` holds the activities of `users[i]`. If any fetch fails the
/// whole call fails and successful results are discarded.
///
/// Each task reports into a channel with one slot per user, so sending never
/// waits. Tasks still running when the batch fails finish on their own and
/// their results are dropped. Nothing here times out: a fetch that never
/// returns stalls the batch.
pub async fn fetch_all<F>(
    users: &[User],
    fetcher: Arc<F>,
) -> Result<Vec<Vec<Activity>>, BatchFetchError>
where
    F: ActivityFetcher + ?Sized + 'static,
{
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let (tx, mut rx) = mpsc::channel(users.len());
    for (index, user) in users.iter().enumerate() {
        let tx = tx.clone();
        let fetcher = Arc::clone(&fetcher);
        let token = user.strava_token.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_activities(&token).await;
            // Fails only if the collector has already given up.
            let _ = tx.try_send((index, result));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<Vec<Activity>>> = (0..users.len()).map(|_| None).collect();
    for _ in 0..users.len() {
        match rx.recv().await {
            Some((index, Ok(activities))) => {
                tracing::debug!(user_index = index, count = activities.len(), "Fetched activities");
                slots[index] = Some(activities);
            }
            Some((index, Err(e))) => {
                tracing::warn!(user_index = index, error = %e, "Failed to fetch activities");
                return Err(BatchFetchError::Fetch(e));
            }
            // Every sender is gone but a result is missing: a task panicked.
            None => return Err(BatchFetchError::Incomplete),
        }
    }

    Ok(slots.into_iter().map(Option::unwrap_or_default).collect())
}

/// Fetch every user's history and reduce it to weekly summaries.
///
/// Reports come back in user order. All or nothing: one failed fetch means
/// no reports at all.
pub async fn fetch_user_history<F>(
    users: &[User],
    fetcher: Arc<F>,
) -> Result<Vec<UserReport>, BatchFetchError>
where
    F: ActivityFetcher + ?Sized + 'static,
{
    let histories = fetch_all(users, fetcher).await?;

    let reports: Vec<UserReport> = users
        .iter()
        .zip(histories)
        .map(|(user, activities)| UserReport {
            name: user.display_name().to_string(),
            weeks: summarize_weeks(&activities),
        })
        .collect();

    tracing::info!(users = reports.len(), "Built weekly reports");
    Ok(reports)
}
