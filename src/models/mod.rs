// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod summary;
pub mod user;

pub use activity::{Activity, ActivityKind};
pub use summary::{UserReport, WeekSummary};
pub use user::User;
