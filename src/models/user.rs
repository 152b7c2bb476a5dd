//! User model for storage and reporting.

use serde::{Deserialize, Serialize};

/// A Strava user who has authorised access to their data.
///
/// Stored in Firestore keyed by Strava athlete ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Strava access token used to fetch this user's activities
    pub strava_token: String,
}

impl User {
    /// Name shown above the user's report table.
    pub fn display_name(&self) -> &str {
        &self.firstname
    }
}
