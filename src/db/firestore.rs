// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed user operations.

use crate::db::collections;
use crate::error::AppError;
use crate::models::User;
use futures_util::TryStreamExt;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    users_collection: String,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    /// A non-empty `namespace` prefixes every collection name.
    pub async fn new(project_id: &str, namespace: &str) -> Result<Self, AppError> {
        let users_collection = namespaced(namespace, collections::USERS);

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            let client = Self::create_emulator_client(project_id).await?;
            return Ok(Self {
                client: Some(client),
                users_collection,
            });
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, namespace, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            users_collection,
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<firestore::FirestoreDb, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(client)
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            users_collection: collections::USERS.to_string(),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Name of the users collection, including any namespace prefix.
    pub fn users_collection(&self) -> &str {
        &self.users_collection
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Save a user's Strava token and basic details, keyed by athlete ID.
    ///
    /// Registering the same athlete again replaces the stored record.
    pub async fn register_user(&self, athlete_id: u64, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(&self.users_collection)
            .document_id(athlete_id.to_string())
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a user by their Strava athlete ID.
    pub async fn get_user(&self, athlete_id: u64) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(&self.users_collection)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All registered users, ordered by first name.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let stream = self
            .get_client()?
            .fluent()
            .select()
            .from(self.users_collection.as_str())
            .order_by([("firstname", firestore::FirestoreQueryDirection::Ascending)])
            .obj::<User>()
            .stream_query_with_errors()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        stream
            .try_collect::<Vec<User>>()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn namespaced(namespace: &str, collection: &str) -> String {
    if namespace.is_empty() {
        collection.to_string()
    } else {
        format!("{}_{}", namespace, collection)
    }
}
