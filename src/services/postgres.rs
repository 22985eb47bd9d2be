use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Interaction kinds between a recycler and a listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interaction_type", rename_all = "lowercase")]
pub enum Interaction {
    Viewed,
    Saved,
    Contacted,
    Dismissed,
}

/// Record of a recycler/listing interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingInteraction {
    pub recycler_id: String,
    pub listing_id: String,
    pub interaction: Interaction,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// PostgreSQL client for tracking listing interactions
///
/// Interactions are kept separately from the marketplace backend so the
/// recommendation pipeline can exclude listings a recycler has already
/// saved, contacted or dismissed without a round-trip per candidate.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Record an interaction between a recycler and a listing
    ///
    /// Uses INSERT ... ON CONFLICT so a repeated interaction upgrades the
    /// stored one (a save after a view keeps the save).
    pub async fn record_interaction(
        &self,
        recycler_id: &str,
        listing_id: &str,
        interaction: Interaction,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO listing_interactions (recycler_id, listing_id, interaction, occurred_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (recycler_id, listing_id)
            DO UPDATE SET
                interaction = EXCLUDED.interaction,
                occurred_at = EXCLUDED.occurred_at
        "#;

        sqlx::query(query)
            .bind(recycler_id)
            .bind(listing_id)
            .bind(&interaction)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded interaction: {} -> {} ({:?})",
            recycler_id,
            listing_id,
            interaction
        );

        Ok(())
    }

    /// Get the listing IDs a recycler has already handled
    ///
    /// Returns listings to exclude from future recommendations. Plain
    /// `viewed` interactions do not suppress a listing; saved, contacted
    /// and dismissed ones do.
    pub async fn get_interacted_listings(
        &self,
        recycler_id: &str,
    ) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT listing_id
            FROM listing_interactions
            WHERE recycler_id = $1 AND interaction != 'viewed'
        "#;

        let rows = sqlx::query(query)
            .bind(recycler_id)
            .fetch_all(&self.pool)
            .await?;

        let listing_ids: Vec<String> = rows.iter().map(|row| row.get("listing_id")).collect();

        tracing::debug!(
            "Recycler {} has {} suppressed listings",
            recycler_id,
            listing_ids.len()
        );

        Ok(listing_ids)
    }

    /// Get interactions with pagination (for debugging/admin)
    pub async fn get_interactions_paginated(
        &self,
        recycler_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ListingInteraction>, PostgresError> {
        let query = r#"
            SELECT recycler_id, listing_id, interaction, occurred_at
            FROM listing_interactions
            WHERE recycler_id = $1
            ORDER BY occurred_at DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(recycler_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let interactions: Result<Vec<ListingInteraction>, _> = rows
            .iter()
            .map(|row| {
                Ok(ListingInteraction {
                    recycler_id: row.get("recycler_id"),
                    listing_id: row.get("listing_id"),
                    interaction: row.get("interaction"),
                    occurred_at: row.get("occurred_at"),
                })
            })
            .collect();

        interactions
    }

    /// Remove an interaction record (e.g. when a recycler un-dismisses)
    pub async fn remove_interaction(
        &self,
        recycler_id: &str,
        listing_id: &str,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM listing_interactions
            WHERE recycler_id = $1 AND listing_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(recycler_id)
            .bind(listing_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear all interactions for a recycler
    pub async fn clear_interactions(&self, recycler_id: &str) -> Result<u64, PostgresError> {
        let query = r#"
            DELETE FROM listing_interactions
            WHERE recycler_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(recycler_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "Cleared {} interactions for recycler {}",
            result.rows_affected(),
            recycler_id
        );

        Ok(result.rows_affected())
    }

    /// Get interaction statistics for a recycler
    pub async fn get_interaction_stats(
        &self,
        recycler_id: &str,
    ) -> Result<InteractionStats, PostgresError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE interaction = 'viewed') as viewed,
                COUNT(*) FILTER (WHERE interaction = 'saved') as saved,
                COUNT(*) FILTER (WHERE interaction = 'contacted') as contacted,
                COUNT(*) FILTER (WHERE interaction = 'dismissed') as dismissed,
                MAX(occurred_at) as last_interaction_at
            FROM listing_interactions
            WHERE recycler_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(recycler_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(InteractionStats {
            recycler_id: recycler_id.to_string(),
            total: row.get("total"),
            viewed: row.get("viewed"),
            saved: row.get("saved"),
            contacted: row.get("contacted"),
            dismissed: row.get("dismissed"),
            last_interaction_at: row.get("last_interaction_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Statistics about a recycler's interactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionStats {
    pub recycler_id: String,
    pub total: i64,
    pub viewed: i64,
    pub saved: i64,
    pub contacted: i64,
    pub dismissed: i64,
    pub last_interaction_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_debug_format() {
        let interaction = Interaction::Saved;
        assert_eq!(format!("{:?}", interaction), "Saved");
    }
}
