//! Edge storage operations for SQLite.
//!
//! This module provides the `EdgeStore` struct for persisting and querying
//! friend edges. Uniqueness of the unordered pair is enforced by the
//! `pair_key` primary key, so inserting a duplicate (in either direction) is
//! rejected atomically by the database rather than by a read-then-write check.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{FriendGraphError, Result};
use crate::schema::{pair_key, FriendEdge, FriendStatus};

/// Friend edge storage backed by SQLite.
#[derive(Clone)]
pub struct EdgeStore {
    pool: SqlitePool,
}

impl EdgeStore {
    /// Create a new EdgeStore with an existing connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the edge schema (called during DB setup).
    #[instrument(skip_all)]
    pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS friend_edges (
                pair_key TEXT PRIMARY KEY,
                requester_id TEXT NOT NULL,
                receiver_id TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        // Indexes for neighbor lookups
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_edges_requester ON friend_edges(requester_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_edges_receiver ON friend_edges(receiver_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_edges_status ON friend_edges(status)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Insert a new PENDING edge with `requester_id` as initiator.
    ///
    /// Fails with `Conflict` if any edge already exists for the unordered
    /// pair, regardless of direction or status.
    #[instrument(skip(self))]
    pub async fn insert(&self, requester_id: &str, receiver_id: &str) -> Result<FriendEdge> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO friend_edges (pair_key, requester_id, receiver_id, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(pair_key(requester_id, receiver_id))
        .bind(requester_id)
        .bind(receiver_id)
        .bind(FriendStatus::Pending.as_str())
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(FriendEdge {
                requester_id: requester_id.to_string(),
                receiver_id: receiver_id.to_string(),
                status: FriendStatus::Pending,
                created_at,
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(FriendGraphError::Conflict {
                    user_id: requester_id.to_string(),
                    peer_id: receiver_id.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the edge for the unordered pair `{a, b}`, if present.
    pub async fn find_edge(&self, a: &str, b: &str) -> Result<Option<FriendEdge>> {
        let row = sqlx::query_as::<_, (String, String, String, String)>(
            "SELECT requester_id, receiver_id, status, created_at
             FROM friend_edges WHERE pair_key = ?1",
        )
        .bind(pair_key(a, b))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(requester_id, receiver_id, status, created_at)| FriendEdge {
            requester_id,
            receiver_id,
            status: FriendStatus::parse(&status).unwrap_or(FriendStatus::Pending),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        }))
    }

    /// Exact-direction status transition, guarded by the current status.
    ///
    /// PENDING is the only non-terminal state, so the `status = 'pending'`
    /// clause doubles as the compare-and-swap against a concurrent decline or
    /// removal. Fails with `NotFound` if no matching directional PENDING row
    /// exists.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        requester_id: &str,
        receiver_id: &str,
        status: FriendStatus,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE friend_edges SET status = ?3
             WHERE requester_id = ?1 AND receiver_id = ?2 AND status = ?4",
        )
        .bind(requester_id)
        .bind(receiver_id)
        .bind(status.as_str())
        .bind(FriendStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(FriendGraphError::NotFound(format!(
                "pending request from {} to {}",
                requester_id, receiver_id
            )));
        }
        Ok(())
    }

    /// Delete the edge for the unordered pair `{a, b}` in any status.
    ///
    /// Idempotent: deleting an absent edge is not an error. Returns whether a
    /// row was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, a: &str, b: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM friend_edges WHERE pair_key = ?1")
            .bind(pair_key(a, b))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the exact-direction PENDING edge, if present.
    ///
    /// Idempotent: an absent or already-accepted edge is left untouched.
    /// Returns whether a row was removed.
    #[instrument(skip(self))]
    pub async fn delete_pending(&self, requester_id: &str, receiver_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM friend_edges
             WHERE requester_id = ?1 AND receiver_id = ?2 AND status = ?3",
        )
        .bind(requester_id)
        .bind(receiver_id)
        .bind(FriendStatus::Pending.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Peer ids of all edges with the given status where `user_id` is either
    /// endpoint. Finite, restartable per call.
    pub async fn neighbors(&self, user_id: &str, status: FriendStatus) -> Result<Vec<String>> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT CASE WHEN requester_id = ?1 THEN receiver_id ELSE requester_id END
             FROM friend_edges
             WHERE (requester_id = ?1 OR receiver_id = ?1) AND status = ?2",
        )
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Requester ids of PENDING edges addressed to `receiver_id`.
    pub async fn pending_requesters(&self, receiver_id: &str) -> Result<Vec<String>> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT requester_id FROM friend_edges WHERE receiver_id = ?1 AND status = ?2",
        )
        .bind(receiver_id)
        .bind(FriendStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Get total edge count.
    pub async fn edge_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM friend_edges")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
