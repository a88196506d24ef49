//! Relationship lifecycle engine.
//!
//! The `RelationshipEngine` is the sole mutator of the edge store. It enforces
//! the lifecycle: no edge → PENDING (send) → ACCEPTED (accept) → no edge
//! (remove), with PENDING → no edge via decline. No other transition exists.

use tracing::debug;

use crate::error::{FriendGraphError, Result};
use crate::schema::{FriendEdge, FriendStatus};
use crate::storage::EdgeStore;

/// Enforces friendship lifecycle rules on top of the edge store.
#[derive(Clone)]
pub struct RelationshipEngine {
    store: EdgeStore,
}

impl RelationshipEngine {
    pub fn new(store: EdgeStore) -> Self {
        Self { store }
    }

    /// Send a friend request from `requester_id` to `receiver_id`.
    ///
    /// Fails with `InvalidOperation` for a self-addressed request and with
    /// `Conflict` when any edge already exists between the two, pending or
    /// accepted, in either direction. Persistence is the only side effect;
    /// notifying the receiver is a collaborator's concern.
    pub async fn send_request(&self, requester_id: &str, receiver_id: &str) -> Result<FriendEdge> {
        if requester_id == receiver_id {
            return Err(FriendGraphError::InvalidOperation(
                "cannot send a friend request to yourself".to_string(),
            ));
        }

        let edge = self.store.insert(requester_id, receiver_id).await?;
        debug!("friend request stored: {} -> {}", requester_id, receiver_id);
        Ok(edge)
    }

    /// Accept the pending request from `requester_id`, acting as
    /// `receiver_id`.
    ///
    /// Only the designated receiver can accept; a missing edge, a wrong
    /// direction, or a non-PENDING status all surface as `NotFound`, so the
    /// engine never leaks whether a request addressed to someone else exists.
    pub async fn accept_request(&self, receiver_id: &str, requester_id: &str) -> Result<()> {
        self.store
            .set_status(requester_id, receiver_id, FriendStatus::Accepted)
            .await?;
        debug!("friend request accepted: {} -> {}", requester_id, receiver_id);
        Ok(())
    }

    /// Decline the pending request from `requester_id`, acting as
    /// `receiver_id`.
    ///
    /// Idempotent: an absent request is a silent no-op, since "already
    /// declined" is not user-visible state.
    pub async fn decline_request(&self, receiver_id: &str, requester_id: &str) -> Result<()> {
        let removed = self.store.delete_pending(requester_id, receiver_id).await?;
        if removed {
            debug!("friend request declined: {} -> {}", requester_id, receiver_id);
        }
        Ok(())
    }

    /// Remove any edge between the unordered pair, pending or accepted.
    ///
    /// Callable by either endpoint; idempotent.
    pub async fn remove_friend(&self, user_a: &str, user_b: &str) -> Result<()> {
        let removed = self.store.delete(user_a, user_b).await?;
        if removed {
            debug!("friendship removed: {} / {}", user_a, user_b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        EdgeStore::init_schema(&pool).await.unwrap();
        pool
    }

    async fn setup_engine() -> (RelationshipEngine, EdgeStore) {
        let store = EdgeStore::new(setup_test_db().await);
        (RelationshipEngine::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_self_request_is_invalid() {
        let (engine, _) = setup_engine().await;

        let result = engine.send_request("alice", "alice").await;
        assert!(matches!(
            result,
            Err(FriendGraphError::InvalidOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_send_then_accept() {
        let (engine, store) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();
        let edge = store.find_edge("alice", "bob").await.unwrap().unwrap();
        assert_eq!(edge.status, FriendStatus::Pending);

        engine.accept_request("bob", "alice").await.unwrap();
        let edge = store.find_edge("alice", "bob").await.unwrap().unwrap();
        assert_eq!(edge.status, FriendStatus::Accepted);
    }

    #[tokio::test]
    async fn test_duplicate_request_conflicts_both_directions() {
        let (engine, _) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();

        assert!(matches!(
            engine.send_request("alice", "bob").await,
            Err(FriendGraphError::Conflict { .. })
        ));
        assert!(matches!(
            engine.send_request("bob", "alice").await,
            Err(FriendGraphError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_only_receiver_may_accept() {
        let (engine, store) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();

        // alice is the requester; accepting as alice matches no row
        let wrong = engine.accept_request("alice", "bob").await;
        assert!(matches!(wrong, Err(FriendGraphError::NotFound(_))));

        let edge = store.find_edge("alice", "bob").await.unwrap().unwrap();
        assert_eq!(edge.status, FriendStatus::Pending);
    }

    #[tokio::test]
    async fn test_decline_is_idempotent() {
        let (engine, store) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();

        engine.decline_request("bob", "alice").await.unwrap();
        assert!(store.find_edge("alice", "bob").await.unwrap().is_none());

        // Declining again, or declining a pair that never existed, is a no-op
        engine.decline_request("bob", "alice").await.unwrap();
        engine.decline_request("bob", "carol").await.unwrap();
    }

    #[tokio::test]
    async fn test_accept_after_decline_is_not_found() {
        let (engine, _) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();
        engine.decline_request("bob", "alice").await.unwrap();

        let result = engine.accept_request("bob", "alice").await;
        assert!(matches!(result, Err(FriendGraphError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_friend_from_either_side() {
        let (engine, store) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();
        engine.accept_request("bob", "alice").await.unwrap();

        // receiver removes
        engine.remove_friend("bob", "alice").await.unwrap();
        assert!(store.find_edge("alice", "bob").await.unwrap().is_none());

        engine.send_request("alice", "bob").await.unwrap();
        engine.accept_request("bob", "alice").await.unwrap();

        // requester removes
        engine.remove_friend("alice", "bob").await.unwrap();
        assert!(store.find_edge("alice", "bob").await.unwrap().is_none());

        // idempotent
        engine.remove_friend("alice", "bob").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_friend_also_withdraws_pending() {
        let (engine, store) = setup_engine().await;

        engine.send_request("alice", "bob").await.unwrap();
        engine.remove_friend("alice", "bob").await.unwrap();
        assert!(store.find_edge("alice", "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_requests_store_one_edge() {
        let (engine, store) = setup_engine().await;

        let (a, b, c) = tokio::join!(
            engine.send_request("alice", "bob"),
            engine.send_request("bob", "alice"),
            engine.send_request("alice", "bob"),
        );

        let results = [a, b, c];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(FriendGraphError::Conflict { .. })))
            .count();

        assert_eq!(ok, 1);
        assert_eq!(conflicts, 2);
        assert_eq!(store.edge_count().await.unwrap(), 1);
    }
}
