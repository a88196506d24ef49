//! Schema definitions for the friend graph.
//!
//! This module defines the core types for friend relationships:
//! - `FriendStatus`: lifecycle state of an edge
//! - `FriendEdge`: a stored relationship between two user ids
//! - `pair_key`: the canonical unordered-pair key used for uniqueness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a friend edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    /// Request sent, awaiting the receiver's decision. The edge is
    /// directional: only the receiver may accept or decline it.
    Pending,
    /// Both sides are friends. The edge is logically undirected; the stored
    /// direction only records which side initiated the request.
    Accepted,
}

impl FriendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendStatus::Pending => "pending",
            FriendStatus::Accepted => "accepted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(FriendStatus::Pending),
            "accepted" => Some(FriendStatus::Accepted),
            _ => None,
        }
    }
}

/// Canonical storage key for the unordered pair `{a, b}`.
///
/// `(A, B)` and `(B, A)` map to the same key, which is what enforces the
/// one-edge-per-pair invariant at the storage layer.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}:{}", a, b)
    } else {
        format!("{}:{}", b, a)
    }
}

/// A stored friend edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendEdge {
    /// The user who sent the original request.
    pub requester_id: String,
    /// The user the request was addressed to.
    pub receiver_id: String,
    pub status: FriendStatus,
    /// Set once at creation, never updated.
    pub created_at: DateTime<Utc>,
}

impl FriendEdge {
    /// The other endpoint, if `user_id` is one of the two.
    pub fn peer_of(&self, user_id: &str) -> Option<&str> {
        if self.requester_id == user_id {
            Some(&self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(&self.requester_id)
        } else {
            None
        }
    }

    /// The canonical unordered key for this edge.
    pub fn pair_key(&self) -> String {
        pair_key(&self.requester_id, &self.receiver_id)
    }
}
