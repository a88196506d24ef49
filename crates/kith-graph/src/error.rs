//! Error types for the friend graph.
//!
//! All fallible operations in this crate (and the crates built on it) return
//! [`Result<T>`] with the [`FriendGraphError`] taxonomy, so callers can match
//! on the failure kind instead of parsing messages.

use thiserror::Error;

/// Failure modes of the friend graph.
#[derive(Debug, Error)]
pub enum FriendGraphError {
    /// The operation is not expressible, e.g. a self-addressed request.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An edge already exists between the two users, in either direction and
    /// in any status.
    #[error("a relationship between {user_id} and {peer_id} already exists")]
    Conflict { user_id: String, peer_id: String },

    /// A referenced user does not exist, or a directional edge is not in the
    /// state the caller may act on.
    #[error("{0} not found")]
    NotFound(String),

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, FriendGraphError>;
