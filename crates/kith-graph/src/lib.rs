//! Kith Graph - friend relationship storage and lifecycle.
//!
//! This crate owns the edges of the social graph: who requested whom, and
//! whether the pair is pending or accepted. It includes:
//!
//! - **Schema**: edge and status types, plus the canonical unordered-pair key
//! - **Storage**: SQLite-backed edge persistence with atomic pair uniqueness
//! - **Engine**: lifecycle rules (request, accept, decline, remove)
//!
//! User profiles live elsewhere; this crate only stores and reasons about
//! edges between opaque user identifiers.
//!
//! # Example
//!
//! ```ignore
//! use kith_graph::{EdgeStore, RelationshipEngine};
//!
//! let store = EdgeStore::new(pool);
//! let engine = RelationshipEngine::new(store.clone());
//!
//! engine.send_request("alice", "bob").await?;
//! engine.accept_request("bob", "alice").await?;
//! let friends = store.neighbors("alice", FriendStatus::Accepted).await?;
//! ```

pub mod engine;
pub mod error;
pub mod schema;
pub mod storage;

// Re-export commonly used types
pub use engine::RelationshipEngine;
pub use error::{FriendGraphError, Result};
pub use schema::{pair_key, FriendEdge, FriendStatus};
pub use storage::EdgeStore;
