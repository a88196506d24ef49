//! Kith Service - friend views and the caller-facing facade.
//!
//! This crate builds the read side and the entry point on top of
//! `kith-graph`:
//!
//! - **Directory**: the read-only seam to the external user directory
//! - **Page**: pagination vocabulary shared by all views
//! - **Query**: friends list, incoming requests, suggestions, mutual counts
//! - **Service**: id-validation facade, the only surface exposed to callers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kith_graph::EdgeStore;
//! use kith_service::{FriendService, PageRequest};
//!
//! let service = FriendService::new(EdgeStore::new(pool), directory);
//! service.send_request("alice", "bob").await?;
//! service.accept_request("bob", "alice").await?;
//! let friends = service.list_friends("alice", None, PageRequest::first()).await?;
//! ```

pub mod directory;
pub mod page;
pub mod query;
pub mod service;

// Re-export commonly used types
pub use directory::{InMemoryDirectory, UserDirectory, UserSummary};
pub use page::{Page, PageRequest};
pub use query::{FriendQueries, FriendView};
pub use service::FriendService;
