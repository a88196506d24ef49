//! Caller-facing facade over the engine and the query layer.
//!
//! The facade's only job is validation: every referenced user id must exist
//! in the directory before the call is delegated. Unknown ids are normalized
//! to a uniform `NotFound`; everything else passes through unchanged.

use std::sync::Arc;

use tracing::instrument;

use kith_graph::{EdgeStore, FriendEdge, FriendGraphError, RelationshipEngine, Result};

use crate::directory::UserDirectory;
use crate::page::{Page, PageRequest};
use crate::query::{FriendQueries, FriendView};

/// The single entry point exposed to callers of the friend subsystem.
#[derive(Clone)]
pub struct FriendService {
    engine: RelationshipEngine,
    queries: FriendQueries,
    directory: Arc<dyn UserDirectory>,
}

impl FriendService {
    pub fn new(store: EdgeStore, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            engine: RelationshipEngine::new(store.clone()),
            queries: FriendQueries::new(store, directory.clone()),
            directory,
        }
    }

    async fn ensure_user(&self, id: &str) -> Result<()> {
        if self.directory.user_exists(id).await? {
            Ok(())
        } else {
            Err(FriendGraphError::NotFound(format!("user {}", id)))
        }
    }

    #[instrument(skip(self))]
    pub async fn send_request(&self, requester_id: &str, receiver_id: &str) -> Result<FriendEdge> {
        self.ensure_user(requester_id).await?;
        self.ensure_user(receiver_id).await?;
        self.engine.send_request(requester_id, receiver_id).await
    }

    #[instrument(skip(self))]
    pub async fn accept_request(&self, receiver_id: &str, requester_id: &str) -> Result<()> {
        self.ensure_user(receiver_id).await?;
        self.ensure_user(requester_id).await?;
        self.engine.accept_request(receiver_id, requester_id).await
    }

    #[instrument(skip(self))]
    pub async fn decline_request(&self, receiver_id: &str, requester_id: &str) -> Result<()> {
        self.ensure_user(receiver_id).await?;
        self.ensure_user(requester_id).await?;
        self.engine.decline_request(receiver_id, requester_id).await
    }

    #[instrument(skip(self))]
    pub async fn remove_friend(&self, user_a: &str, user_b: &str) -> Result<()> {
        self.ensure_user(user_a).await?;
        self.ensure_user(user_b).await?;
        self.engine.remove_friend(user_a, user_b).await
    }

    pub async fn list_friends(
        &self,
        user_id: &str,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        self.ensure_user(user_id).await?;
        self.queries.list_friends(user_id, name_filter, page).await
    }

    pub async fn list_incoming_requests(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        self.ensure_user(user_id).await?;
        self.queries.list_incoming_requests(user_id, page).await
    }

    pub async fn list_suggestions(
        &self,
        user_id: &str,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        self.ensure_user(user_id).await?;
        self.queries
            .list_suggestions(user_id, name_filter, page)
            .await
    }

    pub async fn mutual_friend_count(&self, user_id: &str, other_id: &str) -> Result<u64> {
        self.ensure_user(user_id).await?;
        self.ensure_user(other_id).await?;
        self.queries.mutual_friend_count(user_id, other_id).await
    }
}
