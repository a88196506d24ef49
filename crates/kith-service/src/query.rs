//! Read-only friend views: friends list, incoming requests, suggestions.
//!
//! All views resolve edge-store neighbor sets through the user directory,
//! decorate each row with a mutual-friend count, and return sorted pages.
//! Sort policy: rating descending (missing ratings last), then mutual-friend
//! count descending. That ordering is a product default, not an engine
//! invariant.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use kith_graph::{EdgeStore, FriendStatus, Result};

use crate::directory::{matches_name_filter, UserDirectory, UserSummary};
use crate::page::{Page, PageRequest};

/// One row of a friends / requests / suggestions view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendView {
    pub user: UserSummary,
    pub mutual_friends: u64,
}

/// Read-only paginated views over the friend graph.
#[derive(Clone)]
pub struct FriendQueries {
    store: EdgeStore,
    directory: Arc<dyn UserDirectory>,
}

impl FriendQueries {
    pub fn new(store: EdgeStore, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// Accepted friends of `user_id`, name-filtered, sorted and paginated.
    ///
    /// An out-of-range page index returns an empty item list with the true
    /// totals of the filtered result set.
    pub async fn list_friends(
        &self,
        user_id: &str,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        let peers = self.store.neighbors(user_id, FriendStatus::Accepted).await?;
        let mut rows = Vec::with_capacity(peers.len());

        for peer in peers {
            let user = self.directory.get_user_summary(&peer).await?;
            if !matches_name_filter(&user.display_name, name_filter) {
                continue;
            }
            let mutual_friends = self.mutual_friend_count(user_id, &peer).await?;
            rows.push(FriendView {
                user,
                mutual_friends,
            });
        }

        sort_views(&mut rows);
        Ok(Page::from_vec(rows, page))
    }

    /// Distinct users with a pending request addressed to `user_id`.
    pub async fn list_incoming_requests(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        // De-duplicate defensively even though pair uniqueness should make
        // duplicates impossible.
        let requesters: BTreeSet<String> = self
            .store
            .pending_requesters(user_id)
            .await?
            .into_iter()
            .collect();

        let mut rows = Vec::with_capacity(requesters.len());
        for requester in requesters {
            let user = self.directory.get_user_summary(&requester).await?;
            let mutual_friends = self.mutual_friend_count(user_id, &requester).await?;
            rows.push(FriendView {
                user,
                mutual_friends,
            });
        }

        sort_views(&mut rows);
        Ok(Page::from_vec(rows, page))
    }

    /// Directory users who are not `user_id` and not an accepted friend.
    ///
    /// Users with a pending request to or from `user_id` stay visible; only
    /// accepted edges exclude. The directory pages in rating order; rating
    /// ties are broken by mutual-friend count within the page.
    pub async fn list_suggestions(
        &self,
        user_id: &str,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<FriendView>> {
        let mut exclude: HashSet<String> = self
            .store
            .neighbors(user_id, FriendStatus::Accepted)
            .await?
            .into_iter()
            .collect();
        exclude.insert(user_id.to_string());

        let summaries = self
            .directory
            .search_user_summaries(&exclude, name_filter, page)
            .await?;

        let Page {
            items,
            total_elements,
            page_index,
            total_pages,
        } = summaries;

        let mut rows = Vec::with_capacity(items.len());
        for user in items {
            let mutual_friends = self.mutual_friend_count(user_id, &user.id).await?;
            rows.push(FriendView {
                user,
                mutual_friends,
            });
        }
        sort_views(&mut rows);

        Ok(Page {
            items: rows,
            total_elements,
            page_index,
            total_pages,
        })
    }

    /// Number of users with an accepted edge to both `user_id` and
    /// `other_id`. Symmetric by construction: the intersection of the two
    /// accepted neighbor sets.
    pub async fn mutual_friend_count(&self, user_id: &str, other_id: &str) -> Result<u64> {
        let mine: HashSet<String> = self
            .store
            .neighbors(user_id, FriendStatus::Accepted)
            .await?
            .into_iter()
            .collect();
        let theirs = self.store.neighbors(other_id, FriendStatus::Accepted).await?;

        Ok(theirs.iter().filter(|id| mine.contains(*id)).count() as u64)
    }
}

/// Rating descending with missing ratings last, then mutual count descending,
/// then id for stable paging.
fn sort_views(rows: &mut [FriendView]) {
    rows.sort_by(|a, b| {
        let ra = a.user.rating.unwrap_or(f64::NEG_INFINITY);
        let rb = b.user.rating.unwrap_or(f64::NEG_INFINITY);
        rb.total_cmp(&ra)
            .then_with(|| b.mutual_friends.cmp(&a.mutual_friends))
            .then_with(|| a.user.id.cmp(&b.user.id))
    });
}
