//! User directory seam.
//!
//! The friend graph does not own user profiles; it only references user
//! identifiers. This module defines the read-only directory interface the
//! query layer and facade consume, plus an in-memory implementation that
//! doubles as the reference for the search semantics.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kith_graph::{FriendGraphError, Result};

use crate::page::{Page, PageRequest};

/// Denormalized display fields for one user, as the directory exposes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub display_name: String,
    pub rating: Option<f64>,
    pub avatar_path: Option<String>,
}

impl UserSummary {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            rating: None,
            avatar_path: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Read-only interface to the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, id: &str) -> Result<bool>;

    /// Fails with `NotFound` for an unknown id.
    async fn get_user_summary(&self, id: &str) -> Result<UserSummary>;

    /// Search users by display name, excluding the given ids.
    ///
    /// The filter is a case-insensitive substring match; `None` or an empty
    /// string matches everyone. Results are sorted by rating descending
    /// (missing ratings last), then id ascending for stable paging.
    async fn search_user_summaries(
        &self,
        exclude: &HashSet<String>,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>>;
}

/// Whether a display name passes the (optional) substring filter.
pub(crate) fn matches_name_filter(display_name: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) if f.is_empty() => true,
        Some(f) => display_name.to_lowercase().contains(&f.to_lowercase()),
    }
}

/// A `HashMap`-backed directory, usable both embedded and as a test fixture.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, UserSummary>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: UserSummary) {
        self.users.insert(summary.id.clone(), summary);
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn user_exists(&self, id: &str) -> Result<bool> {
        Ok(self.users.contains_key(id))
    }

    async fn get_user_summary(&self, id: &str) -> Result<UserSummary> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| FriendGraphError::NotFound(format!("user {}", id)))
    }

    async fn search_user_summaries(
        &self,
        exclude: &HashSet<String>,
        name_filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserSummary>> {
        let mut matches: Vec<UserSummary> = self
            .users
            .values()
            .filter(|u| !exclude.contains(&u.id))
            .filter(|u| matches_name_filter(&u.display_name, name_filter))
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            let ra = a.rating.unwrap_or(f64::NEG_INFINITY);
            let rb = b.rating.unwrap_or(f64::NEG_INFINITY);
            rb.total_cmp(&ra).then_with(|| a.id.cmp(&b.id))
        });

        Ok(Page::from_vec(matches, page))
    }
}
