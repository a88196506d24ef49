//! Pagination vocabulary for the read side.

use serde::{Deserialize, Serialize};

/// A requested page of results. Indexes are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// The first page at the default size.
    pub fn first() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.index as usize * self.size.max(1) as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of a larger result set, with the totals of the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub page_index: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Slice a fully materialized, already sorted result set.
    ///
    /// An out-of-range index yields an empty `items` while keeping the true
    /// totals of the full set.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let size = request.size.max(1) as u64;
        let total_elements = all.len() as u64;
        let total_pages = (total_elements + size - 1) / size;

        let items = all
            .into_iter()
            .skip(request.offset())
            .take(size as usize)
            .collect();

        Self {
            items,
            total_elements,
            page_index: request.index,
            total_pages: total_pages as u32,
        }
    }

    /// Transform the items while keeping the page shape.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_index: self.page_index,
            total_pages: self.total_pages,
        }
    }
}
