//! Feed composition - scopes and pagination.
//!
//! Every feed is the same ordered query (posts, newest publish timestamp
//! first) narrowed by a [`FeedScope`]. Pagination is fixed at 10 posts
//! per page; a requested page number outside the valid range clamps to
//! the nearest valid page.

use serde::Serialize;
use uuid::Uuid;

/// Fixed number of posts per feed page.
pub const PAGE_SIZE: u64 = 10;

/// Which slice of the post table a feed shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// All posts; `keyword` filters to posts whose text contains it
    /// (case-sensitive substring match).
    Global { keyword: Option<String> },
    /// Posts belonging to one group.
    Group { group_id: Uuid },
    /// Posts authored by one user.
    Profile { author_id: Uuid },
    /// Posts authored by anyone the viewer follows.
    Following { viewer_id: Uuid },
}

/// A 1-based page number as requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
}

impl PageRequest {
    /// Build from the raw `page` query parameter. Absent or zero means
    /// the first page.
    pub fn new(number: Option<u64>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
        }
    }

    pub fn first() -> Self {
        Self { number: 1 }
    }

    /// Lenient parse of the raw query-string value. Anything that is
    /// not a positive integer means the first page, never an error.
    pub fn parse(raw: Option<&str>) -> Self {
        Self::new(raw.and_then(|s| s.parse().ok()))
    }

    /// Clamp against the total item count, yielding the window to fetch.
    pub fn resolve(self, total: u64) -> ResolvedPage {
        let num_pages = (total.div_ceil(PAGE_SIZE)).max(1);
        let number = self.number.min(num_pages);
        ResolvedPage {
            number,
            num_pages,
            total,
            offset: (number - 1) * PAGE_SIZE,
            limit: PAGE_SIZE,
        }
    }
}

/// A clamped page: the actual window a repository should fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// One page of feed items plus its position within the feed.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, resolved: ResolvedPage) -> Self {
        Self {
            items,
            number: resolved.number,
            num_pages: resolved.num_pages,
            total: resolved.total,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
        }
    }
}
