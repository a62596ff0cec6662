//! Incremental tag pagination.
//!
//! Each fetch is issued a [`Ticket`]. Restarting the feed bumps the generation,
//! so responses to superseded fetches are dropped instead of being appended
//! out of order.

use crate::models::{PaginationParams, TagPage};

/// Where the feed is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// Nothing requested yet.
    Idle,
    /// A fetch for `page` is outstanding.
    Loading { page: u32 },
    /// At least one page applied and more may exist.
    Accumulating,
    /// The last page applied was not full.
    Exhausted,
}

/// Handle for one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    page: u32,
}

impl Ticket {
    /// Zero-based page this ticket fetches.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self, page_size: u32) -> PaginationParams {
        PaginationParams::new(Some(i64::from(self.page)), Some(i64::from(page_size)))
    }
}

/// Accumulated tags for one repository.
#[derive(Debug, Clone)]
pub struct TagFeed {
    generation: u64,
    page: u32,
    tags: Vec<String>,
    state: FeedState,
}

impl Default for TagFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl TagFeed {
    pub fn new() -> Self {
        Self {
            generation: 0,
            page: 0,
            tags: Vec::new(),
            state: FeedState::Idle,
        }
    }

    /// Clear everything and request page 0, superseding any outstanding fetch.
    pub fn start(&mut self) -> Ticket {
        self.generation += 1;
        self.page = 0;
        self.tags.clear();
        self.issue()
    }

    /// Request the next page. Ignored while a fetch is outstanding or once exhausted.
    pub fn load_more(&mut self) -> Option<Ticket> {
        match self.state {
            FeedState::Accumulating => {
                self.page += 1;
                Some(self.issue())
            }
            FeedState::Idle | FeedState::Loading { .. } | FeedState::Exhausted => None,
        }
    }

    /// Append a fetched page. Returns `false` if the ticket was superseded.
    pub fn apply(&mut self, ticket: Ticket, page: TagPage) -> bool {
        let current = ticket.generation == self.generation
            && self.state == FeedState::Loading { page: ticket.page };
        if !current {
            tracing::debug!("Dropping stale tag page {}", ticket.page());
            return false;
        }
        self.tags.extend(page.tags);
        self.state = if page.has_more {
            FeedState::Accumulating
        } else {
            FeedState::Exhausted
        };
        true
    }

    #[cfg(test)]
    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of pages whose results have been applied.
    pub fn pages_loaded(&self) -> u32 {
        match self.state {
            FeedState::Idle => 0,
            FeedState::Loading { page } => page,
            FeedState::Accumulating | FeedState::Exhausted => self.page + 1,
        }
    }

    /// Whether the load-more control should be shown.
    pub fn has_more(&self) -> bool {
        self.state == FeedState::Accumulating
    }

    fn issue(&mut self) -> Ticket {
        self.state = FeedState::Loading { page: self.page };
        Ticket {
            generation: self.generation,
            page: self.page,
        }
    }
}
