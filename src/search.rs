//! Paginated search state machine.
//!
//! A search session starts with a submit and walks pages 1, 2, 3, ... until
//! a page comes back empty or fails. Every request carries the generation
//! it was issued under; completions from an older generation are dropped so
//! a slow response for an abandoned term can't leak into the new list.

use crate::api::{ApiError, SearchPage};
use crate::store::ResultStore;

/// Commands the presentation layer may issue.
pub trait SearchCommands {
    /// Start a new search: empty the list, reset to page 1, fetch it.
    fn submit_search(&mut self, term: &str);
    /// Fetch the next page, if more results are known to exist.
    fn advance_page(&mut self);
    /// Empty the result list. Leaves term and page alone.
    fn clear(&mut self);
    /// Fetch the detail record for one title.
    fn request_detail(&mut self, imdb_id: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
        }
    }
}

/// Whether the upstream has pages we haven't fetched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoreState {
    /// A new search is waiting for its first page.
    Unknown,
    /// The last page was non-empty.
    Available,
    /// The last page was empty or failed, or nothing was searched yet.
    #[default]
    Exhausted,
}

/// A page fetch to be issued, tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub term: String,
    pub page: u32,
    pub generation: u64,
}

#[derive(Debug, PartialEq)]
pub enum Completion {
    /// The page was merged; 0 means the result set is exhausted.
    Appended(usize),
    Failed(ApiError),
    /// Belongs to an abandoned search or page; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchController {
    query: SearchQuery,
    more: MoreState,
    generation: u64,
    page_in_flight: bool,
    total_results: Option<u32>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn more(&self) -> MoreState {
        self.more
    }

    pub fn has_more(&self) -> bool {
        self.more == MoreState::Available
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_searched(&self) -> bool {
        self.generation > 0
    }

    pub fn total_results(&self) -> Option<u32> {
        self.total_results
    }

    pub fn is_page_in_flight(&self) -> bool {
        self.page_in_flight
    }

    /// True when a sentinel hit should turn into a page fetch.
    pub fn can_advance(&self) -> bool {
        self.has_more() && !self.page_in_flight
    }

    pub fn clear(&self, store: &mut ResultStore) {
        store.replace_with_empty();
    }

    /// Starts a new session. The list is emptied here, before the first
    /// page is even requested.
    pub fn submit(&mut self, store: &mut ResultStore, term: &str) -> PageRequest {
        store.replace_with_empty();
        self.generation += 1;
        self.query = SearchQuery {
            term: term.to_string(),
            page: 1,
        };
        self.more = MoreState::Unknown;
        self.total_results = None;
        self.page_in_flight = true;
        self.request()
    }

    /// Next page, or `None` without touching the cursor.
    pub fn advance(&mut self) -> Option<PageRequest> {
        if !self.can_advance() {
            return None;
        }
        self.query.page += 1;
        self.page_in_flight = true;
        Some(self.request())
    }

    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation && request.page == self.query.page
    }

    /// Merges a finished page fetch.
    pub fn complete(
        &mut self,
        store: &mut ResultStore,
        request: &PageRequest,
        result: Result<SearchPage, ApiError>,
    ) -> Completion {
        if !self.is_current(request) {
            return Completion::Stale;
        }
        self.page_in_flight = false;

        match result {
            Ok(page) => {
                let count = page.movies.len();
                if page.total_results.is_some() {
                    self.total_results = page.total_results;
                }
                store.append(page.movies);
                self.more = if count > 0 {
                    MoreState::Available
                } else {
                    MoreState::Exhausted
                };
                Completion::Appended(count)
            }
            Err(err) => {
                // Never Available after a failure, or the trigger would retry forever.
                self.more = MoreState::Exhausted;
                Completion::Failed(err)
            }
        }
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            term: self.query.term.clone(),
            page: self.query.page,
            generation: self.generation,
        }
    }

    #[cfg(test)]
    pub fn resumed(term: &str, page: u32, more: MoreState) -> Self {
        Self {
            query: SearchQuery {
                term: term.to_string(),
                page,
            },
            more,
            generation: 1,
            page_in_flight: false,
            total_results: None,
        }
    }
}
