use crate::api::{MovieDetail, MovieSummary};

/// Result list and detail record shown by the views.
///
/// Plain data: the search controller decides when the list is reset or
/// appended to, the store only does what it is told.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<MovieSummary>,
    detail: Option<MovieDetail>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_with_empty(&mut self) {
        self.results.clear();
    }

    /// Appends in arrival order; no dedup.
    pub fn append(&mut self, movies: Vec<MovieSummary>) {
        self.results.extend(movies);
    }

    pub fn set_detail(&mut self, detail: MovieDetail) {
        self.detail = Some(detail);
    }

    pub fn clear_detail(&mut self) {
        self.detail = None;
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn get(&self, index: usize) -> Option<&MovieSummary> {
        self.results.get(index)
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
