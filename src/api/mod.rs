mod client;
mod error;
mod types;

use std::fmt;

use async_trait::async_trait;

pub use client::OmdbClient;
pub use error::ApiError;
pub use types::{MovieDetail, MovieSummary, SearchPage, imdb_url};

/// OMDb API key. Never printed: `Debug` redacts it and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Remote source of search pages and detail records.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    /// Fetch one page of summaries. A term with no (more) matches yields an
    /// empty page, not an error.
    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage, ApiError>;

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ApiError>;
}
