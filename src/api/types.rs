use serde::Deserialize;

use super::ApiError;

/// OMDb's answer for a term (or a page past the end) that matches nothing.
const NOT_FOUND: &str = "Movie not found!";

/// Wire format of `?s=TERM&page=N`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    pub response: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItem {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub poster: Option<String>,
}

/// Wire format of `?i=ID`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailResponse {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    pub response: String,
    pub error: Option<String>,
}

/// OMDb fills unknown fields with "N/A".
fn known(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "N/A")
}

fn is_true(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub kind: String,
    pub poster: Option<String>,
}

impl MovieSummary {
    pub fn from_item(item: SearchItem) -> Self {
        MovieSummary {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            kind: item.kind,
            poster: known(item.poster),
        }
    }

    pub fn imdb_url(&self) -> String {
        imdb_url(&self.imdb_id)
    }
}

pub fn imdb_url(imdb_id: &str) -> String {
    format!("https://www.imdb.com/title/{}/", imdb_id)
}

/// A page of search results. Empty means the upstream set is exhausted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub movies: Vec<MovieSummary>,
    pub total_results: Option<u32>,
}

impl SearchResponse {
    pub fn into_page(self) -> Result<SearchPage, ApiError> {
        if !is_true(&self.response) {
            return match self.error {
                Some(msg) if msg == NOT_FOUND => Ok(SearchPage::default()),
                Some(msg) => Err(ApiError::Upstream(msg)),
                None => Err(ApiError::Upstream("Unknown error".into())),
            };
        }

        Ok(SearchPage {
            movies: self
                .search
                .into_iter()
                .map(MovieSummary::from_item)
                .collect(),
            total_results: self.total_results.and_then(|t| t.parse().ok()),
        })
    }
}

/// Full record for a single title.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub writer: Option<String>,
    pub poster: Option<String>,
    pub actors: Option<String>,
    pub runtime: Option<String>,
    pub rated: Option<String>,
    pub imdb_rating: Option<String>,
}

impl MovieDetail {
    pub fn imdb_url(&self) -> String {
        imdb_url(&self.imdb_id)
    }
}

impl DetailResponse {
    /// `requested_id` fills in for a response that omits `imdbID`.
    pub fn into_detail(self, requested_id: &str) -> Result<MovieDetail, ApiError> {
        if !is_true(&self.response) {
            return Err(ApiError::Upstream(
                self.error.unwrap_or_else(|| "Unknown error".into()),
            ));
        }
        let title = self
            .title
            .ok_or_else(|| ApiError::Parse("detail response has no Title".into()))?;

        Ok(MovieDetail {
            imdb_id: self.imdb_id.unwrap_or_else(|| requested_id.to_string()),
            title,
            year: self.year.unwrap_or_default(),
            genre: known(self.genre),
            director: known(self.director),
            plot: known(self.plot),
            writer: known(self.writer),
            poster: known(self.poster),
            actors: known(self.actors),
            runtime: known(self.runtime),
            rated: known(self.rated),
            imdb_rating: known(self.imdb_rating),
        })
    }
}
