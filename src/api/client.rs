use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::types::{DetailResponse, MovieDetail, SearchPage, SearchResponse};
use super::{ApiError, Credential, FetchGateway};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Credential,
}

impl OmdbClient {
    pub fn new(api_key: Credential, base_url: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.base_url)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("apikey", self.api_key.expose())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(
                status.as_u16(),
                status.canonical_reason().unwrap_or("").into(),
            ));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FetchGateway for OmdbClient {
    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage, ApiError> {
        debug!(term, page, "OMDb search");
        let page_param = page.to_string();
        let response: SearchResponse = self.get(&[("s", term), ("page", &page_param)]).await?;
        response.into_page()
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ApiError> {
        debug!(imdb_id, "OMDb detail");
        let response: DetailResponse = self.get(&[("i", imdb_id), ("plot", "full")]).await?;
        response.into_detail(imdb_id)
    }
}
