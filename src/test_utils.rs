//! Test data builders and a scripted gateway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, FetchGateway, MovieDetail, MovieSummary, SearchPage};
use crate::app::{App, View};
use crate::search::{MoreState, SearchController};
use crate::theme::{ResolvedTheme, ThemeVariant, default_for_variant};

pub struct MovieBuilder {
    imdb_id: String,
    title: String,
    year: String,
    kind: String,
    poster: Option<String>,
}

impl Default for MovieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl MovieBuilder {
    pub fn new() -> Self {
        Self {
            imdb_id: "tt0000001".to_string(),
            title: "Test Movie".to_string(),
            year: "1999".to_string(),
            kind: "movie".to_string(),
            poster: Some("https://example.com/poster.jpg".to_string()),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.imdb_id = id.to_string();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.year = year.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn no_poster(mut self) -> Self {
        self.poster = None;
        self
    }

    pub fn build(self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            kind: self.kind,
            poster: self.poster,
        }
    }
}

pub struct DetailBuilder {
    detail: MovieDetail,
}

impl Default for DetailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl DetailBuilder {
    pub fn new() -> Self {
        Self {
            detail: MovieDetail {
                imdb_id: "tt0000001".to_string(),
                title: "Test Movie".to_string(),
                year: "1999".to_string(),
                genre: Some("Drama".to_string()),
                director: Some("Jane Doe".to_string()),
                plot: Some("Something happens.".to_string()),
                writer: Some("John Roe".to_string()),
                poster: None,
                actors: None,
                runtime: None,
                rated: None,
                imdb_rating: None,
            },
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.detail.imdb_id = id.to_string();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.detail.title = title.to_string();
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.detail.year = year.to_string();
        self
    }

    pub fn director(mut self, director: &str) -> Self {
        self.detail.director = Some(director.to_string());
        self
    }

    pub fn plot(mut self, plot: &str) -> Self {
        self.detail.plot = Some(plot.to_string());
        self
    }

    pub fn poster(mut self, url: &str) -> Self {
        self.detail.poster = Some(url.to_string());
        self
    }

    pub fn build(self) -> MovieDetail {
        self.detail
    }
}

/// `n` distinct summaries: "Movie 1" (tt0000001) and so on.
pub fn movies(n: usize) -> Vec<MovieSummary> {
    (1..=n)
        .map(|i| {
            MovieBuilder::new()
                .id(&format!("tt{:07}", i))
                .title(&format!("Movie {}", i))
                .year(&(1990 + i % 30).to_string())
                .build()
        })
        .collect()
}

pub fn sample_movies() -> Vec<MovieSummary> {
    vec![
        MovieBuilder::new()
            .id("tt0096895")
            .title("Batman")
            .year("1989")
            .build(),
        MovieBuilder::new()
            .id("tt0103776")
            .title("Batman Returns")
            .year("1992")
            .build(),
        MovieBuilder::new()
            .id("tt0372784")
            .title("Batman Begins")
            .year("2005")
            .build(),
        MovieBuilder::new()
            .id("tt0118688")
            .title("Batman & Robin")
            .year("1997")
            .no_poster()
            .build(),
        MovieBuilder::new()
            .id("tt0103359")
            .title("Batman: The Animated Series")
            .year("1992–1995")
            .kind("series")
            .build(),
    ]
}

/// Gateway answering from a script. Unscripted pages come back empty,
/// like OMDb's "Movie not found!".
#[derive(Clone, Default)]
pub struct FakeGateway {
    pages: Arc<Mutex<HashMap<(String, u32), Result<SearchPage, ApiError>>>>,
    details: Arc<Mutex<HashMap<String, MovieDetail>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, term: &str, page: u32, movies: Vec<MovieSummary>) -> Self {
        self.pages.lock().unwrap().insert(
            (term.to_string(), page),
            Ok(SearchPage {
                movies,
                total_results: None,
            }),
        );
        self
    }

    pub fn failing_page(self, term: &str, page: u32, err: ApiError) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert((term.to_string(), page), Err(err));
        self
    }

    pub fn detail(self, detail: MovieDetail) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(detail.imdb_id.clone(), detail);
        self
    }

    /// Search calls in the order they were made.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchGateway for FakeGateway {
    async fn search_page(&self, term: &str, page: u32) -> Result<SearchPage, ApiError> {
        self.calls.lock().unwrap().push((term.to_string(), page));
        self.pages
            .lock()
            .unwrap()
            .get(&(term.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Ok(SearchPage::default()))
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ApiError> {
        self.details
            .lock()
            .unwrap()
            .get(imdb_id)
            .cloned()
            .ok_or_else(|| ApiError::Upstream("Incorrect IMDb ID.".into()))
    }
}

/// Wait for the next fetch to finish and apply it.
pub async fn settle(app: &mut App) {
    let result = app
        .result_rx
        .recv()
        .await
        .expect("a fetch was in flight");
    app.handle_async_result(result);
}

#[allow(dead_code)]
pub struct TestAppBuilder {
    view: View,
    movies: Vec<MovieSummary>,
    detail: Option<MovieDetail>,
    search: Option<SearchController>,
    selected_index: usize,
    error: Option<String>,
    show_help: bool,
    theme: ResolvedTheme,
    gateway: FakeGateway,
    viewport_height: Option<u16>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            view: View::Search,
            movies: Vec::new(),
            detail: None,
            search: None,
            selected_index: 0,
            error: None,
            show_help: false,
            theme: default_for_variant(ThemeVariant::Dark),
            gateway: FakeGateway::new(),
            viewport_height: None,
        }
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn with_movies(mut self, movies: Vec<MovieSummary>) -> Self {
        self.movies = movies;
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// A search for "Batman" already on page 1 with the given more-state.
    pub fn more(mut self, more: MoreState) -> Self {
        self.search = Some(SearchController::resumed("Batman", 1, more));
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn error(mut self, msg: &str) -> Self {
        self.error = Some(msg.to_string());
        self
    }

    pub fn show_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn theme(mut self, theme: ResolvedTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn gateway(mut self, gateway: FakeGateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn build(self) -> App {
        let mut app = App::new(self.theme, Arc::new(self.gateway));

        // Prefilled lists belong to an exhausted search unless told otherwise,
        // so plain view tests never spawn fetches.
        app.search = match self.search {
            Some(search) => search,
            None if !self.movies.is_empty() => {
                SearchController::resumed("Batman", 1, MoreState::Exhausted)
            }
            None => SearchController::new(),
        };
        app.store.append(self.movies);
        if let Some(detail) = self.detail {
            app.store.set_detail(detail);
        }
        app.view = self.view;
        app.selected_index = self.selected_index;
        app.error = self.error;
        app.show_help = self.show_help;
        app.viewport_height = self.viewport_height;
        app
    }
}
