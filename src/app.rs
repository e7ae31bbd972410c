use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler as _;

use crate::api::{ApiError, FetchGateway, MovieDetail, SearchPage, imdb_url};
use crate::loading::{InFlight, OperationKind};
use crate::scroll::{ScrollTrigger, Sentinel};
use crate::search::{Completion, PageRequest, SearchCommands, SearchController};
use crate::store::ResultStore;
use crate::theme::ResolvedTheme;
use crate::views;

pub enum AsyncResult {
    Page {
        request: PageRequest,
        task_id: u64,
        result: Result<SearchPage, ApiError>,
    },
    Detail {
        imdb_id: String,
        task_id: u64,
        result: Result<MovieDetail, ApiError>,
    },
}

#[derive(Debug)]
pub struct TaskInfo {
    pub id: u64,
    pub kind: OperationKind,
    pub description: String,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct LogEntry {
    pub message: String,
}

/// Debug panel state: task tracking and log messages.
#[derive(Debug, Default)]
pub struct DebugState {
    pub visible: bool,
    pub running_tasks: Vec<TaskInfo>,
    pub log: VecDeque<LogEntry>,
    next_task_id: u64,
}

impl DebugState {
    const MAX_LOG_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push_back(LogEntry {
            message: msg.into(),
        });
        if self.log.len() > Self::MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn start_task(&mut self, kind: OperationKind, description: impl Into<String>) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        let desc = description.into();
        self.log(format!("Started: {}", desc));
        self.running_tasks.push(TaskInfo {
            id,
            kind,
            description: desc,
            started_at: Instant::now(),
        });
        id
    }

    pub fn end_task(&mut self, id: u64, outcome: &str) {
        if let Some(pos) = self.running_tasks.iter().position(|t| t.id == id) {
            let task = self.running_tasks.remove(pos);
            let elapsed = task.started_at.elapsed();
            self.log(format!("{} {}: {:.2?}", task.description, outcome, elapsed));
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Search,
    Detail {
        imdb_id: String,
        result_index: usize,
        result_scroll: usize,
    },
}

/// Which part of the search view receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    FocusInput,
    FocusResults,
    EditInput(KeyEvent),
    SubmitSearch,
    Rerun,
    OpenDetail,
    Back,
    OpenImdb,
    OpenPoster,
    ToggleHelp,
    ToggleDebug,
    Quit,
    UpdateViewportHeight(u16),
    UpdateViewportWidth(u16),
}

pub struct App {
    pub view: View,
    pub focus: Focus,
    pub input: Input,
    pub store: ResultStore,
    pub search: SearchController,
    pub trigger: ScrollTrigger,
    pub in_flight: InFlight,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub detail_scroll: u16,
    pub error: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub gateway: Arc<dyn FetchGateway>,
    pub theme: ResolvedTheme,
    // Async task management
    pub result_tx: mpsc::Sender<AsyncResult>,
    pub result_rx: mpsc::Receiver<AsyncResult>,
    // Debug pane
    pub debug: DebugState,
    // Viewport tracking for sentinel visibility
    pub viewport_height: Option<u16>,
    pub viewport_width: Option<u16>,
}

impl App {
    /// Rows outside the result list: search box (3), list borders (2), status bar (1).
    const LAYOUT_OVERHEAD: u16 = 6;
    const RESULT_HEIGHT: u16 = 2;
    pub const DEBUG_PANE_HEIGHT: u16 = 10;
    const PAGE_JUMP: usize = 10;
    const DETAIL_OVERHEAD: u16 = 3;
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new(theme: ResolvedTheme, gateway: Arc<dyn FetchGateway>) -> Self {
        let (result_tx, result_rx) = mpsc::channel(10);
        Self {
            view: View::default(),
            focus: Focus::default(),
            input: Input::default(),
            store: ResultStore::new(),
            search: SearchController::new(),
            trigger: ScrollTrigger::new(),
            in_flight: InFlight::new(),
            selected_index: 0,
            scroll_offset: 0,
            detail_scroll: 0,
            error: None,
            should_quit: false,
            show_help: false,
            gateway,
            theme,
            result_tx,
            result_rx,
            debug: DebugState::new(),
            viewport_height: None,
            viewport_width: None,
        }
    }

    /// Session start: guarantees an empty list before anything renders.
    pub fn init(&mut self, initial_term: Option<&str>) {
        self.clear();
        if let Some(term) = initial_term {
            self.input = Input::new(term.to_string());
            self.focus = Focus::Results;
            self.submit_search(term);
        }
    }

    /// Session end: stop observing and drop everything fetched.
    pub fn teardown(&mut self) {
        self.trigger.disconnect();
        self.store.replace_with_empty();
        self.store.clear_detail();
        self.result_rx.close();
        debug!(
            pending = self.debug.running_tasks.len(),
            "session torn down"
        );
    }

    pub fn is_loading(&self, kind: OperationKind) -> bool {
        self.in_flight.is_loading(kind)
    }

    pub fn handle_async_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Page {
                request,
                task_id,
                result,
            } => {
                self.in_flight.finish(OperationKind::Search);
                match self.search.complete(&mut self.store, &request, result) {
                    Completion::Stale => {
                        debug!(
                            term = %request.term,
                            page = request.page,
                            generation = request.generation,
                            "discarding stale page"
                        );
                        self.debug.end_task(task_id, "discarded (stale)");
                    }
                    Completion::Appended(count) => {
                        debug!(term = %request.term, page = request.page, count, "page merged");
                        self.debug.end_task(task_id, "completed");
                    }
                    Completion::Failed(err) => {
                        warn!(term = %request.term, page = request.page, error = %err, "page fetch failed");
                        self.debug.end_task(task_id, "failed");
                        self.error = Some(err.user_message());
                    }
                }
            }
            AsyncResult::Detail {
                imdb_id,
                task_id,
                result,
            } => {
                self.in_flight.finish(OperationKind::Detail);
                let is_current =
                    matches!(&self.view, View::Detail { imdb_id: id, .. } if *id == imdb_id);
                if !is_current {
                    self.debug.end_task(task_id, "discarded (wrong view)");
                    return;
                }
                match result {
                    Ok(detail) => {
                        self.debug.end_task(task_id, "completed");
                        self.store.set_detail(detail);
                    }
                    Err(err) => {
                        warn!(imdb_id = %imdb_id, error = %err, "detail fetch failed");
                        self.debug.end_task(task_id, "failed");
                        self.error = Some(err.user_message());
                    }
                }
            }
        }
        self.sync_scroll_trigger();
    }

    pub fn update(&mut self, msg: Message) {
        if !matches!(
            msg,
            Message::UpdateViewportHeight(_) | Message::UpdateViewportWidth(_)
        ) {
            self.error = None;
        }

        match msg {
            Message::SelectNext => self.select_next(),
            Message::SelectPrev => self.select_prev(),
            Message::SelectFirst => self.select_first(),
            Message::SelectLast => self.select_last(),
            Message::PageDown => self.page_down(),
            Message::PageUp => self.page_up(),
            Message::FocusInput => self.focus = Focus::Input,
            Message::FocusResults => self.focus = Focus::Results,
            Message::EditInput(key) => {
                self.input.handle_event(&CrosstermEvent::Key(key));
            }
            Message::SubmitSearch => {
                let term = self.input.value().to_string();
                self.focus = Focus::Results;
                self.submit_search(&term);
            }
            Message::Rerun => self.rerun(),
            Message::OpenDetail => self.open_detail(),
            Message::Back => self.go_back(),
            Message::OpenImdb => self.open_imdb(),
            Message::OpenPoster => self.open_poster(),
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::ToggleDebug => {
                self.debug.toggle();
                self.ensure_selection_visible();
            }
            Message::Quit => self.should_quit = true,
            Message::UpdateViewportHeight(height) => {
                self.viewport_height = Some(height);
                self.ensure_selection_visible();
                self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
            }
            Message::UpdateViewportWidth(width) => {
                self.viewport_width = Some(width);
                self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
            }
        }

        self.sync_scroll_trigger();
    }

    /// The row the scroll trigger watches: the last result, while the list is shown.
    pub fn sentinel(&self) -> Option<Sentinel> {
        if !matches!(self.view, View::Search) || self.store.is_empty() {
            return None;
        }
        Some(Sentinel {
            generation: self.search.generation(),
            index: self.store.len() - 1,
        })
    }

    pub fn visible_result_capacity(&self) -> usize {
        let debug_pane = if self.debug.visible {
            Self::DEBUG_PANE_HEIGHT
        } else {
            0
        };
        self.viewport_height
            .map(|h| {
                (h.saturating_sub(Self::LAYOUT_OVERHEAD + debug_pane) / Self::RESULT_HEIGHT)
                    as usize
            })
            .unwrap_or(0)
    }

    pub fn sentinel_visible(&self) -> bool {
        let Some(sentinel) = self.sentinel() else {
            return false;
        };
        let capacity = self.visible_result_capacity();
        capacity > 0
            && sentinel.index >= self.scroll_offset
            && sentinel.index < self.scroll_offset + capacity
    }

    fn sync_scroll_trigger(&mut self) {
        self.trigger
            .observe(self.sentinel(), self.search.can_advance());
        if self.trigger.report(self.sentinel_visible()) {
            self.advance_page();
        }
    }

    /// Furthest the detail record can scroll before its last line leaves
    /// the bottom of the pane.
    pub fn max_detail_scroll(&self) -> u16 {
        let Some(detail) = self.store.detail() else {
            return 0;
        };
        let debug_pane = if self.debug.visible {
            Self::DEBUG_PANE_HEIGHT
        } else {
            0
        };
        // Status bar (1) and pane borders (2).
        let visible = self
            .viewport_height
            .map(|h| h.saturating_sub(Self::DETAIL_OVERHEAD + debug_pane))
            .unwrap_or(0) as usize;
        let width = self
            .viewport_width
            .unwrap_or(Self::DEFAULT_WIDTH)
            .saturating_sub(2) as usize;
        let lines = views::detail::detail_lines(detail, width, &self.theme).len();
        lines.saturating_sub(visible).min(u16::MAX as usize) as u16
    }

    fn ensure_selection_visible(&mut self) {
        let capacity = self.visible_result_capacity().max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + capacity {
            self.scroll_offset = self.selected_index + 1 - capacity;
        }
    }

    fn select_next(&mut self) {
        match self.view {
            View::Search => {
                let count = self.store.len();
                if count > 0 && self.selected_index < count - 1 {
                    self.selected_index += 1;
                }
                self.ensure_selection_visible();
            }
            View::Detail { .. } => {
                self.detail_scroll = self
                    .detail_scroll
                    .saturating_add(1)
                    .min(self.max_detail_scroll());
            }
        }
    }

    fn select_prev(&mut self) {
        match self.view {
            View::Search => {
                self.selected_index = self.selected_index.saturating_sub(1);
                self.ensure_selection_visible();
            }
            View::Detail { .. } => self.detail_scroll = self.detail_scroll.saturating_sub(1),
        }
    }

    fn select_first(&mut self) {
        match self.view {
            View::Search => {
                self.selected_index = 0;
                self.scroll_offset = 0;
            }
            View::Detail { .. } => self.detail_scroll = 0,
        }
    }

    fn select_last(&mut self) {
        if let View::Search = self.view
            && !self.store.is_empty()
        {
            self.selected_index = self.store.len() - 1;
            self.ensure_selection_visible();
        }
    }

    fn page_down(&mut self) {
        if let View::Search = self.view
            && !self.store.is_empty()
        {
            self.selected_index = (self.selected_index + Self::PAGE_JUMP).min(self.store.len() - 1);
            self.ensure_selection_visible();
        }
    }

    fn page_up(&mut self) {
        if let View::Search = self.view {
            self.selected_index = self.selected_index.saturating_sub(Self::PAGE_JUMP);
            self.ensure_selection_visible();
        }
    }

    fn rerun(&mut self) {
        if let View::Search = self.view
            && self.search.has_searched()
        {
            let term = self.search.query().term.clone();
            self.submit_search(&term);
        }
    }

    fn open_detail(&mut self) {
        if let View::Search = self.view
            && let Some(movie) = self.store.get(self.selected_index)
        {
            let imdb_id = movie.imdb_id.clone();
            self.request_detail(&imdb_id);
        }
    }

    fn go_back(&mut self) {
        if let View::Detail {
            result_index,
            result_scroll,
            ..
        } = self.view
        {
            self.view = View::Search;
            self.store.clear_detail();
            self.selected_index = result_index;
            self.scroll_offset = result_scroll;
            self.detail_scroll = 0;
        }
    }

    fn imdb_target(&self) -> Option<String> {
        match &self.view {
            View::Search => self.store.get(self.selected_index).map(|m| m.imdb_url()),
            View::Detail { imdb_id, .. } => Some(imdb_url(imdb_id)),
        }
    }

    fn poster_target(&self) -> Option<String> {
        match &self.view {
            View::Search => self
                .store
                .get(self.selected_index)
                .and_then(|m| m.poster.clone()),
            View::Detail { .. } => self.store.detail().and_then(|d| d.poster.clone()),
        }
    }

    fn open_imdb(&mut self) {
        if let Some(url) = self.imdb_target() {
            self.open_external(&url);
        }
    }

    fn open_poster(&mut self) {
        match self.poster_target() {
            Some(url) => self.open_external(&url),
            None => self.debug.log("No poster for this title"),
        }
    }

    fn open_external(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            warn!(url, error = %e, "failed to open url");
            self.debug.log(format!("Failed to open {}: {}", url, e));
        }
    }

    /// Spawn an async task to fetch one page of search results.
    fn spawn_page_fetch(&mut self, request: PageRequest) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.result_tx.clone();

        let task_desc = if request.page == 1 {
            format!("Search \"{}\"", request.term)
        } else {
            format!("Load \"{}\" page {}", request.term, request.page)
        };
        let task_id = self.debug.start_task(OperationKind::Search, task_desc);
        self.in_flight.start(OperationKind::Search);

        tokio::spawn(async move {
            let result = gateway.search_page(&request.term, request.page).await;
            let _ = tx
                .send(AsyncResult::Page {
                    request,
                    task_id,
                    result,
                })
                .await;
        });
    }

    /// Spawn an async task to fetch a title's detail record.
    fn spawn_detail_fetch(&mut self, imdb_id: String) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.result_tx.clone();
        let task_id = self
            .debug
            .start_task(OperationKind::Detail, format!("Load detail {}", imdb_id));
        self.in_flight.start(OperationKind::Detail);

        tokio::spawn(async move {
            let result = gateway.fetch_detail(&imdb_id).await;
            let _ = tx
                .send(AsyncResult::Detail {
                    imdb_id,
                    task_id,
                    result,
                })
                .await;
        });
    }
}

impl SearchCommands for App {
    fn submit_search(&mut self, term: &str) {
        let request = self.search.submit(&mut self.store, term);
        info!(term = %request.term, generation = request.generation, "search submitted");
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.spawn_page_fetch(request);
    }

    fn advance_page(&mut self) {
        let Some(request) = self.search.advance() else {
            return;
        };
        debug!(term = %request.term, page = request.page, "advancing page");
        self.spawn_page_fetch(request);
    }

    fn clear(&mut self) {
        self.search.clear(&mut self.store);
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    fn request_detail(&mut self, imdb_id: &str) {
        let (result_index, result_scroll) = match &self.view {
            View::Detail {
                result_index,
                result_scroll,
                ..
            } => (*result_index, *result_scroll),
            View::Search => (self.selected_index, self.scroll_offset),
        };
        self.view = View::Detail {
            imdb_id: imdb_id.to_string(),
            result_index,
            result_scroll,
        };
        self.detail_scroll = 0;
        self.store.clear_detail();
        self.spawn_detail_fetch(imdb_id.to_string());
    }
}
