//! Paginated Collection Viewer
//!
//! Composes the three parts of a collection screen:
//! - query: Query State Controller (page, page size, search term)
//! - fetcher: Remote Collection Fetcher with the stale-response guard
//! - table: Tabular Renderer (rows, placeholders, pagination footer)
//! - input: key and mouse mapping to [`input::TableEvent`]
//!
//! [`CollectionViewer`] owns one of each and feeds every user event through
//! the controller. Whenever the descriptor changes a new fetch is issued.

pub mod fetcher;
pub mod input;
pub mod query;
pub mod table;

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use serde::Serialize;

use crate::logic::gesture::GestureGuard;
use crate::logic::{navigation, pagination};
use fetcher::{FetchStatus, ListOperation, RemoteCollectionFetcher};
use input::{KeyContext, TableEvent};
use query::{PerPage, QueryDescriptor, QueryStateController};
use table::{Column, RenderState, RowAction, TableHitMap, TableView};

/// A row of a remote collection
///
/// Records serialize to a JSON object so columns without a formatter can show
/// a raw field by key. `id` is the stable identity used to key rows and
/// gestures.
pub trait Record: Serialize + Send + 'static {
    fn id(&self) -> u64;
}

/// One page of a remote collection plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

impl<T> CollectionPage<T> {
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
        }
    }
}

pub struct CollectionViewer<T: Record> {
    title: String,
    controller: QueryStateController,
    fetcher: RemoteCollectionFetcher<T>,
    columns: Vec<Column<T>>,
    actions: Vec<RowAction<T>>,
    selected: Option<usize>,
    search_active: bool,
    vim_mode: bool,
    guard: GestureGuard,
    hits: TableHitMap,
}

impl<T: Record> CollectionViewer<T> {
    pub fn new(title: impl Into<String>, per_page: PerPage, list: impl ListOperation<T> + 'static) -> Self {
        let title = title.into();
        Self {
            fetcher: RemoteCollectionFetcher::new(title.clone(), list),
            title,
            controller: QueryStateController::new(per_page),
            columns: Vec::new(),
            actions: Vec::new(),
            selected: None,
            search_active: false,
            vim_mode: false,
            guard: GestureGuard::new(),
            hits: TableHitMap::default(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column<T>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_actions(mut self, actions: Vec<RowAction<T>>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_vim_mode(mut self, vim_mode: bool) -> Self {
        self.vim_mode = vim_mode;
        self
    }

    pub fn with_gesture_guard(mut self, guard: GestureGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Issue the first fetch; later calls are no-ops
    pub fn mount(&mut self) {
        if self.fetcher.status() == FetchStatus::Idle {
            self.fetcher.issue(self.controller.descriptor().clone());
        }
    }

    /// Apply a user event
    ///
    /// Returns true if anything visible may have changed.
    pub fn dispatch(&mut self, event: TableEvent, now: Instant) -> bool {
        let before = self.controller.descriptor().clone();
        let total = self.fetcher.total();

        let handled = match event {
            TableEvent::SearchChanged(term) => {
                self.controller.set_search_term(term);
                true
            }
            TableEvent::BeginSearch => {
                self.search_active = true;
                true
            }
            TableEvent::EndSearch => {
                self.search_active = false;
                true
            }
            TableEvent::CancelSearch => {
                self.search_active = false;
                if !self.controller.search_term().is_empty() {
                    self.controller.set_search_term("");
                }
                true
            }
            TableEvent::PageChanged(page) => self.controller.set_page(page, total),
            TableEvent::PerPageChanged(per_page) => {
                self.controller.set_per_page(per_page);
                true
            }
            TableEvent::Retry => self.fetcher.retry(),
            TableEvent::Select(row) => {
                let rows_len = self.visible_rows_len();
                self.selected = row.filter(|r| *r < rows_len);
                true
            }
            TableEvent::InvokeAction { row, action } => self.invoke_action(row, action, now),
        };

        if *self.controller.descriptor() != before {
            self.issue_current();
            return true;
        }
        handled
    }

    /// Run row action `action` on row `row` of the current page
    ///
    /// Actions only fire while rows are on screen, and repeats of the same
    /// gesture are swallowed by the gesture guard.
    pub fn invoke_action(&mut self, row: usize, action: usize, now: Instant) -> bool {
        if self.render_state() != RenderState::Rows {
            return false;
        }
        let (Some(record), Some(row_action)) = (self.fetcher.rows().get(row), self.actions.get(action)) else {
            return false;
        };
        if !self.guard.admit((action, record.id()), now) {
            crate::log_debug(&format!(
                "DEBUG [Viewer {}]: swallowed repeat of '{}' on id={}",
                self.title,
                row_action.label,
                record.id()
            ));
            return false;
        }

        crate::log_debug(&format!(
            "DEBUG [Viewer {}]: '{}' on id={}",
            self.title,
            row_action.label,
            record.id()
        ));
        row_action.invoke(record);
        self.selected = Some(row);
        true
    }

    /// Apply finished fetches without waiting
    pub fn tick(&mut self) -> bool {
        let changed = self.fetcher.poll();
        if changed {
            self.after_outcome();
        }
        changed
    }

    /// Wait for the outstanding fetch and apply it
    pub async fn next_outcome(&mut self) -> bool {
        let changed = self.fetcher.recv().await;
        if changed {
            self.after_outcome();
        }
        changed
    }

    /// Refetch the current descriptor (after a mutation or on demand)
    pub fn refresh(&mut self) {
        if !self.fetcher.invalidate() {
            self.issue_current();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let hotkeys: Vec<char> = self.actions.iter().map(|a| a.hotkey).collect();
        let ctx = KeyContext {
            search_active: self.search_active,
            vim_mode: self.vim_mode,
            search_term: self.controller.search_term(),
            selected: self.selected,
            rows_len: self.visible_rows_len(),
            page: self.controller.page(),
            per_page: self.controller.per_page(),
            hotkeys: &hotkeys,
        };
        match input::map_key(key, &ctx) {
            Some(event) => {
                self.dispatch(event, now);
                true
            }
            None => false,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        match input::map_mouse(mouse, &self.hits, self.controller.page(), self.controller.per_page()) {
            Some(event) => self.dispatch(event, now),
            None => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let view = TableView {
            title: &self.title,
            rows: self.fetcher.rows(),
            columns: &self.columns,
            actions: &self.actions,
            loading: self.fetcher.loading(),
            error: self.fetcher.error(),
            page: self.controller.page(),
            per_page: self.controller.per_page(),
            total: self.fetcher.total(),
            search: self.controller.search_term(),
            search_active: self.search_active,
            selected: self.selected,
            retry_available: true,
            vim_mode: self.vim_mode,
        };
        self.hits = table::render_table(f, area, &view);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        self.controller.descriptor()
    }

    pub fn fetcher(&self) -> &RemoteCollectionFetcher<T> {
        &self.fetcher
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn hits(&self) -> &TableHitMap {
        &self.hits
    }

    fn render_state(&self) -> RenderState {
        table::render_state(
            self.fetcher.loading(),
            self.fetcher.error().is_some(),
            self.fetcher.rows().len(),
        )
    }

    fn visible_rows_len(&self) -> usize {
        match self.render_state() {
            RenderState::Rows => self.fetcher.rows().len(),
            _ => 0,
        }
    }

    fn issue_current(&mut self) {
        self.selected = None;
        self.guard.reset();
        self.fetcher.issue(self.controller.descriptor().clone());
    }

    fn after_outcome(&mut self) {
        if self.fetcher.status() == FetchStatus::Success
            && self.controller.reconcile_total(self.fetcher.total())
        {
            crate::log_debug(&format!(
                "DEBUG [Viewer {}]: collection shrank to {}, moving to page {}",
                self.title,
                self.fetcher.total(),
                self.controller.page()
            ));
            self.issue_current();
            return;
        }
        self.selected = navigation::clamp_selection(self.selected, self.fetcher.rows().len());
    }
}

/// A collection screen with its record type erased
///
/// Lets the application hold screens over different record types side by side.
pub trait CollectionScreen {
    fn title(&self) -> &str;
    fn mount(&mut self);
    fn tick(&mut self) -> bool;
    fn refresh(&mut self);
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool;
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool;
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn search_active(&self) -> bool;
    fn search_term(&self) -> &str;
    fn status(&self) -> FetchStatus;
    /// One-line position summary for the status bar
    fn summary(&self) -> String;
}

impl<T: Record> CollectionScreen for CollectionViewer<T> {
    fn title(&self) -> &str {
        CollectionViewer::title(self)
    }

    fn mount(&mut self) {
        CollectionViewer::mount(self)
    }

    fn tick(&mut self) -> bool {
        CollectionViewer::tick(self)
    }

    fn refresh(&mut self) {
        CollectionViewer::refresh(self)
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        CollectionViewer::handle_key(self, key, now)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        CollectionViewer::handle_mouse(self, mouse, now)
    }

    fn render(&mut self, f: &mut Frame, area: Rect) {
        CollectionViewer::render(self, f, area)
    }

    fn search_active(&self) -> bool {
        CollectionViewer::search_active(self)
    }

    fn search_term(&self) -> &str {
        self.controller.search_term()
    }

    fn status(&self) -> FetchStatus {
        self.fetcher.status()
    }

    fn summary(&self) -> String {
        let per_page = self.controller.per_page().get();
        let total = self.fetcher.total();
        format!(
            "page {}/{} | {} records",
            self.controller.page(),
            pagination::total_pages(total, per_page),
            total
        )
    }
}
