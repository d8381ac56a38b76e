//! The list controller
//!
//! [`Directory`] composes the fetch controller and the query engine into one
//! unit. Front ends feed it [`Action`]s and render the [`DirectoryView`] it
//! hands back; they never read its internals.

use crate::fetch::FetchController;
use crate::navigation::Navigator;
use crate::query::{filter_records, MatchField, PageWindow, QueryEngine, PAGE_SIZE};
use crate::record::Record;
use crate::source::RecordSource;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Coarse state of the list, derived from the controller fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    Idle,
    Filtered,
    Loading,
    ErrorPending,
}

/// User intents the list understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(String),
    Submit,
    Clear,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Jump to a 1-based page; out-of-range targets are ignored
    GoToPage(usize),
}

/// Read-only snapshot for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    pub raw_input: String,
    pub is_loading: bool,
    pub validation_error: bool,
    pub page_items: Vec<Record>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub range_start: usize,
    pub range_end: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub state: ListState,
}

impl DirectoryView {
    /// "Showing 1 to 10 of 25"
    pub fn range_label(&self) -> String {
        format!(
            "Showing {} to {} of {}",
            self.range_start, self.range_end, self.total_matches
        )
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_number, self.total_pages)
    }

    /// Pagination controls are hidden for a single page
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }
}

pub struct Directory {
    fetch: FetchController,
    query: QueryEngine,
    fields: Vec<MatchField>,
}

impl Directory {
    pub fn new(source: Arc<dyn RecordSource>, fields: Vec<MatchField>) -> Self {
        let fields = if fields.is_empty() {
            MatchField::default_set()
        } else {
            fields
        };
        Self {
            fetch: FetchController::new(source),
            query: QueryEngine::new(),
            fields,
        }
    }

    /// Issue the fetch for this mount (no-op after the first call)
    pub fn load(&mut self) -> bool {
        self.fetch.load()
    }

    /// Apply finished background work. Returns `true` when a redraw is due.
    pub fn poll(&mut self) -> bool {
        self.fetch.poll()
    }

    pub fn wait(&mut self, timeout: Duration) -> bool {
        self.fetch.wait(timeout)
    }

    /// Drop the collection and the input state, ignoring in-flight responses
    pub fn unmount(&mut self) {
        self.fetch.unmount();
        self.query.clear();
    }

    /// Unmount and fetch again
    pub fn reload(&mut self) {
        self.query.clear();
        self.fetch.reload();
    }

    pub fn fields(&self) -> &[MatchField] {
        &self.fields
    }

    pub fn raw_input(&self) -> &str {
        self.query.raw_input()
    }

    pub fn committed_term(&self) -> &str {
        self.query.committed_term()
    }

    pub fn records(&self) -> &[Record] {
        self.fetch.records()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.fetch.last_error()
    }

    pub fn state(&self) -> ListState {
        if self.fetch.is_loading() {
            ListState::Loading
        } else if self.query.validation_error() {
            ListState::ErrorPending
        } else if self.query.committed_term().is_empty() {
            ListState::Idle
        } else {
            ListState::Filtered
        }
    }

    fn filtered(&self) -> Vec<&Record> {
        filter_records(self.fetch.records(), self.query.committed_term(), &self.fields)
    }

    fn window(&self) -> PageWindow {
        PageWindow::new(self.filtered().len(), self.query.page(), PAGE_SIZE)
    }

    /// Apply one action and return the resulting snapshot
    pub fn dispatch(&mut self, action: Action) -> DirectoryView {
        match action {
            Action::Edit(text) => self.query.edit(&text),
            Action::Submit => {
                if self.query.submit() {
                    log::debug!("search committed: '{}'", self.query.committed_term());
                }
            }
            Action::Clear => self.query.clear(),
            Action::NextPage => {
                let total_pages = self.window().total_pages;
                self.query.next_page(total_pages);
            }
            Action::PrevPage => {
                let total_pages = self.window().total_pages;
                self.query.prev_page(total_pages);
            }
            Action::FirstPage => {
                let total_pages = self.window().total_pages;
                self.query.go_to_page(1, total_pages);
            }
            Action::LastPage => {
                let total_pages = self.window().total_pages;
                self.query.go_to_page(total_pages, total_pages);
            }
            Action::GoToPage(page) => {
                let total_pages = self.window().total_pages;
                self.query.go_to_page(page, total_pages);
            }
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> DirectoryView {
        let filtered = self.filtered();
        let window = PageWindow::new(filtered.len(), self.query.page(), PAGE_SIZE);
        let page_items = filtered[window.slice_range()]
            .iter()
            .map(|record| (*record).clone())
            .collect();

        DirectoryView {
            raw_input: self.query.raw_input().to_string(),
            is_loading: self.fetch.is_loading(),
            validation_error: self.query.validation_error(),
            page_items,
            page_number: window.page,
            total_pages: window.total_pages,
            total_matches: window.total,
            range_start: window.range_start,
            range_end: window.range_end,
            can_go_prev: window.can_go_prev,
            can_go_next: window.can_go_next,
            state: self.state(),
        }
    }

    /// Request the detail view for the record at `row` of the current page
    pub fn select_row(&self, row: usize, navigator: &mut dyn Navigator) -> Option<u64> {
        let filtered = self.filtered();
        let window = PageWindow::new(filtered.len(), self.query.page(), PAGE_SIZE);
        let id = filtered[window.slice_range()].get(row)?.id;
        navigator.navigate_to_detail(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DirectoryError, Result};
    use crate::navigation::{Route, Router};

    const WAIT: Duration = Duration::from_secs(5);

    struct StaticSource(Vec<Record>);

    impl RecordSource for StaticSource {
        fn fetch_all(&self) -> Result<Vec<Record>> {
            Ok(self.0.clone())
        }

        fn fetch_one(&self, id: u64) -> Result<Record> {
            self.0
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| DirectoryError::from_status(404, "test"))
        }
    }

    fn loaded(n: u64) -> Directory {
        let records = (1..=n)
            .map(|i| Record::new(i, format!("U{}", i), format!("u{}@example.com", i)))
            .collect();
        let mut dir = Directory::new(Arc::new(StaticSource(records)), Vec::new());
        dir.load();
        assert!(dir.wait(WAIT));
        dir
    }

    #[test]
    fn state_follows_transitions() {
        let mut dir = loaded(3);
        assert_eq!(dir.state(), ListState::Idle);
        dir.dispatch(Action::Edit("U1".into()));
        assert_eq!(dir.state(), ListState::Idle);
        dir.dispatch(Action::Submit);
        assert_eq!(dir.state(), ListState::Filtered);
        dir.dispatch(Action::Edit(" ".into()));
        let view = dir.dispatch(Action::Submit);
        assert_eq!(view.state, ListState::ErrorPending);
        let view = dir.dispatch(Action::Clear);
        assert_eq!(view.state, ListState::Idle);
    }

    #[test]
    fn loading_state_before_completion() {
        let mut dir = Directory::new(Arc::new(StaticSource(Vec::new())), Vec::new());
        dir.load();
        // The background thread may already be done; the flag only clears on poll.
        assert_eq!(dir.snapshot().state, ListState::Loading);
        assert!(dir.wait(WAIT));
        assert_eq!(dir.snapshot().state, ListState::Idle);
    }

    #[test]
    fn first_and_last_page() {
        let mut dir = loaded(35);
        let view = dir.dispatch(Action::LastPage);
        assert_eq!(view.page_number, 4);
        assert_eq!((view.range_start, view.range_end), (31, 35));
        let view = dir.dispatch(Action::FirstPage);
        assert_eq!(view.page_number, 1);
    }

    #[test]
    fn go_to_page_ignores_out_of_range() {
        let mut dir = loaded(35);
        assert_eq!(dir.dispatch(Action::GoToPage(3)).page_number, 3);
        assert_eq!(dir.dispatch(Action::GoToPage(9)).page_number, 3);
        assert_eq!(dir.dispatch(Action::GoToPage(0)).page_number, 3);
    }

    #[test]
    fn select_row_navigates_by_id() {
        let mut dir = loaded(25);
        dir.dispatch(Action::NextPage);
        let mut router = Router::new();
        assert_eq!(dir.select_row(0, &mut router), Some(11));
        assert_eq!(router.current(), Route::Detail(11));
        assert_eq!(dir.select_row(42, &mut router), None);
        assert_eq!(router.depth(), 2);
    }

    #[test]
    fn unmount_discards_input_and_records() {
        let mut dir = loaded(5);
        dir.dispatch(Action::Edit("U2".into()));
        dir.dispatch(Action::Submit);
        dir.unmount();
        let view = dir.snapshot();
        assert_eq!(view.raw_input, "");
        assert_eq!(view.total_matches, 0);
        assert!(!view.is_loading);
    }

    #[test]
    fn page_clamps_when_collection_shrinks() {
        let mut dir = loaded(25);
        dir.dispatch(Action::LastPage);
        dir.dispatch(Action::Edit("U2".into()));
        let view = dir.dispatch(Action::Submit);
        assert_eq!(view.page_number, 1);
        assert_eq!(view.total_matches, 7);
        assert!(!view.show_pagination());
    }

    #[test]
    fn labels() {
        let dir = loaded(25);
        let view = dir.snapshot();
        assert_eq!(view.range_label(), "Showing 1 to 10 of 25");
        assert_eq!(view.page_label(), "Page 1 of 3");
    }
}
