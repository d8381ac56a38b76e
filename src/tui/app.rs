use crate::detail::DetailController;
use crate::directory::{Action, Directory, DirectoryView};
use crate::navigation::{Navigator, Route, Router};
use crate::query::MatchField;
use crate::source::RecordSource;
use crate::tui::search::SearchState;
use crate::tui::table::TableState;
use crate::tui::ui;
use crate::DirectoryError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct App {
    // Controllers
    directory: Directory,
    detail: DetailController,
    router: Router,

    // Sub-states
    pub search: SearchState,
    pub table: TableState,

    /// Snapshot rendered by the list view
    pub view: DirectoryView,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn RecordSource>, fields: Vec<MatchField>) -> Self {
        let mut directory = Directory::new(Arc::clone(&source), fields);
        directory.load();
        let view = directory.snapshot();

        Self {
            directory,
            detail: DetailController::new(source),
            router: Router::new(),
            search: SearchState::default(),
            table: TableState::default(),
            view,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| DirectoryError::Terminal(e.to_string()))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                self.directory.unmount();
                self.detail.unmount();
                return Ok(());
            }
        }
    }

    /// Pick up finished background fetches
    pub fn process_messages(&mut self) {
        if self.directory.poll() {
            self.refresh();
            self.table.select_first(self.view.page_items.len());
        }
        self.detail.poll();
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    pub fn raw_input(&self) -> &str {
        self.directory.raw_input()
    }

    /// One-line status for the bottom bar
    pub fn status_message(&self) -> String {
        if let Some(err) = self.directory.last_error() {
            return format!("Failed to load users: {}", err);
        }
        if self.view.is_loading {
            return "Loading users...".to_string();
        }
        let term = self.directory.committed_term();
        if term.is_empty() {
            format!("{} users", self.directory.records().len())
        } else {
            format!("{} matches for '{}'", self.view.total_matches, term)
        }
    }

    fn refresh(&mut self) {
        self.view = self.directory.snapshot();
        self.table.clamp(self.view.page_items.len());
        self.search.sync(&self.view.raw_input);
    }

    fn dispatch(&mut self, action: Action) {
        self.view = self.directory.dispatch(action);
        self.table.clamp(self.view.page_items.len());
        self.search.sync(&self.view.raw_input);
    }

    fn change_page(&mut self, action: Action) {
        let before = self.view.page_number;
        self.dispatch(action);
        if self.view.page_number != before {
            self.table.select_first(self.view.page_items.len());
        }
    }

    fn open_selected(&mut self) {
        let Some(row) = self.table.selected else {
            return;
        };
        if let Some(id) = self.directory.select_row(row, &mut self.router) {
            self.detail.load(id);
        }
    }

    fn go_back(&mut self) {
        self.detail.unmount();
        self.router.navigate_back();
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::F(5) => {
                self.directory.reload();
                self.refresh();
                return;
            }
            _ => {}
        }

        match self.router.current() {
            Route::Detail(_) => self.handle_detail_key(key),
            Route::List if self.search.focused => self.handle_search_key(key),
            Route::List => self.handle_table_key(key),
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.go_back();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let text = self.directory.raw_input().to_string();
        match key.code {
            KeyCode::Char(c) => {
                let text = self.search.insert(&text, c);
                self.dispatch(Action::Edit(text));
            }
            KeyCode::Backspace => {
                if let Some(text) = self.search.backspace(&text) {
                    self.dispatch(Action::Edit(text));
                }
            }
            KeyCode::Delete => {
                if let Some(text) = self.search.delete(&text) {
                    self.dispatch(Action::Edit(text));
                }
            }
            KeyCode::Left => self.search.move_left(&text),
            KeyCode::Right => self.search.move_right(&text),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(&text),
            KeyCode::Enter => {
                self.dispatch(Action::Submit);
                self.table.select_first(self.view.page_items.len());
            }
            KeyCode::Esc => {
                if text.is_empty() {
                    self.search.focused = false;
                } else {
                    self.dispatch(Action::Clear);
                    self.search.home();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.search.focused = false;
                if self.table.selected.is_none() {
                    self.table.select_first(self.view.page_items.len());
                }
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.view.page_items.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::Enter => self.open_selected(),

            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => {
                self.change_page(Action::NextPage)
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => {
                self.change_page(Action::PrevPage)
            }
            KeyCode::Home => self.table.select_first(total),
            KeyCode::End => self.table.select_last(total),
            KeyCode::Char('g') => self.change_page(Action::FirstPage),
            KeyCode::Char('G') => self.change_page(Action::LastPage),

            KeyCode::Char('x') => {
                self.dispatch(Action::Clear);
                self.search.home();
            }
            KeyCode::Char('r') => {
                self.directory.reload();
                self.refresh();
            }

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
                self.search.end(&self.view.raw_input);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,

            _ => {}
        }
    }
}
