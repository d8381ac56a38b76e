pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use crate::query::MatchField;
use crate::source::RecordSource;
use crate::DirectoryError;
use std::sync::Arc;

/// Entry point: take over the terminal and run the list/detail screens
pub fn run(source: Arc<dyn RecordSource>, fields: Vec<MatchField>) -> crate::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|e| DirectoryError::Terminal(e.to_string()))?;
    let mut app = app::App::new(source, fields);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
