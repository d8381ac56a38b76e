//! userdir - searchable, paginated user directory
//!
//! Fetches a read-only collection of user records once per mount and serves
//! a filtered, paged view of it to a terminal UI, a desktop window or plain
//! CLI output.
//!
//! # Features
//!
//! - **One fetch per mount**: background request, generation-guarded so a
//!   late response never lands on a torn-down view
//! - **Committed search**: typing edits the input, Enter commits the term
//! - **Client-side paging**: fixed 10-row pages over the filtered set
//! - **Detail view**: single-record fetch with the same guard
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use userdir::{Action, Directory, HttpSource, MatchField};
//!
//! fn main() -> userdir::Result<()> {
//!     let source = HttpSource::new(userdir::config::DEFAULT_ENDPOINT, None)?;
//!     let mut directory = Directory::new(Arc::new(source), MatchField::default_set());
//!
//!     directory.load();
//!     directory.wait(Duration::from_secs(30));
//!
//!     directory.dispatch(Action::Edit("bret".into()));
//!     let view = directory.dispatch(Action::Submit);
//!     for user in &view.page_items {
//!         println!("{} <{}>", user.display_name, user.email);
//!     }
//!     println!("{}", view.range_label());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod detail;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod gui;
pub mod logging;
pub mod navigation;
pub mod query;
pub mod record;
pub mod source;
pub mod tui;

// Re-export main types
pub use config::AppConfig;
pub use detail::DetailController;
pub use directory::{Action, Directory, DirectoryView, ListState};
pub use error::{DirectoryError, Result};
pub use fetch::FetchController;
pub use navigation::{Navigator, Route, Router};
pub use query::{filter_records, MatchField, PageWindow, QueryEngine, PAGE_SIZE};
pub use record::Record;
pub use source::{HttpSource, RecordSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the HTTP source described by `config`
pub fn http_source(config: &AppConfig) -> Result<std::sync::Arc<dyn RecordSource>> {
    let source: std::sync::Arc<dyn RecordSource> =
        std::sync::Arc::new(HttpSource::new(&config.endpoint, config.timeout)?);
    Ok(source)
}
