pub mod app;
pub mod colors;

use crate::query::MatchField;
use crate::source::RecordSource;
use std::sync::Arc;

/// Entry point: launch the native GUI window
pub fn run(source: Arc<dyn RecordSource>, fields: Vec<MatchField>) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("User Management")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "userdir",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::DirectoryApp::new(cc, source, fields)))),
    )
    .map_err(|e| crate::DirectoryError::Gui(e.to_string()))
}
