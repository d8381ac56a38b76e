//! Main desktop application

use crate::detail::{self, DetailController};
use crate::directory::{Action, Directory, DirectoryView};
use crate::gui::colors;
use crate::navigation::{Navigator, Route, Router};
use crate::query::MatchField;
use crate::record::Record;
use crate::source::RecordSource;
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;

/// Main application state
pub struct DirectoryApp {
    /// List controller
    directory: Directory,
    /// Detail controller
    detail: DetailController,
    /// Screen history
    router: Router,
    /// Last snapshot of the list
    view: DirectoryView,
    /// Text edit buffer, mirrored into the directory on every change
    input: String,
    /// First frame flag (for auto-focus)
    first_frame: bool,
    /// Status bar message
    status_message: String,
}

impl DirectoryApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn RecordSource>,
        fields: Vec<MatchField>,
    ) -> Self {
        Self::with_source(source, fields)
    }

    fn with_source(source: Arc<dyn RecordSource>, fields: Vec<MatchField>) -> Self {
        let mut directory = Directory::new(Arc::clone(&source), fields);
        directory.load();
        let view = directory.snapshot();

        Self {
            directory,
            detail: DetailController::new(source),
            router: Router::new(),
            view,
            input: String::new(),
            first_frame: true,
            status_message: "Loading users...".to_string(),
        }
    }

    /// Process finished background fetches
    fn process_messages(&mut self) {
        if self.directory.poll() {
            self.view = self.directory.snapshot();
            self.status_message = match self.directory.last_error() {
                Some(err) => format!("Failed to load users: {}", err),
                None => format!("{} users", self.directory.records().len()),
            };
        }
        self.detail.poll();
    }

    fn dispatch(&mut self, action: Action) {
        self.view = self.directory.dispatch(action);
        if self.input != self.view.raw_input {
            self.input = self.view.raw_input.clone();
        }
    }

    fn reload(&mut self) {
        self.directory.reload();
        self.view = self.directory.snapshot();
        self.input = self.view.raw_input.clone();
        self.status_message = "Loading users...".to_string();
    }

    fn open_row(&mut self, row: usize) {
        if let Some(id) = self.directory.select_row(row, &mut self.router) {
            self.detail.load(id);
        }
    }

    fn go_back(&mut self) {
        self.detail.unmount();
        self.router.navigate_back();
    }

    /// Render top bar
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("User Management");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reload").clicked() {
                        self.reload();
                    }
                });
            });
        });
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            let mut action = None;

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .desired_width(ui.available_width() - 120.0)
                        .hint_text("Search by name or email"),
                );

                if self.first_frame {
                    response.request_focus();
                    self.first_frame = false;
                }

                if response.changed() {
                    action = Some(Action::Edit(self.input.clone()));
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = Some(Action::Submit);
                    response.request_focus();
                }

                if !self.input.is_empty() && ui.button("\u{2715}").on_hover_text("Clear").clicked() {
                    action = Some(Action::Clear);
                }
                let search = egui::Button::new(egui::RichText::new("Search").color(egui::Color32::WHITE))
                    .fill(colors::ACCENT);
                if ui.add(search).clicked() {
                    action = Some(Action::Submit);
                }
            });

            if let Some(action) = action {
                self.dispatch(action);
            }

            if self.view.validation_error {
                ui.colored_label(colors::ERROR, "Please enter a search term");
            }
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.view.is_loading || self.detail.is_loading() {
                    ui.spinner();
                    ui.label("Loading...");
                } else {
                    ui.label(&self.status_message);
                    let term = self.directory.committed_term();
                    if !term.is_empty() {
                        ui.separator();
                        ui.label(format!("{} matches for '{}'", self.view.total_matches, term));
                    }
                }
            });
        });
    }

    /// Render the current page of users
    fn render_list(&mut self, ui: &mut egui::Ui) {
        if self.view.is_loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        if self.view.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("No data found!");
            });
        } else if let Some(row) = self.render_table(ui) {
            self.open_row(row);
        }

        ui.separator();
        self.render_pager(ui);
    }

    /// Table of the current page; returns the clicked row
    fn render_table(&self, ui: &mut egui::Ui) -> Option<usize> {
        use egui_extras::{Column, TableBuilder};

        let mut clicked = None;
        let rows = &self.view.page_items;
        let available_height = ui.available_height() - 40.0;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(220.0).at_least(60.0).clip(true))
            .column(Column::remainder().at_least(60.0).clip(true))
            .column(Column::initial(180.0).at_least(60.0).clip(true))
            .column(Column::initial(180.0).at_least(60.0).clip(true))
            .min_scrolled_height(0.0)
            .max_scroll_height(available_height)
            .sense(egui::Sense::click())
            .header(22.0, |mut header| {
                for title in ["Name", "Email", "Phone", "Company"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(36.0, rows.len(), |mut row| {
                    let index = row.index();
                    let Some(user) = rows.get(index) else {
                        return;
                    };
                    row.col(|ui| {
                        ui.vertical(|ui| {
                            ui.label(&user.display_name);
                            ui.small(user.handle_label());
                        });
                    });
                    row.col(|ui| {
                        ui.label(&user.email);
                    });
                    row.col(|ui| {
                        ui.label(&user.phone);
                    });
                    row.col(|ui| {
                        ui.label(user.organization_name());
                    });
                    if row.response().clicked() {
                        clicked = Some(index);
                    }
                });
            });

        clicked
    }

    fn render_pager(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label(self.view.range_label());
            if !self.view.show_pagination() {
                return;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.view.can_go_next, egui::Button::new("Next \u{25B6}"))
                    .clicked()
                {
                    action = Some(Action::NextPage);
                }
                ui.label(self.view.page_label());
                if ui
                    .add_enabled(self.view.can_go_prev, egui::Button::new("\u{25C0} Prev"))
                    .clicked()
                {
                    action = Some(Action::PrevPage);
                }
            });
        });

        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    /// Render the detail screen for `id`
    fn render_detail(&mut self, ui: &mut egui::Ui, id: u64) {
        let mut back = false;

        ui.horizontal(|ui| {
            if ui.button("\u{2190} Back to Users").clicked() {
                back = true;
            }
            ui.heading("User Details");
        });
        ui.separator();

        if self.detail.is_loading() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
        } else if let Some(record) = self.detail.record() {
            render_record(ui, record);
        } else {
            let message = match self.detail.last_error() {
                Some(err) => format!("Could not load user {}: {}", id, err),
                None => format!("User {} not found", id),
            };
            ui.colored_label(colors::ERROR, message);
        }

        if back || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.go_back();
        }
    }
}

fn render_record(ui: &mut egui::Ui, record: &Record) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        for section in detail::sections(record) {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(section.title)
                        .strong()
                        .size(16.0)
                        .color(colors::SECTION_TITLE),
                );
                ui.add_space(4.0);

                egui::Grid::new(section.title)
                    .num_columns(2)
                    .spacing([24.0, 6.0])
                    .show(ui, |ui| {
                        for field in &section.fields {
                            ui.colored_label(colors::MUTED, field.label);
                            render_value(ui, record, field);
                            ui.end_row();
                        }
                    });
            });
            ui.add_space(8.0);
        }
    });
}

/// Website opens in the browser, email copies to the clipboard
fn render_value(ui: &mut egui::Ui, record: &Record, field: &detail::Field) {
    match field.label {
        "Website" => match record.website_url() {
            Some(url) => {
                let link = ui.add(
                    egui::Label::new(egui::RichText::new(&field.value).color(colors::ACCENT))
                        .sense(egui::Sense::click()),
                );
                if link.on_hover_text(&url).clicked() {
                    if let Err(e) = open::that(&url) {
                        log::warn!("failed to open {}: {}", url, e);
                    }
                }
            }
            None => {
                ui.label(&field.value);
            }
        },
        "Email" => {
            ui.horizontal(|ui| {
                ui.label(&field.value);
                if ui.small_button("Copy").clicked() {
                    copy_to_clipboard(&field.value);
                }
            });
        }
        _ => {
            ui.label(&field.value);
        }
    }
}

fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    clipboard_done(result)
}

/// Log a failed copy; `true` when the text reached the clipboard
fn clipboard_done(result: Result<(), arboard::Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("copy to clipboard failed: {}", e);
            false
        }
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload();
        }

        self.render_top_bar(ctx);
        let route = self.router.current();
        if route == Route::List {
            self.render_search_bar(ctx);
        }
        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::List => self.render_list(ui),
            Route::Detail(id) => self.render_detail(ui, id),
        });

        if self.view.is_loading || self.detail.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    struct StaticSource;

    impl RecordSource for StaticSource {
        fn fetch_all(&self) -> Result<Vec<Record>> {
            Ok((1..=12)
                .map(|i| Record::new(i, format!("U{}", i), format!("u{}@example.com", i)))
                .collect())
        }

        fn fetch_one(&self, id: u64) -> Result<Record> {
            Ok(Record::new(id, format!("U{}", id), "u@example.com"))
        }
    }

    fn loaded_app() -> DirectoryApp {
        let mut app = DirectoryApp::with_source(Arc::new(StaticSource), Vec::new());
        assert!(app.directory.wait(Duration::from_secs(5)));
        app.view = app.directory.snapshot();
        app
    }

    #[test]
    fn reload_resets_the_text_box() {
        let mut app = loaded_app();
        app.input = "u1".to_string();
        app.dispatch(Action::Edit(app.input.clone()));
        app.dispatch(Action::Submit);
        assert_eq!(app.view.total_matches, 4);

        app.reload();
        assert_eq!(app.input, "");
        assert_eq!(app.input, app.view.raw_input);

        assert!(app.directory.wait(Duration::from_secs(5)));
        app.input = "u2".to_string();
        app.dispatch(Action::Edit(app.input.clone()));
        app.dispatch(Action::Submit);
        assert!(!app.view.validation_error);
        assert_eq!(app.directory.committed_term(), "u2");
    }

    #[test]
    fn clipboard_failures_are_reported() {
        assert!(clipboard_done(Ok(())));
        assert!(!clipboard_done(Err(arboard::Error::ContentNotAvailable)));
    }

    #[test]
    fn clear_empties_the_text_box() {
        let mut app = loaded_app();
        app.input = "u1".to_string();
        app.dispatch(Action::Edit(app.input.clone()));
        app.dispatch(Action::Clear);
        assert_eq!(app.input, "");
    }
}
