use eframe::egui::Color32;

/// Primary button and link colour (matches the TUI accent).
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);

pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);

pub const MUTED: Color32 = Color32::from_rgb(140, 140, 150);

pub const SECTION_TITLE: Color32 = Color32::from_rgb(230, 230, 240);
