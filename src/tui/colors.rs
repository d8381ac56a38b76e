use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(37, 99, 235);
pub const BAR_BG: Color = Color::Rgb(0, 95, 135);
pub const STRIPE_BG: Color = Color::Rgb(25, 25, 35);
pub const SELECTED_BG: Color = Color::Rgb(60, 60, 80);

pub fn header() -> Style {
    Style::default()
        .fg(Color::Gray)
        .bg(Color::Rgb(40, 40, 50))
        .add_modifier(Modifier::BOLD)
}

pub fn row(index: usize, selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    } else if index % 2 == 1 {
        Style::default().bg(STRIPE_BG)
    } else {
        Style::default()
    }
}

/// Enabled pager buttons are highlighted, disabled ones greyed out
pub fn pager_button(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn placeholder() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn value() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}
