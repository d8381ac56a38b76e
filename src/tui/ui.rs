use crate::detail;
use crate::directory::DirectoryView;
use crate::navigation::Route;
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

const PLACEHOLDER: &str = "Search by name or email";

pub fn draw(frame: &mut Frame, app: &App) {
    match app.route() {
        Route::List => draw_list(frame, app),
        Route::Detail(id) => draw_detail(frame, app, id),
    }
}

fn draw_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Validation message
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Pager
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(" User Management").style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );
    draw_search_bar(frame, app, chunks[1]);

    if app.view.validation_error {
        frame.render_widget(
            Paragraph::new(" Please enter a search term").style(colors::error()),
            chunks[2],
        );
    }

    draw_table(frame, app, chunks[3]);
    draw_pager(frame, &app.view, chunks[4]);
    draw_status_bar(frame, app, chunks[5]);

    if app.search.focused {
        let cursor_x = chunks[1].x + 2 + app.search.cursor_column(&app.view.raw_input);
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");
    if !app.view.raw_input.is_empty() {
        block = block.title_bottom(Line::from(" Esc: clear ").right_aligned());
    }

    let line = if app.view.raw_input.is_empty() {
        Line::from(Span::styled(format!(" {}", PLACEHOLDER), colors::placeholder()))
    } else {
        Line::from(format!(" {}", app.view.raw_input))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;

    if view.is_loading {
        draw_centered(frame, area, "Loading users...", Style::default().fg(Color::Cyan));
        return;
    }
    if view.page_items.is_empty() {
        draw_centered(
            frame,
            area,
            "No data found!",
            Style::default().add_modifier(Modifier::BOLD),
        );
        return;
    }

    let header = Row::new(["NAME", "EMAIL", "PHONE", "COMPANY"].map(Cell::from))
        .style(colors::header())
        .height(1);

    let rows: Vec<Row> = view
        .page_items
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let selected = !app.search.focused && app.table.selected == Some(i);
            let name = Text::from(vec![
                Line::from(user.display_name.as_str()),
                Line::styled(user.handle_label(), Style::default().fg(Color::Gray)),
            ]);
            Row::new(vec![
                Cell::from(name),
                Cell::from(user.email.as_str()),
                Cell::from(user.phone.as_str()),
                Cell::from(user.organization_name()),
            ])
            .height(2)
            .style(colors::row(i, selected))
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Fill(2),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);
}

fn draw_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        line_area,
    );
}

fn draw_pager(frame: &mut Frame, view: &DirectoryView, area: Rect) {
    let mut spans = vec![Span::raw(format!(" {}", view.range_label()))];

    if view.show_pagination() {
        let left_len = spans[0].width();
        let controls = [
            Span::styled(" \u{25C0} Prev ", colors::pager_button(view.can_go_prev)),
            Span::raw(format!("  {}  ", view.page_label())),
            Span::styled(" Next \u{25B6} ", colors::pager_button(view.can_go_next)),
            Span::raw(" "),
        ];
        let controls_len: usize = controls.iter().map(Span::width).sum();
        let padding = (area.width as usize).saturating_sub(left_len + controls_len);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.extend(controls);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {}", app.status_message());
    let right_text = if app.search.focused {
        " Enter:Search  Esc:Clear  Tab:Results  Ctrl+Q:Quit "
    } else {
        " \u{2191}\u{2193}:Select  Enter:Open  \u{2190}\u{2192}:Page  /:Search  r:Reload  q:Quit "
    };

    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let style = if app.view.is_loading || app.detail().is_loading() {
        Style::default().fg(Color::White).bg(Color::Rgb(90, 70, 0))
    } else {
        Style::default().fg(Color::White).bg(colors::BAR_BG)
    };
    frame.render_widget(Paragraph::new(status_str).style(style), area);
}

fn draw_detail(frame: &mut Frame, app: &App, id: u64) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1),
            Constraint::Min(5),    // Cards
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            " \u{2190} Back to Users ",
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
        Span::raw("   "),
        Span::styled("User Details", Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let detail = app.detail();
    if detail.is_loading() {
        draw_centered(frame, chunks[2], "Loading...", Style::default().fg(Color::Cyan));
    } else if let Some(record) = detail.record() {
        let sections = detail::sections(record);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(5)])
            .split(chunks[2]);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        let areas = [columns[0], columns[1], rows[1]];
        for (section, area) in sections.iter().zip(areas) {
            draw_section(frame, section, area);
        }
    } else {
        let message = match detail.last_error() {
            Some(err) => format!("Could not load user {}: {}", id, err),
            None => format!("User {} not found", id),
        };
        draw_centered(frame, chunks[2], &message, colors::error());
    }

    let status = " Esc/b:Back  q:Quit ";
    frame.render_widget(
        Paragraph::new(format!("{:width$}", status, width = area.width as usize))
            .style(Style::default().fg(Color::White).bg(colors::BAR_BG)),
        chunks[3],
    );
}

fn draw_section(frame: &mut Frame, section: &detail::Section, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", section.title))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let lines: Vec<Line> = section
        .fields
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(format!("{:<14}", field.label), colors::label()),
                Span::styled(field.value.as_str(), colors::value()),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
