use crate::app::{App, PickerKind, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Tabs},
    Frame,
};
use timesheet_core::Variant;

mod entry_view;
mod invoice_view;
mod upload_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    render_tabs(frame, root[0], app);

    match app.tab {
        Tab::Upload => upload_view::render_upload_view(frame, app, root[1]),
        Tab::ManualEntry => entry_view::render_entry_view(frame, app, root[1]),
        Tab::Invoices => invoice_view::render_invoice_view(frame, app, root[1]),
    }

    render_status(frame, root[2], app);

    if app.picker.is_some() {
        render_picker_overlay(frame, app);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    let titles = Tab::ALL.iter().map(|tab| Line::from(tab.title()));
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Timesheets "),
        );
    frame.render_widget(tabs, chunks[0]);

    let busy = app.is_busy();
    let throbber = throbber_widgets_tui::Throbber::default()
        .label(if busy { "Working" } else { "Ready" })
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if busy {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    let inner = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let throbber_area = inner.inner(chunks[1]);
    frame.render_widget(inner, chunks[1]);
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
}

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (status_text, color) = match &app.status {
        Some(notification) => {
            let color = match notification.variant {
                Variant::Error => Color::Red,
                Variant::Warning => Color::Yellow,
                Variant::Success => Color::Green,
            };
            (
                format!("{}: {}", notification.title, notification.message),
                color,
            )
        }
        None => ("Tab: Switch view  q: Quit".to_string(), Color::White),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(Style::default().fg(color))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(status, area);
}

/// One line of key hints, keys in yellow.
pub(super) fn controls_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        let separator = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(": {}{}", action, separator)));
    }
    Line::from(spans)
}

pub(super) fn render_controls(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let controls = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}

fn render_picker_overlay(frame: &mut Frame, app: &App) {
    let Some(picker) = &app.picker else {
        return;
    };
    let options = app.picker_options();

    let area = utils::centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Options
            Constraint::Length(3), // Controls
        ])
        .split(area);

    let search_text = if picker.search.value.is_empty() {
        "Type to search...".to_string()
    } else {
        utils::with_cursor(&picker.search)
    };
    let search_box = Paragraph::new(search_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, chunks[0]);

    let items: Vec<ListItem> = picker
        .filtered
        .iter()
        .enumerate()
        .filter_map(|(i, option_index)| {
            let option = options.get(*option_index)?;
            let style = if i == picker.index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if option.is_sentinel() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            Some(ListItem::new(option.label.clone()).style(style))
        })
        .collect();

    let noun = match picker.kind {
        PickerKind::Contact => "Contacts",
        PickerKind::Placement => "Placements",
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ({}/{}) ", noun, picker.filtered.len(), options.len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    render_controls(
        frame,
        chunks[2],
        vec![controls_line(&[
            ("↑↓", "Navigate"),
            ("Enter", "Select"),
            ("Ctrl+X", "Clear"),
            ("Esc", "Cancel"),
        ])],
    );
}
