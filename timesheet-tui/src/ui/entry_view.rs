use super::*;
use ratatui::widgets::{Cell, Row, Table};
use timesheet_core::models::{format_hours, EntryField, FieldLabels};

fn column_title(field: EntryField, labels: &FieldLabels) -> String {
    match field {
        EntryField::Date => "Date".to_string(),
        EntryField::Hours(kind) => kind.label().to_string(),
        EntryField::Custom(slot) => labels.label(slot),
    }
}

fn column_width(field: EntryField) -> Constraint {
    match field {
        EntryField::Date => Constraint::Length(12),
        EntryField::Hours(_) => Constraint::Length(9),
        EntryField::Custom(_) => Constraint::Min(10),
    }
}

pub fn render_entry_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Contact / placement
            Constraint::Min(0),    // Grid
            Constraint::Length(3), // Totals / save
            Constraint::Length(4), // Controls
        ])
        .split(body);

    render_selection(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    render_controls(
        frame,
        chunks[3],
        vec![
            controls_line(&[
                ("c", "Contact"),
                ("p", "Placement"),
                ("↑↓←→/hjkl", "Move"),
                ("Enter", "Edit cell"),
                ("Esc", "Cancel"),
            ]),
            controls_line(&[
                ("a", "Add row"),
                ("d", "Delete row"),
                ("Ctrl+S", "Save all"),
                ("Tab", "Next view"),
                ("q", "Quit"),
            ]),
        ],
    );
}

fn render_selection(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.manual.selection();
    let muted = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Cyan);

    let contact = utils::option_label(selection.contact_options(), selection.selected_contact_id())
        .map(|label| Span::styled(label.to_string(), value))
        .unwrap_or_else(|| Span::styled("--Select Contact--", muted));

    let placement = if selection.is_placements_pending() {
        Span::styled("Loading placements...", Style::default().fg(Color::Yellow))
    } else {
        utils::option_label(
            selection.placement_options(),
            selection.selected_placement_id(),
        )
        .map(|label| Span::styled(label.to_string(), value))
        .unwrap_or_else(|| Span::styled("--Select Placement--", muted))
    };
    let placement_key_style = if app.manual.is_placement_disabled() {
        muted
    } else {
        Style::default().fg(Color::Yellow)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Contact:   ", Style::default().fg(Color::Yellow)),
            contact,
        ]),
        Line::from(vec![Span::styled("Placement: ", placement_key_style), placement]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Manual Timesheet Entry ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let labels = app.manual.selection().field_labels();
    let fields: Vec<EntryField> = EntryField::all().collect();

    let header = Row::new(
        fields
            .iter()
            .map(|field| Cell::from(column_title(*field, labels))),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .manual
        .grid()
        .rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells = fields.iter().enumerate().map(|(col_index, field)| {
                let is_cursor = row_index == app.grid_row && col_index == app.grid_col;
                let editing = app
                    .cell_edit
                    .as_ref()
                    .filter(|edit| &edit.row_id == row.id() && edit.field == *field);

                let text = match editing {
                    Some(edit) => utils::with_cursor(&edit.input),
                    None => match field {
                        EntryField::Hours(kind) if row.hours(*kind) == 0.0 => String::new(),
                        _ => row.value(*field),
                    },
                };
                let style = if editing.is_some() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if is_cursor {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else if row.is_editing {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                Cell::from(text).style(style)
            });
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = fields.iter().map(|field| column_width(*field)).collect();
    let title = format!(" Entries ({}) ", app.manual.grid().len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    );
    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.manual.grid().total_hours();
    let save_label = if app.manual.is_saving() {
        "Saving..."
    } else {
        "Save All Entries"
    };
    let save_style = if app.manual.is_save_disabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled("Total hours: ", Style::default().fg(Color::Yellow)),
        Span::styled(format_hours(total), Style::default().fg(Color::White)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("[ {} ]", save_label), save_style),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
