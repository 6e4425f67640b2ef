use super::*;
use timesheet_core::models::ACCEPTED_FORMATS;

pub fn render_upload_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Path input
            Constraint::Length(1), // Accepted formats
            Constraint::Min(0),    // Uploaded files
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let input_text = if app.upload_path.value.is_empty() {
        "Type the path of a timesheet file...█".to_string()
    } else {
        utils::with_cursor(&app.upload_path)
    };
    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" File ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(input, chunks[0]);

    let formats = Paragraph::new(Line::from(vec![
        Span::raw("  "),
        Span::styled("Accepted formats: ", Style::default().fg(Color::DarkGray)),
        Span::styled(ACCEPTED_FORMATS.join(", "), Style::default().fg(Color::Gray)),
    ]));
    frame.render_widget(formats, chunks[1]);

    let files = app.import.uploaded_files();
    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let marker = if i == 0 { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(file.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  ({})", file.document_id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = if app.import.is_processing() {
        " Uploaded Files (processing...) ".to_string()
    } else {
        format!(" Uploaded Files ({}) ", files.len())
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[2]);

    let process_label = if app.import.is_processing() {
        "Processing..."
    } else {
        "Process File"
    };
    render_controls(
        frame,
        chunks[3],
        vec![controls_line(&[
            ("Enter", "Upload"),
            ("Ctrl+P", process_label),
            ("Ctrl+X", "Clear"),
            ("Tab", "Next view"),
            ("Ctrl+C", "Quit"),
        ])],
    );
}
