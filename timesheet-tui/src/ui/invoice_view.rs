use super::*;
use ratatui::widgets::{Cell, Row, Table};
use timesheet_core::models::Invoice;

fn amount(invoice: &Invoice) -> String {
    invoice
        .total_amount
        .map(|total| format!("{:.2}", total))
        .unwrap_or_default()
}

pub fn render_invoice_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary
            Constraint::Min(0),    // Invoice table
            Constraint::Length(3), // Controls
        ])
        .split(body);

    render_summary(frame, app, chunks[0]);

    if let Some(error) = app.invoices.error() {
        let paragraph = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Invoices ")
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(paragraph, chunks[1]);
    } else if app.invoices.is_loading() {
        let paragraph = Paragraph::new("Loading invoices...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Invoices ")
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(paragraph, chunks[1]);
    } else if !app.invoices.has_invoices() {
        let paragraph = Paragraph::new("No finalized invoices found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Invoices ")
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(paragraph, chunks[1]);
    } else {
        render_table(frame, app, chunks[1]);
    }

    render_controls(
        frame,
        chunks[2],
        vec![controls_line(&[
            ("↑↓/j/k", "Navigate"),
            ("Space", "Toggle"),
            ("a", "Toggle all"),
            ("e", "Export"),
            ("r", "Refresh"),
            ("Tab", "Next view"),
            ("q", "Quit"),
        ])],
    );
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let invoices = &app.invoices;
    let export_style = if invoices.export_disabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let refresh_style = if invoices.refresh_disabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(invoices.status_badge(), Style::default().fg(Color::Cyan)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(invoices.selection_message(), Style::default().fg(Color::White)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("[ {} ]", invoices.export_button_label()), export_style),
            Span::raw(" "),
            Span::styled("[ Refresh ]", refresh_style),
        ]),
        Line::from(Span::styled(
            invoices.status_message(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Invoice Export ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["", "Invoice", "Account", "Date", "Amount", "Status"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .invoices
        .invoices()
        .iter()
        .enumerate()
        .map(|(i, invoice)| {
            let checkbox = if app.invoices.is_selected(&invoice.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if i == app.invoice_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new([
                Cell::from(checkbox),
                Cell::from(invoice.name.clone()),
                Cell::from(invoice.account_name.clone()),
                Cell::from(invoice.invoice_date.clone().unwrap_or_default()),
                Cell::from(amount(invoice)),
                Cell::from(invoice.status.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Finalized Invoices "),
    );
    frame.render_widget(table, area);
}
