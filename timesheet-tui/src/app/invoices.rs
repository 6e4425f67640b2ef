use super::App;

impl App {
    pub fn invoice_next(&mut self) {
        if self.invoice_cursor + 1 < self.invoices.invoices().len() {
            self.invoice_cursor += 1;
        }
    }

    pub fn invoice_previous(&mut self) {
        self.invoice_cursor = self.invoice_cursor.saturating_sub(1);
    }

    pub fn toggle_invoice_under_cursor(&mut self) {
        if let Some(id) = self
            .invoices
            .invoices()
            .get(self.invoice_cursor)
            .map(|invoice| invoice.id.clone())
        {
            self.invoices.toggle(&id);
        }
    }

    /// Keep the cursor on the list after it was reloaded.
    pub fn clamp_invoice_cursor(&mut self) {
        let len = self.invoices.invoices().len();
        self.invoice_cursor = self.invoice_cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimesheetConfig;
    use timesheet_core::models::{Invoice, InvoiceId};

    fn invoice(id: &str) -> Invoice {
        Invoice {
            id: InvoiceId::new(id),
            name: format!("INV-{}", id),
            account_name: String::new(),
            invoice_date: None,
            total_amount: None,
            status: "Finalized".to_string(),
        }
    }

    #[test]
    fn cursor_toggles_the_row_it_is_on() {
        let mut app = App::new(&TimesheetConfig::default());
        app.invoices
            .apply_invoices(Ok(vec![invoice("1"), invoice("2")]));

        app.invoice_next();
        app.invoice_next();
        app.toggle_invoice_under_cursor();
        assert_eq!(app.invoices.selected(), &[InvoiceId::new("2")]);

        app.invoices.apply_invoices(Ok(vec![invoice("1")]));
        app.clamp_invoice_cursor();
        assert_eq!(app.invoice_cursor, 0);
        assert!(app.invoices.selected().is_empty());
    }
}
