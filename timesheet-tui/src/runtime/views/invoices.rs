use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_invoices_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.invoice_next(),
        KeyCode::Up | KeyCode::Char('k') => app.invoice_previous(),
        KeyCode::Char(' ') => app.toggle_invoice_under_cursor(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.invoices.toggle_all(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if !app.invoices.refresh_disabled() {
                app.invoices.refresh();
                enqueue_action(action_tx, Action::LoadInvoices);
            }
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            enqueue_action(action_tx, Action::ExportInvoices);
        }
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimesheetConfig;
    use crate::runtime::action_queue::channel;
    use crossterm::event::KeyModifiers;

    #[test]
    fn refresh_clears_selection_and_reloads() {
        let mut app = App::new(&TimesheetConfig::default());
        let (tx, mut rx) = channel();

        handle_invoices_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE), &mut app, &tx);

        assert!(app.invoices.is_loading());
        assert!(matches!(rx.try_recv(), Ok(Action::LoadInvoices)));
    }
}
