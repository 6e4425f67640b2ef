use crate::app::{App, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod invoices;
mod manual_entry;
mod upload;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'c') {
        app.quit();
        return;
    }

    let overlay_open = app.picker.is_some() || app.cell_edit.is_some();
    if !overlay_open {
        match key.code {
            KeyCode::Tab => {
                app.next_tab();
                return;
            }
            KeyCode::BackTab => {
                app.previous_tab();
                return;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if !app.is_typing() => {
                app.quit();
                return;
            }
            _ => {}
        }
    }

    match app.tab {
        Tab::Upload => upload::handle_upload_key(key, app, action_tx),
        Tab::ManualEntry => manual_entry::handle_manual_entry_key(key, app, action_tx),
        Tab::Invoices => invoices::handle_invoices_key(key, app, action_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimesheetConfig;
    use crate::runtime::action_queue::channel;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_is_typed_on_the_upload_tab() {
        let mut app = App::new(&TimesheetConfig::default());
        let (tx, _rx) = channel();

        handle_view_key(press(KeyCode::Char('q')), &mut app, &tx);

        assert!(app.running);
        assert_eq!(app.upload_path.value, "q");
    }

    #[test]
    fn q_quits_outside_text_inputs() {
        let mut app = App::new(&TimesheetConfig::default());
        let (tx, _rx) = channel();

        handle_view_key(press(KeyCode::Tab), &mut app, &tx);
        assert_eq!(app.tab, Tab::ManualEntry);
        handle_view_key(press(KeyCode::Char('q')), &mut app, &tx);

        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new(&TimesheetConfig::default());
        let (tx, _rx) = channel();

        handle_view_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );

        assert!(!app.running);
    }
}
