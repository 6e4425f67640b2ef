use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_ctrl};

pub(super) fn handle_upload_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 'p') {
        enqueue_action(action_tx, Action::ProcessFile);
        return;
    }
    if is_ctrl(&key, 'x') {
        app.upload_path.clear();
        return;
    }

    match key.code {
        KeyCode::Enter => {
            if app.import.is_processing() {
                return;
            }
            let path = app.upload_path.value.clone();
            enqueue_action(action_tx, Action::UploadFile { path });
        }
        KeyCode::Esc => app.clear_status(),
        KeyCode::Backspace => app.upload_path.backspace(),
        KeyCode::Left => app.upload_path.move_left(),
        KeyCode::Right => app.upload_path.move_right(),
        KeyCode::Home => app.upload_path.home(),
        KeyCode::End => app.upload_path.end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.upload_path.insert(c);
        }
        _ => {}
    }
}
