use crate::app::{App, PickerKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_ctrl};

pub(super) fn handle_manual_entry_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 's') {
        enqueue_action(action_tx, Action::SubmitAll);
        return;
    }

    if app.picker.is_some() {
        handle_picker_key(key, app, action_tx);
    } else if app.cell_edit.is_some() {
        handle_cell_edit_key(key, app);
    } else {
        handle_grid_key(key, app);
    }
}

fn handle_picker_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.close_picker(),
        KeyCode::Down => app.picker_next(),
        KeyCode::Up => app.picker_previous(),
        KeyCode::Enter => {
            if let Some((kind, value)) = app.confirm_picker() {
                let action = match kind {
                    PickerKind::Contact => Action::SelectContact(value),
                    PickerKind::Placement => Action::SelectPlacement(value),
                };
                enqueue_action(action_tx, action);
            }
        }
        KeyCode::Backspace => app.picker_backspace(),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.picker_clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.picker_input_char(c);
        }
        _ => {}
    }
}

fn handle_cell_edit_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_cell_edit(),
        KeyCode::Enter => {
            app.commit_cell_edit();
        }
        KeyCode::Tab => {
            if app.commit_cell_edit() {
                app.grid_move(0, 1);
                app.begin_cell_edit();
            }
        }
        _ => {
            if let Some(edit) = app.cell_edit.as_mut() {
                let input = &mut edit.input;
                match key.code {
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.home(),
                    KeyCode::End => input.end(),
                    KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.clear();
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        input.insert(c);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn handle_grid_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => app.open_picker(PickerKind::Contact),
        KeyCode::Char('p') | KeyCode::Char('P') => app.open_picker(PickerKind::Placement),
        KeyCode::Up | KeyCode::Char('k') => app.grid_move(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.grid_move(1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.grid_move(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.grid_move(0, 1),
        KeyCode::Enter => app.begin_cell_edit(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.add_grid_row(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.delete_grid_row(),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}
