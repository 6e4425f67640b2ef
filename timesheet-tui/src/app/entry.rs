use timesheet_core::models::{EntryField, RowId};
use timesheet_core::Notification;

use super::{App, CellEdit, TextInput};

impl App {
    pub fn grid_columns() -> usize {
        EntryField::all().count()
    }

    /// Field under the grid cursor.
    pub fn grid_field(&self) -> EntryField {
        EntryField::all()
            .nth(self.grid_col)
            .unwrap_or(EntryField::Date)
    }

    pub fn selected_row_id(&self) -> Option<RowId> {
        self.manual
            .grid()
            .rows()
            .get(self.grid_row)
            .map(|row| row.id().clone())
    }

    pub fn grid_move(&mut self, rows: isize, cols: isize) {
        let row_count = self.manual.grid().len();
        if row_count == 0 {
            self.grid_row = 0;
        } else {
            self.grid_row = self.grid_row.saturating_add_signed(rows).min(row_count - 1);
        }
        self.grid_col = self
            .grid_col
            .saturating_add_signed(cols)
            .min(Self::grid_columns() - 1);
    }

    fn clamp_grid_cursor(&mut self) {
        self.grid_move(0, 0);
    }

    /// Start typing into the cell under the cursor.
    pub fn begin_cell_edit(&mut self) {
        let Some(row_id) = self.selected_row_id() else {
            return;
        };
        let field = self.grid_field();
        let current = self
            .manual
            .grid()
            .row(&row_id)
            .map(|row| row.value(field))
            .unwrap_or_default();
        // Zero hours start as an empty input.
        let initial = if field.is_numeric() && current == "0" {
            String::new()
        } else {
            current
        };

        self.manual.grid_mut().begin_edit(&row_id);
        self.cell_edit = Some(CellEdit {
            row_id,
            field,
            input: TextInput::from_str(&initial),
        });
    }

    /// Write the edited value into the grid. An invalid value keeps the
    /// editor open and reports the problem.
    pub fn commit_cell_edit(&mut self) -> bool {
        let Some(edit) = self.cell_edit.take() else {
            return false;
        };
        match self
            .manual
            .grid_mut()
            .update_field(&edit.row_id, edit.field, &edit.input.value)
        {
            Ok(()) => {
                self.manual.grid_mut().end_edit(&edit.row_id);
                true
            }
            Err(e) => {
                self.set_status(Notification::error(e.to_string()));
                self.cell_edit = Some(edit);
                false
            }
        }
    }

    pub fn cancel_cell_edit(&mut self) {
        if let Some(edit) = self.cell_edit.take() {
            self.manual.grid_mut().end_edit(&edit.row_id);
        }
    }

    pub fn add_grid_row(&mut self) {
        if self.manual.is_add_row_disabled() {
            self.set_status(Notification::warning("Select a placement before adding rows"));
            return;
        }
        self.cancel_cell_edit();
        let row_id = self.manual.grid_mut().add_row().id().clone();
        self.grid_row = self.manual.grid().position(&row_id).unwrap_or(0);
        self.grid_col = 0;
        self.begin_cell_edit();
    }

    pub fn delete_grid_row(&mut self) {
        let Some(row_id) = self.selected_row_id() else {
            return;
        };
        if self
            .cell_edit
            .as_ref()
            .is_some_and(|edit| edit.row_id == row_id)
        {
            self.cell_edit = None;
        }
        self.manual.grid_mut().delete_row(&row_id);
        self.clamp_grid_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimesheetConfig;
    use timesheet_core::models::HourKind;

    fn app() -> App {
        App::new(&TimesheetConfig::default())
    }

    fn type_into(app: &mut App, text: &str) {
        let edit = app.cell_edit.as_mut().unwrap();
        edit.input.clear();
        for c in text.chars() {
            edit.input.insert(c);
        }
    }

    #[test]
    fn cursor_is_clamped_to_grid() {
        let mut app = app();
        app.grid_move(-3, -3);
        assert_eq!((app.grid_row, app.grid_col), (0, 0));

        app.grid_move(100, 100);
        assert_eq!(app.grid_row, 4);
        assert_eq!(app.grid_col, App::grid_columns() - 1);
    }

    #[test]
    fn committing_a_cell_updates_only_that_row() {
        let mut app = app();
        app.grid_move(1, 1);
        assert_eq!(app.grid_field(), EntryField::Hours(HourKind::Regular));

        app.begin_cell_edit();
        assert_eq!(app.cell_edit.as_ref().unwrap().input.value, "");
        assert!(app.manual.grid().rows()[1].is_editing);

        type_into(&mut app, "7.5");
        assert!(app.commit_cell_edit());

        let rows = app.manual.grid().rows();
        assert_eq!(rows[1].regular_hours, 7.5);
        assert!(!rows[1].is_editing);
        assert_eq!(rows[0].regular_hours, 0.0);
    }

    #[test]
    fn invalid_hours_keep_editor_open() {
        let mut app = app();
        app.grid_move(0, 1);
        app.begin_cell_edit();
        type_into(&mut app, "eight");

        assert!(!app.commit_cell_edit());

        assert!(app.cell_edit.is_some());
        assert_eq!(app.manual.grid().rows()[0].regular_hours, 0.0);
        assert!(app.status.is_some());
    }

    #[test]
    fn add_row_needs_a_placement() {
        let mut app = app();
        app.add_grid_row();
        assert_eq!(app.manual.grid().len(), 5);
        assert!(app.status.is_some());
    }

    #[test]
    fn deleting_last_row_moves_cursor_up() {
        let mut app = app();
        app.grid_move(4, 0);
        app.delete_grid_row();
        assert_eq!(app.manual.grid().len(), 4);
        assert_eq!(app.grid_row, 3);

        for _ in 0..4 {
            app.delete_grid_row();
        }
        assert!(app.manual.grid().is_empty());
        assert_eq!(app.grid_row, 0);
        assert_eq!(app.selected_row_id(), None);
    }
}
