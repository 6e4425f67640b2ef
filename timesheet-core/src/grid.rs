use crate::models::{EntryField, EntryRow, FieldError, RowId};

/// Number of blank rows a fresh grid starts with.
pub const INITIAL_ROWS: usize = 5;

/// Ordered, editable collection of timesheet rows.
///
/// Row ids come from a counter that survives [`EntryGrid::reset`], so ids are
/// never reused within one grid.
#[derive(Debug)]
pub struct EntryGrid {
    rows: Vec<EntryRow>,
    next_seq: u64,
}

impl Default for EntryGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryGrid {
    pub fn new() -> Self {
        let mut grid = Self {
            rows: Vec::with_capacity(INITIAL_ROWS),
            next_seq: 0,
        };
        grid.reset();
        grid
    }

    fn next_id(&mut self) -> RowId {
        let id = RowId::synthetic(self.next_seq);
        self.next_seq += 1;
        id
    }

    /// Replace all rows with [`INITIAL_ROWS`] blank, non-editing rows.
    pub fn reset(&mut self) {
        let rows: Vec<EntryRow> = (0..INITIAL_ROWS)
            .map(|_| EntryRow::blank(self.next_id()))
            .collect();
        self.rows = rows;
    }

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn row(&self, row_id: &RowId) -> Option<&EntryRow> {
        self.rows.iter().find(|row| row.id() == row_id)
    }

    fn row_mut(&mut self, row_id: &RowId) -> Option<&mut EntryRow> {
        self.rows.iter_mut().find(|row| row.id() == row_id)
    }

    pub fn position(&self, row_id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == row_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Set one field on one row. Unknown rows are ignored; an invalid hour
    /// value is reported and leaves the row as it was.
    pub fn update_field(
        &mut self,
        row_id: &RowId,
        field: EntryField,
        value: &str,
    ) -> Result<(), FieldError> {
        match self.row_mut(row_id) {
            Some(row) => row.set(field, value),
            None => Ok(()),
        }
    }

    /// Like [`EntryGrid::update_field`] with the field given by its platform
    /// name, e.g. `"regularHours"`.
    pub fn update_named_field(
        &mut self,
        row_id: &RowId,
        field_name: &str,
        value: &str,
    ) -> Result<(), FieldError> {
        let field = field_name.parse()?;
        self.update_field(row_id, field, value)
    }

    pub fn begin_edit(&mut self, row_id: &RowId) {
        if let Some(row) = self.row_mut(row_id) {
            row.is_editing = true;
        }
    }

    pub fn end_edit(&mut self, row_id: &RowId) {
        if let Some(row) = self.row_mut(row_id) {
            row.is_editing = false;
        }
    }

    /// Remove a row. The grid is allowed to become empty.
    pub fn delete_row(&mut self, row_id: &RowId) -> Option<EntryRow> {
        let index = self.position(row_id)?;
        Some(self.rows.remove(index))
    }

    /// Append a blank row already in edit mode.
    pub fn add_row(&mut self) -> &EntryRow {
        let mut row = EntryRow::blank(self.next_id());
        row.is_editing = true;
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    /// Rows that have a date and book time in at least one hour bucket.
    pub fn valid_entries(&self) -> Vec<EntryRow> {
        self.rows
            .iter()
            .filter(|row| row.is_submittable())
            .cloned()
            .collect()
    }

    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(EntryRow::total_hours).sum()
    }
}
