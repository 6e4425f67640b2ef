use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use timesheet_core::models::SelectionOption;
use timesheet_core::{Notification, SubmissionController};

use super::{App, Picker, PickerKind, TextInput};

fn options_for(manual: &SubmissionController, kind: PickerKind) -> &[SelectionOption] {
    match kind {
        PickerKind::Contact => manual.selection().contact_options(),
        PickerKind::Placement => manual.selection().placement_options(),
    }
}

fn filter_options(options: &[SelectionOption], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = options
        .iter()
        .enumerate()
        .filter(|(_, option)| !option.is_sentinel())
        .filter_map(|(i, option)| matcher.fuzzy_match(&option.label, query).map(|s| (s, i)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, i)| i).collect()
}

impl App {
    pub fn picker_options(&self) -> &[SelectionOption] {
        match &self.picker {
            Some(picker) => options_for(&self.manual, picker.kind),
            None => &[],
        }
    }

    pub fn open_picker(&mut self, kind: PickerKind) {
        if kind == PickerKind::Placement && self.manual.is_placement_disabled() {
            let message = if self.manual.selection().selected_contact().is_none() {
                "Select a contact first"
            } else {
                "Placements are still loading"
            };
            self.set_status(Notification::warning(message));
            return;
        }
        self.cancel_cell_edit();
        let options = options_for(&self.manual, kind);
        if options.is_empty() {
            self.set_status(Notification::warning("Nothing to choose from yet"));
            return;
        }
        self.picker = Some(Picker {
            kind,
            search: TextInput::new(),
            filtered: filter_options(options, ""),
            index: 0,
        });
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    fn refilter_picker(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let options = options_for(&self.manual, picker.kind);
        picker.filtered = filter_options(options, &picker.search.value);
        picker.index = 0;
    }

    pub fn picker_input_char(&mut self, c: char) {
        if let Some(picker) = self.picker.as_mut() {
            picker.search.insert(c);
        }
        self.refilter_picker();
    }

    pub fn picker_backspace(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            picker.search.backspace();
        }
        self.refilter_picker();
    }

    pub fn picker_clear(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            picker.search.clear();
        }
        self.refilter_picker();
    }

    pub fn picker_next(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            if picker.index + 1 < picker.filtered.len() {
                picker.index += 1;
            }
        }
    }

    pub fn picker_previous(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            picker.index = picker.index.saturating_sub(1);
        }
    }

    /// Close the picker and return the chosen option value.
    pub fn confirm_picker(&mut self) -> Option<(PickerKind, String)> {
        let picker = self.picker.take()?;
        let option_index = *picker.filtered.get(picker.index)?;
        let option = options_for(&self.manual, picker.kind).get(option_index)?;
        Some((picker.kind, option.value.clone()))
    }
}
