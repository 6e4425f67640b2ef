use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height.min(r.height)),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width.min(r.width)),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Label of the option whose value is `value`, if any.
pub fn option_label<'a>(
    options: &'a [timesheet_core::models::SelectionOption],
    value: &str,
) -> Option<&'a str> {
    options
        .iter()
        .find(|option| !option.is_sentinel() && option.value == value)
        .map(|option| option.label.as_str())
}

/// Text with a block cursor at the input position.
pub fn with_cursor(input: &crate::app::TextInput) -> String {
    let (before, after) = input.split_at_cursor();
    format!("{}█{}", before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timesheet_core::models::SelectionOption;

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect(60, 14, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }

    #[test]
    fn option_label_skips_sentinel() {
        let options = vec![
            SelectionOption::sentinel("--Select Contact--"),
            SelectionOption::new("Ada Lovelace", "C1"),
        ];
        assert_eq!(option_label(&options, "C1"), Some("Ada Lovelace"));
        assert_eq!(option_label(&options, ""), None);
    }
}
