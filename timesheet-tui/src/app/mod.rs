use crate::config::TimesheetConfig;
use std::path::PathBuf;
use timesheet_core::{
    FileImport, HostEvent, InvoiceExport, Notification, SubmissionController, Variant,
};
use tracing::{info, warn};

mod entry;
mod invoices;
mod picker;
mod state;
pub use state::{CellEdit, Picker, PickerKind, Tab, TextInput};

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub status: Option<Notification>,

    // Workflows
    pub manual: SubmissionController,
    pub invoices: InvoiceExport,
    pub import: FileImport,

    // Manual entry grid cursor; `grid_col` indexes `EntryField::all()`
    pub grid_row: usize,
    pub grid_col: usize,
    pub cell_edit: Option<CellEdit>,
    pub picker: Option<Picker>,

    // Invoice list cursor
    pub invoice_cursor: usize,

    // Upload tab path input
    pub upload_path: TextInput,

    pub download_dir: PathBuf,

    // Loading indicator
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(cfg: &TimesheetConfig) -> Self {
        Self {
            running: true,
            tab: Tab::Upload,
            status: None,
            manual: SubmissionController::new(),
            invoices: InvoiceExport::new(),
            import: FileImport::new(),
            grid_row: 0,
            grid_col: 0,
            cell_edit: None,
            picker: None,
            invoice_cursor: 0,
            upload_path: TextInput::new(),
            download_dir: cfg.download_dir(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, notification: Notification) {
        self.status = Some(notification);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    /// True while any remote call started by the UI is outstanding.
    pub fn is_busy(&self) -> bool {
        self.manual.is_loading()
            || self.manual.is_saving()
            || self.invoices.is_loading()
            || self.invoices.is_exporting()
            || self.import.is_processing()
    }

    /// True when keystrokes should go to a text input rather than to
    /// single-key shortcuts.
    pub fn is_typing(&self) -> bool {
        self.cell_edit.is_some() || self.picker.is_some() || self.tab == Tab::Upload
    }

    /// Drain host events from every workflow. The most recent notification
    /// becomes the status line. Returns true when the invoice list asked to
    /// be reloaded.
    pub fn collect_events(&mut self) -> bool {
        let mut events = self.manual.drain_events();
        events.extend(self.invoices.drain_events());
        events.extend(self.import.drain_events());

        let mut refresh_invoices = false;
        for event in events {
            match event {
                HostEvent::Notify(notification) => {
                    match notification.variant {
                        Variant::Error => warn!("{}: {}", notification.title, notification.message),
                        Variant::Success | Variant::Warning => {
                            info!("{}: {}", notification.title, notification.message)
                        }
                    }
                    self.set_status(notification);
                }
                HostEvent::RefreshRequested => refresh_invoices = true,
            }
        }
        refresh_invoices
    }
}
