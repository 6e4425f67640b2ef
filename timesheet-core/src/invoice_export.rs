//! Finalized invoice listing and CSV export.

use tracing::{info, warn};

use crate::error::BackendError;
use crate::models::{CsvDownload, CsvExportResult, Invoice, InvoiceId};
use crate::notification::{HostEvent, Notification, Outbox};
use crate::ports::InvoiceBackend;

const LOAD_FAILURE_MESSAGE: &str = "Error loading invoices";
const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one invoice to export";
const DOWNLOAD_FAILURE_MESSAGE: &str = "Failed to download CSV file";

/// Result of trying to start an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStart {
    Ready(Vec<InvoiceId>),
    /// Nothing selected; a warning has been queued.
    NothingSelected,
    InFlight,
}

#[derive(Debug, Default)]
pub struct InvoiceExport {
    invoices: Vec<Invoice>,
    selected: Vec<InvoiceId>,
    is_loading: bool,
    is_exporting: bool,
    error: Option<String>,
    /// Server message for an export whose file the host has yet to write.
    pending_download: Option<String>,
    outbox: Outbox,
}

impl InvoiceExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn selected(&self) -> &[InvoiceId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &InvoiceId) -> bool {
        self.selected.contains(id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    /// Message of the last failed load, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.outbox.drain()
    }

    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn apply_invoices(&mut self, result: Result<Vec<Invoice>, BackendError>) {
        self.is_loading = false;
        match result {
            Ok(invoices) => {
                self.selected
                    .retain(|id| invoices.iter().any(|invoice| &invoice.id == id));
                self.invoices = invoices;
                self.error = None;
            }
            Err(e) => {
                warn!("failed to load invoices: {}", e);
                let message = match &e {
                    BackendError::ResponseError(msg) if !msg.trim().is_empty() => msg.clone(),
                    _ => LOAD_FAILURE_MESSAGE.to_string(),
                };
                self.invoices.clear();
                self.outbox.notify(Notification::error(message.clone()));
                self.error = Some(message);
            }
        }
    }

    pub async fn load<B>(&mut self, backend: &B)
    where
        B: InvoiceBackend + ?Sized,
    {
        self.start_loading();
        let result = backend.fetch_finalized_invoices().await;
        self.apply_invoices(result);
    }

    /// Replace the selection. Ids that are not in the list are dropped.
    pub fn set_selection(&mut self, ids: Vec<InvoiceId>) {
        self.selected = ids
            .into_iter()
            .filter(|id| self.invoices.iter().any(|invoice| &invoice.id == id))
            .collect();
    }

    pub fn toggle(&mut self, id: &InvoiceId) {
        if let Some(index) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(index);
        } else if self.invoices.iter().any(|invoice| &invoice.id == id) {
            self.selected.push(id.clone());
        }
    }

    /// Select everything, or nothing if everything already is.
    pub fn toggle_all(&mut self) {
        if !self.invoices.is_empty() && self.selected.len() == self.invoices.len() {
            self.selected.clear();
        } else {
            self.selected = self.invoices.iter().map(|i| i.id.clone()).collect();
        }
    }

    /// Drop the selection and ask the host to reload the list.
    pub fn refresh(&mut self) {
        self.is_loading = true;
        self.selected.clear();
        self.outbox.request_refresh();
    }

    pub fn begin_export(&mut self) -> ExportStart {
        if self.is_exporting {
            return ExportStart::InFlight;
        }
        if self.selected.is_empty() {
            self.outbox
                .notify(Notification::warning(EMPTY_SELECTION_MESSAGE));
            return ExportStart::NothingSelected;
        }
        self.is_exporting = true;
        ExportStart::Ready(self.selected.clone())
    }

    /// Reconcile an export response. On success the CSV is returned for the
    /// host to write and a refresh is requested. The success notice waits for
    /// [`Self::download_saved`].
    pub fn complete_export(
        &mut self,
        result: Result<CsvExportResult, BackendError>,
    ) -> Option<CsvDownload> {
        self.is_exporting = false;
        match result {
            Ok(CsvExportResult {
                success: true,
                csv_content,
                file_name,
                message,
            }) => {
                info!(file = %file_name, invoices = self.selected.len(), "exported invoices");
                self.pending_download = Some(message);
                self.refresh();
                Some(CsvDownload {
                    file_name,
                    content: csv_content,
                })
            }
            Ok(CsvExportResult { message, .. }) => {
                warn!("invoice export rejected: {}", message);
                self.outbox.notify(Notification::error(message));
                None
            }
            Err(e) => {
                warn!("invoice export failed: {}", e);
                self.outbox
                    .notify(Notification::error(format!("Export failed: {}", e.detail())));
                None
            }
        }
    }

    pub async fn export<B>(&mut self, backend: &B) -> Option<CsvDownload>
    where
        B: InvoiceBackend + ?Sized,
    {
        let ids = match self.begin_export() {
            ExportStart::Ready(ids) => ids,
            ExportStart::NothingSelected | ExportStart::InFlight => return None,
        };
        let result = backend.export_invoices_to_csv(&ids).await;
        self.complete_export(result)
    }

    /// The host wrote the exported file.
    pub fn download_saved(&mut self) {
        if let Some(message) = self.pending_download.take() {
            self.outbox.notify(Notification::success(message));
        }
    }

    /// The host could not write the exported file.
    pub fn download_failed(&mut self) {
        self.pending_download = None;
        self.outbox
            .notify(Notification::error(DOWNLOAD_FAILURE_MESSAGE));
    }

    pub fn has_invoices(&self) -> bool {
        !self.invoices.is_empty()
    }

    pub fn export_disabled(&self) -> bool {
        self.is_exporting || self.selected.is_empty()
    }

    pub fn refresh_disabled(&self) -> bool {
        self.is_loading || self.is_exporting
    }

    pub fn export_button_label(&self) -> String {
        if self.is_exporting {
            "Exporting...".to_string()
        } else if self.selected.is_empty() {
            "Export to CSV".to_string()
        } else {
            format!("Export {} Invoices", self.selected.len())
        }
    }

    pub fn selection_message(&self) -> String {
        if self.selected.is_empty() {
            "No invoices selected".to_string()
        } else {
            format!("{} of {} selected", self.selected.len(), self.invoices.len())
        }
    }

    pub fn status_badge(&self) -> String {
        format!("Total: {}", self.invoices.len())
    }

    pub fn status_message(&self) -> &'static str {
        "Status: Showing Finalized invoices only"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use crate::notification::Variant;

    fn invoice(id: &str) -> Invoice {
        Invoice {
            id: InvoiceId::new(id),
            name: format!("INV-{}", id),
            account_name: "Acme".to_string(),
            invoice_date: Some("2024-02-01".to_string()),
            total_amount: Some(1200.0),
            status: "Finalized".to_string(),
        }
    }

    fn notifications(export: &mut InvoiceExport) -> Vec<Notification> {
        export
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Notify(n) => Some(n),
                HostEvent::RefreshRequested => None,
            })
            .collect()
    }

    async fn loaded(backend: &MockBackend) -> InvoiceExport {
        let mut export = InvoiceExport::new();
        export.load(backend).await;
        export
    }

    fn backend() -> MockBackend {
        MockBackend::new().with_invoices(Ok(vec![invoice("1"), invoice("2"), invoice("3")]))
    }

    #[tokio::test]
    async fn load_populates_invoices() {
        let backend = backend();
        let mut export = loaded(&backend).await;

        assert_eq!(export.invoices().len(), 3);
        assert!(!export.is_loading());
        assert_eq!(export.error(), None);
        assert_eq!(export.status_badge(), "Total: 3");
        assert!(export.drain_events().is_empty());
    }

    #[tokio::test]
    async fn load_failure_empties_list_and_notifies() {
        let backend = MockBackend::new().with_invoices(Err(BackendError::other("timeout")));
        let mut export = loaded(&backend).await;

        assert!(!export.has_invoices());
        assert_eq!(export.error(), Some("Error loading invoices"));
        let notes = notifications(&mut export);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].variant, Variant::Error);
    }

    #[tokio::test]
    async fn load_failure_prefers_server_message() {
        let backend = MockBackend::new()
            .with_invoices(Err(BackendError::ResponseError("No access".to_string())));
        let export = loaded(&backend).await;

        assert_eq!(export.error(), Some("No access"));
    }

    #[tokio::test]
    async fn export_without_selection_warns_and_makes_no_call() {
        let backend = backend();
        let mut export = loaded(&backend).await;

        assert_eq!(export.export(&backend).await, None);

        assert!(backend.exports().is_empty());
        let notes = notifications(&mut export);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].variant, Variant::Warning);
        assert_eq!(notes[0].message, "Please select at least one invoice to export");
    }

    #[tokio::test]
    async fn successful_export_confirms_after_download_is_saved() {
        let backend = backend().export_returns(Ok(CsvExportResult {
            success: true,
            csv_content: "Name,Total\nINV-1,1200\n".to_string(),
            file_name: "invoices_2024.csv".to_string(),
            message: "Exported 2 invoices".to_string(),
        }));
        let mut export = loaded(&backend).await;
        export.toggle(&InvoiceId::new("1"));
        export.toggle(&InvoiceId::new("3"));
        assert_eq!(export.export_button_label(), "Export 2 Invoices");

        let download = export.export(&backend).await.unwrap();

        assert_eq!(download.file_name, "invoices_2024.csv");
        assert!(download.content.starts_with("Name,Total"));
        assert_eq!(
            backend.exports(),
            vec![vec![InvoiceId::new("1"), InvoiceId::new("3")]]
        );
        assert!(!export.is_exporting());
        assert!(export.selected().is_empty());
        assert!(export.is_loading());

        assert_eq!(export.drain_events(), vec![HostEvent::RefreshRequested]);

        export.download_saved();
        assert_eq!(
            export.drain_events(),
            vec![HostEvent::Notify(Notification::success("Exported 2 invoices"))]
        );
        export.download_saved();
        assert!(export.drain_events().is_empty());
    }

    #[tokio::test]
    async fn unwritable_download_reports_only_the_failure() {
        let backend = backend().export_returns(Ok(CsvExportResult {
            success: true,
            csv_content: "Name,Total\n".to_string(),
            file_name: "invoices.csv".to_string(),
            message: "Exported 1 invoices".to_string(),
        }));
        let mut export = loaded(&backend).await;
        export.toggle(&InvoiceId::new("1"));

        assert!(export.export(&backend).await.is_some());
        export.download_failed();
        export.download_saved();

        let notes = notifications(&mut export);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Failed to download CSV file");
        assert_eq!(notes[0].variant, Variant::Error);
    }

    #[tokio::test]
    async fn rejected_export_keeps_selection() {
        let backend = backend().export_returns(Ok(CsvExportResult {
            success: false,
            csv_content: String::new(),
            file_name: String::new(),
            message: "Invoice 2 already exported".to_string(),
        }));
        let mut export = loaded(&backend).await;
        export.toggle(&InvoiceId::new("2"));

        assert_eq!(export.export(&backend).await, None);

        assert_eq!(export.selected(), &[InvoiceId::new("2")]);
        let notes = notifications(&mut export);
        assert_eq!(notes[0].message, "Invoice 2 already exported");
        assert!(!export.is_exporting());
    }

    #[tokio::test]
    async fn transport_failure_is_prefixed() {
        let backend = backend().export_returns(Err(BackendError::other("socket closed")));
        let mut export = loaded(&backend).await;
        export.toggle_all();

        assert_eq!(export.export(&backend).await, None);

        let notes = notifications(&mut export);
        assert_eq!(notes[0].message, "Export failed: socket closed");
        assert!(!export.is_exporting());
    }

    #[tokio::test]
    async fn export_in_flight_blocks_second_export() {
        let backend = backend();
        let mut export = loaded(&backend).await;
        export.toggle_all();

        assert!(matches!(export.begin_export(), ExportStart::Ready(ids) if ids.len() == 3));
        assert_eq!(export.export_button_label(), "Exporting...");
        assert!(export.export_disabled());
        assert!(export.refresh_disabled());
        assert_eq!(export.begin_export(), ExportStart::InFlight);
    }

    #[tokio::test]
    async fn selection_messages() {
        let backend = backend();
        let mut export = loaded(&backend).await;

        assert_eq!(export.selection_message(), "No invoices selected");
        assert_eq!(export.export_button_label(), "Export to CSV");
        assert!(export.export_disabled());

        export.set_selection(vec![InvoiceId::new("2"), InvoiceId::new("unknown")]);
        assert_eq!(export.selection_message(), "1 of 3 selected");

        export.toggle_all();
        assert_eq!(export.selected().len(), 3);
        export.toggle_all();
        assert!(export.selected().is_empty());
    }

    #[test]
    fn download_failure_notifies() {
        let mut export = InvoiceExport::new();
        export.download_failed();
        assert_eq!(
            export.drain_events(),
            vec![HostEvent::Notify(Notification::error("Failed to download CSV file"))]
        );
    }
}
