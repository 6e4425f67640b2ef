//! Outbound ports: the remote procedures the workflows depend on.
//!
//! Implemented over HTTP by `backoffice-client` and in memory by the TUI's
//! dev backend; tests use the mocks in `crate::mock`.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{
    Contact, ContactId, CsvExportResult, DocumentId, FieldLabels, Invoice, InvoiceId, Placement,
    PlacementId, ProcessResult, SaveBatchRequest, SaveResult, UploadedFile,
};

pub type Result<T> = std::result::Result<T, BackendError>;

/// Lookups and batch save behind the manual entry workflow.
#[async_trait]
pub trait TimesheetBackend: Send + Sync {
    /// Contacts that have at least one placement.
    async fn fetch_contacts(&self) -> Result<Vec<Contact>>;

    async fn fetch_placements_for_contact(&self, contact_id: &ContactId)
        -> Result<Vec<Placement>>;

    /// Custom field labels from the placement's billing profile.
    ///
    /// `None` when the placement has no billing profile.
    async fn fetch_field_labels(&self, placement_id: &PlacementId)
        -> Result<Option<FieldLabels>>;

    async fn save_timesheet_batch(&self, batch: &SaveBatchRequest) -> Result<SaveResult>;
}

/// Finalized invoice listing and CSV export.
#[async_trait]
pub trait InvoiceBackend: Send + Sync {
    async fn fetch_finalized_invoices(&self) -> Result<Vec<Invoice>>;

    async fn export_invoices_to_csv(&self, invoice_ids: &[InvoiceId]) -> Result<CsvExportResult>;
}

/// Timesheet file upload and server-side processing.
#[async_trait]
pub trait FileImportBackend: Send + Sync {
    async fn upload_timesheet_file(&self, file_name: &str, content: Vec<u8>)
        -> Result<UploadedFile>;

    async fn process_timesheet_file(&self, document_id: &DocumentId) -> Result<ProcessResult>;
}
