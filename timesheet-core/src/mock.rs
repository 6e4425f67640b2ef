//! Scripted in-memory backend for workflow tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{
    Contact, ContactId, CsvExportResult, DocumentId, FieldLabels, Invoice, InvoiceId, Placement,
    PlacementId, ProcessResult, SaveBatchRequest, SaveResult, UploadedFile,
};
use crate::ports::{FileImportBackend, InvoiceBackend, Result, TimesheetBackend};

/// Backend whose responses are fixed up front. Every call is recorded so
/// tests can assert on what was (and was not) sent.
#[derive(Clone)]
pub struct MockBackend {
    contacts: Result<Vec<Contact>>,
    placements: HashMap<ContactId, Vec<Placement>>,
    placements_error: Option<BackendError>,
    labels: HashMap<PlacementId, FieldLabels>,
    labels_error: Option<BackendError>,
    save_response: Result<SaveResult>,
    invoices: Result<Vec<Invoice>>,
    export_response: Result<CsvExportResult>,
    process_response: Result<ProcessResult>,
    placement_calls: Arc<Mutex<Vec<ContactId>>>,
    saved_batches: Arc<Mutex<Vec<SaveBatchRequest>>>,
    exports: Arc<Mutex<Vec<Vec<InvoiceId>>>>,
    processed: Arc<Mutex<Vec<DocumentId>>>,
    invoice_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            contacts: Ok(Vec::new()),
            placements: HashMap::new(),
            placements_error: None,
            labels: HashMap::new(),
            labels_error: None,
            save_response: Ok(SaveResult::ok()),
            invoices: Ok(Vec::new()),
            export_response: Ok(CsvExportResult {
                success: true,
                csv_content: String::new(),
                file_name: "invoices.csv".to_string(),
                message: String::new(),
            }),
            process_response: Ok(ProcessResult {
                success: true,
                records_created: 0,
                error_message: String::new(),
            }),
            placement_calls: Arc::new(Mutex::new(Vec::new())),
            saved_batches: Arc::new(Mutex::new(Vec::new())),
            exports: Arc::new(Mutex::new(Vec::new())),
            processed: Arc::new(Mutex::new(Vec::new())),
            invoice_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = Ok(contacts);
        self
    }

    pub fn failing_contacts(mut self, error: BackendError) -> Self {
        self.contacts = Err(error);
        self
    }

    pub fn with_placements(mut self, contact_id: &str, placements: Vec<Placement>) -> Self {
        self.placements.insert(ContactId::new(contact_id), placements);
        self
    }

    pub fn failing_placements(mut self, error: BackendError) -> Self {
        self.placements_error = Some(error);
        self
    }

    pub fn with_labels(mut self, placement_id: &str, labels: FieldLabels) -> Self {
        self.labels.insert(PlacementId::new(placement_id), labels);
        self
    }

    pub fn failing_labels(mut self, error: BackendError) -> Self {
        self.labels_error = Some(error);
        self
    }

    pub fn save_returns(mut self, response: Result<SaveResult>) -> Self {
        self.save_response = response;
        self
    }

    pub fn with_invoices(mut self, invoices: Result<Vec<Invoice>>) -> Self {
        self.invoices = invoices;
        self
    }

    pub fn export_returns(mut self, response: Result<CsvExportResult>) -> Self {
        self.export_response = response;
        self
    }

    pub fn process_returns(mut self, response: Result<ProcessResult>) -> Self {
        self.process_response = response;
        self
    }

    /// Contacts placements were requested for, in call order.
    pub fn placement_calls(&self) -> Vec<ContactId> {
        self.placement_calls.lock().unwrap().clone()
    }

    pub fn saved_batches(&self) -> Vec<SaveBatchRequest> {
        self.saved_batches.lock().unwrap().clone()
    }

    pub fn save_calls(&self) -> usize {
        self.saved_batches.lock().unwrap().len()
    }

    pub fn exports(&self) -> Vec<Vec<InvoiceId>> {
        self.exports.lock().unwrap().clone()
    }

    pub fn processed(&self) -> Vec<DocumentId> {
        self.processed.lock().unwrap().clone()
    }

    pub fn invoice_calls(&self) -> usize {
        self.invoice_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimesheetBackend for MockBackend {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        self.contacts.clone()
    }

    async fn fetch_placements_for_contact(
        &self,
        contact_id: &ContactId,
    ) -> Result<Vec<Placement>> {
        self.placement_calls.lock().unwrap().push(contact_id.clone());
        if let Some(error) = &self.placements_error {
            return Err(error.clone());
        }
        Ok(self.placements.get(contact_id).cloned().unwrap_or_default())
    }

    async fn fetch_field_labels(&self, placement_id: &PlacementId) -> Result<Option<FieldLabels>> {
        if let Some(error) = &self.labels_error {
            return Err(error.clone());
        }
        Ok(self.labels.get(placement_id).cloned())
    }

    async fn save_timesheet_batch(&self, batch: &SaveBatchRequest) -> Result<SaveResult> {
        self.saved_batches.lock().unwrap().push(batch.clone());
        self.save_response.clone()
    }
}

#[async_trait]
impl InvoiceBackend for MockBackend {
    async fn fetch_finalized_invoices(&self) -> Result<Vec<Invoice>> {
        self.invoice_calls.fetch_add(1, Ordering::SeqCst);
        self.invoices.clone()
    }

    async fn export_invoices_to_csv(&self, invoice_ids: &[InvoiceId]) -> Result<CsvExportResult> {
        self.exports.lock().unwrap().push(invoice_ids.to_vec());
        self.export_response.clone()
    }
}

#[async_trait]
impl FileImportBackend for MockBackend {
    async fn upload_timesheet_file(&self, file_name: &str, _content: Vec<u8>) -> Result<UploadedFile> {
        Ok(UploadedFile {
            document_id: DocumentId::new(format!("doc-{}", file_name)),
            name: file_name.to_string(),
        })
    }

    async fn process_timesheet_file(&self, document_id: &DocumentId) -> Result<ProcessResult> {
        self.processed.lock().unwrap().push(document_id.clone());
        self.process_response.clone()
    }
}
