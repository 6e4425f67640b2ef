//! In-memory backend for `timesheet-tui dev`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use timesheet_core::models::{
    Contact, ContactId, CsvExportResult, CustomSlot, DocumentId, FieldLabels, Invoice, InvoiceId,
    Placement, PlacementId, ProcessResult, SaveBatchRequest, SaveResult, UploadedFile,
};
use timesheet_core::ports::{FileImportBackend, InvoiceBackend, Result, TimesheetBackend};
use timesheet_core::BackendError;
use tracing::debug;

const DEFAULT_LATENCY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct DevStore {
    contacts: Vec<Contact>,
    placements: HashMap<ContactId, Vec<Placement>>,
    labels: HashMap<PlacementId, FieldLabels>,
    invoices: Vec<Invoice>,
    saved_rows: usize,
    documents: HashMap<DocumentId, Vec<u8>>,
    next_document: u32,
}

impl DevBackend {
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store())),
            latency,
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, DevStore>> {
        self.store
            .lock()
            .map_err(|_| BackendError::other("dev store lock poisoned"))
    }

    async fn simulate_latency(&self, factor: u32) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency * factor).await;
        }
    }

    #[cfg(test)]
    fn saved_rows(&self) -> usize {
        self.store.lock().unwrap().saved_rows
    }
}

#[async_trait]
impl TimesheetBackend for DevBackend {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        self.simulate_latency(1).await;
        Ok(self.store()?.contacts.clone())
    }

    async fn fetch_placements_for_contact(&self, contact_id: &ContactId) -> Result<Vec<Placement>> {
        // Placements for the first contact arrive late.
        let factor = if contact_id.as_str() == "003-dev-001" { 4 } else { 1 };
        self.simulate_latency(factor).await;
        Ok(self
            .store()?
            .placements
            .get(contact_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_field_labels(&self, placement_id: &PlacementId) -> Result<Option<FieldLabels>> {
        self.simulate_latency(1).await;
        Ok(self.store()?.labels.get(placement_id).cloned())
    }

    async fn save_timesheet_batch(&self, batch: &SaveBatchRequest) -> Result<SaveResult> {
        self.simulate_latency(2).await;
        let mut store = self.store()?;

        let known_placement = store
            .placements
            .get(&batch.contact_id)
            .is_some_and(|placements| placements.iter().any(|p| p.id == batch.placement_id));
        if !known_placement {
            return Ok(SaveResult::failed(format!(
                "Placement {} does not belong to contact {}",
                batch.placement_id, batch.contact_id
            )));
        }

        let format = format_description!("[year]-[month]-[day]");
        if let Some(row) = batch
            .rows
            .iter()
            .find(|row| Date::parse(row.date.trim(), format).is_err())
        {
            return Ok(SaveResult::failed(format!(
                "Invalid date '{}': expected YYYY-MM-DD",
                row.date
            )));
        }

        store.saved_rows += batch.rows.len();
        debug!(rows = batch.rows.len(), total = store.saved_rows, "dev save");
        Ok(SaveResult::ok())
    }
}

#[async_trait]
impl InvoiceBackend for DevBackend {
    async fn fetch_finalized_invoices(&self) -> Result<Vec<Invoice>> {
        self.simulate_latency(1).await;
        Ok(self
            .store()?
            .invoices
            .iter()
            .filter(|invoice| invoice.status == "Finalized")
            .cloned()
            .collect())
    }

    async fn export_invoices_to_csv(&self, invoice_ids: &[InvoiceId]) -> Result<CsvExportResult> {
        self.simulate_latency(2).await;
        let mut store = self.store()?;

        let exported: Vec<usize> = store
            .invoices
            .iter()
            .enumerate()
            .filter(|(_, invoice)| {
                invoice.status == "Finalized" && invoice_ids.contains(&invoice.id)
            })
            .map(|(i, _)| i)
            .collect();
        let csv = invoice_csv(exported.iter().map(|&i| &store.invoices[i]))?;
        for &i in &exported {
            store.invoices[i].status = "Exported".to_string();
        }
        let exported = exported.len();

        if exported == 0 {
            return Ok(CsvExportResult {
                success: false,
                csv_content: String::new(),
                file_name: String::new(),
                message: "No finalized invoices found for export".to_string(),
            });
        }

        let today = OffsetDateTime::now_utc().date();
        Ok(CsvExportResult {
            success: true,
            csv_content: csv,
            file_name: format!(
                "invoice_export_{:04}-{:02}-{:02}.csv",
                today.year(),
                today.month() as u8,
                today.day()
            ),
            message: format!("Exported {} invoices", exported),
        })
    }
}

#[async_trait]
impl FileImportBackend for DevBackend {
    async fn upload_timesheet_file(&self, file_name: &str, content: Vec<u8>) -> Result<UploadedFile> {
        self.simulate_latency(1).await;
        let mut store = self.store()?;
        store.next_document += 1;
        let document_id = DocumentId::new(format!("068-dev-{:03}", store.next_document));
        store.documents.insert(document_id.clone(), content);
        Ok(UploadedFile {
            document_id,
            name: file_name.to_string(),
        })
    }

    async fn process_timesheet_file(&self, document_id: &DocumentId) -> Result<ProcessResult> {
        self.simulate_latency(3).await;
        let mut store = self.store()?;
        let Some(content) = store.documents.remove(document_id) else {
            return Err(BackendError::ResponseError(format!(
                "Document {} not found",
                document_id
            )));
        };

        // Spreadsheets are opaque here; only text rows are counted.
        let text = String::from_utf8_lossy(&content);
        let rows = text.lines().filter(|line| !line.trim().is_empty()).count();
        let records_created = rows.saturating_sub(1) as u32;
        if records_created == 0 {
            return Ok(ProcessResult {
                success: false,
                records_created: 0,
                error_message: "File contains no timesheet rows".to_string(),
            });
        }
        store.saved_rows += records_created as usize;
        Ok(ProcessResult {
            success: true,
            records_created,
            error_message: String::new(),
        })
    }
}

const CSV_HEADER: [&str; 5] = ["Invoice Name", "Account", "Invoice Date", "Total Amount", "Status"];

fn invoice_csv<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Result<String> {
    let csv_error = |e: csv::Error| BackendError::other(format!("Failed to build CSV: {}", e));

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER).map_err(csv_error)?;
    for invoice in invoices {
        let amount = invoice
            .total_amount
            .map(|amount| format!("{:.2}", amount))
            .unwrap_or_default();
        wtr.write_record([
            invoice.name.as_str(),
            invoice.account_name.as_str(),
            invoice.invoice_date.as_deref().unwrap_or(""),
            amount.as_str(),
            "Exported",
        ])
        .map_err(csv_error)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| BackendError::other(format!("Failed to build CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| BackendError::other(format!("CSV is not UTF-8: {}", e)))
}

fn contact(id: &str, name: &str) -> Contact {
    Contact {
        id: ContactId::new(id),
        name: name.to_string(),
    }
}

fn placement(id: &str, name: &str, account: Option<&str>) -> Placement {
    Placement {
        id: PlacementId::new(id),
        name: name.to_string(),
        account_name: account.map(str::to_string),
    }
}

fn invoice(id: &str, name: &str, account: &str, date: &str, amount: f64) -> Invoice {
    Invoice {
        id: InvoiceId::new(id),
        name: name.to_string(),
        account_name: account.to_string(),
        invoice_date: Some(date.to_string()),
        total_amount: Some(amount),
        status: "Finalized".to_string(),
    }
}

fn seed_dev_store() -> DevStore {
    let placements = HashMap::from([
        (
            ContactId::new("003-dev-001"),
            vec![
                placement("a0P-dev-101", "Backend Engineer", Some("Acme Corp")),
                placement("a0P-dev-102", "Data Migration", None),
            ],
        ),
        (
            ContactId::new("003-dev-002"),
            vec![placement("a0P-dev-201", "Compiler Consultant", Some("Globex"))],
        ),
        (
            ContactId::new("003-dev-003"),
            vec![placement("a0P-dev-301", "Cryptanalyst", Some("Bletchley Ltd"))],
        ),
    ]);

    let labels = HashMap::from([
        (
            PlacementId::new("a0P-dev-101"),
            FieldLabels::empty()
                .with(CustomSlot::One, "Cost Center")
                .with(CustomSlot::Two, "PO Number"),
        ),
        (
            PlacementId::new("a0P-dev-201"),
            FieldLabels::empty().with(CustomSlot::One, "Project Code"),
        ),
    ]);

    DevStore {
        contacts: vec![
            contact("003-dev-001", "Ada Lovelace"),
            contact("003-dev-002", "Grace Hopper"),
            contact("003-dev-003", "Alan Turing"),
        ],
        placements,
        labels,
        invoices: vec![
            invoice("a1I-dev-1", "INV-2024-0101", "Acme Corp", "2024-01-31", 12800.0),
            invoice("a1I-dev-2", "INV-2024-0102", "Globex", "2024-01-31", 5400.5),
            invoice("a1I-dev-3", "INV-2024-0201", "Acme Corp", "2024-02-29", 13600.0),
            invoice("a1I-dev-4", "INV-2024-0202", "Bletchley Ltd", "2024-02-29", 2250.0),
        ],
        ..DevStore::default()
    }
}
