pub mod controller;
pub mod error;
pub mod file_import;
pub mod grid;
pub mod invoice_export;
pub mod models;
pub mod notification;
pub mod ports;
pub mod selection;

#[cfg(test)]
mod mock;

pub use controller::{fetch_lookup, LookupResponse, SubmissionController, SubmitOutcome, SubmitStart};
pub use error::{BackendError, LookupKind, ValidationError, WorkflowError};
pub use file_import::{FileImport, ProcessOutcome, ProcessStart};
pub use grid::{EntryGrid, INITIAL_ROWS};
pub use invoice_export::{ExportStart, InvoiceExport};
pub use notification::{HostEvent, Notification, Variant};
pub use ports::{FileImportBackend, InvoiceBackend, TimesheetBackend};
pub use selection::{LookupRequest, LookupTicket, Reconcile, SelectionChain};
