//! Timesheet file upload and processing.

use tracing::{info, warn};

use crate::error::BackendError;
use crate::models::{is_accepted_format, DocumentId, ProcessResult, UploadedFile, ACCEPTED_FORMATS};
use crate::notification::{HostEvent, Notification, Outbox};
use crate::ports::FileImportBackend;

/// Result of trying to start processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStart {
    Ready(DocumentId),
    /// No uploaded file; an error has been queued.
    NoFile,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Processed { records_created: u32 },
    Rejected(String),
    Failed(BackendError),
}

#[derive(Debug, Default)]
pub struct FileImport {
    uploaded_files: Vec<UploadedFile>,
    is_processing: bool,
    outbox: Outbox,
}

impl FileImport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn process_disabled(&self) -> bool {
        self.is_processing || self.uploaded_files.is_empty()
    }

    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.outbox.drain()
    }

    /// Record the files the upload step produced.
    pub fn upload_finished(&mut self, files: Vec<UploadedFile>) {
        self.uploaded_files = files;
        self.outbox
            .notify(Notification::success("File uploaded successfully"));
    }

    /// Check the extension and upload `content`. Returns false when nothing
    /// was uploaded.
    pub async fn upload<B>(&mut self, backend: &B, file_name: &str, content: Vec<u8>) -> bool
    where
        B: FileImportBackend + ?Sized,
    {
        if !is_accepted_format(file_name) {
            self.outbox.notify(Notification::error(format!(
                "Unsupported file type. Accepted formats: {}",
                ACCEPTED_FORMATS.join(", ")
            )));
            return false;
        }
        match backend.upload_timesheet_file(file_name, content).await {
            Ok(file) => {
                info!(document = %file.document_id, "uploaded timesheet file");
                self.upload_finished(vec![file]);
                true
            }
            Err(e) => {
                warn!("upload of {} failed: {}", file_name, e);
                self.outbox.notify(Notification::error(format!(
                    "Failed to upload file: {}",
                    e.detail()
                )));
                false
            }
        }
    }

    pub fn begin_process(&mut self) -> ProcessStart {
        if self.is_processing {
            return ProcessStart::InFlight;
        }
        let Some(file) = self.uploaded_files.first() else {
            self.outbox
                .notify(Notification::error("Please upload a file first"));
            return ProcessStart::NoFile;
        };
        let document_id = file.document_id.clone();
        self.is_processing = true;
        ProcessStart::Ready(document_id)
    }

    pub fn complete_process(
        &mut self,
        result: Result<ProcessResult, BackendError>,
    ) -> ProcessOutcome {
        self.is_processing = false;
        match result {
            Ok(ProcessResult {
                success: true,
                records_created,
                error_message,
            }) => {
                info!(records_created, "processed timesheet file");
                self.outbox.notify(Notification::success(format!(
                    "Successfully processed {} records. {}",
                    records_created, error_message
                )));
                self.reset();
                ProcessOutcome::Processed { records_created }
            }
            Ok(ProcessResult { error_message, .. }) => {
                warn!("timesheet file rejected: {}", error_message);
                self.outbox
                    .notify(Notification::error(error_message.clone()));
                ProcessOutcome::Rejected(error_message)
            }
            Err(e) => {
                warn!("timesheet file processing failed: {}", e);
                self.outbox.notify(Notification::error(format!(
                    "Failed to process file: {}",
                    e.detail()
                )));
                ProcessOutcome::Failed(e)
            }
        }
    }

    /// Process the first uploaded file. `None` when processing did not start.
    pub async fn process<B>(&mut self, backend: &B) -> Option<ProcessOutcome>
    where
        B: FileImportBackend + ?Sized,
    {
        let document_id = match self.begin_process() {
            ProcessStart::Ready(id) => id,
            ProcessStart::NoFile | ProcessStart::InFlight => return None,
        };
        let result = backend.process_timesheet_file(&document_id).await;
        Some(self.complete_process(result))
    }

    pub fn reset(&mut self) {
        self.uploaded_files.clear();
    }
}
