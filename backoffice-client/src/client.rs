use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use timesheet_core::models::{
    Contact, ContactId, CsvExportResult, DocumentId, FieldLabels, Invoice, InvoiceId, Placement,
    PlacementId, ProcessResult, SaveBatchRequest, SaveResult, UploadedFile,
};
use timesheet_core::ports::{self, FileImportBackend, InvoiceBackend, TimesheetBackend};
use timesheet_core::BackendError;
use tracing::instrument;

use crate::dto::{
    self, ContactRecord, ExportInvoicesRequest, InvoiceRecord, PlacementRecord,
    ProcessFileRequest, SaveTimesheetRequest,
};
use crate::{BackofficeURL, Credentials};

const CLIENT_USER_AGENT: &str = concat!("backoffice-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the back-office REST facade.
#[derive(Debug, Clone)]
pub struct BackofficeClient {
    http: reqwest::Client,
    base_url: BackofficeURL,
    credentials: Credentials,
}

impl BackofficeClient {
    pub fn new(instance_url: &str, credentials: Credentials) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: BackofficeURL::new(instance_url),
            credentials,
        })
    }

    fn url(&self, path: &str) -> BackofficeURL {
        self.base_url.append_path(path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ports::Result<T> {
        let auth = HeaderValue::from_str(&self.credentials.as_bearer_header())
            .map_err(|_| BackendError::Unauthorized)?;

        let resp = request
            .header(AUTHORIZATION, auth)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .map_err(|e| BackendError::ResponseError(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| BackendError::ResponseError(e.to_string()))?;
        parse_response(status, &body)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: BackofficeURL) -> ports::Result<T> {
        self.send(self.http.get(url.as_ref())).await
    }

    async fn post<B, T>(&self, url: BackofficeURL, body: &B) -> ports::Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(url.as_ref()).json(body)).await
    }
}

/// Map a platform response onto a port result. Rejected credentials are
/// `Unauthorized`, other failures carry the platform's own message.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> ports::Result<T> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::Unauthorized);
    }
    if !status.is_success() {
        return Err(BackendError::ResponseError(dto::error_message(status, body)));
    }
    serde_json::from_str(body).map_err(|e| {
        BackendError::ParsingError(format!("Failed to parse response as JSON: {}", e))
    })
}

#[async_trait]
impl TimesheetBackend for BackofficeClient {
    #[instrument(skip(self))]
    async fn fetch_contacts(&self) -> ports::Result<Vec<Contact>> {
        let records: Vec<ContactRecord> = self.fetch(self.url("timesheet/contacts")).await?;
        Ok(records.into_iter().map(Contact::from).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_placements_for_contact(
        &self,
        contact_id: &ContactId,
    ) -> ports::Result<Vec<Placement>> {
        let url = self
            .url("timesheet/placements")
            .with_query("contactId", contact_id.as_str());
        let records: Vec<PlacementRecord> = self.fetch(url).await?;
        Ok(records.into_iter().map(Placement::from).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_field_labels(
        &self,
        placement_id: &PlacementId,
    ) -> ports::Result<Option<FieldLabels>> {
        let url = self
            .url("timesheet/billing-profile-labels")
            .with_query("placementId", placement_id.as_str());
        self.fetch(url).await
    }

    #[instrument(skip(self, batch), fields(rows = batch.rows.len()))]
    async fn save_timesheet_batch(&self, batch: &SaveBatchRequest) -> ports::Result<SaveResult> {
        let body = SaveTimesheetRequest {
            contact_id: batch.contact_id.as_str(),
            placement_id: batch.placement_id.as_str(),
            time_entries: &batch.rows,
        };
        self.post(self.url("timesheet/entries"), &body).await
    }
}

#[async_trait]
impl InvoiceBackend for BackofficeClient {
    #[instrument(skip(self))]
    async fn fetch_finalized_invoices(&self) -> ports::Result<Vec<Invoice>> {
        let records: Vec<InvoiceRecord> = self.fetch(self.url("invoices/finalized")).await?;
        Ok(records.into_iter().map(Invoice::from).collect())
    }

    #[instrument(skip(self), fields(count = invoice_ids.len()))]
    async fn export_invoices_to_csv(
        &self,
        invoice_ids: &[InvoiceId],
    ) -> ports::Result<CsvExportResult> {
        let body = ExportInvoicesRequest { invoice_ids };
        self.post(self.url("invoices/export"), &body).await
    }
}

#[async_trait]
impl FileImportBackend for BackofficeClient {
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    async fn upload_timesheet_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> ports::Result<UploadedFile> {
        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let request = self
            .http
            .post(self.url("timesheet/files").as_ref())
            .multipart(form);
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn process_timesheet_file(&self, document_id: &DocumentId) -> ports::Result<ProcessResult> {
        let body = ProcessFileRequest {
            content_version_id: document_id,
        };
        self.post(self.url("timesheet/files/process"), &body).await
    }
}
