//! Wire shapes of the back-office REST facade.
//!
//! Record payloads use the platform's own field names (`Id`, `Name`,
//! `bpats__Account__r`, ...) and are converted into core models here.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use timesheet_core::models::{
    Contact, ContactId, DocumentId, EntryRow, Invoice, InvoiceId, Placement, PlacementId,
};

#[derive(Debug, Deserialize)]
pub struct AccountRef {
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

impl AccountRef {
    fn into_name(reference: Option<AccountRef>) -> Option<String> {
        reference
            .and_then(|account| account.name)
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Contact {
            id: ContactId::new(record.id),
            name: record.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacementRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "bpats__Account__r", default)]
    pub account: Option<AccountRef>,
}

impl From<PlacementRecord> for Placement {
    fn from(record: PlacementRecord) -> Self {
        Placement {
            id: PlacementId::new(record.id),
            name: record.name,
            account_name: AccountRef::into_name(record.account),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InvoiceRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Account__r", default)]
    pub account: Option<AccountRef>,
    #[serde(rename = "Invoice_Date__c", default)]
    pub invoice_date: Option<String>,
    #[serde(rename = "Total_Amount__c", default)]
    pub total_amount: Option<f64>,
    #[serde(rename = "Status__c", default)]
    pub status: Option<String>,
}

impl From<InvoiceRecord> for Invoice {
    fn from(record: InvoiceRecord) -> Self {
        Invoice {
            id: InvoiceId::new(record.id),
            name: record.name,
            account_name: AccountRef::into_name(record.account).unwrap_or_default(),
            invoice_date: record.invoice_date,
            total_amount: record.total_amount,
            status: record.status.unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTimesheetRequest<'a> {
    pub contact_id: &'a str,
    pub placement_id: &'a str,
    pub time_entries: &'a [EntryRow],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInvoicesRequest<'a> {
    pub invoice_ids: &'a [InvoiceId],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFileRequest<'a> {
    pub content_version_id: &'a DocumentId,
}

/// Element of the error array the platform returns for failed REST calls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApexError {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Best human-readable message for a failed response body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Vec<ApexError>>(body)
        .ok()
        .and_then(|errors| errors.into_iter().next())
        .map(|error| error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}
