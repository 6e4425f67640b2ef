use serde::{Deserialize, Serialize};

use super::InvoiceId;

/// A finalized invoice, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub name: String,
    /// Name of the related account; empty when the invoice has none.
    #[serde(default)]
    pub account_name: String,
    pub invoice_date: Option<String>,
    pub total_amount: Option<f64>,
    pub status: String,
}

/// Result of a CSV export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExportResult {
    pub success: bool,
    #[serde(default)]
    pub csv_content: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub message: String,
}

/// A CSV document the host should hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub file_name: String,
    pub content: String,
}
