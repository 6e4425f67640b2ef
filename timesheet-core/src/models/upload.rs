use serde::{Deserialize, Serialize};

use super::DocumentId;

/// File extensions the import endpoint knows how to parse.
pub const ACCEPTED_FORMATS: [&str; 3] = [".csv", ".xlsx", ".xls"];

/// Returns true when `file_name` ends in one of [`ACCEPTED_FORMATS`],
/// ignoring case.
pub fn is_accepted_format(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    ACCEPTED_FORMATS.iter().any(|ext| lower.ends_with(ext))
}

/// A file that has been uploaded and can be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub document_id: DocumentId,
    pub name: String,
}

/// Outcome of processing an uploaded timesheet file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    pub success: bool,
    #[serde(default)]
    pub records_created: u32,
    #[serde(default)]
    pub error_message: String,
}
