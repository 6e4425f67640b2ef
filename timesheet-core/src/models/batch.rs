use serde::{Deserialize, Serialize};

use super::{ContactId, EntryRow, PlacementId};

/// Payload of a batch save: the current selection plus the submittable rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBatchRequest {
    pub contact_id: ContactId,
    pub placement_id: PlacementId,
    pub rows: Vec<EntryRow>,
}

/// Server verdict on a batch save. A call can succeed at the transport level
/// and still report `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResult {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl SaveResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
        }
    }
}
