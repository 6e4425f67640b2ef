use serde::{Deserialize, Serialize};

use super::{ContactId, PlacementId};

/// Label of the sentinel option heading the contact list.
pub const SELECT_CONTACT_LABEL: &str = "Select Contact";
/// Label of the sentinel option heading the placement list.
pub const SELECT_PLACEMENT_LABEL: &str = "Select Placement";
/// Shown in place of a placement's client account when it has none.
pub const NO_CLIENT_LABEL: &str = "No Client";

/// A contact that has at least one placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
}

/// A placement of a contact, optionally tied to a client account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: PlacementId,
    pub name: String,
    pub account_name: Option<String>,
}

impl Placement {
    /// `"<name> - <account>"`, falling back to "No Client".
    pub fn display_label(&self) -> String {
        let account = self
            .account_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_CLIENT_LABEL);
        format!("{} - {}", self.name, account)
    }
}

/// One entry of a dependent dropdown.
///
/// An empty `value` is the "nothing selected" sentinel and always comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    pub label: String,
    pub value: String,
}

impl SelectionOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn sentinel(label: impl Into<String>) -> Self {
        Self::new(label, "")
    }

    pub fn is_sentinel(&self) -> bool {
        self.value.is_empty()
    }
}
