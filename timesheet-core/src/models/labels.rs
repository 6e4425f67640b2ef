use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::CustomSlot;

/// Display labels for the five custom columns, taken from the selected
/// placement's billing profile.
///
/// Missing or blank labels fall back to "Custom Field N".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLabels {
    #[serde(default)]
    pub custom_field1: Option<String>,
    #[serde(default)]
    pub custom_field2: Option<String>,
    #[serde(default)]
    pub custom_field3: Option<String>,
    #[serde(default)]
    pub custom_field4: Option<String>,
    #[serde(default)]
    pub custom_field5: Option<String>,
}

impl FieldLabels {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: CustomSlot, label: impl Into<String>) -> Self {
        *self.slot_mut(slot) = Some(label.into());
        self
    }

    fn slot(&self, slot: CustomSlot) -> Option<&String> {
        match slot {
            CustomSlot::One => self.custom_field1.as_ref(),
            CustomSlot::Two => self.custom_field2.as_ref(),
            CustomSlot::Three => self.custom_field3.as_ref(),
            CustomSlot::Four => self.custom_field4.as_ref(),
            CustomSlot::Five => self.custom_field5.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: CustomSlot) -> &mut Option<String> {
        match slot {
            CustomSlot::One => &mut self.custom_field1,
            CustomSlot::Two => &mut self.custom_field2,
            CustomSlot::Three => &mut self.custom_field3,
            CustomSlot::Four => &mut self.custom_field4,
            CustomSlot::Five => &mut self.custom_field5,
        }
    }

    /// Resolved label for a custom column.
    pub fn label(&self, slot: CustomSlot) -> String {
        self.slot(slot)
            .map(|label| label.trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slot.fallback_label())
    }

    pub fn is_empty(&self) -> bool {
        CustomSlot::iter().all(|slot| {
            self.slot(slot)
                .map(|label| label.trim().is_empty())
                .unwrap_or(true)
        })
    }
}
