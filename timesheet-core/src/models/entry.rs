use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

use super::RowId;

/// The six hour buckets a timesheet line can book time against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumString, EnumIter)]
pub enum HourKind {
    #[strum(serialize = "regularHours")]
    Regular,
    #[strum(serialize = "overtimeHours")]
    Overtime,
    #[strum(serialize = "doubleTimeHours")]
    DoubleTime,
    #[strum(serialize = "sickHours")]
    Sick,
    #[strum(serialize = "ptoHours")]
    Pto,
    #[strum(serialize = "holidayHours")]
    Holiday,
}

impl HourKind {
    /// Platform field name, e.g. `regularHours`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Column heading shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            HourKind::Regular => "Regular",
            HourKind::Overtime => "Overtime",
            HourKind::DoubleTime => "Double Time",
            HourKind::Sick => "Sick",
            HourKind::Pto => "PTO",
            HourKind::Holiday => "Holiday",
        }
    }
}

/// One of the five free-text columns whose labels come from the placement's
/// billing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumString, EnumIter)]
pub enum CustomSlot {
    #[strum(serialize = "customField1")]
    One,
    #[strum(serialize = "customField2")]
    Two,
    #[strum(serialize = "customField3")]
    Three,
    #[strum(serialize = "customField4")]
    Four,
    #[strum(serialize = "customField5")]
    Five,
}

impl CustomSlot {
    /// Platform field name, e.g. `customField1`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// 1-based slot number, as used in the platform field names.
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            CustomSlot::One => 0,
            CustomSlot::Two => 1,
            CustomSlot::Three => 2,
            CustomSlot::Four => 3,
            CustomSlot::Five => 4,
        }
    }

    pub fn fallback_label(&self) -> String {
        format!("Custom Field {}", self.number())
    }
}

/// A named, editable field of an [`EntryRow`].
///
/// Field names coming from a host are parsed into this enum at the boundary
/// so an unknown name fails instead of silently creating a stray value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Date,
    Hours(HourKind),
    Custom(CustomSlot),
}

impl EntryField {
    /// All fields in grid column order.
    pub fn all() -> impl Iterator<Item = EntryField> {
        std::iter::once(EntryField::Date)
            .chain(HourKind::iter().map(EntryField::Hours))
            .chain(CustomSlot::iter().map(EntryField::Custom))
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntryField::Date => "date",
            EntryField::Hours(kind) => kind.name(),
            EntryField::Custom(slot) => slot.name(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, EntryField::Hours(_))
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntryField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "date" {
            return Ok(EntryField::Date);
        }
        if let Ok(kind) = HourKind::from_str(s) {
            return Ok(EntryField::Hours(kind));
        }
        if let Ok(slot) = CustomSlot::from_str(s) {
            return Ok(EntryField::Custom(slot));
        }
        Err(FieldError::UnknownField(s.to_string()))
    }
}

/// Errors raised when a host writes a value into a row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{field} must be a number, got {value:?}")]
    InvalidHours { field: &'static str, value: String },
    #[error("{field} cannot be negative")]
    NegativeHours { field: &'static str },
}

/// Parse an hour value the way a form input delivers it.
///
/// Empty input counts as zero; anything else must be a finite, non-negative
/// number. "0.0" and "0" both parse to zero.
pub fn parse_hours(kind: HourKind, value: &str) -> Result<f64, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let hours: f64 = trimmed.parse().map_err(|_| FieldError::InvalidHours {
        field: kind.name(),
        value: value.to_string(),
    })?;
    if !hours.is_finite() {
        return Err(FieldError::InvalidHours {
            field: kind.name(),
            value: value.to_string(),
        });
    }
    if hours < 0.0 {
        return Err(FieldError::NegativeHours {
            field: kind.name(),
        });
    }
    // Normalizes "-0" to 0.0.
    Ok(hours + 0.0)
}

/// Render hours the way [`parse_hours`] reads them back. Whole numbers have
/// no trailing ".0".
pub fn format_hours(hours: f64) -> String {
    format!("{}", hours)
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) if n.is_finite() && n >= 0.0 => Ok(n),
        Raw::Number(n) => Err(de::Error::custom(format!("invalid hour value {}", n))),
        Raw::Text(s) => parse_hours(HourKind::Regular, &s).map_err(de::Error::custom),
    }
}

/// One timesheet line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    id: RowId,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub regular_hours: f64,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub overtime_hours: f64,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub double_time_hours: f64,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub sick_hours: f64,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub pto_hours: f64,
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub holiday_hours: f64,
    #[serde(default)]
    pub custom_field1: String,
    #[serde(default)]
    pub custom_field2: String,
    #[serde(default)]
    pub custom_field3: String,
    #[serde(default)]
    pub custom_field4: String,
    #[serde(default)]
    pub custom_field5: String,
    #[serde(default)]
    pub is_editing: bool,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
}

fn default_is_new() -> bool {
    true
}

impl EntryRow {
    pub fn blank(id: RowId) -> Self {
        Self {
            id,
            date: String::new(),
            regular_hours: 0.0,
            overtime_hours: 0.0,
            double_time_hours: 0.0,
            sick_hours: 0.0,
            pto_hours: 0.0,
            holiday_hours: 0.0,
            custom_field1: String::new(),
            custom_field2: String::new(),
            custom_field3: String::new(),
            custom_field4: String::new(),
            custom_field5: String::new(),
            is_editing: false,
            is_new: true,
        }
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }

    pub fn hours(&self, kind: HourKind) -> f64 {
        match kind {
            HourKind::Regular => self.regular_hours,
            HourKind::Overtime => self.overtime_hours,
            HourKind::DoubleTime => self.double_time_hours,
            HourKind::Sick => self.sick_hours,
            HourKind::Pto => self.pto_hours,
            HourKind::Holiday => self.holiday_hours,
        }
    }

    fn hours_mut(&mut self, kind: HourKind) -> &mut f64 {
        match kind {
            HourKind::Regular => &mut self.regular_hours,
            HourKind::Overtime => &mut self.overtime_hours,
            HourKind::DoubleTime => &mut self.double_time_hours,
            HourKind::Sick => &mut self.sick_hours,
            HourKind::Pto => &mut self.pto_hours,
            HourKind::Holiday => &mut self.holiday_hours,
        }
    }

    pub fn custom(&self, slot: CustomSlot) -> &str {
        match slot {
            CustomSlot::One => &self.custom_field1,
            CustomSlot::Two => &self.custom_field2,
            CustomSlot::Three => &self.custom_field3,
            CustomSlot::Four => &self.custom_field4,
            CustomSlot::Five => &self.custom_field5,
        }
    }

    fn custom_mut(&mut self, slot: CustomSlot) -> &mut String {
        match slot {
            CustomSlot::One => &mut self.custom_field1,
            CustomSlot::Two => &mut self.custom_field2,
            CustomSlot::Three => &mut self.custom_field3,
            CustomSlot::Four => &mut self.custom_field4,
            CustomSlot::Five => &mut self.custom_field5,
        }
    }

    /// Display value of a field, as an input would show it.
    pub fn value(&self, field: EntryField) -> String {
        match field {
            EntryField::Date => self.date.clone(),
            EntryField::Hours(kind) => format_hours(self.hours(kind)),
            EntryField::Custom(slot) => self.custom(slot).to_string(),
        }
    }

    /// Write a raw input value into a field. Hour values are coerced to
    /// numbers; the row is left unchanged when coercion fails.
    pub fn set(&mut self, field: EntryField, value: &str) -> Result<(), FieldError> {
        match field {
            EntryField::Date => self.date = value.trim().to_string(),
            EntryField::Hours(kind) => *self.hours_mut(kind) = parse_hours(kind, value)?,
            EntryField::Custom(slot) => *self.custom_mut(slot) = value.to_string(),
        }
        Ok(())
    }

    pub fn total_hours(&self) -> f64 {
        HourKind::iter().map(|kind| self.hours(kind)).sum()
    }

    /// A row is submittable when it has a date and books time in at least
    /// one bucket.
    pub fn is_submittable(&self) -> bool {
        !self.date.trim().is_empty() && HourKind::iter().any(|kind| self.hours(kind) > 0.0)
    }
}
