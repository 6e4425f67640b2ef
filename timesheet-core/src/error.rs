use thiserror::Error;

/// Failure of a call to the back-office platform.
///
/// This is the transport-level error: the call itself did not produce a
/// usable response. Business-level failures come back as values
/// (e.g. [`crate::models::SaveResult`] with `success == false`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}

impl BackendError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// The human-readable part of the error, without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            BackendError::Unauthorized => "Unauthorized",
            BackendError::ResponseError(msg)
            | BackendError::ParsingError(msg)
            | BackendError::Other(msg) => msg,
        }
    }
}

/// Locally detected problems that block a submission. No remote call is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing selection")]
    MissingSelection,
    #[error("no valid rows")]
    NoValidRows,
}

impl ValidationError {
    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingSelection => "Please select contact and placement",
            ValidationError::NoValidRows => "Please enter at least one time entry with hours",
        }
    }
}

/// Which dependent lookup a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Contacts,
    Placements,
    FieldLabels,
}

impl LookupKind {
    pub fn failure_message(&self) -> &'static str {
        match self {
            LookupKind::Contacts => "Failed to load contacts",
            LookupKind::Placements => "Failed to load placements",
            LookupKind::FieldLabels => "Failed to load custom field labels",
        }
    }
}

/// Everything that can go wrong in the manual entry workflow.
///
/// Each variant is turned into exactly one notification where it occurs;
/// values of this type are returned to the host for inspection only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{msg}: {source}", msg = .kind.failure_message())]
    LookupFailure {
        kind: LookupKind,
        source: BackendError,
    },
    #[error("save rejected: {0}")]
    SaveBusinessFailure(String),
    #[error("save failed: {0}")]
    SaveTransportFailure(BackendError),
}
