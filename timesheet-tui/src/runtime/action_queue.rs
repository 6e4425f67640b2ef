use timesheet_core::models::{SaveBatchRequest, SaveResult};
use timesheet_core::{BackendError, LookupRequest, LookupResponse};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    SelectContact(String),
    SelectPlacement(String),
    LookupFinished {
        request: LookupRequest,
        result: Result<LookupResponse, BackendError>,
    },
    SubmitAll,
    SaveFinished {
        batch: SaveBatchRequest,
        result: Result<SaveResult, BackendError>,
    },
    LoadInvoices,
    ExportInvoices,
    UploadFile {
        path: String,
    },
    ProcessFile,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
