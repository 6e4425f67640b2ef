use crate::app::App;
use crate::backend::SharedBackend;
use crate::downloads;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use timesheet_core::models::SaveBatchRequest;
use timesheet_core::{
    fetch_lookup, LookupRequest, Notification, SubmitOutcome, SubmitStart, TimesheetBackend,
};
use tracing::{info, warn};

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    backend: &SharedBackend,
    action_tx: &ActionTx,
) -> Result<()> {
    match action {
        Action::SelectContact(contact_id) => {
            if let Some(request) = app.manual.select_contact(&contact_id) {
                spawn_lookup(request, backend, action_tx);
            }
        }
        Action::SelectPlacement(placement_id) => {
            if let Some(request) = app.manual.select_placement(&placement_id) {
                spawn_lookup(request, backend, action_tx);
            }
        }
        Action::LookupFinished { request, result } => {
            // Failures are already queued as notifications.
            let _ = app.manual.complete_lookup(&request, result);
        }
        Action::SubmitAll => {
            if app.cell_edit.is_some() && !app.commit_cell_edit() {
                return Ok(());
            }
            if let SubmitStart::Ready(batch) = app.manual.begin_submit() {
                spawn_save(batch, backend, action_tx);
            }
        }
        Action::SaveFinished { batch, result } => {
            if let SubmitOutcome::Saved { .. } = app.manual.complete_submit(&batch, result) {
                app.cell_edit = None;
                app.grid_row = 0;
                app.grid_col = 0;
            }
        }
        Action::LoadInvoices => {
            app.invoices.load(&**backend).await;
            app.clamp_invoice_cursor();
        }
        Action::ExportInvoices => {
            export_invoices(app, backend).await;
        }
        Action::UploadFile { path } => {
            upload_file(app, backend, &path).await;
        }
        Action::ProcessFile => {
            app.import.process(&**backend).await;
        }
    }

    if app.collect_events() {
        let _ = action_tx.send(Action::LoadInvoices);
    }
    Ok(())
}

fn spawn_lookup(request: LookupRequest, backend: &SharedBackend, action_tx: &ActionTx) {
    let backend = Arc::clone(backend);
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let result = fetch_lookup(&*backend, &request).await;
        let _ = action_tx.send(Action::LookupFinished { request, result });
    });
}

fn spawn_save(batch: SaveBatchRequest, backend: &SharedBackend, action_tx: &ActionTx) {
    let backend = Arc::clone(backend);
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let result = backend.save_timesheet_batch(&batch).await;
        let _ = action_tx.send(Action::SaveFinished { batch, result });
    });
}

async fn export_invoices(app: &mut App, backend: &SharedBackend) {
    let Some(download) = app.invoices.export(&**backend).await else {
        return;
    };
    match downloads::write_csv(&app.download_dir, &download) {
        Ok(path) => {
            info!(path = %path.display(), "wrote invoice export");
            app.invoices.download_saved();
        }
        Err(e) => {
            warn!("{:#}", e);
            app.invoices.download_failed();
        }
    }
}

async fn upload_file(app: &mut App, backend: &SharedBackend, path: &str) {
    let path = path.trim();
    if path.is_empty() {
        app.set_status(Notification::warning("Enter the path of a timesheet file"));
        return;
    }
    let Some(file_name) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        app.set_status(Notification::error(format!("Not a file: {}", path)));
        return;
    };
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read {}: {}", path, e);
            app.set_status(Notification::error(format!("Failed to read {}: {}", path, e)));
            return;
        }
    };
    if app.import.upload(&**backend, file_name, content).await {
        app.upload_path.clear();
    }
}
