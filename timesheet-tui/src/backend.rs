use std::sync::Arc;

use anyhow::{Context, Result};
use backoffice_client::{BackofficeClient, Credentials};
use timesheet_core::{FileImportBackend, InvoiceBackend, TimesheetBackend};

use crate::config::TimesheetConfig;
use crate::dev_backend::DevBackend;

/// Everything the TUI talks to, behind one object.
pub trait AppBackend: TimesheetBackend + InvoiceBackend + FileImportBackend {}

impl<T> AppBackend for T where T: TimesheetBackend + InvoiceBackend + FileImportBackend {}

pub type SharedBackend = Arc<dyn AppBackend>;

pub fn remote(config: &TimesheetConfig) -> Result<SharedBackend> {
    let credentials = Credentials::from_env()
        .context("Set TIMESHEET_API_TOKEN (or put it in .env.timesheet)")?;
    let client = BackofficeClient::new(&config.api_url, credentials)
        .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
    Ok(Arc::new(client))
}

pub fn dev() -> SharedBackend {
    Arc::new(DevBackend::new())
}
