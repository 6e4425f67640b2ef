use crate::app::App;
use crate::backend::SharedBackend;
use timesheet_core::SubmissionController;
use tracing::info;

pub async fn initialize_app_state(app: &mut App, backend: &SharedBackend) {
    app.manual = SubmissionController::initialize(&**backend).await;
    info!(
        contacts = app.manual.selection().contact_options().len().saturating_sub(1),
        "loaded contacts"
    );

    app.invoices.load(&**backend).await;
    app.clamp_invoice_cursor();

    app.collect_events();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimesheetConfig;
    use crate::dev_backend::DevBackend;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn loads_contacts_and_invoices() {
        let backend: SharedBackend = Arc::new(DevBackend::with_latency(Duration::ZERO));
        let mut app = App::new(&TimesheetConfig::default());

        initialize_app_state(&mut app, &backend).await;

        assert_eq!(app.manual.selection().contact_options().len(), 4);
        assert_eq!(app.invoices.invoices().len(), 4);
        assert!(app.status.is_none());
    }
}
