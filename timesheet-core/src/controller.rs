//! Manual timesheet entry workflow.
//!
//! [`SubmissionController`] owns the [`SelectionChain`] and the [`EntryGrid`]
//! and is the only writer of either. Remote calls are split into a
//! synchronous "begin" half that returns a request, and a "complete" half
//! that reconciles the response. Hosts that want to keep their UI responsive
//! run the request on a task of their own and feed the result back later;
//! simpler hosts use the `async` conveniences which do both in one call.

use tracing::{info, warn};

use crate::error::{BackendError, LookupKind, ValidationError, WorkflowError};
use crate::grid::EntryGrid;
use crate::models::{Contact, EntryRow, FieldLabels, Placement, SaveBatchRequest, SaveResult};
use crate::notification::{HostEvent, Notification, Outbox};
use crate::ports::TimesheetBackend;
use crate::selection::{LookupRequest, Reconcile, SelectionChain};

pub const SAVE_SUCCESS_MESSAGE: &str = "Timesheet data saved successfully";

/// Response to a [`LookupRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    Placements(Vec<Placement>),
    FieldLabels(Option<FieldLabels>),
}

/// Perform the remote call a [`LookupRequest`] asks for.
pub async fn fetch_lookup<B>(
    backend: &B,
    request: &LookupRequest,
) -> Result<LookupResponse, BackendError>
where
    B: TimesheetBackend + ?Sized,
{
    match request {
        LookupRequest::Placements { contact_id, .. } => backend
            .fetch_placements_for_contact(contact_id)
            .await
            .map(LookupResponse::Placements),
        LookupRequest::FieldLabels { placement_id, .. } => backend
            .fetch_field_labels(placement_id)
            .await
            .map(LookupResponse::FieldLabels),
    }
}

/// Result of trying to start a batch save.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Validation passed; the host must send this batch and report back via
    /// [`SubmissionController::complete_submit`].
    Ready(SaveBatchRequest),
    /// Validation failed, a notification has been queued.
    Rejected(ValidationError),
    /// A save is already in flight; nothing happened.
    InFlight,
}

/// Terminal outcome of a batch save.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved { rows: usize },
    /// Ignored because another save was still in flight.
    InFlight,
    Failed(WorkflowError),
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    chain: SelectionChain,
    grid: EntryGrid,
    is_saving: bool,
    outbox: Outbox,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller and load the contact list.
    pub async fn initialize<B>(backend: &B) -> Self
    where
        B: TimesheetBackend + ?Sized,
    {
        let mut controller = Self::new();
        let contacts = backend.fetch_contacts().await;
        // A failure is queued as a notification and leaves the list empty.
        let _ = controller.load_contacts(contacts);
        controller
    }

    pub fn selection(&self) -> &SelectionChain {
        &self.chain
    }

    pub fn grid(&self) -> &EntryGrid {
        &self.grid
    }

    /// Row edits need no remote call and go straight to the grid.
    pub fn grid_mut(&mut self) -> &mut EntryGrid {
        &mut self.grid
    }

    pub fn is_loading(&self) -> bool {
        self.chain.has_pending_lookup()
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_placement_disabled(&self) -> bool {
        self.chain.selected_contact().is_none() || self.chain.is_placements_pending()
    }

    pub fn is_add_row_disabled(&self) -> bool {
        self.chain.selected_placement().is_none()
    }

    pub fn is_save_disabled(&self) -> bool {
        self.chain.selected_contact().is_none()
            || self.chain.selected_placement().is_none()
            || self.is_saving
    }

    /// Take all queued host events.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.outbox.drain()
    }

    /// Apply the outcome of the contact list fetch.
    pub fn load_contacts(
        &mut self,
        result: Result<Vec<Contact>, BackendError>,
    ) -> Result<(), WorkflowError> {
        match result {
            Ok(contacts) => {
                self.chain.load_contact_options(&contacts);
                Ok(())
            }
            Err(e) => Err(self.lookup_failed(LookupKind::Contacts, e)),
        }
    }

    fn lookup_failed(&mut self, kind: LookupKind, source: BackendError) -> WorkflowError {
        warn!("{}: {}", kind.failure_message(), source);
        self.outbox.notify(Notification::error(kind.failure_message()));
        WorkflowError::LookupFailure { kind, source }
    }

    pub fn select_contact(&mut self, contact_id: &str) -> Option<LookupRequest> {
        self.chain.select_contact(contact_id)
    }

    pub fn select_placement(&mut self, placement_id: &str) -> Option<LookupRequest> {
        self.chain.select_placement(placement_id)
    }

    /// Reconcile a lookup response with the current selection.
    ///
    /// Responses for superseded requests are discarded, including failures:
    /// the user has already moved on and the newer request will report its
    /// own outcome. Only a failure for the current request is an error.
    pub fn complete_lookup(
        &mut self,
        request: &LookupRequest,
        result: Result<LookupResponse, BackendError>,
    ) -> Result<Reconcile, WorkflowError> {
        let ticket = request.ticket();
        match result {
            Ok(LookupResponse::Placements(placements)) => {
                Ok(self.chain.apply_placement_options(ticket, &placements))
            }
            Ok(LookupResponse::FieldLabels(labels)) => {
                Ok(self.chain.apply_field_labels(ticket, labels))
            }
            Err(e) => match self.chain.abandon_lookup(ticket) {
                Reconcile::Discarded => Ok(Reconcile::Discarded),
                Reconcile::Applied => {
                    let kind = match request {
                        LookupRequest::Placements { .. } => LookupKind::Placements,
                        LookupRequest::FieldLabels { .. } => LookupKind::FieldLabels,
                    };
                    Err(self.lookup_failed(kind, e))
                }
            },
        }
    }

    pub async fn run_lookup<B>(
        &mut self,
        backend: &B,
        request: LookupRequest,
    ) -> Result<Reconcile, WorkflowError>
    where
        B: TimesheetBackend + ?Sized,
    {
        let result = fetch_lookup(backend, &request).await;
        self.complete_lookup(&request, result)
    }

    /// Select a contact and load its placements.
    pub async fn change_contact<B>(&mut self, backend: &B, contact_id: &str)
    where
        B: TimesheetBackend + ?Sized,
    {
        if let Some(request) = self.select_contact(contact_id) {
            let _ = self.run_lookup(backend, request).await;
        }
    }

    /// Select a placement and load its custom field labels.
    pub async fn change_placement<B>(&mut self, backend: &B, placement_id: &str)
    where
        B: TimesheetBackend + ?Sized,
    {
        if let Some(request) = self.select_placement(placement_id) {
            let _ = self.run_lookup(backend, request).await;
        }
    }

    fn reject(&mut self, error: ValidationError) -> SubmitStart {
        self.outbox.notify(Notification::error(error.user_message()));
        SubmitStart::Rejected(error)
    }

    /// Validate and, when everything checks out, mark a save as in flight.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_saving {
            return SubmitStart::InFlight;
        }
        let (Some(contact_id), Some(placement_id)) = (
            self.chain.selected_contact().cloned(),
            self.chain.selected_placement().cloned(),
        ) else {
            return self.reject(ValidationError::MissingSelection);
        };

        let rows: Vec<EntryRow> = self.grid.valid_entries();
        if rows.is_empty() {
            return self.reject(ValidationError::NoValidRows);
        }

        self.is_saving = true;
        SubmitStart::Ready(SaveBatchRequest {
            contact_id,
            placement_id,
            rows,
        })
    }

    /// Reconcile the result of the save started by [`Self::begin_submit`].
    pub fn complete_submit(
        &mut self,
        batch: &SaveBatchRequest,
        result: Result<SaveResult, BackendError>,
    ) -> SubmitOutcome {
        self.is_saving = false;
        match result {
            Ok(SaveResult { success: true, .. }) => {
                info!(
                    contact = %batch.contact_id,
                    placement = %batch.placement_id,
                    rows = batch.rows.len(),
                    "saved timesheet batch"
                );
                self.outbox.notify(Notification::success(SAVE_SUCCESS_MESSAGE));
                self.grid.reset();
                SubmitOutcome::Saved {
                    rows: batch.rows.len(),
                }
            }
            Ok(SaveResult { error_message, .. }) => {
                let message = error_message.unwrap_or_else(|| "Save failed".to_string());
                warn!("timesheet batch rejected: {}", message);
                self.outbox.notify(Notification::error(message.clone()));
                SubmitOutcome::Failed(WorkflowError::SaveBusinessFailure(message))
            }
            Err(e) => {
                warn!("timesheet batch save failed: {}", e);
                self.outbox.notify(Notification::error(format!(
                    "Failed to save timesheet data: {}",
                    e.detail()
                )));
                SubmitOutcome::Failed(WorkflowError::SaveTransportFailure(e))
            }
        }
    }

    /// Validate the grid and save all submittable rows in one call.
    pub async fn submit_all<B>(&mut self, backend: &B) -> SubmitOutcome
    where
        B: TimesheetBackend + ?Sized,
    {
        let batch = match self.begin_submit() {
            SubmitStart::Ready(batch) => batch,
            SubmitStart::Rejected(error) => return SubmitOutcome::Failed(error.into()),
            SubmitStart::InFlight => return SubmitOutcome::InFlight,
        };
        let result = backend.save_timesheet_batch(&batch).await;
        self.complete_submit(&batch, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use crate::models::{ContactId, EntryField, HourKind, PlacementId, RowId, SelectionOption};
    use crate::notification::Variant;

    fn placement(id: &str, name: &str, account: Option<&str>) -> Placement {
        Placement {
            id: PlacementId::new(id),
            name: name.to_string(),
            account_name: account.map(str::to_string),
        }
    }

    fn backend() -> MockBackend {
        MockBackend::new()
            .with_contacts(vec![Contact {
                id: ContactId::new("C1"),
                name: "Ada".to_string(),
            }])
            .with_placements("C1", vec![placement("P1", "Eng", Some("Acme"))])
            .with_placements("C2", vec![placement("P2", "Ops", None)])
    }

    fn notifications(controller: &mut SubmissionController) -> Vec<Notification> {
        controller
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Notify(n) => Some(n),
                HostEvent::RefreshRequested => None,
            })
            .collect()
    }

    async fn ready_controller(backend: &MockBackend) -> SubmissionController {
        let mut controller = SubmissionController::initialize(backend).await;
        controller.change_contact(backend, "C1").await;
        controller.change_placement(backend, "P1").await;
        controller
    }

    fn fill_first_row(controller: &mut SubmissionController) -> RowId {
        let id = controller.grid().rows()[0].id().clone();
        let grid = controller.grid_mut();
        grid.update_field(&id, EntryField::Date, "2024-01-01").unwrap();
        grid.update_field(&id, EntryField::Hours(HourKind::Regular), "8")
            .unwrap();
        id
    }

    #[tokio::test]
    async fn initialize_loads_contact_options() {
        let backend = backend();
        let controller = SubmissionController::initialize(&backend).await;

        let options = controller.selection().contact_options();
        assert_eq!(options[0], SelectionOption::new("Select Contact", ""));
        assert_eq!(options[1], SelectionOption::new("Ada", "C1"));
        assert_eq!(controller.grid().len(), 5);
    }

    #[tokio::test]
    async fn contact_lookup_failure_notifies_and_leaves_options_empty() {
        let backend = MockBackend::new().failing_contacts(BackendError::other("down"));
        let mut controller = SubmissionController::initialize(&backend).await;

        assert!(controller.selection().contact_options().is_empty());
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Failed to load contacts");
        assert_eq!(notes[0].variant, Variant::Error);
    }

    #[tokio::test]
    async fn contact_change_populates_placement_options() {
        let backend = backend();
        let mut controller = SubmissionController::initialize(&backend).await;

        controller.change_contact(&backend, "C1").await;

        assert_eq!(
            controller.selection().placement_options(),
            &[
                SelectionOption::new("Select Placement", ""),
                SelectionOption::new("Eng - Acme", "P1"),
            ]
        );
        assert!(!controller.is_loading());
        assert!(!controller.is_placement_disabled());
        assert_eq!(backend.placement_calls(), vec![ContactId::new("C1")]);
    }

    #[tokio::test]
    async fn loading_flag_tracks_in_flight_lookup() {
        let backend = backend();
        let mut controller = SubmissionController::new();

        let request = controller.select_contact("C1").unwrap();
        assert!(controller.is_loading());
        assert!(controller.is_placement_disabled());

        let result = fetch_lookup(&backend, &request).await;
        assert_eq!(controller.complete_lookup(&request, result), Ok(Reconcile::Applied));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn stale_placement_response_is_discarded() {
        let backend = backend();
        let mut controller = SubmissionController::new();

        let first = controller.select_contact("C1").unwrap();
        let second = controller.select_contact("C2").unwrap();

        // C2 answers first, then the slow C1 response arrives.
        let result = fetch_lookup(&backend, &second).await;
        assert_eq!(controller.complete_lookup(&second, result), Ok(Reconcile::Applied));
        let result = fetch_lookup(&backend, &first).await;
        assert_eq!(controller.complete_lookup(&first, result), Ok(Reconcile::Discarded));

        let options = controller.selection().placement_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "P2");
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn stale_failure_produces_no_notification() {
        let mut controller = SubmissionController::new();
        let first = controller.select_contact("C1").unwrap();
        let _second = controller.select_contact("C2").unwrap();

        let outcome = controller.complete_lookup(&first, Err(BackendError::other("timeout")));

        assert_eq!(outcome, Ok(Reconcile::Discarded));
        assert!(notifications(&mut controller).is_empty());
        assert!(controller.is_loading());
    }

    #[test]
    fn current_lookup_failure_is_reported_as_error() {
        let mut controller = SubmissionController::new();
        let request = controller.select_contact("C1").unwrap();

        let outcome = controller.complete_lookup(&request, Err(BackendError::other("timeout")));

        assert_eq!(
            outcome,
            Err(WorkflowError::LookupFailure {
                kind: LookupKind::Placements,
                source: BackendError::other("timeout"),
            })
        );
        assert!(!controller.is_loading());
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Failed to load placements");
    }

    #[test]
    fn contact_load_failure_is_reported_as_error() {
        let mut controller = SubmissionController::new();

        let result = controller.load_contacts(Err(BackendError::Unauthorized));

        assert!(matches!(
            result,
            Err(WorkflowError::LookupFailure {
                kind: LookupKind::Contacts,
                source: BackendError::Unauthorized,
            })
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("Failed to load contacts: {}", BackendError::Unauthorized)
        );
        assert!(controller.selection().contact_options().is_empty());
    }

    #[tokio::test]
    async fn placement_lookup_failure_keeps_selection() {
        let backend = backend().failing_placements(BackendError::other("boom"));
        let mut controller = SubmissionController::new();

        controller.change_contact(&backend, "C1").await;

        assert_eq!(controller.selection().selected_contact_id(), "C1");
        assert!(controller.selection().placement_options().is_empty());
        assert!(!controller.is_loading());
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Failed to load placements");
    }

    #[tokio::test]
    async fn label_lookup_failure_leaves_labels_empty() {
        let backend = backend().failing_labels(BackendError::other("boom"));
        let mut controller = SubmissionController::new();
        controller.change_contact(&backend, "C1").await;

        controller.change_placement(&backend, "P1").await;

        assert!(controller.selection().field_labels().is_empty());
        let notes = notifications(&mut controller);
        assert_eq!(notes[0].message, "Failed to load custom field labels");
    }

    #[tokio::test]
    async fn submit_sends_only_valid_rows_and_resets_grid() {
        let backend = backend().save_returns(Ok(SaveResult::ok()));
        let mut controller = ready_controller(&backend).await;
        fill_first_row(&mut controller);
        let ids_before: Vec<RowId> = controller
            .grid()
            .rows()
            .iter()
            .map(|r| r.id().clone())
            .collect();

        let outcome = controller.submit_all(&backend).await;

        assert_eq!(outcome, SubmitOutcome::Saved { rows: 1 });
        let batches = backend.saved_batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].rows.len(), 1);
        assert_eq!(batches[0].contact_id.as_str(), "C1");
        assert_eq!(batches[0].placement_id.as_str(), "P1");

        assert!(!controller.is_saving());
        assert_eq!(controller.grid().len(), 5);
        assert!(controller.grid().valid_entries().is_empty());
        assert!(controller
            .grid()
            .rows()
            .iter()
            .all(|r| !ids_before.contains(r.id())));

        // Selection survives a successful save.
        assert_eq!(controller.selection().selected_contact_id(), "C1");
        assert_eq!(controller.selection().selected_placement_id(), "P1");

        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, SAVE_SUCCESS_MESSAGE);
        assert_eq!(notes[0].variant, Variant::Success);
    }

    #[tokio::test]
    async fn submit_without_contact_makes_no_call() {
        let backend = backend();
        let mut controller = SubmissionController::initialize(&backend).await;
        fill_first_row(&mut controller);

        let outcome = controller.submit_all(&backend).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::Validation(
                ValidationError::MissingSelection
            ))
        );
        assert_eq!(backend.save_calls(), 0);
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Please select contact and placement");
    }

    #[tokio::test]
    async fn submit_without_valid_rows_makes_no_call() {
        let backend = backend();
        let mut controller = ready_controller(&backend).await;
        let id = controller.grid().rows()[0].id().clone();
        controller
            .grid_mut()
            .update_field(&id, EntryField::Date, "2024-01-01")
            .unwrap();

        let outcome = controller.submit_all(&backend).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::Validation(ValidationError::NoValidRows))
        );
        assert_eq!(backend.save_calls(), 0);
        assert!(!controller.is_saving());
    }

    #[tokio::test]
    async fn business_failure_surfaces_server_message_and_keeps_grid() {
        let backend = backend().save_returns(Ok(SaveResult::failed("Week is locked")));
        let mut controller = ready_controller(&backend).await;
        fill_first_row(&mut controller);
        notifications(&mut controller);
        let rows_before = controller.grid().rows().to_vec();

        let outcome = controller.submit_all(&backend).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::SaveBusinessFailure(
                "Week is locked".to_string()
            ))
        );
        assert_eq!(controller.grid().rows(), rows_before.as_slice());
        assert!(!controller.is_saving());
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Week is locked");
    }

    #[tokio::test]
    async fn transport_failure_keeps_grid_and_clears_flag() {
        let backend = backend().save_returns(Err(BackendError::ResponseError(
            "connection reset".to_string(),
        )));
        let mut controller = ready_controller(&backend).await;
        fill_first_row(&mut controller);
        notifications(&mut controller);
        let rows_before = controller.grid().rows().to_vec();

        let outcome = controller.submit_all(&backend).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(WorkflowError::SaveTransportFailure(_))
        ));
        assert_eq!(controller.grid().rows(), rows_before.as_slice());
        assert!(!controller.is_saving());
        let notes = notifications(&mut controller);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.starts_with("Failed to save timesheet data"));
        assert_eq!(notes[0].variant, Variant::Error);
    }

    #[tokio::test]
    async fn second_submit_while_saving_is_ignored() {
        let backend = backend();
        let mut controller = ready_controller(&backend).await;
        fill_first_row(&mut controller);
        notifications(&mut controller);

        let batch = match controller.begin_submit() {
            SubmitStart::Ready(batch) => batch,
            other => panic!("expected ready batch, got {other:?}"),
        };
        assert!(controller.is_saving());
        assert!(controller.is_save_disabled());

        assert_eq!(controller.begin_submit(), SubmitStart::InFlight);
        assert_eq!(controller.submit_all(&backend).await, SubmitOutcome::InFlight);
        assert_eq!(backend.save_calls(), 0);
        assert!(notifications(&mut controller).is_empty());

        controller.complete_submit(&batch, Ok(SaveResult::ok()));
        assert!(!controller.is_saving());
    }

    #[tokio::test]
    async fn control_states_follow_selection() {
        let backend = backend();
        let mut controller = SubmissionController::initialize(&backend).await;
        assert!(controller.is_placement_disabled());
        assert!(controller.is_add_row_disabled());
        assert!(controller.is_save_disabled());

        controller.change_contact(&backend, "C1").await;
        assert!(!controller.is_placement_disabled());
        assert!(controller.is_add_row_disabled());

        controller.change_placement(&backend, "P1").await;
        assert!(!controller.is_add_row_disabled());
        assert!(!controller.is_save_disabled());
    }
}
