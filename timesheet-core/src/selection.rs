//! Contact → placement → field label selection chain.
//!
//! Every lookup a selection change triggers is tagged with a [`LookupTicket`].
//! Only the ticket issued by the most recent change at that level is current;
//! responses carrying any other ticket are stale and get discarded, so a slow
//! placement fetch for a previous contact can never overwrite newer options.

use tracing::debug;

use crate::models::{
    Contact, ContactId, FieldLabels, Placement, PlacementId, SelectionOption,
    SELECT_CONTACT_LABEL, SELECT_PLACEMENT_LABEL,
};

/// Tag identifying one issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket(u64);

/// A remote lookup the host must perform on behalf of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Placements {
        ticket: LookupTicket,
        contact_id: ContactId,
    },
    FieldLabels {
        ticket: LookupTicket,
        placement_id: PlacementId,
    },
}

impl LookupRequest {
    pub fn ticket(&self) -> LookupTicket {
        match self {
            LookupRequest::Placements { ticket, .. } | LookupRequest::FieldLabels { ticket, .. } => {
                *ticket
            }
        }
    }
}

/// What happened to a lookup response handed back to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Applied,
    /// A newer selection superseded the request; the response was dropped.
    Discarded,
}

#[derive(Debug, Default)]
pub struct SelectionChain {
    contact_options: Vec<SelectionOption>,
    placement_options: Vec<SelectionOption>,
    selected_contact: Option<ContactId>,
    selected_placement: Option<PlacementId>,
    field_labels: FieldLabels,
    last_ticket: u64,
    pending_placements: Option<LookupTicket>,
    pending_labels: Option<LookupTicket>,
}

impl SelectionChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_ticket(&mut self) -> LookupTicket {
        self.last_ticket += 1;
        LookupTicket(self.last_ticket)
    }

    pub fn contact_options(&self) -> &[SelectionOption] {
        &self.contact_options
    }

    pub fn placement_options(&self) -> &[SelectionOption] {
        &self.placement_options
    }

    pub fn selected_contact(&self) -> Option<&ContactId> {
        self.selected_contact.as_ref()
    }

    pub fn selected_placement(&self) -> Option<&PlacementId> {
        self.selected_placement.as_ref()
    }

    /// Selected contact id, or "" when nothing is selected.
    pub fn selected_contact_id(&self) -> &str {
        self.selected_contact.as_ref().map_or("", |id| id.as_str())
    }

    /// Selected placement id, or "" when nothing is selected.
    pub fn selected_placement_id(&self) -> &str {
        self.selected_placement.as_ref().map_or("", |id| id.as_str())
    }

    pub fn field_labels(&self) -> &FieldLabels {
        &self.field_labels
    }

    /// True while a placement or label lookup for the current selection is
    /// outstanding.
    pub fn has_pending_lookup(&self) -> bool {
        self.pending_placements.is_some() || self.pending_labels.is_some()
    }

    pub fn is_placements_pending(&self) -> bool {
        self.pending_placements.is_some()
    }

    pub fn load_contact_options(&mut self, contacts: &[Contact]) {
        self.contact_options = std::iter::once(SelectionOption::sentinel(SELECT_CONTACT_LABEL))
            .chain(
                contacts
                    .iter()
                    .map(|c| SelectionOption::new(c.name.clone(), c.id.as_str())),
            )
            .collect();
    }

    /// Change the contact. Everything downstream is cleared, and any lookup
    /// still in flight for the previous selection becomes stale.
    pub fn select_contact(&mut self, contact_id: &str) -> Option<LookupRequest> {
        self.selected_contact = non_empty(contact_id).map(ContactId::new);
        self.selected_placement = None;
        self.placement_options.clear();
        self.field_labels = FieldLabels::empty();
        self.pending_labels = None;
        self.pending_placements = None;

        let contact_id = self.selected_contact.clone()?;
        let ticket = self.issue_ticket();
        self.pending_placements = Some(ticket);
        Some(LookupRequest::Placements { ticket, contact_id })
    }

    /// Change the placement. Labels are reset; a label lookup is requested
    /// for a non-empty placement.
    pub fn select_placement(&mut self, placement_id: &str) -> Option<LookupRequest> {
        self.selected_placement = non_empty(placement_id).map(PlacementId::new);
        self.field_labels = FieldLabels::empty();
        self.pending_labels = None;

        let placement_id = self.selected_placement.clone()?;
        let ticket = self.issue_ticket();
        self.pending_labels = Some(ticket);
        Some(LookupRequest::FieldLabels {
            ticket,
            placement_id,
        })
    }

    pub fn apply_placement_options(
        &mut self,
        ticket: LookupTicket,
        placements: &[Placement],
    ) -> Reconcile {
        if self.pending_placements != Some(ticket) {
            debug!(?ticket, "discarding stale placement options");
            return Reconcile::Discarded;
        }
        self.pending_placements = None;
        self.placement_options = std::iter::once(SelectionOption::sentinel(SELECT_PLACEMENT_LABEL))
            .chain(
                placements
                    .iter()
                    .map(|p| SelectionOption::new(p.display_label(), p.id.as_str())),
            )
            .collect();
        Reconcile::Applied
    }

    pub fn apply_field_labels(
        &mut self,
        ticket: LookupTicket,
        labels: Option<FieldLabels>,
    ) -> Reconcile {
        if self.pending_labels != Some(ticket) {
            debug!(?ticket, "discarding stale field labels");
            return Reconcile::Discarded;
        }
        self.pending_labels = None;
        self.field_labels = labels.unwrap_or_default();
        Reconcile::Applied
    }

    /// Settle a lookup that failed. The selection itself is kept; only the
    /// pending marker is cleared when the ticket is still current.
    pub fn abandon_lookup(&mut self, ticket: LookupTicket) -> Reconcile {
        if self.pending_placements == Some(ticket) {
            self.pending_placements = None;
            Reconcile::Applied
        } else if self.pending_labels == Some(ticket) {
            self.pending_labels = None;
            Reconcile::Applied
        } else {
            debug!(?ticket, "ignoring failure of stale lookup");
            Reconcile::Discarded
        }
    }
}

fn non_empty(id: &str) -> Option<&str> {
    let id = id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
