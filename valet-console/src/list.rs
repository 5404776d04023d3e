//! Event list controller
//!
//! [`ListViewState`] holds everything the list view shows (rows, selection,
//! page cursor, open modal, admin toggles) and has no I/O.
//! [`EventListController`] drives it through a [`ValetApi`].

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::{QrPayload, ValetEvent};
use tracing::{error, info, warn};
use valet_client::ValetApi;

use crate::error::{ConsoleError, ConsoleResult};
use crate::form::{EventForm, SubmitOutcome};
use crate::messages;

/// Rows per page
pub const PAGE_SIZE: usize = 10;

/// Modal currently shown over the list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    AddEvent,
    EditEvent {
        id: String,
    },
    QrCode {
        event_id: String,
        payload: String,
    },
}

#[derive(Debug, Clone)]
pub struct ListViewState {
    rows: Vec<ValetEvent>,
    /// Server id of the single selected row
    selected: Option<String>,
    /// Server ids checked for bulk delete
    checked: BTreeSet<String>,
    /// 1-based page cursor
    page: usize,
    modal: Modal,
    /// Admin toggle per `eventId`
    admin_toggles: HashMap<String, bool>,
}

impl Default for ListViewState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            checked: BTreeSet::new(),
            page: 1,
            modal: Modal::None,
            admin_toggles: HashMap::new(),
        }
    }
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Rows ==========

    pub fn rows(&self) -> &[ValetEvent] {
        &self.rows
    }

    /// Replace the cached rows after a fetch; selections on vanished rows
    /// are dropped.
    pub fn set_rows(&mut self, rows: Vec<ValetEvent>) {
        self.rows = rows;
        self.prune();
    }

    pub fn row(&self, id: &str) -> Option<&ValetEvent> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Drop rows by server id
    pub fn remove_rows(&mut self, ids: &[String]) {
        self.rows.retain(|r| !ids.contains(&r.id));
        self.prune();
    }

    fn prune(&mut self) {
        let rows = &self.rows;
        let present = |id: &String| rows.iter().any(|r| &r.id == id);
        if self.selected.as_ref().is_some_and(|id| !present(id)) {
            self.selected = None;
        }
        self.checked.retain(|id| present(id));
        self.page = self.clamp_page(self.page);
    }

    // ========== Pagination ==========

    pub fn page(&self) -> usize {
        self.page
    }

    /// `ceil(rows / PAGE_SIZE)`; zero when there are no rows
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE)
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> &[ValetEvent] {
        let start = ((self.page - 1) * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = self.clamp_page(page);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages());
    }

    // ========== Selection ==========

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a single row; unknown ids are ignored
    pub fn select(&mut self, id: &str) -> bool {
        if self.row(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Flip the bulk-delete checkbox of a row; returns the new state
    pub fn toggle_checked(&mut self, id: &str) -> bool {
        if self.checked.remove(id) {
            return false;
        }
        if self.row(id).is_some() {
            self.checked.insert(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn checked_ids(&self) -> Vec<String> {
        self.checked.iter().cloned().collect()
    }

    // ========== Admin toggles ==========

    /// Flip the admin toggle for `event_id`; returns the new state
    pub fn toggle_admin(&mut self, event_id: &str) -> bool {
        let entry = self.admin_toggles.entry(event_id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set_admin(&mut self, event_id: &str, enabled: bool) {
        self.admin_toggles.insert(event_id.to_string(), enabled);
    }

    pub fn admin_enabled(&self, event_id: &str) -> bool {
        self.admin_toggles.get(event_id).copied().unwrap_or(false)
    }

    // ========== Modals ==========

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn open_add(&mut self) {
        self.modal = Modal::AddEvent;
    }

    /// Select `id` and open the edit modal. Expired rows are refused.
    pub fn begin_edit(&mut self, id: &str, now: DateTime<Utc>) -> ConsoleResult<ValetEvent> {
        let row = self
            .row(id)
            .cloned()
            .ok_or_else(|| ConsoleError::precondition(messages::SELECT_TO_UPDATE))?;
        if row.is_expired_at(now) {
            return Err(ConsoleError::precondition(messages::EVENT_EXPIRED));
        }
        self.selected = Some(row.id.clone());
        self.modal = Modal::EditEvent { id: row.id.clone() };
        Ok(row)
    }

    /// Build the QR payload for a row and show it
    pub fn open_qr(&mut self, id: &str, tz: Tz) -> ConsoleResult<String> {
        let row = self
            .row(id)
            .ok_or_else(|| ConsoleError::precondition(messages::SELECT_TO_UPDATE))?;
        let admin = self.admin_enabled(&row.event_id);
        let payload = QrPayload::for_event(row, Some(admin), tz).encode()?;
        let event_id = row.event_id.clone();
        self.show_qr(event_id, payload.clone());
        Ok(payload)
    }

    /// Show an already encoded payload (after a create)
    pub fn show_qr(&mut self, event_id: impl Into<String>, payload: impl Into<String>) {
        self.modal = Modal::QrCode {
            event_id: event_id.into(),
            payload: payload.into(),
        };
    }

    /// Close whatever is open. Closing the edit modal clears the selection.
    pub fn close_modal(&mut self) {
        if matches!(self.modal, Modal::EditEvent { .. }) {
            self.selected = None;
        }
        self.modal = Modal::None;
    }
}

/// List controller over a [`ValetApi`]
pub struct EventListController<A> {
    api: A,
    view: ListViewState,
    tz: Tz,
}

impl<A: ValetApi> EventListController<A> {
    pub fn new(api: A, tz: Tz) -> Self {
        Self {
            api,
            view: ListViewState::new(),
            tz,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &ListViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListViewState {
        &mut self.view
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Fetch all events. A response without data leaves the cache as is.
    pub async fn refresh(&mut self) -> ConsoleResult<()> {
        let resp = self
            .api
            .list_events()
            .await
            .inspect_err(|e| error!(error = %e, "Fetching valet events failed"))
            .map_err(ConsoleError::remote(messages::FETCH_FAILED))?;
        if !resp.is_success() {
            return Err(ConsoleError::Rejected(messages::FETCH_FAILED.to_string()));
        }
        if let Some(rows) = resp.data {
            info!(count = rows.len(), "Fetched valet events");
            self.view.set_rows(rows);
        }
        Ok(())
    }

    /// Delete one row by server id; the row is removed once the server
    /// acknowledges.
    pub async fn delete_event(&mut self, id: &str) -> ConsoleResult<()> {
        if self.view.row(id).is_none() {
            return Err(ConsoleError::precondition(messages::SELECT_TO_DELETE));
        }
        let resp = self
            .api
            .delete_event(id)
            .await
            .inspect_err(|e| error!(id, error = %e, "Delete failed"))
            .map_err(ConsoleError::remote(messages::DELETE_ERROR))?;
        if !resp.is_success() {
            warn!(id, "Delete rejected by server");
            return Err(ConsoleError::Rejected(messages::DELETE_FAILED.to_string()));
        }
        self.view.remove_rows(&[id.to_string()]);
        info!(id, "Valet event removed from list");
        Ok(())
    }

    /// Delete the selected row
    pub async fn delete_selection(&mut self) -> ConsoleResult<()> {
        let id = self
            .view
            .selected()
            .map(str::to_string)
            .ok_or_else(|| ConsoleError::precondition(messages::SELECT_TO_DELETE))?;
        self.delete_event(&id).await
    }

    /// Delete all checked rows in one call; returns how many were removed
    pub async fn delete_checked(&mut self) -> ConsoleResult<usize> {
        let ids = self.view.checked_ids();
        self.delete_many(&ids).await
    }

    /// Delete the given rows in one call
    pub async fn delete_many(&mut self, ids: &[String]) -> ConsoleResult<usize> {
        if ids.is_empty() {
            return Err(ConsoleError::precondition(messages::SELECT_TO_DELETE));
        }
        let resp = self
            .api
            .delete_events(ids)
            .await
            .inspect_err(|e| error!(count = ids.len(), error = %e, "Bulk delete failed"))
            .map_err(ConsoleError::remote(messages::DELETE_ERROR))?;
        if !resp.is_success() {
            warn!(count = ids.len(), "Bulk delete rejected by server");
            return Err(ConsoleError::Rejected(messages::DELETE_FAILED.to_string()));
        }
        self.view.remove_rows(ids);
        info!(count = ids.len(), "Valet events removed from list");
        Ok(ids.len())
    }

    /// Open the add modal with an empty form
    pub fn begin_create(&mut self) -> EventForm {
        self.view.open_add();
        EventForm::create(self.tz)
    }

    /// Open the edit modal for a row, prefilled
    pub fn begin_edit(&mut self, id: &str) -> ConsoleResult<EventForm> {
        let row = self.view.begin_edit(id, Utc::now())?;
        Ok(EventForm::edit(&row, self.tz))
    }

    /// Submit a form opened from this list, then refetch.
    ///
    /// A create shows the new event's QR code; an update closes the edit
    /// modal. A failed refetch after a successful submit is only logged.
    pub async fn submit_form(&mut self, form: &mut EventForm) -> ConsoleResult<SubmitOutcome> {
        let outcome = form.submit(&self.api).await?;
        match &outcome {
            SubmitOutcome::Created { payload, qr } => {
                self.view.show_qr(payload.event_id.clone(), qr.clone());
            }
            SubmitOutcome::Updated { .. } => self.view.close_modal(),
        }
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refetch after submit failed");
        }
        Ok(outcome)
    }

    /// QR payload for a row, honoring its admin toggle
    pub fn generate_qr(&mut self, id: &str) -> ConsoleResult<String> {
        self.view.open_qr(id, self.tz)
    }
}
