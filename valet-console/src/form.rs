//! Event form controller
//!
//! Two states: [`FormState::Editing`] while fields change and
//! [`FormState::Submitting`] while the create/update call is in flight.
//! Validation runs at construction and after every change or blur.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::util::{format_clock, merge_clock, parse_clock, parse_date_input};
use shared::{EventPayload, QrPayload, ValetEvent};
use tracing::{info, warn};
use valet_client::ValetApi;

use crate::error::{ConsoleError, ConsoleResult};
use crate::messages;
use crate::validation::{FieldErrors, FormField, validate_event};

/// Raw form values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFormValues {
    pub event_id: String,
    pub title: String,
    pub location: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Clock time entered separately from the start date
    pub start_time: Option<NaiveTime>,
    /// Clock time entered separately from the end date
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// New event; `qr` is the encoded payload to display
    Created { payload: EventPayload, qr: String },
    Updated { id: String, payload: EventPayload },
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created { .. } => messages::EVENT_CREATED,
            Self::Updated { .. } => messages::EVENT_UPDATED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventForm {
    mode: FormMode,
    initial: EventFormValues,
    values: EventFormValues,
    errors: FieldErrors,
    touched: BTreeSet<FormField>,
    state: FormState,
    /// Clock fields the operator set since the form opened; only these are
    /// merged into their dates on submit
    pending_clocks: BTreeSet<FormField>,
    tz: Tz,
}

impl EventForm {
    /// Empty form for a new event
    pub fn create(tz: Tz) -> Self {
        Self::with_values(FormMode::Create, EventFormValues::default(), tz)
    }

    /// Form prefilled from an existing row; clock times are derived from
    /// the stored timestamps in `tz`.
    pub fn edit(event: &ValetEvent, tz: Tz) -> Self {
        let clock = |dt: Option<DateTime<Utc>>| dt.and_then(|d| clock_of(d, tz));
        let values = EventFormValues {
            event_id: event.event_id.clone(),
            title: event.title.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            start_date: event.start_date,
            end_date: event.end_date,
            start_time: clock(event.start_date),
            end_time: clock(event.end_date),
        };
        Self::with_values(
            FormMode::Edit {
                id: event.id.clone(),
            },
            values,
            tz,
        )
    }

    fn with_values(mode: FormMode, values: EventFormValues, tz: Tz) -> Self {
        let mut form = Self {
            mode,
            initial: values.clone(),
            values,
            errors: FieldErrors::default(),
            touched: BTreeSet::new(),
            state: FormState::Editing,
            pending_clocks: BTreeSet::new(),
            tz,
        };
        form.validate();
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn values(&self) -> &EventFormValues {
        &self.values
    }

    /// All current errors, touched or not
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Inline error for `field`, shown once the field has been touched
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    fn validate(&mut self) {
        self.errors = validate_event(&self.values);
    }

    // ========== Field changes ==========

    pub fn set_event_id(&mut self, value: impl Into<String>) {
        self.values.event_id = value.into();
        self.validate();
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.values.title = value.into();
        self.validate();
    }

    pub fn set_location(&mut self, value: impl Into<String>) {
        self.values.location = value.into();
        self.validate();
    }

    pub fn set_start_date(&mut self, value: Option<DateTime<Utc>>) {
        self.values.start_date = value;
        self.validate();
    }

    pub fn set_end_date(&mut self, value: Option<DateTime<Utc>>) {
        self.values.end_date = value;
        self.validate();
    }

    pub fn set_start_time(&mut self, value: Option<NaiveTime>) {
        self.values.start_time = value;
        self.mark_clock(FormField::StartTime, value.is_some());
        self.validate();
    }

    pub fn set_end_time(&mut self, value: Option<NaiveTime>) {
        self.values.end_time = value;
        self.mark_clock(FormField::EndTime, value.is_some());
        self.validate();
    }

    fn mark_clock(&mut self, field: FormField, pending: bool) {
        if pending {
            self.pending_clocks.insert(field);
        } else {
            self.pending_clocks.remove(&field);
        }
    }

    /// Parse and set a clock time typed as `HH:MM`; an empty string clears it
    pub fn set_time_input(&mut self, field: FormField, input: &str) -> ConsoleResult<()> {
        let parsed = if input.trim().is_empty() {
            None
        } else {
            match parse_clock(input) {
                Ok(t) => Some(t),
                Err(e) => {
                    let mut errors = FieldErrors::default();
                    errors.insert(field, e.to_string());
                    return Err(ConsoleError::Validation(errors));
                }
            }
        };
        match field {
            FormField::StartTime => self.set_start_time(parsed),
            FormField::EndTime => self.set_end_time(parsed),
            _ => {
                return Err(ConsoleError::precondition(format!(
                    "{} is not a time field",
                    field.label()
                )));
            }
        }
        Ok(())
    }

    /// Parse and set a date typed as `YYYY-MM-DD` (local midnight) or
    /// RFC 3339; an empty string clears it.
    ///
    /// A bare date takes the form's clock time on submit. A full timestamp
    /// is sent as given and replaces the clock shown for that field.
    pub fn set_date_input(&mut self, field: FormField, input: &str) -> ConsoleResult<()> {
        let parsed = if input.trim().is_empty() {
            None
        } else {
            match parse_date_input(input, self.tz) {
                Ok(d) => Some(d),
                Err(e) => {
                    let mut errors = FieldErrors::default();
                    errors.insert(field, e.to_string());
                    return Err(ConsoleError::Validation(errors));
                }
            }
        };
        let clock_field = match field {
            FormField::StartDate => FormField::StartTime,
            FormField::EndDate => FormField::EndTime,
            _ => {
                return Err(ConsoleError::precondition(format!(
                    "{} is not a date field",
                    field.label()
                )));
            }
        };

        let date_only = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok();
        if let (Some(dt), false) = (parsed, date_only) {
            let clock = clock_of(dt, self.tz);
            match clock_field {
                FormField::StartTime => self.values.start_time = clock,
                _ => self.values.end_time = clock,
            }
        }
        self.mark_clock(clock_field, parsed.is_some() && date_only);

        match field {
            FormField::StartDate => self.set_start_date(parsed),
            _ => self.set_end_date(parsed),
        }
        Ok(())
    }

    /// Field lost focus
    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        self.validate();
    }

    /// Back to the initial values (empty for create, the row for edit)
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched.clear();
        self.pending_clocks.clear();
        self.state = FormState::Editing;
        self.validate();
    }

    // ========== Submit ==========

    /// Build the wire payload: validated, with the clock times the operator
    /// set merged into their dates. `eventId` is sent as entered.
    pub fn payload(&self) -> ConsoleResult<EventPayload> {
        let errors = validate_event(&self.values);
        let (Some(end), true) = (self.values.end_date, errors.is_empty()) else {
            return Err(ConsoleError::Validation(errors));
        };

        let start = self
            .values
            .start_date
            .map(|d| self.merge(d, FormField::StartTime, self.values.start_time));
        let end = self.merge(end, FormField::EndTime, self.values.end_time);

        if let Some(start) = start
            && end < start
        {
            let mut errors = FieldErrors::default();
            errors.insert(FormField::EndDate, messages::END_BEFORE_START);
            return Err(ConsoleError::Validation(errors));
        }

        Ok(EventPayload {
            event_id: self.values.event_id.clone(),
            title: self.values.title.clone(),
            location: self.values.location.clone(),
            start_date: start,
            end_date: end,
        })
    }

    fn merge(
        &self,
        date: DateTime<Utc>,
        field: FormField,
        time: Option<NaiveTime>,
    ) -> DateTime<Utc> {
        match time {
            Some(t) if self.pending_clocks.contains(&field) => merge_clock(date, t, self.tz),
            _ => date,
        }
    }

    fn touch_all(&mut self) {
        self.touched.extend([
            FormField::EventId,
            FormField::Title,
            FormField::Location,
            FormField::StartDate,
            FormField::EndDate,
            FormField::StartTime,
            FormField::EndTime,
        ]);
    }

    /// Submit through `api`. Validation failures never reach the network.
    ///
    /// On success the form resets itself; on failure it stays as entered.
    pub async fn submit<A: ValetApi>(&mut self, api: &A) -> ConsoleResult<SubmitOutcome> {
        self.touch_all();
        self.validate();
        let payload = match self.payload() {
            Ok(p) => p,
            Err(e) => {
                warn!(errors = %e, "Event form rejected");
                return Err(e);
            }
        };

        self.state = FormState::Submitting;
        let result = self.send(api, payload).await;
        self.state = FormState::Editing;

        match result {
            Ok(outcome) => {
                self.reset();
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "Event form submit failed");
                Err(e)
            }
        }
    }

    async fn send<A: ValetApi>(
        &self,
        api: &A,
        payload: EventPayload,
    ) -> ConsoleResult<SubmitOutcome> {
        match &self.mode {
            FormMode::Create => {
                let resp = api
                    .create_event(&payload)
                    .await
                    .map_err(ConsoleError::remote(messages::SUBMIT_FAILED))?;
                if !resp.is_success() {
                    let msg = resp.message.unwrap_or_else(|| messages::SUBMIT_FAILED.to_string());
                    return Err(ConsoleError::Rejected(msg));
                }
                let qr = QrPayload::for_payload(&payload, self.tz).encode()?;
                info!(event_id = %payload.event_id, "Valet event created");
                Ok(SubmitOutcome::Created { payload, qr })
            }
            FormMode::Edit { id } => {
                let resp = api
                    .update_event(id, &payload)
                    .await
                    .map_err(ConsoleError::remote(messages::UPDATE_ERROR))?;
                if !resp.is_success() {
                    return Err(ConsoleError::Rejected(messages::UPDATE_FAILED.to_string()));
                }
                info!(id = %id, event_id = %payload.event_id, "Valet event updated");
                Ok(SubmitOutcome::Updated {
                    id: id.clone(),
                    payload,
                })
            }
        }
    }
}

/// `HH:MM` of `dt` in `tz`, seconds dropped
fn clock_of(dt: DateTime<Utc>, tz: Tz) -> Option<NaiveTime> {
    parse_clock(&format_clock(dt, tz)).ok()
}
