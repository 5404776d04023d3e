//! Input validation
//!
//! Field rules for the event form and the sign-in form. Validators never
//! touch the network; they return per-field messages for inline display.

use std::collections::BTreeMap;
use std::fmt;

use crate::form::EventFormValues;
use crate::messages;

/// Country calling codes offered at sign-in
pub const COUNTRY_CODES: &[&str] = &[
    "+1", "+44", "+61", "+86", "+91", "+49", "+81", "+7", "+39", "+33", "+82", "+65", "+34",
    "+52", "+358", "+46", "+31", "+55", "+64", "+971", "+41", "+43",
];

pub const DEFAULT_COUNTRY_CODE: &str = "+1";

/// National number length bounds (digits)
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

pub const OTP_LENGTH: usize = 4;

/// Form fields that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    EventId,
    Title,
    Location,
    StartDate,
    EndDate,
    StartTime,
    EndTime,
    CountryCode,
    PhoneNumber,
    Otp,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EventId => "Event Id",
            Self::Title => "Title",
            Self::Location => "Location",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
            Self::StartTime => "Start Time",
            Self::EndTime => "End Time",
            Self::CountryCode => "Country Code",
            Self::PhoneNumber => "Phone Number",
            Self::Otp => "OTP",
        }
    }
}

/// Per-field error messages, one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// Set the error for `field`, replacing an earlier one
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.0.values() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// Event form rules: `eventId` and `endDate` are required, and the end may
/// not precede the start.
pub fn validate_event(values: &EventFormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if values.event_id.trim().is_empty() {
        errors.insert(FormField::EventId, messages::EVENT_ID_REQUIRED);
    }

    match (values.start_date, values.end_date) {
        (_, None) => errors.insert(FormField::EndDate, messages::END_DATE_REQUIRED),
        (Some(start), Some(end)) if end < start => {
            errors.insert(FormField::EndDate, messages::END_BEFORE_START)
        }
        _ => {}
    }

    errors
}

/// National number: digits only, 7-15 of them
pub fn validate_phone_number(national: &str) -> Result<(), &'static str> {
    if national.is_empty() {
        return Err(messages::PHONE_REQUIRED);
    }
    if !national.chars().all(|c| c.is_ascii_digit()) {
        return Err(messages::PHONE_DIGITS_ONLY);
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&national.len()) {
        return Err(messages::PHONE_LENGTH);
    }
    Ok(())
}

pub fn validate_country_code(code: &str) -> Result<(), &'static str> {
    if COUNTRY_CODES.contains(&code) {
        Ok(())
    } else {
        Err(messages::COUNTRY_CODE_UNSUPPORTED)
    }
}

/// OTP code: exactly 4 digits
pub fn validate_otp(code: &str) -> Result<(), &'static str> {
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(messages::OTP_DIGITS_ONLY);
    }
    if code.len() != OTP_LENGTH {
        return Err(messages::OTP_INCOMPLETE);
    }
    Ok(())
}

/// Sign-in form: country code plus national number
pub fn validate_sign_in(country_code: &str, national: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if let Err(msg) = validate_country_code(country_code) {
        errors.insert(FormField::CountryCode, msg);
    }
    if let Err(msg) = validate_phone_number(national) {
        errors.insert(FormField::PhoneNumber, msg);
    }
    errors
}
