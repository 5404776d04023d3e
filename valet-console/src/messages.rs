//! Operator-facing notification texts

// Event form
pub const EVENT_ID_REQUIRED: &str = "Event ID is required.";
pub const END_DATE_REQUIRED: &str = "End Date is required.";
pub const END_BEFORE_START: &str = "End Date cannot be before Start Date.";
pub const EVENT_CREATED: &str = "Event details submitted successfully!";
pub const EVENT_UPDATED: &str = "Event updated successfully.";
pub const SUBMIT_FAILED: &str = "An error occurred while submitting the form.";
pub const UPDATE_FAILED: &str = "Failed to update event.";
pub const UPDATE_ERROR: &str = "Error updating event.";

// Event list
pub const FETCH_FAILED: &str = "Error fetching events.";
pub const EVENT_DELETED: &str = "Event deleted successfully.";
pub const EVENTS_DELETED: &str = "Events deleted successfully.";
pub const DELETE_FAILED: &str = "Failed to delete event.";
pub const DELETE_ERROR: &str = "Error deleting event.";
pub const SELECT_TO_DELETE: &str = "Please select an event to delete.";
pub const SELECT_TO_UPDATE: &str = "Please select an event to update.";
pub const EVENT_EXPIRED: &str = "The Event has been expired.";

// Sign-in
pub const PHONE_REQUIRED: &str = "Phone number is required.";
pub const PHONE_DIGITS_ONLY: &str = "Phone number must contain digits only.";
pub const PHONE_LENGTH: &str = "Phone number must be 7 to 15 digits.";
pub const COUNTRY_CODE_UNSUPPORTED: &str = "Please select a valid country code.";
pub const OTP_INCOMPLETE: &str = "Please enter all 4 digits.";
pub const OTP_DIGITS_ONLY: &str = "OTP must contain digits only.";
pub const OTP_SEND_FAILED: &str = "Failed to send OTP.";
pub const OTP_RESEND_FAILED: &str = "Failed to resend OTP.";
pub const OTP_RESENT: &str = "OTP resent successfully!";
pub const OTP_INVALID: &str = "Invalid OTP.";
pub const OTP_VERIFIED: &str = "OTP Verified";
pub const OTP_NOT_REQUESTED: &str = "Please request an OTP first.";
pub const TOKEN_MISSING: &str = "Verification succeeded but no session token was issued.";
pub const RETRY_LATER: &str = "An error occurred. Please try again.";
pub const SESSION_SAVE_FAILED: &str = "Could not store the session.";
