//! QR payload consumed by the mobile scanning app
//!
//! The payload is rebuilt on every request and never stored.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{EventPayload, ValetEvent};
use crate::util::{format_date, format_time};

/// Constant `scanType` tag for valet admin codes
pub const SCAN_TYPE_VALET_ADMIN: &str = "valetAdmin";

/// Default business timezone written into every payload
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Chicago;

/// Document encoded into the QR code.
///
/// Dates and times are wall-clock values in the zone named by `timezone`.
/// Scanners that read them as UTC will be off by that zone's offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub scan_type: String,
    /// Admin enable/disable toggle, omitted when the caller has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valet_admin: Option<bool>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub timezone: String,
}

impl QrPayload {
    /// Derive the payload from an event; dates and times are rendered in `tz`.
    pub fn for_event(event: &ValetEvent, valet_admin: Option<bool>, tz: Tz) -> Self {
        Self::for_window(event.start_date, event.end_date, valet_admin, tz)
    }

    /// Payload for a freshly created event, before the list is refetched
    pub fn for_payload(payload: &EventPayload, tz: Tz) -> Self {
        Self::for_window(payload.start_date, Some(payload.end_date), None, tz)
    }

    fn for_window(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        valet_admin: Option<bool>,
        tz: Tz,
    ) -> Self {
        Self {
            scan_type: SCAN_TYPE_VALET_ADMIN.to_string(),
            valet_admin,
            start_date: start.map(|d| format_date(d, tz)),
            start_time: start.map(|d| format_time(d, tz)),
            end_date: end.map(|d| format_date(d, tz)),
            end_time: end.map(|d| format_time(d, tz)),
            timezone: tz.name().to_string(),
        }
    }

    /// JSON text handed to the QR renderer
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
