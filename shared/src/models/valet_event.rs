//! Valet Event Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Valet event entity (a time-bounded admin window at a location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValetEvent {
    /// Server-assigned identifier, used to address update/delete
    #[serde(rename = "_id")]
    pub id: String,
    /// Operator-assigned identifier (the server may send it as a number)
    #[serde(deserialize_with = "string_or_number")]
    pub event_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Required on input; older records may still come back without one
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ValetEvent {
    /// An event is expired once its end date has passed.
    ///
    /// Records without an end date are treated as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            Some(end) => end < now,
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Create / update event payload
///
/// The same document is sent to `POST /addValetEvent` and
/// `PUT /updateValetEvent/{id}`. `startDate` is serialized as `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub event_id: String,
    pub title: String,
    pub location: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

/// Bulk delete payload (`DELETE /deleteValetEvents`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
