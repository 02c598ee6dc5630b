use serde::{Deserialize, Deserializer, Serialize};

/// A booked maintenance visit, as returned by the upcoming-events endpoint.
///
/// Nulls and missing keys never fail the row: text fields fall back to empty
/// strings and the status to `Other("")`, none of which count as upcoming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEvent {
    #[serde(default, alias = "system_key", deserialize_with = "null_as_empty")]
    pub system_key: String,
    /// ISO date; kept as text so malformed rows degrade instead of failing the list.
    #[serde(default, alias = "scheduled_date", deserialize_with = "null_as_empty")]
    pub scheduled_date: String,
    /// `HH:mm`, when a time slot was chosen.
    #[serde(default, alias = "scheduled_time")]
    pub scheduled_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: EventStatus,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EventStatus, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(EventStatus::from)
        .unwrap_or_default())
}

/// Event status. Anything the backend adds later lands in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Scheduled,
    Confirmed,
    Other(String),
}

/// An unknown status; never counted as a booking.
impl Default for EventStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for EventStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "scheduled" => Self::Scheduled,
            "confirmed" => Self::Confirmed,
            _ => Self::Other(s),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        status.as_str().to_string()
    }
}
