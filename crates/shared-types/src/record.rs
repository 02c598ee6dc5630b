//! Maintenance records in their UI and backend shapes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

// ─── Identity ─────────────────────────────────────────────────

/// Client-side handle for a record that has not been saved yet.
///
/// Travels as `MT-<digits>`, normally the creation time in milliseconds.
/// The digits are kept verbatim, so any length is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalToken(String);

impl LocalToken {
    pub const PREFIX: &'static str = "MT-";

    pub fn new(millis: u64) -> Self {
        Self(millis.to_string())
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Parse `MT-<digits>`; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(digits.to_string()))
    }
}

impl fmt::Display for LocalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Record identity: saved on the backend, or still local to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Persisted(i64),
    Pending(LocalToken),
}

impl RecordId {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn persisted(&self) -> Option<i64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Pending(token) => write!(f, "{token}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(token) = LocalToken::parse(s) {
            return Ok(Self::Pending(token));
        }
        s.trim()
            .parse::<i64>()
            .map(Self::Persisted)
            .map_err(|_| AppError::bad_request(format!("Unrecognised record id: {s}")))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Persisted(id)
    }
}

impl From<LocalToken> for RecordId {
    fn from(token: LocalToken) -> Self {
        Self::Pending(token)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Persisted(id) => serializer.serialize_i64(*id),
            Self::Pending(token) => serializer.collect_str(token),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Int(id) => Ok(Self::Persisted(id)),
            RawId::Text(s) => s.parse().map_err(|e: AppError| serde::de::Error::custom(e.message)),
        }
    }
}

// ─── Record status ────────────────────────────────────────────

/// Workflow state of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Draft,
    UserCompleted,
    ContractorPending,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UserCompleted => "user_completed",
            Self::ContractorPending => "contractor_pending",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "user_completed" => Some(Self::UserCompleted),
            "contractor_pending" => Some(Self::ContractorPending),
            _ => None,
        }
    }

    /// Records handed to a contractor are locked until they respond.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ContractorPending)
    }
}

/// `data.requestStatus` value marking a contractor request in flight.
pub const REQUEST_STATUS_PENDING: &str = "pending";

// ─── Nested record data ───────────────────────────────────────

/// Contractor, cost, and attachment details stored in the record's `data` column.
///
/// Missing keys take the values from `Default`; unknown keys are kept in
/// `extra` so nothing the UI attached is lost on a round trip. A missing or
/// blank `priority` stays `None` until the configured default is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordData {
    pub description: Option<String>,
    pub contractor: Option<String>,
    pub contractor_company: Option<String>,
    pub contractor_email: Option<String>,
    pub contractor_phone: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub cost: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub priority: Option<String>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub files: Vec<Value>,
    pub work_order_number: Option<String>,
    pub request_status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RecordData {
    fn default() -> Self {
        Self {
            description: None,
            contractor: None,
            contractor_company: None,
            contractor_email: None,
            contractor_phone: None,
            cost: None,
            priority: None,
            notes: None,
            files: Vec::new(),
            work_order_number: None,
            request_status: None,
            extra: Map::new(),
        }
    }
}

impl RecordData {
    pub fn is_request_pending(&self) -> bool {
        self.request_status.as_deref() == Some(REQUEST_STATUS_PENDING)
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    })
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|p| !p.trim().is_empty()))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ─── UI shape ─────────────────────────────────────────────────

/// A maintenance record as the editor holds it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub property_id: Option<String>,
    #[serde(default)]
    pub system_id: String,
    /// Completion date.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub next_service_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub record_status: Option<RecordStatus>,
    #[serde(default)]
    pub data: RecordData,
}

// ─── Backend shapes ───────────────────────────────────────────

/// Body for the create/update maintenance record endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct MaintenanceRecordPayload {
    pub property_id: i64,
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 50, message = "System key is limited to 50 characters"))
    )]
    pub system_key: String,
    /// ISO date-time.
    pub completed_at: Option<String>,
    /// `YYYY-MM-DD`.
    pub next_service_date: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 50, message = "Status is limited to 50 characters"))
    )]
    pub status: String,
    pub record_status: Option<RecordStatus>,
    pub data: RecordData,
}

/// A row from the list maintenance records endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendMaintenanceRecord {
    pub id: i64,
    #[serde(default)]
    pub property_id: Option<i64>,
    #[serde(default)]
    pub system_key: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub next_service_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Raw text; unknown values are ignored rather than failing the list.
    #[serde(default)]
    pub record_status: Option<String>,
    #[serde(default)]
    pub data: Option<RecordData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
