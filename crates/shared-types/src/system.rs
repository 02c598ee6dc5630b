//! Property systems and their inspection fields.
//!
//! A property tracks a fixed catalogue of building systems (roof, HVAC, ...)
//! plus any number of user-defined ones. Standard systems keep their
//! inspection data as flat keys on the property form; custom systems keep
//! theirs in a side map keyed by system name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Prefix shared by every user-defined system key.
pub const CUSTOM_SYSTEM_PREFIX: &str = "custom-";

// ─── Standard systems ─────────────────────────────────────────

/// Built-in property systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StandardSystem {
    Roof,
    Gutters,
    Foundation,
    Exterior,
    Windows,
    Attic,
    Hvac,
    Plumbing,
    Electrical,
    WaterHeater,
    Chimney,
}

/// Form keys holding one standard system's inspection data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemFieldNames {
    pub last_inspection: &'static str,
    pub next_inspection: &'static str,
    pub condition: &'static str,
    pub issues: &'static str,
}

impl StandardSystem {
    pub const ALL: [StandardSystem; 11] = [
        Self::Roof,
        Self::Gutters,
        Self::Foundation,
        Self::Exterior,
        Self::Windows,
        Self::Attic,
        Self::Hvac,
        Self::Plumbing,
        Self::Electrical,
        Self::WaterHeater,
        Self::Chimney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roof => "roof",
            Self::Gutters => "gutters",
            Self::Foundation => "foundation",
            Self::Exterior => "exterior",
            Self::Windows => "windows",
            Self::Attic => "attic",
            Self::Hvac => "hvac",
            Self::Plumbing => "plumbing",
            Self::Electrical => "electrical",
            Self::WaterHeater => "waterHeater",
            Self::Chimney => "chimney",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "roof" => Some(Self::Roof),
            "gutters" => Some(Self::Gutters),
            "foundation" => Some(Self::Foundation),
            "exterior" => Some(Self::Exterior),
            "windows" => Some(Self::Windows),
            "attic" => Some(Self::Attic),
            "hvac" => Some(Self::Hvac),
            "plumbing" => Some(Self::Plumbing),
            "electrical" => Some(Self::Electrical),
            "waterHeater" => Some(Self::WaterHeater),
            "chimney" => Some(Self::Chimney),
            _ => None,
        }
    }

    pub fn field_names(&self) -> SystemFieldNames {
        match self {
            Self::Roof => SystemFieldNames {
                last_inspection: "roofLastInspection",
                next_inspection: "roofNextInspection",
                condition: "roofCondition",
                issues: "roofIssues",
            },
            Self::Gutters => SystemFieldNames {
                last_inspection: "gutterLastInspection",
                next_inspection: "gutterNextInspection",
                condition: "gutterCondition",
                issues: "gutterIssues",
            },
            Self::Foundation => SystemFieldNames {
                last_inspection: "foundationLastInspection",
                next_inspection: "foundationNextInspection",
                condition: "foundationCondition",
                issues: "foundationIssues",
            },
            Self::Exterior => SystemFieldNames {
                last_inspection: "exteriorLastInspection",
                next_inspection: "exteriorNextInspection",
                condition: "sidingCondition",
                issues: "exteriorIssues",
            },
            Self::Windows => SystemFieldNames {
                last_inspection: "windowsLastInspection",
                next_inspection: "windowsNextInspection",
                condition: "windowsCondition",
                issues: "windowsIssues",
            },
            Self::Attic => SystemFieldNames {
                last_inspection: "atticLastInspection",
                next_inspection: "atticNextInspection",
                condition: "atticCondition",
                issues: "atticIssues",
            },
            Self::Hvac => SystemFieldNames {
                last_inspection: "hvacLastInspection",
                next_inspection: "hvacNextInspection",
                condition: "hvacCondition",
                issues: "hvacIssues",
            },
            Self::Plumbing => SystemFieldNames {
                last_inspection: "plumbingLastInspection",
                next_inspection: "plumbingNextInspection",
                condition: "plumbingCondition",
                issues: "plumbingIssues",
            },
            Self::Electrical => SystemFieldNames {
                last_inspection: "electricalLastInspection",
                next_inspection: "electricalNextInspection",
                condition: "electricalCondition",
                issues: "electricalIssues",
            },
            Self::WaterHeater => SystemFieldNames {
                last_inspection: "waterHeaterLastInspection",
                next_inspection: "waterHeaterNextInspection",
                condition: "waterHeaterCondition",
                issues: "waterHeaterIssues",
            },
            Self::Chimney => SystemFieldNames {
                last_inspection: "chimneyLastInspection",
                next_inspection: "chimneyNextInspection",
                condition: "chimneyCondition",
                issues: "chimneyIssues",
            },
        }
    }
}

// ─── System reference ─────────────────────────────────────────

/// A standard system or a user-defined one.
///
/// Custom systems travel as `custom-<name>-<index>`; the name may itself
/// contain dashes, so the index is taken from the last segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SystemRef {
    Standard(StandardSystem),
    Custom { name: String, index: u32 },
}

impl SystemRef {
    pub fn custom(name: impl Into<String>, index: u32) -> Self {
        Self::Custom {
            name: name.into(),
            index,
        }
    }

    pub fn parse(key: &str) -> Result<Self, AppError> {
        if let Some(rest) = key.strip_prefix(CUSTOM_SYSTEM_PREFIX) {
            let (name, index) = rest
                .rsplit_once('-')
                .ok_or_else(|| AppError::bad_request(format!("Malformed custom system key: {key}")))?;
            if name.is_empty() || index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AppError::bad_request(format!(
                    "Malformed custom system key: {key}"
                )));
            }
            let index = index
                .parse::<u32>()
                .map_err(|_| AppError::bad_request(format!("Custom system index out of range: {key}")))?;
            return Ok(Self::custom(name, index));
        }
        StandardSystem::from_str_opt(key)
            .map(Self::Standard)
            .ok_or_else(|| AppError::not_found(format!("Unknown system: {key}")))
    }

    /// Name used to look up custom system data.
    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Self::Custom { name, .. } => Some(name),
            Self::Standard(_) => None,
        }
    }
}

impl From<StandardSystem> for SystemRef {
    fn from(system: StandardSystem) -> Self {
        Self::Standard(system)
    }
}

impl fmt::Display for SystemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(system) => f.write_str(system.as_str()),
            Self::Custom { name, index } => write!(f, "{CUSTOM_SYSTEM_PREFIX}{name}-{index}"),
        }
    }
}

impl FromStr for SystemRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SystemRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SystemRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| serde::de::Error::custom(e.message))
    }
}

// ─── Condition ────────────────────────────────────────────────

/// Inspector's rating of a system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Condition {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Case-insensitive parse; blank or unknown text is `None`.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Some(Self::Poor),
            "fair" => Some(Self::Fair),
            "good" => Some(Self::Good),
            "excellent" => Some(Self::Excellent),
            _ => None,
        }
    }

    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::Poor | Self::Fair)
    }
}

fn lenient_condition<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Condition>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Condition::from_str_opt))
}

// ─── Inspection data ──────────────────────────────────────────

/// Inspection data for one system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionFields {
    #[serde(default)]
    pub last_inspection: Option<String>,
    #[serde(default)]
    pub next_inspection: Option<String>,
    #[serde(default, deserialize_with = "lenient_condition")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub issues: Option<String>,
    #[serde(default, alias = "isNewInstall")]
    pub new_install: bool,
}

impl InspectionFields {
    /// Read a standard system's fields off the flat property form.
    pub fn from_form(form: &PropertyFormData, names: SystemFieldNames) -> Self {
        Self {
            last_inspection: form.text(names.last_inspection).map(str::to_string),
            next_inspection: form.text(names.next_inspection).map(str::to_string),
            condition: form.text(names.condition).and_then(Condition::from_str_opt),
            issues: form.text(names.issues).map(str::to_string),
            new_install: false,
        }
    }

    pub fn last_inspection(&self) -> Option<&str> {
        non_blank(self.last_inspection.as_deref())
    }

    pub fn next_inspection(&self) -> Option<&str> {
        non_blank(self.next_inspection.as_deref())
    }

    pub fn issues(&self) -> Option<&str> {
        non_blank(self.issues.as_deref())
    }
}

/// User-defined systems keyed by name.
pub type CustomSystemsData = HashMap<String, InspectionFields>;

/// The property edit form: arbitrary keys, mostly strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PropertyFormData(pub Map<String, Value>);

impl PropertyFormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Non-blank string value at `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        non_blank(self.0.get(key).and_then(Value::as_str))
    }
}

/// `None` for missing, empty, or whitespace-only strings.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
