use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, error::Category};

/// One alert-grouping notification as delivered by the Alertmanager webhook
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub status: String,
    pub group_labels: Map<String, Value>,
    pub common_labels: Map<String, Value>,
    pub common_annotations: Map<String, Value>,
    pub alerts: Vec<Alert>,

    // Envelope fields are informational, a value of an unexpected type reads as absent
    #[serde(default, deserialize_with = "lenient_string")]
    pub receiver: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub group_key: Option<String>,
    #[serde(rename = "externalURL", default, deserialize_with = "lenient_string")]
    pub external_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub truncated_alerts: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Alert {
    pub labels: Map<String, Value>,
    pub annotations: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_string))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

impl Notification {
    /// Parse a notification from a request body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Why a request body was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Not valid JSON
    Malformed,
    /// Valid JSON without the expected keys or types
    InvalidStructure,
}

impl From<&serde_json::Error> for RejectReason {
    fn from(error: &serde_json::Error) -> Self {
        match error.classify() {
            Category::Data => RejectReason::InvalidStructure,
            Category::Syntax | Category::Eof | Category::Io => RejectReason::Malformed,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Malformed => write!(f, "malformed"),
            RejectReason::InvalidStructure => write!(f, "invalid_structure"),
        }
    }
}
