//! Hit records as served by the tracking endpoint
//!
//! Records are kept exactly as received. Formatting for display happens
//! only when a view asks for it, never in storage.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::hits::aggregate::client_family_key;

/// Display format for request timestamps (`10/19/2026, 2:05:09 PM`)
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Naive timestamp layouts accepted in addition to RFC 3339 / RFC 2822
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Identifier of a hit, used as the row key when rendering
///
/// Integer ids that fit in `i64` stay numeric; any other scalar is kept
/// as its JSON text. A missing or `null` id is the empty text id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum HitId {
    Number(i64),
    Text(String),
}

impl Default for HitId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl<'de> Deserialize<'de> for HitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(n.to_string())),
            Value::String(s) => Self::Text(s),
            Value::Null => Self::default(),
            other => Self::Text(other.to_string()),
        })
    }
}

impl From<i64> for HitId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for HitId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Request timestamp in whatever form the source sent it
///
/// Numbers are Unix epoch milliseconds. Text may be RFC 3339, RFC 2822
/// (the HTTP date style the tracking backend emits) or a naive ISO-8601
/// timestamp, which is read as wall-clock time in the display zone.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RequestTime {
    Epoch(f64),
    Text(String),
}

impl RequestTime {
    /// Interpret the raw value as an instant in `tz`, if it is recognizable
    pub fn instant_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            Self::Epoch(millis) => {
                if !millis.is_finite() {
                    return None;
                }
                DateTime::from_timestamp_millis(millis.floor() as i64)
                    .map(|instant| instant.with_timezone(tz))
            }
            Self::Text(text) => parse_timestamp(text, tz),
        }
    }

    /// Interpret the raw value as a UTC instant
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.instant_in(&Utc)
    }

    /// Locale-style display string in the local time zone
    pub fn display(&self) -> String {
        self.display_in(&Local)
    }

    /// Display string in the given time zone
    ///
    /// Values that cannot be interpreted are shown verbatim.
    pub fn display_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self.instant_in(tz) {
            Some(instant) => instant.format(DISPLAY_FORMAT).to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for RequestTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epoch(millis) => write!(f, "{}", millis),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn parse_timestamp<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(tz));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(text) {
        return Some(ts.with_timezone(tz));
    }

    // No offset given: wall-clock time in the display zone
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())?;
    tz.from_local_datetime(&naive).earliest()
}

/// Any JSON scalar as text; `null` and containers become `None`
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Numbers as epoch millis, strings as text, anything else `None`
fn lenient_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RequestTime>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(RequestTime::Epoch),
        Value::String(s) => Some(RequestTime::Text(s)),
        _ => None,
    })
}

/// One logged API request
///
/// Every field tolerates absence, `null` or an unexpected JSON type, so
/// one odd record degrades on its own instead of failing the whole
/// payload. Unusable descriptive values end up as `None`, which puts the
/// record in the empty-key group.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HitRecord {
    #[serde(default)]
    pub id: HitId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub request_time: Option<RequestTime>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub os: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_agent: Option<String>,
}

impl HitRecord {
    /// Create a record with only an id; all other fields empty
    pub fn new(id: impl Into<HitId>) -> Self {
        Self {
            id: id.into(),
            request_id: None,
            request_type: None,
            request_time: None,
            payload: None,
            content_type: None,
            ip_address: None,
            os: None,
            user_agent: None,
        }
    }

    /// Client-family grouping key (leading token of the user agent)
    pub fn client_family(&self) -> &str {
        client_family_key(self.user_agent.as_deref().unwrap_or_default())
    }

    /// Address grouping key, used verbatim
    pub fn address(&self) -> &str {
        self.ip_address.as_deref().unwrap_or_default()
    }

    /// Request time formatted for display, empty when absent
    pub fn request_time_display(&self) -> String {
        self.request_time
            .as_ref()
            .map(RequestTime::display)
            .unwrap_or_default()
    }
}
