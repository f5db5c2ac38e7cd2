//! Recent-call history as reported by the backend
//!
//! History is read-only on the client. Entries are grouped by calendar day
//! (UTC) for display, newest day first.

use crate::domain::shared::lenient;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Outcome of a past call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    Outgoing,
    Missed,
    NotPicked,
    /// Any status string the backend reports that we don't model
    Other(String),
}

impl CallStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CallStatus::Outgoing => "Outgoing",
            CallStatus::Missed => "Missed",
            CallStatus::NotPicked => "Not Picked",
            CallStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Outgoing" => CallStatus::Outgoing,
            "Missed" => CallStatus::Missed,
            "Not Picked" => CallStatus::NotPicked,
            other => CallStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for CallStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CallStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CallStatus::parse(&raw))
    }
}

/// One row of the recent-calls list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallHistoryEntry {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(alias = "number", deserialize_with = "lenient::string")]
    pub phone: String,
    pub status: CallStatus,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl CallHistoryEntry {
    /// Entry for a call placed from this client, stamped now
    pub fn outgoing(phone: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            name: None,
            phone: phone.into(),
            status: CallStatus::Outgoing,
            timestamp: now,
        }
    }

    /// Name when known, otherwise the number
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.phone)
    }

    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// History grouped by day, newest day first; entries keep list order within a day
pub fn group_by_day(entries: &[CallHistoryEntry]) -> Vec<(NaiveDate, Vec<&CallHistoryEntry>)> {
    let mut days: BTreeMap<NaiveDate, Vec<&CallHistoryEntry>> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.day()).or_default().push(entry);
    }
    days.into_iter().rev().collect()
}

/// Section label for a day: "Today", "Yesterday", or the ISO date
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.checked_sub_days(Days::new(1)) == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%Y-%m-%d").to_string()
    }
}
