use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Textual timestamp layout used everywhere a timestamp leaves the core:
/// the persisted snapshot and outgoing change events.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Origin tag for a tracked manuscript, e.g. `IEEE` or `Elsevier`.
///
/// Open set: any label is a valid source, so new dashboards can be
/// added purely through configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(String);

impl Source {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of a manuscript. The `id` is only unique within
/// its source; the pair is unique across everything we ever store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub source: Source,
    pub id: String,
}

impl RecordKey {
    pub fn new(source: Source, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }

    /// The literal key used in the persisted snapshot document.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.source, self.id)
    }
}

/// One manuscript's state as observed in a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManuscriptRecord {
    pub source: Source,
    pub id: String,
    pub title: String,
    /// Free-text status label as currently displayed by the source.
    /// The only field whose change triggers a notification.
    pub status: String,
    /// Best-effort deep link to the record.
    pub url: Option<String>,
}

impl ManuscriptRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.source.clone(), self.id.clone())
    }
}

/// Second-precision local timestamp, rendered as `YYYY-MM-DD HH:MM:SS`.
///
/// Totally ordered, and the textual form orders the same way, so the
/// `first_seen <= last_checked` invariant survives a round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Persisted superset of a record: current field values plus provenance.
///
/// `first_seen` is fixed at the first observation of the key and never
/// moves; `last_checked` is overwritten on every run the key appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: String,
    pub title: String,
    pub status: String,
    pub source: Source,
    #[serde(default)]
    pub url: Option<String>,
    pub last_checked: Timestamp,
    pub first_seen: Timestamp,
}

/// A notification-worthy status transition. Derived per run, never
/// persisted. Only produced for keys that already existed; a brand-new
/// key has no old status to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub id: String,
    pub title: String,
    pub source: Source,
    pub old_status: String,
    pub new_status: String,
    pub changed_at: Timestamp,
    pub url: Option<String>,
}

/// Full persisted mapping of all known records, keyed by
/// [`RecordKey::storage_key`]. At most one entry per key by construction.
pub type Snapshot = BTreeMap<String, StoredEntry>;
