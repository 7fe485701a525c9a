use crate::error::XTypeError;
use crate::units::UnitSystem;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One archive record (observation over an interval)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Record {
    /// End of the archive interval
    #[serde(rename = "dateTime", with = "chrono::serde::ts_seconds")]
    pub date_time: DateTime<Utc>,
    #[serde(rename = "usUnits")]
    pub us_units: UnitSystem,
    #[serde(rename = "outTemp", default)]
    pub out_temp: Option<f64>,
    /// Archive interval length, in the unit system's interval unit
    #[serde(default)]
    pub interval: Option<f64>,
}

impl Record {
    pub fn new(
        date_time: DateTime<Utc>,
        us_units: UnitSystem,
        out_temp: Option<f64>,
        interval: Option<f64>,
    ) -> Self {
        Self {
            date_time,
            us_units,
            out_temp,
            interval,
        }
    }
}

/// Time range `(start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, stop: DateTime<Utc>) -> Self {
        Self { start, stop }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start < ts && ts <= self.stop
    }
}

pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<Record, XTypeError>> + 'a>;

/// Time-ordered access to stored records.
pub trait RecordSource {
    /// Records stamped within `span`, oldest first.
    fn records<'a>(&'a self, span: &TimeSpan) -> Result<RecordIter<'a>, XTypeError>;
}

/// Records held in memory, sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Record>,
}

impl MemorySource {
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.date_time);
        Self { records }
    }

    /// Load a JSON array of records.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read records file: {}", path.display()))?;
        let records: Vec<Record> =
            serde_json::from_str(&content).context("Failed to parse records JSON")?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for MemorySource {
    fn records<'a>(&'a self, span: &TimeSpan) -> Result<RecordIter<'a>, XTypeError> {
        let span = *span;
        Ok(Box::new(
            self.records
                .iter()
                .filter(move |r| span.contains(r.date_time))
                .cloned()
                .map(Ok),
        ))
    }
}
