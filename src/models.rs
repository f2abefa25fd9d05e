//! Core data structures and types for Argo processing.
//!
//! Defines source kinds, normalized measurements, cycles, finalized float
//! records and the aggregate served to callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Data product a profile file was found under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Core Argo: pressure, temperature and salinity only
    Core,
    /// Biogeochemical Argo: adds oxygen, nitrate, pH and friends
    Bgc,
}

impl SourceKind {
    /// Combine the kind of an existing bucket with the kind of a new contribution.
    ///
    /// Biogeochemical is sticky: once any contribution is BGC the result stays BGC.
    pub fn merge(self, other: SourceKind) -> SourceKind {
        match (self, other) {
            (SourceKind::Core, SourceKind::Core) => SourceKind::Core,
            _ => SourceKind::Bgc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Core => "core",
            SourceKind::Bgc => "bgc",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub latitude: f64,
    pub longitude: f64,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub salinity: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub nitrate: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    pub organization: String,
    /// Julian-day surrogate used for ordering; may be a cycle index on degraded input
    pub time_value: Option<f64>,
    pub date_iso: Option<String>,
}

/// Profile variables of one entry as carried inside a [`Cycle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
    pub salinity: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub nitrate: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    pub time_value: Option<f64>,
}

impl From<&Entry> for ProfilePoint {
    fn from(entry: &Entry) -> Self {
        Self {
            latitude: entry.latitude,
            longitude: entry.longitude,
            pressure: entry.pressure,
            temperature: entry.temperature,
            salinity: entry.salinity,
            dissolved_oxygen: entry.dissolved_oxygen,
            nitrate: entry.nitrate,
            ph: entry.ph,
            time_value: entry.time_value,
        }
    }
}

/// One contiguous deployment phase of a float. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle {
    points: Vec<ProfilePoint>,
}

impl Cycle {
    /// Start a cycle with its first point
    pub(crate) fn starting_with(point: ProfilePoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub(crate) fn push(&mut self, point: ProfilePoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Finalized, externally visible record for one float
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatRecord {
    pub id: String,
    pub kind: SourceKind,
    /// Chronologically last entry
    pub latest: Entry,
    /// All entries, ascending by time value
    pub history: Vec<Entry>,
    /// Partition of `history` into deployment cycles, in order
    pub cycles: Vec<Cycle>,
}

/// Counters describing one ingestion pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub roots_missing: usize,
    /// Directory entries under a root that could not be read or followed
    pub paths_unreadable: usize,
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_missing_platform: usize,
    pub rows_invalid_position: usize,
    pub platforms: usize,
}

impl IngestStats {
    /// Rows that did not make it into any bucket
    pub fn rows_dropped(&self) -> usize {
        self.rows_missing_platform + self.rows_invalid_position
    }
}

/// All float records produced by one ingestion pass, read-only once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    records: Vec<FloatRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    stats: IngestStats,
}

impl Aggregate {
    pub fn new(records: Vec<FloatRecord>, stats: IngestStats) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();

        Self {
            records,
            index,
            stats,
        }
    }

    /// Records in first-seen order
    pub fn records(&self) -> &[FloatRecord] {
        &self.records
    }

    /// Look up one float by identifier
    pub fn get(&self, id: &str) -> Option<&FloatRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
