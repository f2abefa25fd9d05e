//! Capped, borrowed views of float records for transport.
//!
//! A presentation layer rarely wants thousands of history entries per float.
//! [`FloatSummary`] borrows from the cached aggregate and trims lengths
//! without touching the underlying records.

use crate::config::ViewLimits;
use crate::models::{Aggregate, Entry, FloatRecord, ProfilePoint, SourceKind};
use serde::Serialize;

/// Lossy view of one [`FloatRecord`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatSummary<'a> {
    pub id: &'a str,
    pub kind: SourceKind,
    pub latest: &'a Entry,
    /// Most recent history entries, still ascending
    pub history: &'a [Entry],
    /// Leading points of every cycle
    pub cycles: Vec<&'a [ProfilePoint]>,
    pub history_total: usize,
    pub cycle_count: usize,
}

impl<'a> FloatSummary<'a> {
    pub fn from_record(record: &'a FloatRecord, limits: &ViewLimits) -> Self {
        Self {
            id: &record.id,
            kind: record.kind,
            latest: &record.latest,
            history: tail(&record.history, limits.history_limit),
            cycles: record
                .cycles
                .iter()
                .map(|cycle| head(cycle.points(), limits.cycle_limit))
                .collect(),
            history_total: record.history.len(),
            cycle_count: record.cycles.len(),
        }
    }
}

/// Views of every record in aggregate order
pub fn summarize<'a>(aggregate: &'a Aggregate, limits: &ViewLimits) -> Vec<FloatSummary<'a>> {
    aggregate
        .records()
        .iter()
        .map(|record| FloatSummary::from_record(record, limits))
        .collect()
}

fn tail<T>(items: &[T], limit: usize) -> &[T] {
    if limit == 0 || items.len() <= limit {
        items
    } else {
        &items[items.len() - limit..]
    }
}

fn head<T>(items: &[T], limit: usize) -> &[T] {
    if limit == 0 {
        items
    } else {
        &items[..items.len().min(limit)]
    }
}
