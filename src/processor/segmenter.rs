//! Cycle segmentation
//!
//! An Argo float repeatedly descends, drifts at parking depth and ascends to
//! transmit. Ordering a float's entries by time and cutting wherever time
//! jumps by more than a day, or pressure drops sharply (a new ascent starting
//! from depth), approximates one profile cycle per segment.

use super::aggregator::Bucket;
use crate::config::CycleThresholds;
use crate::models::{Cycle, Entry, FloatRecord, ProfilePoint};

/// Turns buckets into finished [`FloatRecord`]s
#[derive(Debug, Clone)]
pub struct CycleSegmenter {
    thresholds: CycleThresholds,
}

impl CycleSegmenter {
    pub fn new(thresholds: CycleThresholds) -> Self {
        Self { thresholds }
    }

    /// Sort a bucket chronologically and partition it into cycles.
    ///
    /// Returns `None` only for an empty bucket.
    pub fn segment(&self, id: String, bucket: Bucket) -> Option<FloatRecord> {
        let Bucket { kind, mut entries } = bucket;

        sort_chronologically(&mut entries);

        let latest = entries.last()?.clone();
        let cycles = self.split_cycles(&entries);

        Some(FloatRecord {
            id,
            kind,
            latest,
            history: entries,
            cycles,
        })
    }

    /// Partition chronologically sorted entries into cycles
    pub fn split_cycles(&self, entries: &[Entry]) -> Vec<Cycle> {
        let mut cycles: Vec<Cycle> = Vec::new();
        let mut previous: Option<&Entry> = None;

        for entry in entries {
            let point = ProfilePoint::from(entry);
            let extends_current =
                previous.is_some_and(|prev| !self.starts_new_cycle(prev, entry));

            match (extends_current, cycles.last_mut()) {
                (true, Some(cycle)) => cycle.push(point),
                _ => cycles.push(Cycle::starting_with(point)),
            }

            previous = Some(entry);
        }

        cycles
    }

    /// Whether `current` opens a new cycle after `previous`.
    ///
    /// Gaps are only evaluated when both sides carry the value. A previous
    /// pressure of exactly zero is a real surface reading and takes part in
    /// the pressure check.
    pub fn starts_new_cycle(&self, previous: &Entry, current: &Entry) -> bool {
        let time_gap = match (previous.time_value, current.time_value) {
            (Some(before), Some(now)) => (now - before).abs() > self.thresholds.time_gap_days,
            _ => false,
        };

        let ascent_restart = match (previous.pressure, current.pressure) {
            (Some(before), Some(now)) => {
                (now - before).abs() > self.thresholds.pressure_gap && now < before
            }
            _ => false,
        };

        time_gap || ascent_restart
    }
}

/// Stable ascending sort by time value, absent times first
pub fn sort_chronologically(entries: &mut [Entry]) {
    entries.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
}

fn sort_key(entry: &Entry) -> f64 {
    entry.time_value.unwrap_or(f64::NEG_INFINITY)
}
