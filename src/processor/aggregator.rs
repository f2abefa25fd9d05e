//! Platform aggregation
//!
//! Buckets normalized entries by float identifier across every ingested
//! file, remembering whether any contribution came from the BGC product.

use super::segmenter::CycleSegmenter;
use crate::models::{Entry, FloatRecord, SourceKind};
use std::collections::HashMap;

/// Entries collected for one float during an ingestion pass
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub kind: SourceKind,
    /// Entries in read order
    pub entries: Vec<Entry>,
}

/// Accumulates entries into per-platform buckets in first-seen order
#[derive(Debug, Default)]
pub struct PlatformAggregator {
    buckets: Vec<(String, Bucket)>,
    index: HashMap<String, usize>,
    entries: usize,
}

impl PlatformAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the bucket for `platform`, creating it on first sight
    pub fn add(&mut self, platform: String, kind: SourceKind, entry: Entry) {
        self.entries += 1;

        if let Some(&position) = self.index.get(&platform) {
            let bucket = &mut self.buckets[position].1;
            bucket.kind = bucket.kind.merge(kind);
            bucket.entries.push(entry);
            return;
        }

        self.index.insert(platform.clone(), self.buckets.len());
        self.buckets.push((
            platform,
            Bucket {
                kind,
                entries: vec![entry],
            },
        ));
    }

    pub fn bucket(&self, platform: &str) -> Option<&Bucket> {
        self.index
            .get(platform)
            .map(|&position| &self.buckets[position].1)
    }

    pub fn platform_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Segment every bucket into a finished record, keeping first-seen order
    pub fn finalize(self, segmenter: &CycleSegmenter) -> Vec<FloatRecord> {
        self.buckets
            .into_iter()
            .filter_map(|(platform, bucket)| segmenter.segment(platform, bucket))
            .collect()
    }
}
