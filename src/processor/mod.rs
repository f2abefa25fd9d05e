//! Ingestion pipeline.
//!
//! Orchestrates one complete pass over the configured data roots using
//! specialized modules for file discovery, platform aggregation and cycle
//! segmentation. Files are streamed one at a time, in discovery order.

pub mod aggregator;
pub mod discovery;
pub mod segmenter;

#[cfg(test)]
pub mod tests;

use self::{
    aggregator::PlatformAggregator,
    discovery::{DiscoveredFile, FileDiscovery},
    segmenter::CycleSegmenter,
};

use crate::cache::AggregateSource;
use crate::config::ArgoConfig;
use crate::error::Result;
use crate::models::{Aggregate, Entry, IngestStats};
use crate::normalize::{RowOutcome, normalize_row};
use crate::parser::read_rows;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs directory scan → reader → normalizer → aggregator → segmenter
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    config: ArgoConfig,
}

/// Row counters and accepted entries of a single file, committed only on success
#[derive(Debug, Default)]
struct FileContribution {
    entries: Vec<(String, Entry)>,
    rows_read: usize,
    rows_missing_platform: usize,
    rows_invalid_position: usize,
}

impl FileContribution {
    fn record(&mut self, outcome: RowOutcome) {
        self.rows_read += 1;
        match outcome {
            RowOutcome::Accepted { platform, entry } => self.entries.push((platform, entry)),
            RowOutcome::MissingPlatform => self.rows_missing_platform += 1,
            RowOutcome::InvalidPosition => self.rows_invalid_position += 1,
        }
    }
}

impl IngestionPipeline {
    /// Create a new pipeline
    pub fn new(config: ArgoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArgoConfig {
        &self.config
    }

    /// Run one full ingestion pass.
    ///
    /// Unreadable files and missing roots are logged, counted and skipped.
    /// Only a failure of the pass itself is returned as an error.
    pub async fn run(&self) -> Result<Aggregate> {
        let start_time = Instant::now();

        let mut discovery = FileDiscovery::new(self.config.roots.clone());
        let files = discovery.discover_csv_files().await?;

        let mut stats = IngestStats {
            roots_missing: discovery.roots_missing(),
            paths_unreadable: discovery.unreadable_paths(),
            files_discovered: files.len(),
            ..IngestStats::default()
        };

        info!(
            "Ingesting {} CSV files from {} data roots",
            files.len(),
            self.config.roots.len()
        );

        let progress = self.progress_bar(files.len());
        let mut aggregator = PlatformAggregator::new();

        for file in &files {
            if let Some(file_name) = file.path.file_name() {
                progress.set_message(format!("Reading: {}", file_name.to_string_lossy()));
            }

            match ingest_file(file).await {
                Ok(contribution) => {
                    debug!(
                        "Ingested {} ({}): {} of {} rows accepted",
                        file.path.display(),
                        file.kind,
                        contribution.entries.len(),
                        contribution.rows_read
                    );
                    stats.files_processed += 1;
                    stats.rows_read += contribution.rows_read;
                    stats.rows_missing_platform += contribution.rows_missing_platform;
                    stats.rows_invalid_position += contribution.rows_invalid_position;
                    stats.rows_accepted += contribution.entries.len();

                    for (platform, entry) in contribution.entries {
                        aggregator.add(platform, file.kind, entry);
                    }
                }
                Err(e) => {
                    warn!("Failed to ingest {}: {}", file.path.display(), e);
                    stats.files_failed += 1;
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        debug!(
            "Segmenting {} entries across {} platforms",
            aggregator.entry_count(),
            aggregator.platform_count()
        );

        let segmenter = CycleSegmenter::new(self.config.cycle);
        let records = aggregator.finalize(&segmenter);
        stats.platforms = records.len();

        info!(
            "Ingestion finished in {}ms: {} floats, {} rows accepted, {} rows dropped, {} files failed",
            start_time.elapsed().as_millis(),
            stats.platforms,
            stats.rows_accepted,
            stats.rows_dropped(),
            stats.files_failed
        );

        Ok(Aggregate::new(records, stats))
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

#[async_trait]
impl AggregateSource for IngestionPipeline {
    async fn build(&self) -> Result<Aggregate> {
        self.run().await
    }
}

/// Stream one file through the normalizer
async fn ingest_file(file: &DiscoveredFile) -> Result<FileContribution> {
    let mut contribution = FileContribution::default();
    read_rows(&file.path, |row| contribution.record(normalize_row(&row))).await?;
    Ok(contribution)
}
