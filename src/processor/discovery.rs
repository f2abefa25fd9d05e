//! File discovery module for Argo data roots
//!
//! Walks each configured data root for profile CSV files and tags every file
//! with the [`SourceKind`] of the root it was found under.

use crate::config::DataRoot;
use crate::constants::PROFILE_FILE_EXTENSION;
use crate::error::Result;
use crate::models::SourceKind;
use std::path::{Path, PathBuf};
use tokio::{fs, task};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A profile file and the product it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// File discovery component for Argo data roots
#[derive(Debug)]
pub struct FileDiscovery {
    roots: Vec<DataRoot>,
    roots_missing: usize,
    unreadable_paths: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(roots: Vec<DataRoot>) -> Self {
        Self {
            roots,
            roots_missing: 0,
            unreadable_paths: 0,
        }
    }

    /// Roots that did not exist during the last discovery
    pub fn roots_missing(&self) -> usize {
        self.roots_missing
    }

    /// Directory entries that could not be read during the last discovery
    pub fn unreadable_paths(&self) -> usize {
        self.unreadable_paths
    }

    /// Discover all CSV files under every root, at any depth
    ///
    /// Data roots are usually laid out by data centre and float, but nothing
    /// depends on that:
    /// ```text
    /// core/
    ///   aoml/
    ///     1901234/
    ///       profiles.csv
    /// bgc/
    ///   coriolis/
    ///     6901234_bgc.csv
    /// ```
    ///
    /// Roots are visited in configured order and files within a root in path
    /// order. A missing root is logged and skipped.
    pub async fn discover_csv_files(&mut self) -> Result<Vec<DiscoveredFile>> {
        self.roots_missing = 0;
        self.unreadable_paths = 0;

        let mut files = Vec::new();

        for root in &self.roots {
            if !fs::try_exists(&root.path).await.unwrap_or(false) {
                warn!(
                    "Data root not found, skipping: {} ({})",
                    root.path.display(),
                    root.kind
                );
                self.roots_missing += 1;
                continue;
            }

            debug!("Searching for CSV files in: {}", root.path.display());

            let root_path = root.path.clone();
            let (paths, unreadable) = task::spawn_blocking(move || walk_root(&root_path)).await?;
            self.unreadable_paths += unreadable;

            debug!(
                "Found {} CSV files under {} ({})",
                paths.len(),
                root.path.display(),
                root.kind
            );

            files.extend(paths.into_iter().map(|path| DiscoveredFile {
                path,
                kind: root.kind,
            }));
        }

        Ok(files)
    }
}

/// Collect CSV files below `root` in sorted order, counting unreadable entries
fn walk_root(root: &Path) -> (Vec<PathBuf>, usize) {
    let mut files = Vec::new();
    let mut unreadable = 0usize;

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_csv_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Skipping unreadable path under {}: {}", root.display(), e);
                unreadable += 1;
            }
        }
    }

    (files, unreadable)
}

/// Check if a path is a CSV file
fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROFILE_FILE_EXTENSION))
}
