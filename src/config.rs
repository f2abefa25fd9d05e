//! Configuration management and validation.
//!
//! Provides the configuration structures for data roots, cycle segmentation
//! thresholds and the transport view, with TOML file loading.

use crate::constants::{
    DEFAULT_BGC_ROOT, DEFAULT_CORE_ROOT, DEFAULT_CYCLE_LIMIT, DEFAULT_CYCLE_PRESSURE_GAP,
    DEFAULT_CYCLE_TIME_GAP_DAYS, DEFAULT_HISTORY_LIMIT,
};
use crate::error::{ArgoError, Result};
use crate::models::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory tree of profile files belonging to one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRoot {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl DataRoot {
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Gap thresholds used to cut a float's history into cycles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleThresholds {
    /// Time gap in julian days above which a new cycle starts
    pub time_gap_days: f64,

    /// Pressure drop above which a new ascent, and cycle, starts
    pub pressure_gap: f64,
}

impl Default for CycleThresholds {
    fn default() -> Self {
        Self {
            time_gap_days: DEFAULT_CYCLE_TIME_GAP_DAYS,
            pressure_gap: DEFAULT_CYCLE_PRESSURE_GAP,
        }
    }
}

/// Caps applied by the transport view; 0 disables a cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewLimits {
    /// Most recent history entries to keep
    pub history_limit: usize,

    /// Leading points to keep per cycle
    pub cycle_limit: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            cycle_limit: DEFAULT_CYCLE_LIMIT,
        }
    }
}

/// Global configuration for Argo processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgoConfig {
    /// Data roots, scanned in order
    pub roots: Vec<DataRoot>,

    /// Cycle segmentation thresholds
    pub cycle: CycleThresholds,

    /// Transport view caps
    pub view: ViewLimits,

    /// Draw a progress bar while ingesting files
    pub show_progress: bool,
}

impl Default for ArgoConfig {
    fn default() -> Self {
        Self {
            roots: vec![
                DataRoot::new(DEFAULT_CORE_ROOT, SourceKind::Core),
                DataRoot::new(DEFAULT_BGC_ROOT, SourceKind::Bgc),
            ],
            cycle: CycleThresholds::default(),
            view: ViewLimits::default(),
            show_progress: false,
        }
    }
}

impl ArgoConfig {
    /// Load configuration from a TOML file; omitted keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ArgoError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ArgoConfig = toml::from_str(&content).map_err(|e| {
            ArgoError::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Append a data root
    pub fn with_root(mut self, path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        self.roots.push(DataRoot::new(path, kind));
        self
    }

    /// Replace all data roots
    pub fn with_roots(mut self, roots: Vec<DataRoot>) -> Self {
        self.roots = roots;
        self
    }

    /// Set cycle segmentation thresholds
    pub fn with_cycle_thresholds(mut self, cycle: CycleThresholds) -> Self {
        self.cycle = cycle;
        self
    }

    /// Set transport view caps
    pub fn with_view_limits(mut self, view: ViewLimits) -> Self {
        self.view = view;
        self
    }

    /// Enable or disable the ingestion progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reject configurations that cannot produce a meaningful aggregate
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(ArgoError::configuration("At least one data root is required"));
        }

        let CycleThresholds {
            time_gap_days,
            pressure_gap,
        } = self.cycle;

        if !time_gap_days.is_finite() || time_gap_days < 0.0 {
            return Err(ArgoError::configuration(format!(
                "Cycle time gap must be a non-negative number of days, got {}",
                time_gap_days
            )));
        }

        if !pressure_gap.is_finite() || pressure_gap < 0.0 {
            return Err(ArgoError::configuration(format!(
                "Cycle pressure gap must be non-negative, got {}",
                pressure_gap
            )));
        }

        Ok(())
    }
}
