//! Integration tests for the processor module
//!
//! Tests the complete ingestion pipeline using temporary core/BGC data roots.

pub mod multi_platform;

use crate::config::{ArgoConfig, DataRoot};
use crate::models::SourceKind;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Core and BGC roots inside a temporary directory
pub struct TestRoots {
    pub temp_dir: TempDir,
    pub core: PathBuf,
    pub bgc: PathBuf,
}

impl TestRoots {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let core = temp_dir.path().join("core");
        let bgc = temp_dir.path().join("bgc");
        fs::create_dir_all(&core).unwrap();
        fs::create_dir_all(&bgc).unwrap();
        Self {
            temp_dir,
            core,
            bgc,
        }
    }

    pub fn config(&self) -> ArgoConfig {
        ArgoConfig::default().with_roots(vec![
            DataRoot::new(&self.core, SourceKind::Core),
            DataRoot::new(&self.bgc, SourceKind::Bgc),
        ])
    }
}

/// Write `content` to `root/relative`, creating parent directories
pub fn write_csv(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}
