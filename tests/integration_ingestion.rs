//! Integration tests for the public ingestion and cache API
//!
//! These tests build small core and BGC data roots on disk and drive them
//! through the library exactly as the binary does.

use argo_processor::config::{DataRoot, ViewLimits};
use argo_processor::view::{FloatSummary, summarize};
use argo_processor::{
    AggregationCache, ArgoConfig, ArgoError, IngestionPipeline, SourceKind,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Core and BGC roots with one float spread across both products
fn sample_roots() -> (TempDir, ArgoConfig) {
    let temp_dir = TempDir::new().unwrap();
    let core = temp_dir.path().join("core");
    let bgc = temp_dir.path().join("bgc");

    write(
        &core,
        "aoml/1001/profiles.csv",
        "PLATFORM_NUMBER,LATITUDE,LONGITUDE,PRES,TEMP,PSAL,DATA_CENTRE,JULD\n\
         1001,10,20,5,18.5,35.0,AO,0\n\
         1001,10,20,\"1,000\",4.0,34.7,AO,0.5\n\
         2002,-5,120,10,25.0,34.0,JA,100\n",
    );
    write(
        &bgc,
        "coriolis/1001_bgc.csv",
        "\u{feff}platform_number,latitude,longitude,doxy,ph_in_situ_total,date\n\
         1001,11,21,210.5,8.01,1950-01-04\n",
    );

    let config = ArgoConfig::default().with_roots(vec![
        DataRoot::new(core, SourceKind::Core),
        DataRoot::new(bgc, SourceKind::Bgc),
    ]);

    (temp_dir, config)
}

/// Test the documented two-product scenario end to end
///
/// Purpose: Validate merging, kind promotion, time reconstruction and cycling
/// Benefit: Guards the externally visible shape of a float record
#[tokio::test]
async fn test_float_merges_core_and_bgc_products() {
    let (_temp_dir, config) = sample_roots();

    let aggregate = IngestionPipeline::new(config).run().await.unwrap();
    assert_eq!(aggregate.len(), 2);

    let record = aggregate.get("1001").unwrap();
    assert_eq!(record.kind, SourceKind::Bgc);
    assert_eq!(record.history.len(), 3);
    assert_eq!(record.cycles.len(), 2);

    // Quoted "1,000" is one non-numeric field, so pressure is absent
    assert_eq!(record.history[1].pressure, None);
    assert_eq!(record.history[1].temperature, Some(4.0));

    assert_eq!(record.latest.time_value, Some(3.0));
    assert_eq!(record.latest.dissolved_oxygen, Some(210.5));
    assert_eq!(record.latest.ph, Some(8.01));
    assert_eq!(
        record.latest.date_iso.as_deref(),
        Some("1950-01-04T00:00:00.000Z")
    );

    let other = aggregate.get("2002").unwrap();
    assert_eq!(other.kind, SourceKind::Core);
    assert_eq!(other.latest.organization, "JA");
}

/// Test the cache in front of the pipeline
///
/// Purpose: Validate single-flight builds and not-found lookups
/// Benefit: Ensures consumers see one consistent aggregate
#[tokio::test]
async fn test_cache_serves_pipeline_results() {
    let (_temp_dir, config) = sample_roots();
    let cache = AggregationCache::new(IngestionPipeline::new(config));

    let (a, b) = tokio::join!(cache.get_all(), cache.get_all());
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(std::sync::Arc::ptr_eq(&a, &b));

    assert!(cache.get_one("1001").await.unwrap().is_some());
    assert!(cache.get_one("0000").await.unwrap().is_none());
}

/// Test the capped JSON view
///
/// Purpose: Validate wire field names and history capping
/// Benefit: Keeps the transport contract stable for presentation layers
#[tokio::test]
async fn test_summary_json_shape() {
    let (_temp_dir, config) = sample_roots();
    let aggregate = IngestionPipeline::new(config).run().await.unwrap();
    let limits = ViewLimits {
        history_limit: 1,
        cycle_limit: 1,
    };

    let record = aggregate.get("1001").unwrap();
    let json = serde_json::to_value(FloatSummary::from_record(record, &limits)).unwrap();

    assert_eq!(json["id"], "1001");
    assert_eq!(json["kind"], "bgc");
    assert_eq!(json["historyTotal"], 3);
    assert_eq!(json["history"].as_array().unwrap().len(), 1);
    assert_eq!(json["latest"]["pH"], 8.01);
    assert_eq!(json["latest"]["dateIso"], "1950-01-04T00:00:00.000Z");

    assert_eq!(summarize(&aggregate, &limits).len(), 2);
}

/// Test configuration loading from TOML
///
/// Purpose: Validate the on-disk configuration format
/// Benefit: Catches accidental renames of configuration keys
#[test]
fn test_config_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("argo.toml");
    fs::write(
        &path,
        r#"
show_progress = true

[[roots]]
path = "/data/argo/core"
kind = "core"

[[roots]]
path = "/data/argo/bgc"
kind = "bgc"

[cycle]
time_gap_days = 2.0
pressure_gap = 75.0
"#,
    )
    .unwrap();

    let config = ArgoConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.roots.len(), 2);
    assert_eq!(config.roots[1].kind, SourceKind::Bgc);
    assert_eq!(config.cycle.time_gap_days, 2.0);
    assert_eq!(config.cycle.pressure_gap, 75.0);
    assert_eq!(config.view, ViewLimits::default());
    assert!(config.show_progress);
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "roots = 5\n").unwrap();

    let result = ArgoConfig::from_toml_file(&path);
    assert!(matches!(result, Err(ArgoError::Configuration { .. })));
}
